use requestarr_core::ExternalId;
use serde::{Serialize, Serializer};

/// Uniform search result, identical in shape for every media kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub external_id: Option<ExternalId>,
    pub title: String,
    /// Serialized as the string `"N/A"` when unknown
    #[serde(serialize_with = "year_or_na")]
    pub year: Option<i32>,
    pub overview: String,
    pub poster_url: Option<String>,
    pub genres: Vec<String>,
    pub ratings: serde_json::Value,
    /// TV only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_count: Option<u32>,
}

fn year_or_na<S: Serializer>(year: &Option<i32>, serializer: S) -> Result<S::Ok, S::Error> {
    match year {
        Some(y) if *y > 0 => serializer.serialize_i32(*y),
        _ => serializer.serialize_str("N/A"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> SearchResultItem {
        SearchResultItem {
            external_id: Some(ExternalId::Numeric(603)),
            title: "The Matrix".into(),
            year: Some(1999),
            overview: "Neo.".into(),
            poster_url: None,
            genres: vec!["Action".into()],
            ratings: json!({}),
            season_count: None,
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "externalId": 603,
                "title": "The Matrix",
                "year": 1999,
                "overview": "Neo.",
                "posterUrl": null,
                "genres": ["Action"],
                "ratings": {}
            })
        );
    }

    #[test]
    fn test_missing_year_is_na() {
        let mut item = sample();
        item.year = None;
        assert_eq!(serde_json::to_value(&item).unwrap()["year"], json!("N/A"));

        item.year = Some(0);
        assert_eq!(serde_json::to_value(&item).unwrap()["year"], json!("N/A"));
    }

    #[test]
    fn test_season_count_present_for_tv() {
        let mut item = sample();
        item.season_count = Some(4);
        assert_eq!(serde_json::to_value(&item).unwrap()["seasonCount"], json!(4));
    }
}
