use super::SearchResultItem;
use crate::arr::ProviderRegistry;
use requestarr_core::{Error, MediaKind, Result};
use serde::{Deserialize, Serialize};

/// Page size used when none is configured.
pub const DEFAULT_PER_PAGE: usize = 10;

/// Raw `/search` query parameters.
///
/// Everything is kept as an optional string so validation, not the
/// extractor, decides which inputs are rejected and with what message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub page: Option<String>,
}

impl SearchParams {
    pub fn new(query: &str, kind: &str) -> Self {
        Self {
            query: Some(query.to_string()),
            kind: Some(kind.to_string()),
            page: None,
        }
    }

    pub fn with_page(mut self, page: &str) -> Self {
        self.page = Some(page.to_string());
        self
    }

    /// Check required fields and parse the kind and page.
    fn validate(&self) -> Result<(&str, MediaKind, usize)> {
        let query = self.query.as_deref().map(str::trim).unwrap_or_default();
        let kind = self.kind.as_deref().map(str::trim).unwrap_or_default();
        if query.is_empty() || kind.is_empty() {
            return Err(Error::missing("Missing query or type"));
        }

        let kind: MediaKind = kind.parse()?;

        let page = match self.page.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => match raw.parse::<usize>() {
                Ok(page) if page > 0 => page,
                _ => return Err(Error::validation("page must be a positive integer")),
            },
        };

        Ok((query, kind, page))
    }
}

/// One page of uniform search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub items: Vec<SearchResultItem>,
    pub has_next_page: bool,
}

/// Slice `items` to the 1-based `page`.
///
/// Returns the page and whether any items remain beyond it. Pages past the
/// end are empty.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> (Vec<T>, bool) {
    let total = items.len();
    let end = page.saturating_mul(per_page);
    let start = end.saturating_sub(per_page).min(total);
    let has_next = total > end;

    let page_items = items
        .into_iter()
        .skip(start)
        .take(end.min(total) - start)
        .collect();
    (page_items, has_next)
}

/// Run a provider lookup and return one page of uniform results.
pub async fn handle_search(
    registry: &ProviderRegistry,
    params: &SearchParams,
    per_page: usize,
) -> Result<SearchPage> {
    let (query, kind, page) = params.validate()?;
    let client = registry.get(kind)?;

    tracing::debug!("Searching {} for {:?} (page {})", kind.provider_name(), query, page);
    let raw = client.lookup(query).await?;
    let total = raw.len();

    let uniform: Vec<SearchResultItem> = raw
        .into_iter()
        .map(|item| client.to_uniform_item(item))
        .collect();
    let (items, has_next_page) = paginate(uniform, page, per_page.max(1));

    tracing::debug!(
        "{} returned {} results, serving {} on page {}",
        kind.provider_name(),
        total,
        items.len(),
        page
    );

    Ok(SearchPage {
        items,
        has_next_page,
    })
}
