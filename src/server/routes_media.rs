use crate::normalize::{self, AddConfirmation, AddRequest, SearchPage, SearchParams};
use crate::server::error::AppError;
use crate::server::request_id::RequestId;
use crate::server::AppContext;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::{get, post},
    Extension, Json, Router,
};

pub fn media_routes() -> Router<AppContext> {
    Router::new()
        .route("/search", get(search))
        .route("/request", post(request_media))
}

fn tag(request_id: &Option<Extension<RequestId>>) -> impl Fn(AppError) -> AppError + '_ {
    move |err| match request_id {
        Some(Extension(RequestId(id))) => err.with_request_id(id.clone()),
        None => err,
    }
}

async fn search(
    State(ctx): State<AppContext>,
    request_id: Option<Extension<RequestId>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchPage>, AppError> {
    let Query(params) = params.map_err(AppError::from).map_err(tag(&request_id))?;

    normalize::handle_search(&ctx.providers, &params, ctx.config.server.results_per_page)
        .await
        .map(Json)
        .map_err(AppError::from)
        .map_err(tag(&request_id))
}

async fn request_media(
    State(ctx): State<AppContext>,
    request_id: Option<Extension<RequestId>>,
    body: Result<Json<AddRequest>, JsonRejection>,
) -> Result<Json<AddConfirmation>, AppError> {
    let Json(body) = body.map_err(AppError::from).map_err(tag(&request_id))?;

    normalize::handle_add(&ctx.providers, &body)
        .await
        .map(Json)
        .map_err(AppError::from)
        .map_err(tag(&request_id))
}
