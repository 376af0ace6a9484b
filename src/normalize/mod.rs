//! Media-request normalization layer.
//!
//! Maps the uniform search and add contract onto whichever provider client
//! serves the requested [`MediaKind`](requestarr_core::MediaKind).

mod item;
mod request;
mod root_folder;
mod search;

pub use item::SearchResultItem;
pub use request::{build_payload, handle_add, title_slug, AddConfirmation, AddRequest};
pub use root_folder::resolve as resolve_root_folder;
pub use search::{handle_search, paginate, SearchPage, SearchParams, DEFAULT_PER_PAGE};
