//! # gated-search
//!
//! A client for a verification-gated search API, with client-side
//! re-ranking and pagination.
//!
//! A mounted view performs its search at most once: the request gate
//! collapses duplicate invocations into a single network call, the
//! ranker re-orders the raw results with a link-graph tie-break layered
//! on top of the API's relevance score, and the paginator slices the
//! ranked list into fixed pages. The human-verification token comes from
//! an injected challenge provider and may be renewed at any time without
//! re-triggering the search.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gated_search::{HttpBackend, SearchConfig, SearchView, StaticProvider, ViewParams};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SearchConfig::new("https://search.example.com/api");
//!     let backend = Arc::new(HttpBackend::new(config));
//!     let provider = Arc::new(StaticProvider::new("verification-token"));
//!
//!     let params = ViewParams::new("rust programming", "verification-token");
//!     let mut view = SearchView::new(params, backend, provider);
//!     view.load().await?;
//!
//!     for result in view.page_results() {
//!         println!("{}: {}", result.title, result.url);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod gate;
mod paginator;
mod ranker;
mod result;
mod token;
mod view;

pub mod display;

pub use client::{HttpBackend, SearchBackend};
pub use config::{SearchConfig, ENV_BASE_URL, ENV_SITE_KEY};
pub use error::{Result, SearchError};
pub use gate::{RequestGate, RequestState};
pub use paginator::{
    page, page_window, total_pages, PaginationState, MAX_VISIBLE_PAGES, PAGE_SIZE,
};
pub use ranker::{rank, secondary_score};
pub use result::{LinkRef, SearchResponse, SearchResult, SearchStats, TimeTaken};
pub use token::{
    ChallengeProvider, StaticProvider, TokenCallback, TokenLifecycle, TokenState, WidgetHandle,
};
pub use view::{SearchView, ViewParams};
