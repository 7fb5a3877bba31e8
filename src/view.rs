//! Results-view composition: token → gate → ranker → paginator.

use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use crate::client::SearchBackend;
use crate::gate::{RequestGate, RequestState};
use crate::paginator::{PaginationState, PAGE_SIZE};
use crate::ranker;
use crate::result::{SearchResult, SearchStats};
use crate::token::{ChallengeProvider, TokenLifecycle, TokenState};
use crate::Result;

/// Container the challenge widget renders into.
const WIDGET_CONTAINER_ID: &str = "challenge-widget";

/// External parameters addressing a results view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewParams {
    /// Free-text query.
    pub query: String,
    /// Verification token issued by the challenge provider.
    pub token: String,
}

impl ViewParams {
    /// Creates view parameters.
    pub fn new(query: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            token: token.into(),
        }
    }

    /// Extracts the `q` and `token` parameters from a page address.
    /// Missing parameters yield empty strings.
    pub fn from_url(address: &str) -> Result<Self> {
        let url = Url::parse(address)?;
        let mut params = Self::new("", "");
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "q" => params.query = value.into_owned(),
                "token" => params.token = value.into_owned(),
                _ => {}
            }
        }
        Ok(params)
    }
}

/// A mounted search results view.
///
/// Owns the single-flight gate, the token lifecycle, the ranked result
/// list, its stats and the pagination state. Ranked results, stats and
/// pagination always change together, so no consumer observes stats from
/// one response paired with results from another. An error leaves the
/// view interactive with an empty result list and a user-facing message.
pub struct SearchView {
    query: String,
    gate: RequestGate,
    tokens: TokenLifecycle,
    results: Vec<SearchResult>,
    stats: SearchStats,
    pagination: PaginationState,
    error: Option<String>,
    page_size: usize,
}

impl SearchView {
    /// Creates a view for the given address parameters.
    ///
    /// A token carried in the parameters seeds the lifecycle; an empty
    /// one leaves it waiting on the challenge widget.
    pub fn new(
        params: ViewParams,
        backend: Arc<dyn SearchBackend>,
        provider: Arc<dyn ChallengeProvider>,
    ) -> Self {
        let tokens = if params.token.is_empty() {
            TokenLifecycle::new(provider, WIDGET_CONTAINER_ID)
        } else {
            TokenLifecycle::with_token(provider, WIDGET_CONTAINER_ID, params.token)
        };
        Self {
            query: params.query,
            gate: RequestGate::new(backend),
            tokens,
            results: Vec::new(),
            stats: SearchStats::default(),
            pagination: PaginationState::new(0, PAGE_SIZE),
            error: None,
            page_size: PAGE_SIZE,
        }
    }

    /// Sets the display page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self.pagination = PaginationState::new(0, page_size);
        self
    }

    /// Renders the challenge widget for token renewal.
    pub fn mount_widget(&mut self) -> Result<()> {
        self.tokens.mount()
    }

    /// Performs the view's search request and installs the ranked
    /// outcome.
    ///
    /// Safe to call any number of times: the request gate collapses
    /// repeated invocations into at most one network call, and later
    /// token renewals never re-trigger a search that already went
    /// through. On failure the ranked list is emptied, the user-facing
    /// message recorded, and the error propagated.
    pub async fn load(&mut self) -> Result<()> {
        let token = self.tokens.current_token().unwrap_or_default();
        match self.gate.execute(&self.query, &token).await {
            Ok(Some(response)) => {
                let stats = SearchStats::from_response(&response);
                let ranked = ranker::rank(response.results);
                debug!(count = ranked.len(), "installing ranked results");
                // Swapped in together; a consumer never sees a torn update.
                self.pagination = PaginationState::new(ranked.len(), self.page_size);
                self.results = ranked;
                self.stats = stats;
                self.error = None;
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                warn!(error = %e, "search request failed");
                self.results.clear();
                self.stats = SearchStats::default();
                self.pagination = PaginationState::new(0, self.page_size);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Query text this view was addressed with.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The full ranked result list.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// The slice of ranked results for the current page.
    pub fn page_results(&self) -> &[SearchResult] {
        self.pagination.slice(&self.results)
    }

    /// Stats for the installed response.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Pagination state.
    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Attempts to navigate to the requested page. Out-of-range requests
    /// are silently rejected.
    pub fn change_page(&mut self, requested: usize) -> bool {
        self.pagination.change_page(requested)
    }

    /// Page currently shown.
    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    /// User-facing message for the last failed load, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// State of the single-flight request gate.
    pub fn request_state(&self) -> RequestState {
        self.gate.state()
    }

    /// State of the verification-token lifecycle.
    pub fn token_state(&self) -> TokenState {
        self.tokens.state()
    }

    /// Current verification token, if one has been delivered.
    pub fn current_token(&self) -> Option<String> {
        self.tokens.current_token()
    }
}
