//! Verification-token lifecycle and the challenge-provider seam.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::Result;

/// Callback invoked by the challenge provider each time it issues a token.
pub type TokenCallback = Box<dyn Fn(String) + Send + Sync>;

/// Opaque handle to a rendered challenge widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WidgetHandle(String);

impl WidgetHandle {
    /// Creates a handle from a provider-assigned identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Provider-assigned identifier.
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Capability interface over the external challenge provider.
///
/// The provider is opaque: it can load its script (once per process),
/// render a widget bound to a token callback, and dispose a rendered
/// widget. The callback may fire more than once; every invocation after
/// the first carries a replacement token.
pub trait ChallengeProvider: Send + Sync {
    /// Ensures the provider script is loaded, loading it only if its
    /// global handle does not already exist.
    fn ensure_loaded(&self) -> Result<()>;

    /// Renders a widget into the named container, wiring the token
    /// callback.
    fn render(&self, container_id: &str, on_token: TokenCallback) -> Result<WidgetHandle>;

    /// Releases a rendered widget registration.
    fn dispose(&self, handle: WidgetHandle);
}

/// Lifecycle of the verification token for one mounted view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// No widget has been rendered yet.
    Unrendered,
    /// A widget is rendered and waiting for the provider to call back.
    Rendered,
    /// The provider delivered the first token.
    TokenReady,
    /// The provider replaced the token at least once.
    Renewed,
}

struct TokenSlot {
    state: TokenState,
    token: Option<String>,
}

impl TokenSlot {
    fn accept(&mut self, token: String) {
        self.state = match self.state {
            TokenState::TokenReady | TokenState::Renewed => TokenState::Renewed,
            _ => TokenState::TokenReady,
        };
        self.token = Some(token);
    }
}

/// Owns the verification token for one view.
///
/// The token is read-only everywhere else. A renewal replaces the current
/// token for future navigations; it never re-triggers a search that
/// already went through the request gate. Dropping the lifecycle disposes
/// any live widget through the provider, so no provider-side registration
/// leaks.
pub struct TokenLifecycle {
    provider: Arc<dyn ChallengeProvider>,
    container_id: String,
    slot: Arc<Mutex<TokenSlot>>,
    handle: Option<WidgetHandle>,
}

impl TokenLifecycle {
    /// Creates an unmounted lifecycle bound to a widget container.
    pub fn new(provider: Arc<dyn ChallengeProvider>, container_id: impl Into<String>) -> Self {
        Self {
            provider,
            container_id: container_id.into(),
            slot: Arc::new(Mutex::new(TokenSlot {
                state: TokenState::Unrendered,
                token: None,
            })),
            handle: None,
        }
    }

    /// Creates a lifecycle seeded with a token obtained elsewhere, e.g.
    /// carried in the page address of a results view.
    pub fn with_token(
        provider: Arc<dyn ChallengeProvider>,
        container_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let lifecycle = Self::new(provider, container_id);
        lifecycle.slot().accept(token.into());
        lifecycle
    }

    /// Renders the challenge widget and begins listening for tokens.
    ///
    /// Re-mounting disposes any previously rendered widget first, so a
    /// view never holds two live widget registrations.
    pub fn mount(&mut self) -> Result<()> {
        self.provider.ensure_loaded()?;
        if let Some(handle) = self.handle.take() {
            self.provider.dispose(handle);
        }

        let slot = Arc::clone(&self.slot);
        let handle = self.provider.render(
            &self.container_id,
            Box::new(move |token| {
                debug!("challenge provider delivered a token");
                if let Ok(mut slot) = slot.lock() {
                    slot.accept(token);
                }
            }),
        )?;

        {
            let mut slot = self.slot();
            if slot.state == TokenState::Unrendered {
                slot.state = TokenState::Rendered;
            }
        }
        self.handle = Some(handle);
        Ok(())
    }

    /// Current token, if the provider has delivered one.
    pub fn current_token(&self) -> Option<String> {
        self.slot().token.clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TokenState {
        self.slot().state
    }

    /// Whether a widget is currently rendered.
    pub fn is_mounted(&self) -> bool {
        self.handle.is_some()
    }

    fn slot(&self) -> MutexGuard<'_, TokenSlot> {
        self.slot.lock().expect("token slot lock poisoned")
    }
}

impl Drop for TokenLifecycle {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.provider.dispose(handle);
        }
    }
}

/// Provider for hosts without a challenge widget.
///
/// Hands every rendered widget the same pre-issued token, synchronously.
/// Useful for command-line callers that obtained a token out of band.
pub struct StaticProvider {
    token: String,
    rendered: AtomicUsize,
}

impl StaticProvider {
    /// Creates a provider that always yields `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            rendered: AtomicUsize::new(0),
        }
    }
}

impl ChallengeProvider for StaticProvider {
    fn ensure_loaded(&self) -> Result<()> {
        Ok(())
    }

    fn render(&self, container_id: &str, on_token: TokenCallback) -> Result<WidgetHandle> {
        let id = self.rendered.fetch_add(1, Ordering::Relaxed);
        on_token(self.token.clone());
        Ok(WidgetHandle::new(format!("{}#{}", container_id, id)))
    }

    fn dispose(&self, _handle: WidgetHandle) {}
}
