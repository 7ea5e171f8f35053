//! Session state management
//!
//! The bearer token is the only piece of client state that outlives the
//! process. [`SessionStore`] persists it; [`SessionState`] owns the current
//! [`Session`] and broadcasts every transition over a watch channel so the
//! navigation layer can switch stacks.

use std::sync::Arc;
use storage::{KvError, KvStore};
use tokio::sync::watch;

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";

/// Session-related errors
#[derive(Debug, thiserror::Error)]
pub enum SessionStateError {
    /// Reading or writing the persisted token failed
    #[error("Storage error: {0}")]
    Storage(#[from] KvError),

    /// Attempted to sign in with an empty token
    #[error("Refusing to store an empty session token")]
    EmptyToken,
}

/// Result type for session state operations
pub type Result<T> = std::result::Result<T, SessionStateError>;

/// Authentication state of the app
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Session {
    /// No token; the login stack is shown
    #[default]
    Unauthenticated,

    /// Signed in with a bearer token
    Authenticated {
        /// Bearer token for backend calls
        token: String,
    },
}

impl Session {
    /// Bearer token, if signed in
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Unauthenticated => None,
            Session::Authenticated { token } => Some(token),
        }
    }

    /// Whether a token is present
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Session::Unauthenticated => f.write_str("Unauthenticated"),
            Session::Authenticated { .. } => f.write_str("Authenticated { token: <redacted> }"),
        }
    }
}

// =============================================================================
// Persistence
// =============================================================================

/// Device-local token persistence
#[derive(Debug, Clone)]
pub struct SessionStore {
    kv: KvStore,
}

impl SessionStore {
    /// Create a store over a key-value store
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// Load the persisted token; an empty token counts as absent
    pub fn load(&self) -> Result<Option<String>> {
        let token: Option<String> = self.kv.get(TOKEN_KEY)?;
        Ok(token.filter(|t| !t.is_empty()))
    }

    /// Persist a token
    pub fn save(&self, token: &str) -> Result<()> {
        self.kv.set(TOKEN_KEY, token)?;
        self.kv.flush()?;
        Ok(())
    }

    /// Remove the persisted token
    pub fn clear(&self) -> Result<()> {
        self.kv.remove(TOKEN_KEY)?;
        self.kv.flush()?;
        Ok(())
    }
}

// =============================================================================
// Shared State
// =============================================================================

/// The single shared session, handed out by cloning
#[derive(Debug, Clone)]
pub struct SessionState {
    store: SessionStore,
    tx: Arc<watch::Sender<Session>>,
}

impl SessionState {
    /// Create an unauthenticated session backed by `store`
    pub fn new(store: SessionStore) -> Self {
        let (tx, _rx) = watch::channel(Session::Unauthenticated);
        Self { store, tx: Arc::new(tx) }
    }

    /// Load the persisted token at boot
    pub fn restore(&self) -> Result<Session> {
        let session = match self.store.load()? {
            Some(token) => Session::Authenticated { token },
            None => Session::Unauthenticated,
        };

        tracing::info!(authenticated = session.is_authenticated(), "session restored");
        self.tx.send_replace(session.clone());
        Ok(session)
    }

    /// Persist a fresh token and switch to the authenticated state
    pub fn sign_in(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        if token.is_empty() {
            return Err(SessionStateError::EmptyToken);
        }

        self.store.save(&token)?;
        self.tx.send_replace(Session::Authenticated { token });
        tracing::info!("signed in");
        Ok(())
    }

    /// Drop the token, in memory first so a storage failure still signs out
    pub fn sign_out(&self) -> Result<()> {
        let previous = self.tx.send_replace(Session::Unauthenticated);
        if previous.is_authenticated() {
            tracing::info!("signed out");
        }

        self.store.clear()
    }

    /// Current session
    pub fn current(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Current bearer token
    pub fn token(&self) -> Option<String> {
        self.tx.borrow().token().map(str::to_string)
    }

    /// Whether a token is present
    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated()
    }

    /// Watch session transitions
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }
}
