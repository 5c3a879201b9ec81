//! Session token storage.
//!
//! The client never issues tokens; it only keeps the opaque string handed out by
//! `/auth/signin` and attaches it to outgoing requests. Storage is injected so the
//! browser build can use `localStorage` while tests keep it in memory.

use std::cell::RefCell;

/// Key under which the token is persisted
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Where the session token lives.
///
/// Implementations must not fail when no storage is available (e.g. outside a
/// browser): reads return `None` and writes do nothing.
pub trait SessionStore {
    fn token(&self) -> Option<String>;

    fn set_token(&self, token: &str);

    fn remove_token(&self);

    /// A present, non-empty token means the user is signed in
    fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|token| !token.is_empty())
    }
}

/// Session store kept in memory for the lifetime of the value
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RefCell<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RefCell::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn set_token(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn remove_token(&self) {
        self.token.borrow_mut().take();
    }
}
