use std::ops::Deref;
use std::rc::Rc;

use shared::{ApiConfig, ExpenseApi};

use super::session::LocalStorageSession;
use super::transport::GlooTransport;

/// Shared handle to the expense API, cheap to clone into callbacks and props
#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<ExpenseApi>,
}

impl ApiClient {
    /// Client for the configured backend, using `fetch` and `localStorage`
    pub fn new() -> Self {
        Self::with_config(ApiConfig::from_env())
    }

    pub fn with_config(config: ApiConfig) -> Self {
        log::debug!("API base URL: {}", config.base_url);
        Self {
            inner: Rc::new(ExpenseApi::new(
                config,
                Rc::new(GlooTransport),
                Rc::new(LocalStorageSession),
            )),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for ApiClient {
    type Target = ExpenseApi;

    fn deref(&self) -> &ExpenseApi {
        &self.inner
    }
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
