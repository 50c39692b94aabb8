use std::sync::Arc;

use crate::auth::TokenCodec;
use crate::config::SecurityConfig;
use crate::store::Store;

/// Shared application state, created once at startup and passed to all
/// handlers. The token secret lives inside the codec; no handler sees it.
#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(security: &SecurityConfig, store: Arc<dyn Store>) -> Self {
        Self {
            codec: Arc::new(TokenCodec::new(
                &security.token_secret,
                security.token_ttl_days,
            )),
            store,
        }
    }
}
