use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::auth_service::{Authenticator, StaticAccounts};
use crate::services::skew_service::{Clock, SkewValidator, SystemClock};
use crate::state::kv::{new_store, UserStore};

/// Everything the routes need, built once per process.
#[derive(Clone)]
pub struct AppState {
    pub store: UserStore,
    pub accounts: Arc<dyn Authenticator>,
    pub skew: SkewValidator,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        Self::with_clock(cfg, Arc::new(SystemClock))
    }

    pub fn with_clock(cfg: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: new_store(),
            accounts: Arc::new(StaticAccounts::new(cfg.accounts.clone())),
            skew: SkewValidator::new(cfg.skew_tolerance_seconds, clock),
        }
    }
}
