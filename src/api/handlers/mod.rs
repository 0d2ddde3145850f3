//! API route handlers
//!
//! - Estimation: stateless face / blast / operation calculations
//! - Session: the shared presentation state and its action reducer
//! - Advisory: narrative analysis and assistant chat
//! - Reports, config, and health

mod advisory;
mod config;
mod estimate;
mod reports;
mod session;
mod status;

pub use advisory::*;
pub use config::*;
pub use estimate::*;
pub use reports::*;
pub use session::*;
pub use status::*;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::config::SubmineConfig;
use crate::llm::AdvisoryService;
use crate::session::AppState;

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Clone)]
pub struct DashboardState {
    /// Presentation state shared by every client
    pub app_state: Arc<RwLock<AppState>>,
    /// Narrative analysis and chat
    pub advisor: Arc<AdvisoryService>,
    /// Effective configuration (never carries the API key)
    pub config: Arc<SubmineConfig>,
    pub started_at: DateTime<Utc>,
}

impl DashboardState {
    pub fn new(config: SubmineConfig, advisor: AdvisoryService) -> Self {
        Self {
            app_state: Arc::new(RwLock::new(AppState::default())),
            advisor: Arc::new(advisor),
            config: Arc::new(config),
            started_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;

    #[tokio::test]
    async fn test_new_state_starts_from_defaults() {
        let state = DashboardState::new(
            SubmineConfig::default(),
            AdvisoryService::disabled(Language::Es),
        );
        let app = state.app_state.read().await;
        assert_eq!(*app, AppState::default());
        assert!(!state.advisor.is_enabled());
    }
}
