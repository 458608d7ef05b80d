use std::sync::Arc;

use crate::calendar::CoverageIndex;
use crate::config::AppConfig;
use crate::faceit::FaceitClient;
use crate::flights::VolantaClient;
use crate::usage::UsageLog;

/// Shared handles constructed once in `main` and injected into every
/// handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub faceit: Arc<FaceitClient>,
    pub flights: Arc<VolantaClient>,
    pub coverage: Arc<CoverageIndex>,
    pub player_log: Arc<UsageLog>,
    pub user_log: Arc<UsageLog>,
    pub bot_log: Arc<UsageLog>,
}
