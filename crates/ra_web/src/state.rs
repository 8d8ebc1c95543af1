use std::sync::Arc;

use ra_scraper::AnalysisManager;

pub struct AppState {
    pub manager: Arc<AnalysisManager>,
}
