pub mod cli;
pub mod extract;
pub mod fetcher;
pub mod logging;
pub mod manager;

pub use cli::{handle_command, render_about, render_report, AnalyzeArgs};
pub use extract::extract_text;
pub use fetcher::{FetchConfig, HttpFetcher};
pub use logging::{init_logging, Logger};
pub use manager::{AnalysisManager, EMPTY_URL_MESSAGE, STAGES};

pub mod prelude {
    pub use super::manager::AnalysisManager;
    pub use ra_core::{Analysis, Error, Result};
}
