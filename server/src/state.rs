use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};
use volcano_shared::{Dataset, DatasetSummary};

#[derive(Clone)]
pub struct AppState {
    pub static_dir: PathBuf,
    /// Summary of the dataset validated at startup; `None` when it could not be read.
    pub dataset: Option<Arc<DatasetSummary>>,
}

impl AppState {
    pub fn new(static_dir: PathBuf, dataset: Option<DatasetSummary>) -> Self {
        Self {
            static_dir,
            dataset: dataset.map(Arc::new),
        }
    }
}

/// Read and parse the dataset once so misconfiguration shows up in the logs.
/// A missing or unreadable file is only a warning: the site still serves.
pub async fn load_dataset_summary(path: &Path) -> Option<DatasetSummary> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, path = %path.display(), "failed to read volcano dataset");
            return None;
        }
    };
    let summary = Dataset::from_text(&text).summary();
    if summary.rows == 0 {
        warn!(path = %path.display(), "volcano dataset has no rows");
    }
    info!(
        rows = summary.rows,
        categories = summary.categories,
        projection = ?summary.projection,
        "loaded volcano dataset"
    );
    Some(summary)
}
