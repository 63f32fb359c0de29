use std::sync::Arc;

use services::{BackupService, ProgressService};

pub trait UiApp: Send + Sync {
    fn progress(&self) -> Arc<ProgressService>;
    fn backup(&self) -> Arc<BackupService>;

    /// Human-readable location of the backing file, shown in the sidebar.
    fn data_file_label(&self) -> String;
}

#[derive(Clone)]
pub struct AppContext {
    data_file_label: String,

    progress: Arc<ProgressService>,
    backup: Arc<BackupService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            data_file_label: app.data_file_label(),
            progress: app.progress(),
            backup: app.backup(),
        }
    }

    #[must_use]
    pub fn data_file_label(&self) -> &str {
        &self.data_file_label
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn backup(&self) -> Arc<BackupService> {
        Arc::clone(&self.backup)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
