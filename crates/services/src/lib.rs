#![forbid(unsafe_code)]

pub mod app_services;
pub mod backup_service;
pub mod error;
pub mod progress_service;

pub use rounds_core::Clock;

pub use app_services::AppServices;
pub use backup_service::{BACKUP_FILE_NAME, BackupService, ExportFormat, ImportSummary};
pub use error::{AppServicesError, BackupError, ProgressServiceError};
pub use progress_service::ProgressService;
