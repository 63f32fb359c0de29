mod catalog;
mod progress;
mod settings;

pub use catalog::{CatalogError, DEFAULT_TOPICS, TopicCatalog};
pub use progress::{AddOutcome, Counts, LogEntry, ProgressError, ProgressState};
pub use settings::{
    DEFAULT_MIN_NONZERO_PCT, ResetPolicy, SettingsError, TrackerSettings, TrackerSettingsDraft,
    parse_bool_flag,
};
