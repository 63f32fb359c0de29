mod backup;
mod board;
mod log;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use backup::BackupView;
pub use board::BoardView;
pub use log::{LOG_PAGE_LIMIT, LogView};
pub use state::{ActionStatus, ViewError, ViewState, view_state_from_resource};
