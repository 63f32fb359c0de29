mod backup_vm;
mod board_vm;
mod log_vm;
mod record_vm;

pub use backup_vm::import_message;
pub use board_vm::{BoardColumnVm, BoardVm, map_board};
pub use log_vm::{LogRowVm, format_delta, map_log_rows};
pub use record_vm::{RecordInput, confirmation_message, parse_record_form};
