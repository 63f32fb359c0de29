#![forbid(unsafe_code)]

pub mod board;
pub mod labels;
pub mod model;
pub mod palette;
pub mod time;

pub use time::Clock;
