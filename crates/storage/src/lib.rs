#![forbid(unsafe_code)]

pub mod json;
pub mod repository;
pub mod snapshot;
