//! Bridge between the UI thread and the tokio-backed fetch worker.

pub mod commands;
pub mod runtime;
