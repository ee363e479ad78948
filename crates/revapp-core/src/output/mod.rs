//! Job log output

pub mod commands;
pub mod subscriber;

pub use commands::{escape_data, workflow_command};
pub use subscriber::{init, GhaFormat, LogFormat};
