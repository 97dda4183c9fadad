//! Core logic for vaadin-runner: classpath scanning, staleness detection,
//! forked-JVM command construction and the widgetset CDN client.

pub mod cdn;
pub mod command;
pub mod config;
pub mod error;
pub mod module;
pub mod process;
pub mod scanner;
pub mod staleness;
pub mod steps;
pub mod types;

pub use command::{CommandSpec, JavaCommand};
pub use config::ProjectConfig;
pub use error::{Error, Result};
pub use types::{BuildMode, ExecutionResult, LocationKind, SearchLocation};
