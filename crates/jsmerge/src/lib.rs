pub mod banner;
pub mod combine;
pub mod config;
pub mod dirs;
pub mod error;
pub mod merge;
pub mod minify;
pub mod orchestrator;
pub mod output;
pub mod util;

pub use config::Config;
pub use error::{BuildError, BuildErrorKind};
pub use orchestrator::{BuildOrchestrator, BuildReport};
