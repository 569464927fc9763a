pub mod config;
pub mod config_storage;
pub mod paths;
pub mod token;

pub use crate::config::{ApiConfig, AssistantConfig, AuthConfig, CookmateConfig};
pub use crate::config_storage::{ConfigStorage, load_config};
pub use crate::paths::CookmatePaths;
pub use crate::token::StaticTokenProvider;
