pub mod config;
pub mod path_processing;

pub use config::{API_URL_ENV, AppConfig, CONFIG_PATH_ENV, ConfigError, default_config_path, validate_base_url};
pub use path_processing::{data_path, expand_tilde};
