pub mod app_config;
pub mod config;
pub mod criteria;
pub mod filter;
pub mod restaurant;

pub use app_config::{AppConfig, Environment, ProviderKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use criteria::{Cuisine, SearchCriteria};
pub use filter::filter_restaurants;
pub use restaurant::{CanonicalRestaurant, DEFAULT_IMAGE_URL, DEFAULT_PRICE_TIER};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("validation error: {0}")]
    Validation(String),
}
