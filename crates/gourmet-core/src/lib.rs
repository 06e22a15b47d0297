pub mod amenity;
pub mod app_config;
pub mod config;
pub mod criteria;
pub mod shop;

use thiserror::Error;

pub use amenity::{load_amenity_keywords, AmenityKeywords, AmenityStatus};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use criteria::{Amenity, Coordinates, SearchCriteria, SearchRange};
pub use shop::{BudgetMaster, GenreMaster, Shop};

/// Number of shops per upstream page. Must match the `count` the gourmet
/// API is asked for.
pub const PAGE_SIZE: u32 = 20;

/// 1-based upstream `start` offset for a 1-based page number.
///
/// Page `0` is treated as page `1`.
#[must_use]
pub fn start_offset(page: u32) -> u32 {
    page.saturating_sub(1).saturating_mul(PAGE_SIZE).saturating_add(1)
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid search range {0}; must be between 1 and 5")]
    InvalidRange(u8),

    #[error("unknown amenity flag: {0}")]
    UnknownAmenity(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read amenity keywords file {path}: {source}")]
    KeywordsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse amenity keywords file: {0}")]
    KeywordsFileParse(#[from] serde_yaml::Error),

    #[error("config validation failed: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_offset_is_one_based() {
        assert_eq!(start_offset(1), 1);
        assert_eq!(start_offset(2), 21);
        assert_eq!(start_offset(3), 41);
    }

    #[test]
    fn start_offset_treats_page_zero_as_first_page() {
        assert_eq!(start_offset(0), 1);
    }
}
