use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Three-state reading of a free-text facility field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmenityStatus {
    Yes,
    No,
    Unknown,
}

impl AmenityStatus {
    /// Single-character mark used in listings.
    #[must_use]
    pub fn mark(self) -> char {
        match self {
            AmenityStatus::Yes => '○',
            AmenityStatus::No => '×',
            AmenityStatus::Unknown => '?',
        }
    }
}

impl std::fmt::Display for AmenityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AmenityStatus::Yes => write!(f, "yes"),
            AmenityStatus::No => write!(f, "no"),
            AmenityStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Keyword lists used to classify facility text.
///
/// Matching is substring-based. Negative keywords win over positive ones, so
/// `"利用不可"` is [`AmenityStatus::No`] even though it contains `"利用可"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmenityKeywords {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Default for AmenityKeywords {
    fn default() -> Self {
        Self {
            positive: ["あり", "OK", "可", "利用可", "いる"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            negative: ["なし", "不可", "利用不可"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

impl AmenityKeywords {
    #[must_use]
    pub fn classify(&self, text: Option<&str>) -> AmenityStatus {
        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            return AmenityStatus::Unknown;
        };

        if self.negative.iter().any(|k| text.contains(k.as_str())) {
            AmenityStatus::No
        } else if self.positive.iter().any(|k| text.contains(k.as_str())) {
            AmenityStatus::Yes
        } else {
            AmenityStatus::Unknown
        }
    }
}

/// Load amenity keyword lists from a YAML file.
///
/// ```yaml
/// positive: ["あり", "OK"]
/// negative: ["なし"]
/// ```
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_amenity_keywords(path: &Path) -> Result<AmenityKeywords, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::KeywordsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let keywords: AmenityKeywords = serde_yaml::from_str(&content)?;

    validate_keywords(&keywords)?;

    Ok(keywords)
}

fn validate_keywords(keywords: &AmenityKeywords) -> Result<(), ConfigError> {
    if keywords.positive.is_empty() {
        return Err(ConfigError::Validation(
            "positive amenity keyword list must be non-empty".to_string(),
        ));
    }

    for keyword in keywords.positive.iter().chain(&keywords.negative) {
        if keyword.trim().is_empty() {
            return Err(ConfigError::Validation(
                "amenity keywords must be non-empty".to_string(),
            ));
        }
    }

    Ok(())
}
