use crate::core::catalog::{DEFAULT_HOST, MAX_PAGE_SIZE};
use crate::core::report::DEFAULT_REPORT_THRESHOLD;
use crate::core::scoring::{KeywordTable, MAX_KEYWORD_VALUE};
use crate::core::ConfigProvider;
use crate::utils::error::{MtgaError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub catalog: CatalogConfig,
    pub cache: CacheConfig,
    pub report: ReportConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub host: String,
    pub timeout_seconds: u64,
    pub page_size: usize,
    pub max_pages: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            timeout_seconds: 30,
            page_size: 100,
            max_pages: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: super::home_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub threshold: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_REPORT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Replaces the built-in keyword table when present.
    pub keywords: Option<BTreeMap<String, u32>>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MtgaError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MtgaError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` placeholders; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MtgaError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("catalog.host", &self.catalog.host)?;
        validation::validate_range("catalog.timeout_seconds", self.catalog.timeout_seconds, 1, 600)?;
        validation::validate_range("catalog.page_size", self.catalog.page_size, 1, MAX_PAGE_SIZE)?;
        validation::validate_positive_number("catalog.max_pages", self.catalog.max_pages, 1)?;
        validation::validate_path("cache.dir", &self.cache.dir.to_string_lossy())?;

        if let Some(keywords) = &self.analysis.keywords {
            for (phrase, value) in keywords {
                if phrase.trim().is_empty() {
                    return Err(MtgaError::InvalidConfigValueError {
                        field: "analysis.keywords".to_string(),
                        value: phrase.clone(),
                        reason: "Keyword phrase cannot be empty".to_string(),
                    });
                }
                validation::validate_range(
                    &format!("analysis.keywords.{}", phrase),
                    *value,
                    0,
                    MAX_KEYWORD_VALUE,
                )?;
            }
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_host(&self) -> &str {
        &self.catalog.host
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.timeout_seconds)
    }

    fn page_size(&self) -> usize {
        self.catalog.page_size
    }

    fn max_pages(&self) -> usize {
        self.catalog.max_pages
    }

    fn cache_dir(&self) -> &Path {
        &self.cache.dir
    }

    fn report_threshold(&self) -> u32 {
        self.report.threshold
    }

    fn keyword_table(&self) -> KeywordTable {
        match &self.analysis.keywords {
            Some(keywords) => KeywordTable::new(keywords.iter().map(|(k, v)| (k.as_str(), *v))),
            None => KeywordTable::default(),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
