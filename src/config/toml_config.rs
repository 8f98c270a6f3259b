use crate::core::corpus::DEFAULT_MINIMUM_INTERACTIONS;
use crate::core::layout::DEFAULT_NAME_TOLERANCE_RATIO;
use crate::core::ConfigProvider;
use crate::utils::error::{BechdelError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub analysis: AnalysisInfo,
    pub corpus: CorpusConfig,
    pub lexicon: LexiconConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    pub report: ReportConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisInfo {
    pub name: String,
    pub description: Option<String>,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    pub scripts_dir: String,
    pub num_scripts: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconConfig {
    pub male_names: String,
    pub female_names: String,
    #[serde(default)]
    pub extra_male_tags: Vec<String>,
    #[serde(default)]
    pub extra_female_tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub name_tolerance_ratio: Option<f64>,
    pub minimum_interactions: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output_path: String,
    pub formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    /// "compact" (default) or "json".
    pub log_format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BechdelError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SCRIPTS_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BechdelError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("analysis.name", &self.analysis.name)?;
        validation::validate_path("corpus.scripts_dir", &self.corpus.scripts_dir)?;
        validation::validate_path("lexicon.male_names", &self.lexicon.male_names)?;
        validation::validate_path("lexicon.female_names", &self.lexicon.female_names)?;
        validation::validate_path("report.output_path", &self.report.output_path)?;
        validation::validate_positive_number("corpus.num_scripts", self.num_scripts(), 1)?;
        validation::validate_range(
            "extraction.name_tolerance_ratio",
            self.name_tolerance_ratio(),
            0.0,
            1.0,
        )?;
        validation::validate_output_formats("report.formats", &self.report.formats)?;

        if let Some(format) = self.log_format() {
            if format != "compact" && format != "json" {
                return Err(BechdelError::InvalidConfigValueError {
                    field: "monitoring.log_format".to_string(),
                    value: format.to_string(),
                    reason: "Valid formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_format(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_format.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn scripts_dir(&self) -> &str {
        &self.corpus.scripts_dir
    }

    fn male_names_path(&self) -> &str {
        &self.lexicon.male_names
    }

    fn female_names_path(&self) -> &str {
        &self.lexicon.female_names
    }

    fn num_scripts(&self) -> usize {
        self.corpus.num_scripts.unwrap_or(10)
    }

    fn name_tolerance_ratio(&self) -> f64 {
        self.extraction
            .name_tolerance_ratio
            .unwrap_or(DEFAULT_NAME_TOLERANCE_RATIO)
    }

    fn minimum_interactions(&self) -> usize {
        self.extraction
            .minimum_interactions
            .unwrap_or(DEFAULT_MINIMUM_INTERACTIONS)
    }

    fn seed(&self) -> Option<u64> {
        self.corpus.seed
    }

    fn output_path(&self) -> &str {
        &self.report.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.report.formats
    }

    fn extra_male_tags(&self) -> &[String] {
        &self.lexicon.extra_male_tags
    }

    fn extra_female_tags(&self) -> &[String] {
        &self.lexicon.extra_female_tags
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
