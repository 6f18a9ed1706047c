use crate::adapters::gemini::{DEFAULT_MODEL, GOOGLE_API_BASE};
use crate::core::ConfigProvider;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{
    validate_file_exists, validate_non_empty_string, validate_path, validate_required_field,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub job: JobConfig,
    pub source: SourceConfig,
    pub model: ModelConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub input_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub name: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ConvertError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ConvertError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 未配置 api_key 時改用環境變數
    pub fn resolve_api_key(&mut self) {
        if self.model.api_key.is_none() {
            self.model.api_key = std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let api_key = validate_required_field("model.api_key", &self.model.api_key)?;
        validate_non_empty_string("model.api_key", api_key)?;

        // 替換失敗時佔位符會原樣留下
        if api_key.contains("${") {
            return Err(ConvertError::InvalidConfigValueError {
                field: "model.api_key".to_string(),
                value: api_key.clone(),
                reason: "Unresolved environment variable placeholder".to_string(),
            });
        }

        if let Some(endpoint) = &self.model.endpoint {
            validate_url("model.endpoint", endpoint)?;
        }

        validate_path("output.path", &self.output.path)?;
        validate_file_exists("source.input_path", &self.source.input_path)?;

        Ok(())
    }

    pub fn model_name(&self) -> &str {
        self.model.name.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn endpoint(&self) -> &str {
        self.model.endpoint.as_deref().unwrap_or(GOOGLE_API_BASE)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.input_path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn api_endpoint(&self) -> &str {
        self.endpoint()
    }

    fn model(&self) -> &str {
        self.model_name()
    }

    fn api_key(&self) -> &str {
        self.model.api_key.as_deref().unwrap_or_default()
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.model.timeout_seconds
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
