pub mod cli;
pub mod toml_config;

use crate::adapters::gemini::{DEFAULT_MODEL, GOOGLE_API_BASE};
use crate::core::ConfigProvider;
use crate::utils::validation::{
    validate_file_exists, validate_non_empty_string, validate_path, validate_required_field,
    validate_url, Validate,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "text2md")]
#[command(about = "Convert a plain-text file to GitHub-flavored Markdown via the Gemini API")]
pub struct CliConfig {
    /// Path to the plain-text source file
    #[arg(long, default_value = "source.txt")]
    pub input: String,

    /// Path the generated Markdown is written to
    #[arg(long, default_value = "README.md")]
    pub output: String,

    /// Model identifier to request
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, default_value = GOOGLE_API_BASE)]
    pub api_endpoint: String,

    /// API key, falls back to the GEMINI_API_KEY environment variable
    #[arg(long)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 未指定 --api-key 時改用環境變數
    pub fn resolve_api_key(&mut self) {
        if self.api_key.is_none() {
            self.api_key = std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        let api_key = validate_required_field("api_key", &self.api_key)?;
        validate_non_empty_string("api_key", api_key)?;
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_non_empty_string("model", &self.model)?;
        validate_path("output", &self.output)?;

        // 輸入檔必須在發出任何請求前就存在
        validate_file_exists("input", &self.input)?;

        Ok(())
    }
}
