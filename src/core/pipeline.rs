use crate::adapters::gemini::GeminiClient;
use crate::core::{ConfigProvider, ConversionResult, Pipeline, SourceText, Storage};
use crate::utils::error::Result;

pub struct ConvertPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: GeminiClient,
}

impl<S: Storage, C: ConfigProvider> ConvertPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let client = GeminiClient::from_config(&config);
        Self {
            storage,
            config,
            client,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ConvertPipeline<S, C> {
    async fn extract(&self) -> Result<SourceText> {
        tracing::debug!("Reading source text from: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;

        // 輸入不做結構驗證，非 UTF-8 位元組以替代字元帶過
        let body = String::from_utf8_lossy(&data).into_owned();
        Ok(SourceText { body })
    }

    async fn convert(&self, source: SourceText) -> Result<ConversionResult> {
        tracing::debug!("Converting {} bytes via model API", source.body.len());
        self.client.generate_markdown(&source.body).await
    }

    async fn load(&self, result: ConversionResult) -> Result<String> {
        let output_path = self.config.output_path().to_string();
        tracing::debug!(
            "Writing {} bytes of Markdown to: {}",
            result.markdown.len(),
            output_path
        );
        self.storage
            .write_file(&output_path, result.markdown.as_bytes())
            .await?;
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::gemini::DEFAULT_MODEL;
    use crate::utils::error::ConvertError;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ConvertError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input_path: String,
        output_path: String,
        api_endpoint: String,
        model: String,
        api_key: String,
    }

    impl MockConfig {
        fn new(api_endpoint: String) -> Self {
            Self {
                input_path: "source.txt".to_string(),
                output_path: "README.md".to_string(),
                api_endpoint,
                model: DEFAULT_MODEL.to_string(),
                api_key: "test-key".to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            &self.input_path
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn model(&self) -> &str {
            &self.model
        }

        fn api_key(&self) -> &str {
            &self.api_key
        }

        fn timeout_seconds(&self) -> Option<u64> {
            None
        }
    }

    fn gemini_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn test_extract_reads_source_file() {
        let storage = MockStorage::new();
        storage
            .put_file("source.txt", "Hello world. This is a test.".as_bytes())
            .await;

        let config = MockConfig::new("http://unused.test".to_string());
        let pipeline = ConvertPipeline::new(storage, config);

        let source = pipeline.extract().await.unwrap();
        assert_eq!(source.body, "Hello world. This is a test.");
    }

    #[tokio::test]
    async fn test_extract_missing_file_is_io_error() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://unused.test".to_string());
        let pipeline = ConvertPipeline::new(storage, config);

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, ConvertError::IoError(_)));
    }

    #[tokio::test]
    async fn test_convert_returns_model_text_unmodified() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/models/gemini-2.5-flash:generateContent")
                .query_param("key", "test-key");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(gemini_response("# Hello\n\nThis is a test."));
        });

        let storage = MockStorage::new();
        let config = MockConfig::new(server.base_url());
        let pipeline = ConvertPipeline::new(storage, config);

        let result = pipeline
            .convert(SourceText {
                body: "Hello world. This is a test.".to_string(),
            })
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(result.markdown, "# Hello\n\nThis is a test.");
    }

    #[tokio::test]
    async fn test_convert_api_failure_is_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/models/gemini-2.5-flash:generateContent");
            then.status(403).body("permission denied");
        });

        let storage = MockStorage::new();
        let config = MockConfig::new(server.base_url());
        let pipeline = ConvertPipeline::new(storage, config);

        let err = pipeline
            .convert(SourceText {
                body: "anything".to_string(),
            })
            .await
            .unwrap_err();

        api_mock.assert();
        assert!(matches!(
            err,
            ConvertError::ApiStatusError { status: 403, .. }
        ));
    }

    #[tokio::test]
    async fn test_load_writes_markdown_bytes() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://unused.test".to_string());
        let pipeline = ConvertPipeline::new(storage.clone(), config);

        let output_path = pipeline
            .load(ConversionResult {
                markdown: "# Title\n\nBody.".to_string(),
                usage: None,
            })
            .await
            .unwrap();

        assert_eq!(output_path, "README.md");

        let written = storage.get_file("README.md").await.unwrap();
        assert_eq!(written, "# Title\n\nBody.".as_bytes());
    }
}
