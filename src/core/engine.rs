use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ConvertEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ConvertEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        println!("Starting Markdown conversion...");

        // Extract
        println!("Reading source text...");
        let source = self.pipeline.extract().await?;
        println!("Read {} bytes of source text", source.body.len());

        // Convert
        println!("Converting to Markdown...");
        let result = self.pipeline.convert(source).await?;
        println!("Received {} bytes of Markdown", result.markdown.len());

        if let Some(usage) = &result.usage {
            tracing::info!(
                "📊 Token usage - prompt: {}, response: {}, total: {}",
                usage.prompt_tokens,
                usage.response_tokens,
                usage.total_tokens
            );
        }

        // Load
        println!("Writing output...");
        let output_path = self.pipeline.load(result).await?;
        println!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
