use clap::Parser;
use text2md::utils::{logger, validation::Validate};
use text2md::{CliConfig, ConvertEngine, ConvertPipeline, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting text2md CLI");

    // 未指定 --api-key 時改用 GEMINI_API_KEY
    config.resolve_api_key();

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if config.verbose {
        tracing::debug!(
            "Config: input={}, output={}, model={}, endpoint={}",
            config.input,
            config.output,
            config.model,
            config.api_endpoint
        );
    }

    // 創建存儲和管道
    let storage = LocalStorage::default();
    let pipeline = ConvertPipeline::new(storage, config);

    // 創建轉換引擎並運行
    let engine = ConvertEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Markdown conversion completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ Markdown conversion completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Markdown conversion failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                text2md::utils::error::ErrorSeverity::Low => 0,
                text2md::utils::error::ErrorSeverity::Medium => 2,
                text2md::utils::error::ErrorSeverity::High => 1,
                text2md::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
