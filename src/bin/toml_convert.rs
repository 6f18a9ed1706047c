use clap::Parser;
use text2md::config::toml_config::TomlConfig;
use text2md::utils::{logger, validation::Validate};
use text2md::{ConvertEngine, ConvertPipeline, LocalStorage};

#[derive(Parser)]
#[command(name = "toml-convert")]
#[command(about = "Markdown conversion tool with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "convert-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override model name from config
    #[arg(long)]
    model: Option<String>,

    /// Override output path from config
    #[arg(long)]
    output: Option<String>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based Markdown conversion tool");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(model) = args.model.clone() {
        tracing::info!("🔧 Model overridden to: {}", model);
        config.model.name = Some(model);
    }

    if let Some(output) = args.output.clone() {
        tracing::info!("🔧 Output path overridden to: {}", output);
        config.output.path = output;
    }

    // 未配置 api_key 時改用 GEMINI_API_KEY
    config.resolve_api_key();

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 顯示配置摘要
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        return Ok(());
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Job: {} v{}", config.job.name, config.job.version);
    println!("  Input: {}", config.source.input_path);
    println!("  Output: {}", config.output.path);
    println!("  Model: {}", config.model_name());
    println!("  Endpoint: {}", config.endpoint());

    if let Some(timeout) = config.model.timeout_seconds {
        println!("  Timeout: {}s", timeout);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
