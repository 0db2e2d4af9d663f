use anyhow::Context;
use clap::Parser;
use vet_dose::utils::error::{DoseError, ErrorSeverity};
use vet_dose::utils::{logger, validation::Validate};
use vet_dose::{bootstrap, respond_catalog, respond_dose, CliConfig, Command, DoseRequest};

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2, // 輸入錯誤
        ErrorSeverity::High => 1,   // 配置錯誤
        ErrorSeverity::Critical => 3, // 資料載入或系統錯誤
    }
}

fn fail(e: &DoseError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(exit_code(e.severity()));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 合併配置檔與命令列參數
    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            fail(&e);
        }
    };

    // 初始化日誌
    if settings.json_logs() {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }
    tracing::debug!("Settings: {:?}", settings);

    // 驗證配置
    if let Err(e) = settings.validate() {
        fail(&e);
    }

    // 載入參考表，失敗即終止
    let calculator = match bootstrap(&settings).await {
        Ok(calculator) => calculator,
        Err(e) => fail(&e),
    };

    let response = match cli.command {
        Command::Drugs => respond_catalog(Ok(calculator.list_catalog())),
        Command::Calculate {
            species,
            drug,
            weight,
        } => respond_dose(&calculator, &DoseRequest::new(species, drug, weight)),
    };

    let body = serde_json::to_string_pretty(&response.body).context("failed to render response")?;
    if response.is_success() {
        println!("{}", body);
        return Ok(());
    }

    eprintln!("{}", body);
    let code = if response.status >= 500 { 3 } else { 2 };
    std::process::exit(code);
}
