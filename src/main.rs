use clap::Parser;
use prediction_form::config::Command;
use prediction_form::core::render::{render_fields, render_form, render_presets};
use prediction_form::utils::error::{ErrorSeverity, PredictError};
use prediction_form::utils::logger;
use prediction_form::{apply_edits, build_controller, CliConfig, DeploymentConfig, Phase};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting prediction-form CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let exit_code = match run(config).await {
        Ok(code) => code,
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            match e.severity() {
                ErrorSeverity::Medium => 2,
                _ => 1,
            }
        }
    };

    std::process::exit(exit_code);
}

async fn run(config: CliConfig) -> Result<i32, PredictError> {
    // 載入部署設定；未指定時使用內建端點
    let deployment = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading deployment config from: {}", path.display());
            DeploymentConfig::from_file(path)?
        }
        None => DeploymentConfig::default(),
    };
    let catalog = deployment.preset_catalog()?;

    match config.command {
        Command::Fields { form } => {
            print!("{}", render_fields(form));
            Ok(0)
        }
        Command::Presets => {
            print!("{}", render_presets(&catalog));
            Ok(0)
        }
        Command::Render(args) => {
            let controller = build_controller(args.form, &deployment);
            apply_edits(&controller, &args.edits(), &catalog).await?;
            let snapshot = controller.snapshot().await;
            print!("{}", render_form(args.form, &snapshot, Some(&catalog)));
            Ok(0)
        }
        Command::Predict { form: args, json } => {
            let controller = build_controller(args.form, &deployment);
            apply_edits(&controller, &args.edits(), &catalog).await?;

            if json {
                let snapshot = controller.snapshot().await;
                println!("{}", snapshot.form.record().to_json()?);
            }

            let view = controller.submit().await;
            let snapshot = controller.snapshot().await;
            print!("{}", render_form(args.form, &snapshot, Some(&catalog)));

            match view.phase() {
                Phase::Error(_) => Ok(2),
                _ => Ok(0),
            }
        }
    }
}
