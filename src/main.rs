use anyhow::Context;
use campus_lib::shared::utils::init_logger;
use campus_lib::shared::AppConfig;
use campus_lib::{log_info, log_warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    init_logger(config.log_level);

    let service = campus_lib::open_campus(&config)
        .await
        .with_context(|| format!("Failed to open {}", config.data_file.display()))?;

    let summary = service.summary().await;
    log_info!("Campus holds {} entities", summary.total());

    let superadmins = service.superadmins().await;
    if summary.admins > 0 && superadmins.is_empty() {
        log_warn!("No superadmin found among {} admins", summary.admins);
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
