use clap::Parser;
use tariff_sync::config::{CliConfig, Command};
use tariff_sync::core::project::project_name_for;
use tariff_sync::core::ConfigProvider;
use tariff_sync::domain::model::{NewRemoteProduct, Product, ProjectName};
use tariff_sync::domain::ports::ProductStore;
use tariff_sync::utils::error::SyncError;
use tariff_sync::utils::{logger, validation::Validate};
use tariff_sync::{ClassificationSync, CsvProductStore, HttpClassificationApi, PollReport, TomlConfig};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("📁 Loading configuration from: {}", cli.config);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Classification sync failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }
}

async fn run(cli: CliConfig) -> Result<(), SyncError> {
    let mut config = TomlConfig::from_file(&cli.config)?;
    config.apply_overrides(cli.command.files());
    let store = CsvProductStore::new(config.products_input(), config.products_output());

    if let Command::Run { dry_run: true, .. } = &cli.command {
        // No request is sent, so credentials and base URL are not required.
        config.validate_offline()?;
        let products = store.load().await?;
        let project = project_name_for(config.project_prefix(), chrono::Local::now().date_naive());
        return print_dry_run(&project, &products);
    }

    config.validate()?;
    tracing::debug!("API base URL: {}", config.base_url());

    let mut products = store.load().await?;

    let api = HttpClassificationApi::from_config(&config)?;
    let sync = ClassificationSync::new(api, config.credentials())
        .with_project_prefix(config.project_prefix());

    match &cli.command {
        Command::Run { .. } => {
            let report = sync
                .run(&mut products, chrono::Local::now().date_naive())
                .await?;
            println!("📁 Project: {}", report.project);
            println!("📤 Uploaded {} products", report.uploaded);
            print_poll_report(&report.poll);
        }
        Command::Poll { project, .. } => {
            let report = sync.poll(&ProjectName::new(project.clone()), &mut products).await?;
            print_poll_report(&report);
        }
    }

    store.save(&products).await?;
    println!("✅ Products written to {}", store.output_path().display());
    Ok(())
}

fn print_dry_run(project: &ProjectName, products: &[Product]) -> Result<(), SyncError> {
    tracing::info!("🔍 DRY RUN MODE - No requests will be sent");
    println!("📁 Project: {}", project);
    for product in products {
        let payload = NewRemoteProduct::from_product(product, project);
        println!("{}", serde_json::to_string_pretty(&payload)?);
    }
    Ok(())
}

fn print_poll_report(report: &PollReport) {
    println!(
        "🔍 {} remote products, {} classified, {} pending",
        report.remote_products,
        report.classified.len(),
        report.pending.len()
    );
    for classified in &report.classified {
        println!("  🏷️ {} -> {}", classified.external_id, classified.tariff_number);
    }
    if !report.pending.is_empty() {
        println!("  ⏳ pending: {}", report.pending.join(", "));
    }
}
