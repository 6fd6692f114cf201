use clap::Parser;
use listing_desk::app::commands::{self, TableArgs};
use listing_desk::config::profile::DeskProfile;
use listing_desk::utils::error::ErrorSeverity;
use listing_desk::utils::{logger, validation::Validate};
use listing_desk::{BackofficeClient, CliConfig, Commands, LocalStateStore, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting listing-desk CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0, // notice, not a failure
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(config: CliConfig) -> listing_desk::Result<()> {
    let profile = match &config.profile {
        Some(path) => Some(DeskProfile::from_file(path)?),
        None => None,
    };

    let settings = Settings::resolve(&config, profile.as_ref());
    settings.validate()?;

    let store = LocalStateStore::new(settings.state_dir.clone());
    let api = BackofficeClient::new(
        &settings.api_base_url,
        settings.timeout_secs,
        settings.auth_token.as_deref(),
    )?;

    match config.command {
        Commands::Listings {
            page,
            filters,
            clear_filters,
            sort,
            desc,
            show_columns,
            hide_columns,
            select,
        } => {
            let args = TableArgs {
                page,
                filters,
                clear_filters,
                sort,
                descending: desc,
            };
            let view = commands::listings_page(
                &api,
                &store,
                &settings,
                &args,
                &show_columns,
                &hide_columns,
                &select,
            )
            .await?;
            commands::render_listings(&view);
        }
        Commands::Inventory {
            page,
            filters,
            clear_filters,
            sort,
            desc,
        } => {
            let args = TableArgs {
                page,
                filters,
                clear_filters,
                sort,
                descending: desc,
            };
            let view = commands::inventory_page(&api, &store, &settings, &args).await?;
            commands::render_inventory(&view);
        }
        Commands::Expand { inputs } => {
            commands::render_expansion(&inputs);
        }
        Commands::Batch { skus } => {
            let handoff = commands::batch_command(&api, &store, &settings, &skus).await?;
            println!(
                "✅ Sent {} SKUs to batch view {}",
                handoff.skus.len(),
                handoff.batch_id
            );
        }
        Commands::Generate { skus } => {
            let report = commands::generate_command(&api, &store, &settings, &skus).await?;
            commands::render_metadata_report(&report);
        }
        Commands::Sync { kind } => {
            let report = commands::sync_command(&api, kind.into()).await?;
            commands::render_sync_report(&report);
        }
        Commands::Schema { category_id } => {
            let schema = commands::schema_command(&api, &category_id).await?;
            commands::render_schema(&schema);
        }
        Commands::Export { output } => {
            let path = commands::export_command(&api, &store, &settings, &output).await?;
            println!("✅ Exported listings to {}", path);
        }
    }

    Ok(())
}
