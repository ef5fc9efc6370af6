use addon_catalogue::apis::Catalogues;
use addon_catalogue::config::{Config, PublishTarget};
use addon_catalogue::infra::http_client::ReqwestHttp;
use addon_catalogue::pipeline::{Pipeline, PipelineResult};
use addon_catalogue::{logging, observability, publish};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "addon-catalogue")]
#[command(about = "Builds and publishes combined WoW add-on catalogue datasets")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Directory for rotated log files
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Override the configured publish target (fs or github)
    #[arg(long)]
    target: Option<PublishTarget>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every catalogue, build the datasets and publish them
    Run,
    /// Build and publish from catalogues saved by `fetch`
    Build {
        #[arg(long)]
        input_dir: PathBuf,
    },
    /// Fetch every catalogue and save the raw responses
    Fetch {
        #[arg(long)]
        output_dir: PathBuf,
    },
}

fn print_summary(result: &PipelineResult) {
    println!("\n📊 Run {}:", result.run_id);
    println!("   Slugs: {}", result.slugs);
    println!("   Folders: {}", result.folders);
    println!("   Names: {}", result.names);
    println!("   Artifacts published: {}", result.artifacts_published);
    println!(
        "   Took: {}ms",
        (result.finished_at - result.started_at).num_milliseconds()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let _log_guard = logging::init_logging(&cli.log_dir).context("failed to initialize logging")?;
    observability::init_metrics();

    let mut config = Config::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    if let Some(target) = cli.target {
        config.publish.target = target;
    }
    let pipeline = Pipeline::from_config(&config);

    match cli.command {
        Commands::Run => {
            let http = ReqwestHttp::new(&config.sources.user_agent)?;
            let publisher = publish::from_config(&config)?;
            let result = pipeline.run(&http, &config.sources, publisher.as_ref()).await?;
            print_summary(&result);
        }
        Commands::Build { input_dir } => {
            let catalogues = Catalogues::load_from_dir(&input_dir)
                .with_context(|| format!("failed to load catalogues from {}", input_dir.display()))?;
            let publisher = publish::from_config(&config)?;
            let result = pipeline.publish_catalogues(&catalogues, publisher.as_ref()).await?;
            print_summary(&result);
        }
        Commands::Fetch { output_dir } => {
            let http = ReqwestHttp::new(&config.sources.user_agent)?;
            let catalogues = Catalogues::fetch(&http, &config.sources).await?;
            catalogues.save_to_dir(&output_dir)?;
            info!("Saved raw catalogues to {}", output_dir.display());
        }
    }

    Ok(())
}
