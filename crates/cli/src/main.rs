//! `rdsops` -- create RDS clusters and run SSM automation runbooks.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rdsops_cli::cli::{Cli, Command};
use rdsops_cli::commands;
use rdsops_cli::config::CliConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "rdsops=info,rdsops_cli=info,rdsops_core=info,rdsops_cloud=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        tracing::error!(error = %format!("{e:#}"), "rdsops failed");
        std::process::exit(1);
    }
}

async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Regions => {
            commands::regions();
            Ok(())
        }
        Command::CreateCluster {
            engine,
            engine_version,
        } => commands::create_cluster(&load_config()?, engine, engine_version).await,
        Command::DescribeCluster {
            cluster_id,
            keep_document,
        } => commands::describe_cluster(&load_config()?, cluster_id, keep_document).await,
        Command::Run {
            document,
            params,
            keep_document,
        } => commands::run(&load_config()?, &document, &params, keep_document).await,
    }
}

fn load_config() -> anyhow::Result<CliConfig> {
    let config = CliConfig::from_env()?;
    tracing::info!(
        account_id = %config.session.account_id,
        region = config.session.region.code(),
        role = %config.session.role,
        owner = %config.tags.owner,
        purpose = %config.tags.purpose,
        "Loaded configuration",
    );
    Ok(config)
}
