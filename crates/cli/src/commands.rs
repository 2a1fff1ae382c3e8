//! Subcommand implementations.

use std::sync::Arc;

use anyhow::Context;
use rdsops_cloud::AwsSession;
use rdsops_core::cluster::{self, ClusterSpec};
use rdsops_core::document::AutomationDocument;
use rdsops_core::naming::ResourceTags;
use rdsops_core::poller::PollConfig;
use rdsops_core::region::Region;
use rdsops_core::runbook::create_runbook;
use rdsops_core::service::{AutomationService, OutputMap, Parameters};

use crate::config::CliConfig;
use crate::params::parse_parameters;
use crate::presets;

pub async fn create_cluster(
    config: &CliConfig,
    engine: String,
    engine_version: String,
) -> anyhow::Result<()> {
    let aws = connect(config).await?;
    let spec = ClusterSpec {
        engine,
        engine_version,
    };

    let cluster = cluster::create_cluster(&aws.clusters(), &config.tags, &spec).await?;

    println!("{}", cluster.identifier);
    Ok(())
}

pub async fn describe_cluster(
    config: &CliConfig,
    cluster_id: String,
    keep_document: bool,
) -> anyhow::Result<()> {
    let parameters = Parameters::from([
        (
            presets::ASSUME_ROLE_PARAMETER.to_string(),
            vec![config.session.role_arn()],
        ),
        (presets::CLUSTER_ID_PARAMETER.to_string(), vec![cluster_id]),
    ]);

    let aws = connect(config).await?;
    let outputs = run_runbook(
        aws.automation(),
        &config.tags,
        config.poll.clone(),
        &presets::describe_cluster_document(),
        &parameters,
        keep_document,
    )
    .await?;
    print_outputs(&outputs)
}

pub async fn run(
    config: &CliConfig,
    document_path: &std::path::Path,
    params: &[String],
    keep_document: bool,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(document_path)
        .with_context(|| format!("Failed to read {}", document_path.display()))?;
    let document = AutomationDocument::from_json(&content)?;
    let parameters = parse_parameters(params)?;

    let aws = connect(config).await?;
    let outputs = run_runbook(
        aws.automation(),
        &config.tags,
        config.poll.clone(),
        &document,
        &parameters,
        keep_document,
    )
    .await?;
    print_outputs(&outputs)
}

/// Print every known region; default target regions are marked with `*`.
pub fn regions() {
    print!("{}", region_listing());
}

pub fn region_listing() -> String {
    let defaults = Region::defaults();
    Region::all()
        .map(|region| {
            let marker = if defaults.contains(&region) { '*' } else { ' ' };
            format!("{marker} {:<16} {}\n", region.code(), region.name())
        })
        .collect()
}

async fn connect(config: &CliConfig) -> anyhow::Result<AwsSession> {
    AwsSession::establish(&config.session, config.profile.as_deref())
        .await
        .context("Failed to establish AWS session")
}

/// Create the document, execute it, then delete it whatever the outcome
/// unless `keep_document` is set.
pub async fn run_runbook(
    service: Arc<dyn AutomationService>,
    tags: &ResourceTags,
    poll: PollConfig,
    document: &AutomationDocument,
    parameters: &Parameters,
    keep_document: bool,
) -> anyhow::Result<OutputMap> {
    let mut runbook = create_runbook(service, tags, document, poll).await?;

    let outcome = runbook.execute(parameters).await;

    if keep_document {
        tracing::info!(document = runbook.name(), "Keeping automation document");
        return Ok(outcome?);
    }

    let cleanup = runbook.delete().await;
    match (outcome, cleanup) {
        (Ok(outputs), Ok(())) => Ok(outputs),
        (Ok(_), Err(e)) => Err(e).context("Runbook succeeded but its document could not be deleted"),
        (Err(e), cleanup) => {
            if let Err(cleanup_err) = cleanup {
                tracing::error!(document = runbook.name(), error = %cleanup_err, "Failed to delete automation document");
            }
            Err(e).context("Runbook execution failed")
        }
    }
}

fn print_outputs(outputs: &OutputMap) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(outputs)?);
    Ok(())
}
