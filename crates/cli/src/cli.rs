use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Create RDS clusters and run SSM automation runbooks against them.
///
/// Account, role, region and resource tags come from the environment
/// (see `CliConfig::from_env`).
#[derive(Debug, Parser)]
#[command(name = "rdsops", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a DB cluster tagged with the configured owner and purpose.
    CreateCluster {
        /// Engine, e.g. `aurora-mysql`.
        #[arg(long)]
        engine: String,
        /// Engine version, e.g. `5.7.mysql_aurora.2.04.5`.
        #[arg(long)]
        engine_version: String,
    },

    /// Run the built-in describe-cluster runbook against an existing cluster.
    DescribeCluster {
        #[arg(long)]
        cluster_id: String,
        /// Leave the automation document in place after the run.
        #[arg(long)]
        keep_document: bool,
    },

    /// Create a runbook from a JSON document, execute it and delete it.
    Run {
        /// Path to the automation document JSON.
        #[arg(long)]
        document: PathBuf,
        /// Execution parameter as KEY=VALUE; repeat a key for list values.
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
        /// Leave the automation document in place after the run.
        #[arg(long)]
        keep_document: bool,
    },

    /// List the known region codes and names.
    Regions,
}
