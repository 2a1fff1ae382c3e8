//! Built-in automation documents.

use rdsops_core::document::{AutomationDocument, ParameterSpec, Step, StepOutput};
use serde_json::json;

/// Parameter holding the role SSM assumes while running the document.
pub const ASSUME_ROLE_PARAMETER: &str = "AutomationAssumeRole";

/// Parameter holding the DB cluster to describe.
pub const CLUSTER_ID_PARAMETER: &str = "ClusterId";

/// Sleep two seconds, then describe one DB cluster and expose its
/// identifier, custom endpoints, engine and engine version.
pub fn describe_cluster_document() -> AutomationDocument {
    let describe = Step::execute_aws_api("describeCluster", "rds", "DescribeDBClusters")
        .with_input(
            "Filters",
            json!([{ "Name": "db-cluster-id", "Values": ["{{ ClusterId }}"] }]),
        )
        .with_output(StepOutput::new(
            "ClusterId",
            "$.DBClusters[0].DBClusterIdentifier",
            "String",
        ))
        .with_output(StepOutput::new(
            "CustomEndpoints",
            "$.DBClusters[0].CustomEndpoints",
            "StringList",
        ))
        .with_output(StepOutput::new("Engine", "$.DBClusters[0].Engine", "String"))
        .with_output(StepOutput::new(
            "EngineVersion",
            "$.DBClusters[0].EngineVersion",
            "String",
        ))
        .end();

    AutomationDocument::new(vec![Step::sleep("sleep", "PT2S").then("describeCluster"), describe])
        .with_assume_role(format!("{{{{ {ASSUME_ROLE_PARAMETER} }}}}"))
        .with_parameter(ASSUME_ROLE_PARAMETER, ParameterSpec::string())
        .with_parameter(CLUSTER_ID_PARAMETER, ParameterSpec::string())
        .with_output("describeCluster.ClusterId")
        .with_output("describeCluster.Engine")
        .with_output("describeCluster.EngineVersion")
        .with_output("describeCluster.CustomEndpoints")
}
