//! Capability traits for the cloud services this crate drives.
//!
//! The AWS-backed implementations live in `rdsops-cloud`. Responses are
//! returned in their raw, partially-populated form (`Option` fields) so the
//! "missing field" checks stay in one place in this crate.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;

use crate::error::CoreError;
use crate::session::TemporaryCredentials;

/// Execution parameters: name -> ordered list of values.
pub type Parameters = BTreeMap<String, Vec<String>>;

/// Terminal execution outputs: name -> ordered list of values.
pub type OutputMap = BTreeMap<String, Vec<String>>;

/// Synthetic output key carrying the terminal status.
pub const STATUS_OUTPUT_KEY: &str = "status";

/// One `GetAutomationExecution` answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub status: Option<String>,
    pub outputs: Option<HashMap<String, Vec<String>>>,
}

impl ExecutionReport {
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            outputs: None,
        }
    }

    pub fn with_output(mut self, key: impl Into<String>, values: Vec<String>) -> Self {
        self.outputs
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), values);
        self
    }
}

/// What `CreateDocument` says about the new document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentDescription {
    pub name: Option<String>,
}

/// What `CreateDBCluster` says about the new cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterDescription {
    pub identifier: Option<String>,
}

/// Everything needed for one `CreateDocument` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDocumentRequest {
    pub name: String,
    /// JSON content of the automation document.
    pub content: String,
    pub tags: Vec<(String, String)>,
}

/// Everything needed for one `CreateDBCluster` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClusterRequest {
    pub identifier: String,
    pub database_name: String,
    pub engine: String,
    pub engine_version: String,
    pub master_username: String,
    pub master_password: String,
    pub tags: Vec<(String, String)>,
}

/// SSM automation: document authoring and execution.
#[async_trait]
pub trait AutomationService: Send + Sync {
    /// Create an automation document. `Ok(None)` means the response had no
    /// document description.
    async fn create_document(
        &self,
        request: &CreateDocumentRequest,
    ) -> Result<Option<DocumentDescription>, CoreError>;

    /// Start an execution. `Ok(None)` means no execution id was returned.
    async fn start_execution(
        &self,
        document_name: &str,
        parameters: &Parameters,
    ) -> Result<Option<String>, CoreError>;

    /// Fetch execution state. `Ok(None)` means there was no execution record.
    async fn get_execution(&self, execution_id: &str) -> Result<Option<ExecutionReport>, CoreError>;

    async fn delete_document(&self, document_name: &str) -> Result<(), CoreError>;
}

/// RDS cluster creation.
#[async_trait]
pub trait ClusterService: Send + Sync {
    /// `Ok(None)` means the response had no cluster description.
    async fn create_cluster(
        &self,
        request: &CreateClusterRequest,
    ) -> Result<Option<ClusterDescription>, CoreError>;
}

/// STS role assumption.
#[async_trait]
pub trait RoleAssumer: Send + Sync {
    /// `Ok(None)` means the response carried no credentials.
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<Option<TemporaryCredentials>, CoreError>;
}
