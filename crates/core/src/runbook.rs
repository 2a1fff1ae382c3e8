//! Automation runbooks: create the SSM document, run it, delete it.

use std::sync::Arc;

use crate::document::AutomationDocument;
use crate::error::{CoreError, Operation};
use crate::naming::{self, ResourceTags};
use crate::poller::{self, PollConfig};
use crate::service::{AutomationService, CreateDocumentRequest, OutputMap, Parameters};

/// Handle to an automation document that exists in SSM.
pub struct Runbook {
    service: Arc<dyn AutomationService>,
    name: String,
    execution_id: Option<String>,
    poll: PollConfig,
}

impl std::fmt::Debug for Runbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runbook")
            .field("name", &self.name)
            .field("execution_id", &self.execution_id)
            .field("poll", &self.poll)
            .finish_non_exhaustive()
    }
}

/// Create the automation document `{owner}-{purpose}-SSM-Document`.
///
/// Each call issues a fresh `CreateDocument`; calling twice with the same
/// tags fails on the SSM side because the name is already taken.
pub async fn create_runbook(
    service: Arc<dyn AutomationService>,
    tags: &ResourceTags,
    document: &AutomationDocument,
    poll: PollConfig,
) -> Result<Runbook, CoreError> {
    document.validate()?;
    let request = CreateDocumentRequest {
        name: naming::document_name(tags)?,
        content: document.to_json()?,
        tags: tags
            .pairs()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    };

    tracing::info!(document = %request.name, steps = document.main_steps.len(), "Creating automation document");

    let description = service
        .create_document(&request)
        .await?
        .ok_or_else(|| {
            CoreError::missing(
                Operation::CreateDocument,
                &request.name,
                "no document description returned",
            )
        })?;
    let name = description.name.ok_or_else(|| {
        CoreError::missing(Operation::CreateDocument, &request.name, "no document name returned")
    })?;

    tracing::info!(document = %name, "Automation document created");

    Ok(Runbook::new(service, name, poll))
}

impl Runbook {
    /// Wrap an existing document.
    pub fn new(service: Arc<dyn AutomationService>, name: String, poll: PollConfig) -> Self {
        Self {
            service,
            name,
            execution_id: None,
            poll,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the most recently started execution, if any.
    pub fn execution_id(&self) -> Option<&str> {
        self.execution_id.as_deref()
    }

    /// Start an execution and wait for it to terminate.
    pub async fn execute(&mut self, parameters: &Parameters) -> Result<OutputMap, CoreError> {
        tracing::info!(
            document = %self.name,
            parameters = ?parameters.keys().collect::<Vec<_>>(),
            "Starting automation execution",
        );

        let execution_id = self
            .service
            .start_execution(&self.name, parameters)
            .await?
            .ok_or_else(|| {
                CoreError::missing(
                    Operation::StartAutomationExecution,
                    &self.name,
                    "no execution id returned",
                )
            })?;

        tracing::info!(document = %self.name, execution_id = %execution_id, "Automation execution started");
        self.execution_id = Some(execution_id.clone());

        poller::wait_for_execution_termination(
            self.service.as_ref(),
            &self.name,
            &execution_id,
            &self.poll,
        )
        .await
    }

    /// Delete the document. One request, no retry, no completion check.
    pub async fn delete(&self) -> Result<(), CoreError> {
        tracing::info!(document = %self.name, "Deleting automation document");
        self.service.delete_document(&self.name).await
    }
}
