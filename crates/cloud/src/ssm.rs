//! SSM-backed [`AutomationService`].

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_ssm::types::{AutomationExecution, DocumentType, Tag};
use rdsops_core::error::{CoreError, Operation};
use rdsops_core::service::{
    AutomationService, CreateDocumentRequest, DocumentDescription, ExecutionReport, Parameters,
};

use crate::error::sdk_error;

/// Target type for documents that may act on any resource.
const ANY_TARGET_TYPE: &str = "/";

pub struct SsmAutomation {
    client: aws_sdk_ssm::Client,
}

impl SsmAutomation {
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AutomationService for SsmAutomation {
    async fn create_document(
        &self,
        request: &CreateDocumentRequest,
    ) -> Result<Option<DocumentDescription>, CoreError> {
        let tags = request
            .tags
            .iter()
            .map(|(key, value)| Tag::builder().key(key).value(value).build())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| sdk_error(Operation::CreateDocument, &request.name, e))?;

        let output = self
            .client
            .create_document()
            .name(&request.name)
            .content(&request.content)
            .document_type(DocumentType::Automation)
            .target_type(ANY_TARGET_TYPE)
            .set_tags(Some(tags))
            .send()
            .await
            .map_err(|e| sdk_error(Operation::CreateDocument, &request.name, e))?;

        Ok(output.document_description().map(|d| DocumentDescription {
            name: d.name().map(str::to_string),
        }))
    }

    async fn start_execution(
        &self,
        document_name: &str,
        parameters: &Parameters,
    ) -> Result<Option<String>, CoreError> {
        let parameters: HashMap<String, Vec<String>> = parameters
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let output = self
            .client
            .start_automation_execution()
            .document_name(document_name)
            .set_parameters(Some(parameters))
            .send()
            .await
            .map_err(|e| sdk_error(Operation::StartAutomationExecution, document_name, e))?;

        Ok(output.automation_execution_id().map(str::to_string))
    }

    async fn get_execution(&self, execution_id: &str) -> Result<Option<ExecutionReport>, CoreError> {
        let output = self
            .client
            .get_automation_execution()
            .automation_execution_id(execution_id)
            .send()
            .await
            .map_err(|e| sdk_error(Operation::GetAutomationExecution, execution_id, e))?;

        Ok(output.automation_execution().map(report_from_execution))
    }

    async fn delete_document(&self, document_name: &str) -> Result<(), CoreError> {
        self.client
            .delete_document()
            .name(document_name)
            .send()
            .await
            .map_err(|e| sdk_error(Operation::DeleteDocument, document_name, e))?;
        Ok(())
    }
}

fn report_from_execution(execution: &AutomationExecution) -> ExecutionReport {
    ExecutionReport {
        status: execution
            .automation_execution_status()
            .map(|s| s.as_str().to_string()),
        outputs: execution.outputs().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ssm::types::AutomationExecutionStatus;

    #[test]
    fn report_keeps_status_and_outputs() {
        let execution = AutomationExecution::builder()
            .automation_execution_status(AutomationExecutionStatus::CompletedWithSuccess)
            .outputs("describeCluster.ClusterId", vec!["c1".to_string()])
            .build();

        let report = report_from_execution(&execution);

        assert_eq!(report.status.as_deref(), Some("CompletedWithSuccess"));
        assert_eq!(
            report.outputs.unwrap()["describeCluster.ClusterId"],
            vec!["c1".to_string()]
        );
    }

    #[test]
    fn report_keeps_unrecognized_status_verbatim() {
        let execution = AutomationExecution::builder()
            .automation_execution_status(AutomationExecutionStatus::from("SomethingNew"))
            .build();

        let report = report_from_execution(&execution);

        assert_eq!(report.status.as_deref(), Some("SomethingNew"));
        assert_eq!(report.outputs, None);
    }

    #[test]
    fn report_without_status() {
        let report = report_from_execution(&AutomationExecution::builder().build());
        assert_eq!(report, ExecutionReport::default());
    }
}
