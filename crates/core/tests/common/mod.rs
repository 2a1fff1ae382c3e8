//! In-memory fakes of the service traits, scripted per test.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use rdsops_core::error::{CoreError, Operation};
use rdsops_core::service::{
    AutomationService, ClusterDescription, ClusterService, CreateClusterRequest,
    CreateDocumentRequest, DocumentDescription, ExecutionReport, Parameters, RoleAssumer,
};
use rdsops_core::session::TemporaryCredentials;

/// One recorded call against [`FakeAutomation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateDocument(CreateDocumentRequest),
    Start { document: String, parameters: Parameters },
    Get(String),
    Delete(String),
}

/// Scripted SSM automation fake.
///
/// Status queries are answered from `reports` in order; once it is empty
/// `fallback` is returned forever, or the test panics if there is none.
pub struct FakeAutomation {
    pub created: Mutex<Option<Result<Option<DocumentDescription>, CoreError>>>,
    pub started: Mutex<Option<Result<Option<String>, CoreError>>>,
    pub reports: Mutex<VecDeque<Result<Option<ExecutionReport>, CoreError>>>,
    pub fallback: Option<ExecutionReport>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeAutomation {
    pub fn new() -> Self {
        Self {
            created: Mutex::new(None),
            started: Mutex::new(Some(Ok(Some("exec-1".to_string())))),
            reports: Mutex::new(VecDeque::new()),
            fallback: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fake answering status queries with `reports`, in order.
    pub fn with_reports(reports: Vec<ExecutionReport>) -> Self {
        let fake = Self::new();
        *fake.reports.lock().unwrap() = reports.into_iter().map(|r| Ok(Some(r))).collect();
        fake
    }

    /// Fake answering every status query with `report`.
    pub fn always(report: ExecutionReport) -> Self {
        Self {
            fallback: Some(report),
            ..Self::new()
        }
    }

    pub fn push_result(&self, result: Result<Option<ExecutionReport>, CoreError>) {
        self.reports.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn status_queries(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Get(_)))
            .count()
    }

    pub fn deletes(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Delete(_)))
            .count()
    }
}

#[async_trait]
impl AutomationService for FakeAutomation {
    async fn create_document(
        &self,
        request: &CreateDocumentRequest,
    ) -> Result<Option<DocumentDescription>, CoreError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::CreateDocument(request.clone()));
        self.created.lock().unwrap().take().unwrap_or_else(|| {
            Ok(Some(DocumentDescription {
                name: Some(request.name.clone()),
            }))
        })
    }

    async fn start_execution(
        &self,
        document_name: &str,
        parameters: &Parameters,
    ) -> Result<Option<String>, CoreError> {
        self.calls.lock().unwrap().push(Call::Start {
            document: document_name.to_string(),
            parameters: parameters.clone(),
        });
        self.started
            .lock()
            .unwrap()
            .take()
            .expect("start_execution called more than scripted")
    }

    async fn get_execution(&self, execution_id: &str) -> Result<Option<ExecutionReport>, CoreError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Get(execution_id.to_string()));
        match self.reports.lock().unwrap().pop_front() {
            Some(result) => result,
            None => Ok(Some(
                self.fallback
                    .clone()
                    .expect("status queried more often than scripted"),
            )),
        }
    }

    async fn delete_document(&self, document_name: &str) -> Result<(), CoreError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Delete(document_name.to_string()));
        Ok(())
    }
}

/// RDS fake returning one scripted answer and recording the request.
pub struct FakeClusters {
    pub answer: Mutex<Option<Result<Option<ClusterDescription>, CoreError>>>,
    pub requests: Mutex<Vec<CreateClusterRequest>>,
}

impl FakeClusters {
    pub fn answering(answer: Result<Option<ClusterDescription>, CoreError>) -> Self {
        Self {
            answer: Mutex::new(Some(answer)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Echo the requested identifier back, like RDS does.
    pub fn echoing() -> Self {
        Self {
            answer: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ClusterService for FakeClusters {
    async fn create_cluster(
        &self,
        request: &CreateClusterRequest,
    ) -> Result<Option<ClusterDescription>, CoreError> {
        self.requests.lock().unwrap().push(request.clone());
        self.answer.lock().unwrap().take().unwrap_or_else(|| {
            Ok(Some(ClusterDescription {
                identifier: Some(request.identifier.clone()),
            }))
        })
    }
}

/// STS fake.
pub struct FakeSts {
    pub credentials: Option<TemporaryCredentials>,
    pub fail: bool,
    pub requests: Mutex<Vec<(String, String)>>,
}

impl FakeSts {
    pub fn granting() -> Self {
        Self {
            credentials: Some(TemporaryCredentials {
                access_key_id: "ASIAEXAMPLE".into(),
                secret_access_key: "secret".into(),
                session_token: "token".into(),
                expiration: None,
            }),
            fail: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self {
            credentials: None,
            ..Self::granting()
        }
    }

    pub fn denying() -> Self {
        Self {
            fail: true,
            ..Self::granting()
        }
    }
}

#[async_trait]
impl RoleAssumer for FakeSts {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<Option<TemporaryCredentials>, CoreError> {
        self.requests
            .lock()
            .unwrap()
            .push((role_arn.to_string(), session_name.to_string()));
        if self.fail {
            return Err(CoreError::service(
                Operation::AssumeRole,
                role_arn,
                "AccessDenied: not authorized to perform sts:AssumeRole",
            ));
        }
        Ok(self.credentials.clone())
    }
}

/// Report with `status` and one single-valued output per `(key, value)`.
pub fn report(status: &str, outputs: &[(&str, &str)]) -> ExecutionReport {
    outputs
        .iter()
        .fold(ExecutionReport::with_status(status), |report, (key, value)| {
            report.with_output(*key, vec![value.to_string()])
        })
}
