//! Waits for an automation execution to reach a terminal status.
//!
//! The poller queries execution state at a fixed interval until SSM reports
//! one of the terminal statuses, then returns the execution outputs plus a
//! synthetic `status` entry. Malformed responses and query errors end the
//! wait immediately; nothing is retried.

use std::time::Duration;

use crate::error::{CoreError, Operation};
use crate::service::{AutomationService, ExecutionReport, OutputMap, STATUS_OUTPUT_KEY};
use crate::status::ExecutionStatus;

/// Delay between two status queries.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Tunable parameters for [`wait_for_execution_termination`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Fixed delay between status queries. Never grows.
    pub interval: Duration,
    /// Give up after this many status queries. `None` polls forever.
    pub max_attempts: Option<u32>,
    /// Fail on status strings outside the known set instead of treating
    /// them as still running.
    pub strict_status: bool,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: None,
            strict_status: false,
        }
    }
}

/// What one status query tells the poller to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStep {
    /// Terminal status observed; the wait is over.
    Finished(OutputMap),
    /// Not terminal yet; query again after the interval.
    Pending(ExecutionStatus),
}

/// Classify one `GetAutomationExecution` answer.
///
/// `report` is `None` when the response had no execution record.
pub fn classify(document_name: &str, report: Option<ExecutionReport>) -> Result<PollStep, CoreError> {
    let missing = |message| {
        CoreError::missing(Operation::GetAutomationExecution, document_name, message)
    };

    let report = report.ok_or_else(|| missing("no execution description returned"))?;
    let raw_status = report
        .status
        .ok_or_else(|| missing("no execution status returned"))?;

    let status = ExecutionStatus::parse(&raw_status);
    if !status.is_terminal() {
        return Ok(PollStep::Pending(status));
    }

    let outputs = report
        .outputs
        .filter(|outputs| !outputs.is_empty())
        .ok_or_else(|| missing("no outputs returned"))?;

    let mut merged: OutputMap = outputs.into_iter().collect();
    merged.insert(STATUS_OUTPUT_KEY.to_string(), vec![raw_status]);
    Ok(PollStep::Finished(merged))
}

/// Poll `execution_id` until it reaches a terminal status.
///
/// Returns the execution outputs merged with `status: [<terminal status>]`.
/// There is no overall deadline unless `config.max_attempts` is set; wrap
/// the call in `tokio::time::timeout` for one. Dropping the future stops
/// polling but does not stop the remote execution.
pub async fn wait_for_execution_termination(
    service: &dyn AutomationService,
    document_name: &str,
    execution_id: &str,
    config: &PollConfig,
) -> Result<OutputMap, CoreError> {
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let report = service.get_execution(execution_id).await?;

        match classify(document_name, report)? {
            PollStep::Finished(outputs) => {
                tracing::info!(
                    document = document_name,
                    execution_id,
                    attempts,
                    status = ?outputs.get(STATUS_OUTPUT_KEY),
                    "Automation execution terminated",
                );
                return Ok(outputs);
            }
            PollStep::Pending(status) => {
                if status.is_unknown() {
                    if config.strict_status {
                        return Err(CoreError::UnrecognizedStatus {
                            operation: Operation::GetAutomationExecution,
                            target: document_name.to_string(),
                            status: status.as_str().to_string(),
                        });
                    }
                    tracing::warn!(
                        document = document_name,
                        execution_id,
                        status = status.as_str(),
                        "Unrecognized execution status, treating as still running",
                    );
                }

                if config.max_attempts.is_some_and(|max| attempts >= max) {
                    return Err(CoreError::PollLimitExceeded {
                        operation: Operation::GetAutomationExecution,
                        target: document_name.to_string(),
                        attempts,
                    });
                }

                tracing::debug!(
                    document = document_name,
                    execution_id,
                    attempts,
                    status = status.as_str(),
                    delay_ms = config.interval.as_millis() as u64,
                    "Execution still running",
                );
                tokio::time::sleep(config.interval).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn terminal_with_outputs_adds_status() {
        let report = ExecutionReport::with_status("CompletedWithFailure")
            .with_output("Engine", vec!["aurora-mysql".into()]);

        let step = classify("doc", Some(report)).unwrap();

        let PollStep::Finished(outputs) = step else {
            panic!("expected Finished, got {step:?}");
        };
        assert_eq!(outputs["Engine"], vec!["aurora-mysql".to_string()]);
        assert_eq!(outputs["status"], vec!["CompletedWithFailure".to_string()]);
        assert_eq!(outputs.len(), 2);
    }

    #[test]
    fn running_status_is_pending() {
        let step = classify("doc", Some(ExecutionReport::with_status("Waiting"))).unwrap();
        assert_eq!(step, PollStep::Pending(ExecutionStatus::Waiting));
    }

    #[test]
    fn unknown_status_is_pending() {
        let step = classify("doc", Some(ExecutionReport::with_status("Brewing"))).unwrap();
        assert_eq!(step, PollStep::Pending(ExecutionStatus::Unknown("Brewing".into())));
    }

    #[test]
    fn missing_record_fails() {
        let err = classify("doc", None).unwrap_err();
        assert_matches!(
            err,
            CoreError::MissingField { message: "no execution description returned", .. }
        );
    }

    #[test]
    fn missing_status_fails() {
        let err = classify("doc", Some(ExecutionReport::default())).unwrap_err();
        assert_matches!(
            err,
            CoreError::MissingField { message: "no execution status returned", .. }
        );
    }

    #[test]
    fn terminal_without_outputs_fails() {
        let err = classify("doc", Some(ExecutionReport::with_status("Success"))).unwrap_err();
        assert_matches!(err, CoreError::MissingField { message: "no outputs returned", .. });
    }

    #[test]
    fn default_config_polls_every_second_forever() {
        let config = PollConfig::default();
        assert_eq!(config.interval, Duration::from_millis(1000));
        assert_eq!(config.max_attempts, None);
        assert!(!config.strict_status);
    }
}
