use std::fmt;

/// External operation a [`CoreError`] is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AssumeRole,
    CreateDbCluster,
    CreateDocument,
    StartAutomationExecution,
    GetAutomationExecution,
    DeleteDocument,
}

impl Operation {
    /// `service:Action` form used in log lines and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AssumeRole => "sts:AssumeRole",
            Self::CreateDbCluster => "rds:CreateDBCluster",
            Self::CreateDocument => "ssm:CreateDocument",
            Self::StartAutomationExecution => "ssm:StartAutomationExecution",
            Self::GetAutomationExecution => "ssm:GetAutomationExecution",
            Self::DeleteDocument => "ssm:DeleteDocument",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The service answered but left out a field the caller depends on.
    #[error("{operation}({target}): {message}")]
    MissingField {
        operation: Operation,
        target: String,
        message: &'static str,
    },

    /// The service call itself failed (transport, throttling, access denied, ...).
    #[error("{operation}({target}) failed: {message}")]
    Service {
        operation: Operation,
        target: String,
        message: String,
    },

    #[error("{operation}({target}): unrecognized execution status '{status}'")]
    UnrecognizedStatus {
        operation: Operation,
        target: String,
        status: String,
    },

    #[error("{operation}({target}): no terminal status after {attempts} queries")]
    PollLimitExceeded {
        operation: Operation,
        target: String,
        attempts: u32,
    },

    #[error("Unknown region code '{0}'")]
    UnknownRegion(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn missing(operation: Operation, target: impl Into<String>, message: &'static str) -> Self {
        Self::MissingField {
            operation,
            target: target.into(),
            message,
        }
    }

    pub fn service(
        operation: Operation,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Service {
            operation,
            target: target.into(),
            message: message.into(),
        }
    }

    /// The external operation this error came from, if any.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::MissingField { operation, .. }
            | Self::Service { operation, .. }
            | Self::UnrecognizedStatus { operation, .. }
            | Self::PollLimitExceeded { operation, .. } => Some(*operation),
            Self::UnknownRegion(_) | Self::Validation(_) => None,
        }
    }
}
