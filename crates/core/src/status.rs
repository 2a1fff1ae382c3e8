//! Automation execution status values reported by SSM.
//!
//! Each variant maps to the exact string SSM returns in
//! `AutomationExecutionStatus`. Values this crate has never seen are kept
//! verbatim in [`ExecutionStatus::Unknown`].

macro_rules! define_execution_status {
    (
        $(#[$meta:meta])*
        $name:ident {
            terminal { $( $(#[$tmeta:meta])* $terminal:ident = $tstr:literal ),+ $(,)? }
            running { $( $(#[$rmeta:meta])* $running:ident = $rstr:literal ),+ $(,)? }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$tmeta])* $terminal, )+
            $( $(#[$rmeta])* $running, )+
            /// A status string not in the known set.
            Unknown(String),
        }

        impl $name {
            /// Parse the wire value. Never fails; unrecognized values become `Unknown`.
            pub fn parse(value: &str) -> Self {
                match value {
                    $( $tstr => Self::$terminal, )+
                    $( $rstr => Self::$running, )+
                    other => Self::Unknown(other.to_string()),
                }
            }

            /// The wire value.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$terminal => $tstr, )+
                    $( Self::$running => $rstr, )+
                    Self::Unknown(other) => other.as_str(),
                }
            }

            /// No further state change happens after a terminal status.
            pub fn is_terminal(&self) -> bool {
                matches!(self, $( Self::$terminal )|+)
            }

            /// Statuses in the terminal set.
            pub const TERMINAL: &'static [&'static str] = &[$( $tstr ),+];

            /// Known statuses that mean the execution is still going.
            pub const RUNNING: &'static [&'static str] = &[$( $rstr ),+];
        }
    };
}

define_execution_status! {
    /// Status of one automation execution.
    ExecutionStatus {
        terminal {
            Success = "Success",
            TimedOut = "TimedOut",
            Cancelled = "Cancelled",
            Failed = "Failed",
            CompletedWithSuccess = "CompletedWithSuccess",
            CompletedWithFailure = "CompletedWithFailure",
        }
        running {
            Pending = "Pending",
            InProgress = "InProgress",
            Waiting = "Waiting",
            Cancelling = "Cancelling",
            PendingApproval = "PendingApproval",
            Approved = "Approved",
            Rejected = "Rejected",
            Scheduled = "Scheduled",
            RunbookInProgress = "RunbookInProgress",
            PendingChangeCalendarOverride = "PendingChangeCalendarOverride",
            ChangeCalendarOverrideApproved = "ChangeCalendarOverrideApproved",
            ChangeCalendarOverrideRejected = "ChangeCalendarOverrideRejected",
            Exited = "Exited",
        }
    }
}

impl ExecutionStatus {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_set_is_exactly_six() {
        assert_eq!(ExecutionStatus::TERMINAL.len(), 6);
        for value in ExecutionStatus::TERMINAL {
            let status = ExecutionStatus::parse(value);
            assert!(status.is_terminal(), "{value} should be terminal");
            assert_eq!(status.as_str(), *value);
        }
    }

    #[test]
    fn running_values_are_not_terminal() {
        for value in ExecutionStatus::RUNNING {
            let status = ExecutionStatus::parse(value);
            assert!(!status.is_terminal(), "{value} should not be terminal");
            assert!(!status.is_unknown());
        }
    }

    #[test]
    fn unrecognized_value_is_kept_verbatim() {
        let status = ExecutionStatus::parse("Levitating");
        assert_eq!(status, ExecutionStatus::Unknown("Levitating".into()));
        assert!(!status.is_terminal());
        assert_eq!(status.to_string(), "Levitating");
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!(ExecutionStatus::parse("success").is_unknown());
    }
}
