//! Typed model of an SSM automation document (schema version 0.3).
//!
//! Serializes to the JSON content accepted by `CreateDocument`. Only the
//! `aws:sleep` and `aws:executeAwsApi` actions are modelled.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The only automation schema version SSM currently accepts.
pub const SCHEMA_VERSION: &str = "0.3";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationDocument {
    pub schema_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assume_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, ParameterSpec>,
    pub main_steps: Vec<Step>,
    #[serde(default)]
    pub outputs: Vec<String>,
}

impl AutomationDocument {
    pub fn new(main_steps: Vec<Step>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            assume_role: None,
            description: None,
            parameters: BTreeMap::new(),
            main_steps,
            outputs: Vec::new(),
        }
    }

    pub fn with_assume_role(mut self, role: impl Into<String>) -> Self {
        self.assume_role = Some(role.into());
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, spec: ParameterSpec) -> Self {
        self.parameters.insert(name.into(), spec);
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.outputs.push(output.into());
        self
    }

    /// Parse a document from its JSON content.
    pub fn from_json(content: &str) -> Result<Self, CoreError> {
        let document: Self = serde_json::from_str(content)
            .map_err(|e| CoreError::Validation(format!("Invalid automation document: {e}")))?;
        document.validate()?;
        Ok(document)
    }

    /// JSON content for `CreateDocument`.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string(self)
            .map_err(|e| CoreError::Validation(format!("Cannot serialize automation document: {e}")))
    }

    /// Structural checks SSM would otherwise reject at creation time.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(CoreError::Validation(format!(
                "Unsupported schemaVersion '{}', expected '{SCHEMA_VERSION}'",
                self.schema_version
            )));
        }
        if self.main_steps.is_empty() {
            return Err(CoreError::Validation(
                "Automation document needs at least one step".into(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for step in &self.main_steps {
            if step.inputs.action() != step.action {
                return Err(CoreError::Validation(format!(
                    "Step '{}' has inputs that do not match its action",
                    step.name
                )));
            }
            if !seen.insert(step.name.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate step name '{}'",
                    step.name
                )));
            }
        }
        for step in &self.main_steps {
            if let Some(next) = &step.next_step {
                if !seen.contains(next.as_str()) {
                    return Err(CoreError::Validation(format!(
                        "Step '{}' points to unknown nextStep '{next}'",
                        step.name
                    )));
                }
            }
        }
        for output in &self.outputs {
            let step = output.split('.').next().unwrap_or_default();
            if !seen.contains(step) {
                return Err(CoreError::Validation(format!(
                    "Output '{output}' does not reference a known step"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    String,
    StringList,
    Integer,
    Boolean,
    MapList,
    StringMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    #[serde(rename = "type")]
    pub kind: ParameterType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<serde_json::Value>>,
}

impl ParameterSpec {
    pub fn new(kind: ParameterType) -> Self {
        Self {
            kind,
            description: None,
            default: None,
            allowed_values: None,
        }
    }

    pub fn string() -> Self {
        Self::new(ParameterType::String)
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepAction {
    #[serde(rename = "aws:sleep")]
    Sleep,
    #[serde(rename = "aws:executeAwsApi")]
    ExecuteAwsApi,
}

/// Step inputs. The shape depends on the step's action; when parsing, the
/// variant is chosen from `action`, never guessed from the keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StepInputs {
    Sleep {
        /// ISO-8601 duration, e.g. `PT2S`.
        #[serde(rename = "Duration")]
        duration: String,
    },
    ExecuteAwsApi {
        #[serde(rename = "Service")]
        service: String,
        #[serde(rename = "Api")]
        api: String,
        /// Request fields passed through to the API call.
        #[serde(flatten)]
        request: serde_json::Map<String, serde_json::Value>,
    },
}

impl StepInputs {
    /// The action these inputs belong to.
    pub fn action(&self) -> StepAction {
        match self {
            Self::Sleep { .. } => StepAction::Sleep,
            Self::ExecuteAwsApi { .. } => StepAction::ExecuteAwsApi,
        }
    }

    fn from_value(action: StepAction, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        match action {
            StepAction::Sleep => {
                let SleepInputs { duration } = serde_json::from_value(value)?;
                Ok(Self::Sleep { duration })
            }
            StepAction::ExecuteAwsApi => {
                let ApiInputs {
                    service,
                    api,
                    request,
                } = serde_json::from_value(value)?;
                Ok(Self::ExecuteAwsApi {
                    service,
                    api,
                    request,
                })
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SleepInputs {
    #[serde(rename = "Duration")]
    duration: String,
}

#[derive(Deserialize)]
struct ApiInputs {
    #[serde(rename = "Service")]
    service: String,
    #[serde(rename = "Api")]
    api: String,
    #[serde(flatten)]
    request: serde_json::Map<String, serde_json::Value>,
}

/// A value extracted from an `aws:executeAwsApi` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutput {
    #[serde(rename = "Name")]
    pub name: String,
    /// JSONPath into the API response.
    #[serde(rename = "Selector")]
    pub selector: String,
    #[serde(rename = "Type")]
    pub kind: String,
}

impl StepOutput {
    pub fn new(
        name: impl Into<String>,
        selector: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            selector: selector.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawStep")]
pub struct Step {
    pub name: String,
    pub action: StepAction,
    pub inputs: StepInputs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<StepOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u32>,
    /// `Abort`, `Continue`, or `step:<name>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_failure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_cancel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_end: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_critical: Option<bool>,
}

/// Wire form of a step, with inputs left untyped until `action` is known.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStep {
    name: String,
    action: StepAction,
    inputs: serde_json::Value,
    #[serde(default)]
    outputs: Vec<StepOutput>,
    #[serde(default)]
    max_attempts: Option<u32>,
    #[serde(default)]
    timeout_seconds: Option<u32>,
    #[serde(default)]
    on_failure: Option<String>,
    #[serde(default)]
    on_cancel: Option<String>,
    #[serde(default)]
    is_end: Option<bool>,
    #[serde(default)]
    next_step: Option<String>,
    #[serde(default)]
    is_critical: Option<bool>,
}

impl TryFrom<RawStep> for Step {
    type Error = String;

    fn try_from(raw: RawStep) -> Result<Self, Self::Error> {
        let inputs = StepInputs::from_value(raw.action, raw.inputs)
            .map_err(|e| format!("step '{}' has invalid inputs: {e}", raw.name))?;
        Ok(Self {
            name: raw.name,
            action: raw.action,
            inputs,
            outputs: raw.outputs,
            max_attempts: raw.max_attempts,
            timeout_seconds: raw.timeout_seconds,
            on_failure: raw.on_failure,
            on_cancel: raw.on_cancel,
            is_end: raw.is_end,
            next_step: raw.next_step,
            is_critical: raw.is_critical,
        })
    }
}

impl Step {
    fn bare(name: impl Into<String>, action: StepAction, inputs: StepInputs) -> Self {
        Self {
            name: name.into(),
            action,
            inputs,
            outputs: Vec::new(),
            max_attempts: None,
            timeout_seconds: None,
            on_failure: None,
            on_cancel: None,
            is_end: None,
            next_step: None,
            is_critical: None,
        }
    }

    /// `aws:sleep` for an ISO-8601 duration such as `PT2S`.
    pub fn sleep(name: impl Into<String>, duration: impl Into<String>) -> Self {
        Self::bare(
            name,
            StepAction::Sleep,
            StepInputs::Sleep {
                duration: duration.into(),
            },
        )
    }

    /// `aws:executeAwsApi` calling `api` on `service` (e.g. `rds`, `ec2`).
    pub fn execute_aws_api(
        name: impl Into<String>,
        service: impl Into<String>,
        api: impl Into<String>,
    ) -> Self {
        Self::bare(
            name,
            StepAction::ExecuteAwsApi,
            StepInputs::ExecuteAwsApi {
                service: service.into(),
                api: api.into(),
                request: serde_json::Map::new(),
            },
        )
    }

    /// Add a request field to an `aws:executeAwsApi` step. No-op for other actions.
    pub fn with_input(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        if let StepInputs::ExecuteAwsApi { request, .. } = &mut self.inputs {
            request.insert(key.into(), value);
        }
        self
    }

    pub fn with_output(mut self, output: StepOutput) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn then(mut self, next_step: impl Into<String>) -> Self {
        self.next_step = Some(next_step.into());
        self
    }

    pub fn end(mut self) -> Self {
        self.is_end = Some(true);
        self
    }
}
