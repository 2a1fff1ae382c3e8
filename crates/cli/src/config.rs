use std::time::Duration;

use rdsops_core::naming::{self, ResourceTags};
use rdsops_core::poller::{PollConfig, DEFAULT_POLL_INTERVAL};
use rdsops_core::region::Region;
use rdsops_core::session::SessionParams;

/// Region used when `RDSOPS_REGION` is unset.
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Operator configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Account, region and role to assume.
    pub session: SessionParams,
    /// Shared-config profile holding the caller's own credentials.
    pub profile: Option<String>,
    /// Owner/purpose tags for every created resource.
    pub tags: ResourceTags,
    pub poll: PollConfig,
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                    | Required | Default     |
    /// |----------------------------|----------|-------------|
    /// | `RDSOPS_ACCOUNT_ID`        | yes      | --          |
    /// | `RDSOPS_REGION`            | no       | `us-east-1` |
    /// | `RDSOPS_ROLE`              | yes      | --          |
    /// | `AWS_PROFILE`              | no       | SDK default |
    /// | `RDSOPS_OWNER`             | yes      | --          |
    /// | `RDSOPS_PURPOSE`           | yes      | --          |
    /// | `RDSOPS_POLL_INTERVAL_MS`  | no       | `1000`      |
    /// | `RDSOPS_POLL_MAX_ATTEMPTS` | no       | unbounded   |
    /// | `RDSOPS_STRICT_STATUS`     | no       | `false`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let account_id = require("RDSOPS_ACCOUNT_ID")?;
        naming::validate_account_id(&account_id).map_err(|e| ConfigError::Invalid {
            var: "RDSOPS_ACCOUNT_ID",
            reason: e.to_string(),
        })?;

        let region_code = get("RDSOPS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());
        let region = Region::from_code(&region_code).map_err(|e| ConfigError::Invalid {
            var: "RDSOPS_REGION",
            reason: e.to_string(),
        })?;

        let session = SessionParams {
            account_id,
            region,
            role: require("RDSOPS_ROLE")?,
        };
        let tags = ResourceTags::new(require("RDSOPS_OWNER")?, require("RDSOPS_PURPOSE")?);

        let interval = match get("RDSOPS_POLL_INTERVAL_MS") {
            Some(raw) => Duration::from_millis(parse_positive(&raw, "RDSOPS_POLL_INTERVAL_MS")?),
            None => DEFAULT_POLL_INTERVAL,
        };
        let max_attempts = get("RDSOPS_POLL_MAX_ATTEMPTS")
            .map(|raw| parse_positive(&raw, "RDSOPS_POLL_MAX_ATTEMPTS"))
            .transpose()?;
        let strict_status = match get("RDSOPS_STRICT_STATUS") {
            Some(raw) => parse_bool(&raw, "RDSOPS_STRICT_STATUS")?,
            None => false,
        };

        Ok(Self {
            session,
            profile: get("AWS_PROFILE"),
            tags,
            poll: PollConfig {
                interval,
                max_attempts,
                strict_status,
            },
        })
    }
}

/// Parse a number that must be at least 1.
fn parse_positive<T>(raw: &str, var: &'static str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default + PartialEq,
    T::Err: std::fmt::Display,
{
    let value: T = raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })?;
    if value == T::default() {
        return Err(ConfigError::Invalid {
            var,
            reason: "must be greater than zero".into(),
        });
    }
    Ok(value)
}

fn parse_bool(raw: &str, var: &'static str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(ConfigError::Invalid {
            var,
            reason: format!("expected true/false, got '{other}'"),
        }),
    }
}
