//! Short-lived credentials obtained by assuming a role in a target account.

use chrono::{DateTime, Utc};

use crate::error::{CoreError, Operation};
use crate::naming;
use crate::region::Region;
use crate::service::RoleAssumer;

/// Which account/role/region a session is opened against.
#[derive(Debug, Clone)]
pub struct SessionParams {
    pub account_id: String,
    pub region: Region,
    pub role: String,
}

impl SessionParams {
    pub fn role_arn(&self) -> String {
        naming::role_arn(&self.account_id, &self.role)
    }
}

/// STS-issued credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for TemporaryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemporaryCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Credentials scoped to one account and region.
#[derive(Debug, Clone)]
pub struct Session {
    pub account_id: String,
    pub region: Region,
    pub credentials: TemporaryCredentials,
}

impl Session {
    /// Assume `params.role` in `params.account_id`. The role name doubles as
    /// the STS session name.
    pub async fn establish(
        assumer: &dyn RoleAssumer,
        params: &SessionParams,
    ) -> Result<Self, CoreError> {
        naming::validate_account_id(&params.account_id)?;

        let role_arn = params.role_arn();
        let target = format!("{},{}", params.region.code(), params.account_id);

        tracing::info!(
            account_id = %params.account_id,
            region = params.region.code(),
            role_arn = %role_arn,
            "Assuming role",
        );

        let credentials = assumer
            .assume_role(&role_arn, &params.role)
            .await?
            .ok_or_else(|| {
                CoreError::missing(Operation::AssumeRole, target, "no credentials returned")
            })?;

        tracing::debug!(
            access_key_id = %credentials.access_key_id,
            expiration = ?credentials.expiration,
            "Role assumed",
        );

        Ok(Self {
            account_id: params.account_id.clone(),
            region: params.region,
            credentials,
        })
    }

    /// Whether the credentials have passed their expiration at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.credentials
            .expiration
            .is_some_and(|expiration| expiration <= now)
    }
}
