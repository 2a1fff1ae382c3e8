//! STS-backed [`RoleAssumer`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rdsops_core::error::{CoreError, Operation};
use rdsops_core::service::RoleAssumer;
use rdsops_core::session::TemporaryCredentials;

use crate::error::sdk_error;

pub struct StsRoleAssumer {
    client: aws_sdk_sts::Client,
}

impl StsRoleAssumer {
    pub fn new(client: aws_sdk_sts::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoleAssumer for StsRoleAssumer {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<Option<TemporaryCredentials>, CoreError> {
        let output = self
            .client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name)
            .send()
            .await
            .map_err(|e| sdk_error(Operation::AssumeRole, role_arn, e))?;

        Ok(output.credentials().map(|c| TemporaryCredentials {
            access_key_id: c.access_key_id().to_string(),
            secret_access_key: c.secret_access_key().to_string(),
            session_token: c.session_token().to_string(),
            expiration: to_chrono(c.expiration()),
        }))
    }
}

/// Convert a Smithy timestamp, dropping values chrono cannot represent.
pub(crate) fn to_chrono(timestamp: &aws_smithy_types::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_smithy_timestamp() {
        let ts = aws_smithy_types::DateTime::from_secs_and_nanos(1_700_000_000, 500);

        let converted = to_chrono(&ts).unwrap();

        assert_eq!(converted.timestamp(), 1_700_000_000);
        assert_eq!(converted.timestamp_subsec_nanos(), 500);
    }
}
