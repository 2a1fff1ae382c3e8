//! AWS SDK configuration loading.
//!
//! Region and credentials are always passed in explicitly; nothing here
//! mutates process-wide state.

use std::time::SystemTime;

use aws_config::{BehaviorVersion, SdkConfig};
use aws_credential_types::Credentials;
use aws_sdk_sts::config::Region as SdkRegion;
use rdsops_core::region::Region;
use rdsops_core::session::Session;

/// Provider name reported by credentials built from an assumed-role session.
const SESSION_PROVIDER_NAME: &str = "rdsops-assume-role";

/// Load the caller's own identity (environment, `AWS_PROFILE`, instance
/// metadata, ...) for `region`, optionally pinned to a shared-config profile.
pub async fn base_config(profile: Option<&str>, region: Region) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(SdkRegion::new(region.code()));
    if let Some(profile) = profile {
        loader = loader.profile_name(profile);
    }
    loader.load().await
}

/// Static credentials for an assumed-role session.
pub fn session_credentials(session: &Session) -> Credentials {
    let credentials = &session.credentials;
    Credentials::new(
        credentials.access_key_id.clone(),
        credentials.secret_access_key.clone(),
        Some(credentials.session_token.clone()),
        credentials.expiration.map(SystemTime::from),
        SESSION_PROVIDER_NAME,
    )
}

/// SDK configuration scoped to the session's region and credentials.
pub async fn session_config(session: &Session) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(SdkRegion::new(session.region.code()))
        .credentials_provider(session_credentials(session))
        .load()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_credential_types::provider::ProvideCredentials;
    use chrono::{TimeZone, Utc};
    use rdsops_core::session::TemporaryCredentials;

    fn session() -> Session {
        Session {
            account_id: "123456789012".into(),
            region: Region::from_code("eu-west-1").unwrap(),
            credentials: TemporaryCredentials {
                access_key_id: "ASIAEXAMPLE".into(),
                secret_access_key: "secret".into(),
                session_token: "token".into(),
                expiration: Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()),
            },
        }
    }

    #[tokio::test]
    async fn session_credentials_carry_token_and_expiry() {
        let credentials = session_credentials(&session())
            .provide_credentials()
            .await
            .unwrap();

        assert_eq!(credentials.access_key_id(), "ASIAEXAMPLE");
        assert_eq!(credentials.secret_access_key(), "secret");
        assert_eq!(credentials.session_token(), Some("token"));
        assert_eq!(
            credentials.expiry(),
            Some(SystemTime::from(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()))
        );
    }

    #[tokio::test]
    async fn session_config_uses_session_region() {
        let config = session_config(&session()).await;

        assert_eq!(config.region().map(|r| r.as_ref()), Some("eu-west-1"));
        assert!(config.credentials_provider().is_some());
    }
}
