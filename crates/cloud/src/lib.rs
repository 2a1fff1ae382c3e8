//! AWS SDK implementations of the `rdsops-core` service traits.
//!
//! [`AwsSession::establish`] assumes the configured role with the caller's
//! own identity and hands out SSM and RDS clients bound to the resulting
//! temporary credentials.

pub mod config;
pub mod error;
pub mod rds;
pub mod ssm;
pub mod sts;

use std::sync::Arc;

use aws_config::SdkConfig;
use rdsops_core::error::CoreError;
use rdsops_core::session::{Session, SessionParams};

use crate::rds::RdsClusters;
use crate::ssm::SsmAutomation;
use crate::sts::StsRoleAssumer;

/// An assumed-role session plus the SDK configuration built from it.
pub struct AwsSession {
    session: Session,
    sdk_config: SdkConfig,
}

impl AwsSession {
    /// Assume `params.role` using the identity resolved from `profile`
    /// (or the default credential chain when `None`).
    pub async fn establish(params: &SessionParams, profile: Option<&str>) -> Result<Self, CoreError> {
        let base = config::base_config(profile, params.region).await;
        let assumer = StsRoleAssumer::new(aws_sdk_sts::Client::new(&base));

        let session = Session::establish(&assumer, params).await?;
        let sdk_config = config::session_config(&session).await;

        Ok(Self {
            session,
            sdk_config,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn automation(&self) -> Arc<SsmAutomation> {
        Arc::new(SsmAutomation::new(aws_sdk_ssm::Client::new(&self.sdk_config)))
    }

    pub fn clusters(&self) -> RdsClusters {
        RdsClusters::new(aws_sdk_rds::Client::new(&self.sdk_config))
    }
}
