//! RDS-backed [`ClusterService`].

use async_trait::async_trait;
use aws_sdk_rds::types::Tag;
use rdsops_core::error::{CoreError, Operation};
use rdsops_core::service::{ClusterDescription, ClusterService, CreateClusterRequest};

use crate::error::sdk_error;

pub struct RdsClusters {
    client: aws_sdk_rds::Client,
}

impl RdsClusters {
    pub fn new(client: aws_sdk_rds::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClusterService for RdsClusters {
    async fn create_cluster(
        &self,
        request: &CreateClusterRequest,
    ) -> Result<Option<ClusterDescription>, CoreError> {
        let tags = request
            .tags
            .iter()
            .map(|(key, value)| Tag::builder().key(key).value(value).build())
            .collect();

        let output = self
            .client
            .create_db_cluster()
            .db_cluster_identifier(&request.identifier)
            .database_name(&request.database_name)
            .engine(&request.engine)
            .engine_version(&request.engine_version)
            .master_username(&request.master_username)
            .master_user_password(&request.master_password)
            .set_tags(Some(tags))
            .send()
            .await
            .map_err(|e| sdk_error(Operation::CreateDbCluster, &request.identifier, e))?;

        Ok(output.db_cluster().map(|c| ClusterDescription {
            identifier: c.db_cluster_identifier().map(str::to_string),
        }))
    }
}
