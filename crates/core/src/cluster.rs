//! Managed database clusters.

use crate::error::{CoreError, Operation};
use crate::naming::{self, ResourceTags};
use crate::service::{ClusterService, CreateClusterRequest};

/// Database name every test cluster is created with.
pub const DEFAULT_DATABASE_NAME: &str = "DatabaseName";

/// Handle to a DB cluster that exists in RDS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub identifier: String,
}

/// Engine selection for [`create_cluster`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSpec {
    /// e.g. `aurora-mysql`, `aurora-postgresql`.
    pub engine: String,
    /// e.g. `5.7.mysql_aurora.2.04.5`.
    pub engine_version: String,
}

/// Build the `CreateDBCluster` request for `spec`.
///
/// The owner is used as master user name and password; these clusters are
/// throwaway test fixtures.
pub fn cluster_request(
    tags: &ResourceTags,
    spec: &ClusterSpec,
) -> Result<CreateClusterRequest, CoreError> {
    Ok(CreateClusterRequest {
        identifier: naming::cluster_identifier(tags, &spec.engine, &spec.engine_version)?,
        database_name: DEFAULT_DATABASE_NAME.to_string(),
        engine: spec.engine.clone(),
        engine_version: spec.engine_version.clone(),
        master_username: tags.owner.clone(),
        master_password: tags.owner.clone(),
        tags: tags
            .pairs()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    })
}

/// Issue one `CreateDBCluster` call. A second call creates a second cluster
/// (or fails on the identifier clash); nothing is deduplicated.
pub async fn create_cluster(
    service: &dyn ClusterService,
    tags: &ResourceTags,
    spec: &ClusterSpec,
) -> Result<Cluster, CoreError> {
    let request = cluster_request(tags, spec)?;

    tracing::info!(
        identifier = %request.identifier,
        engine = %request.engine,
        engine_version = %request.engine_version,
        "Creating DB cluster",
    );

    let description = service.create_cluster(&request).await?.ok_or_else(|| {
        CoreError::missing(
            Operation::CreateDbCluster,
            &request.identifier,
            "no cluster description returned",
        )
    })?;
    let identifier = description.identifier.ok_or_else(|| {
        CoreError::missing(
            Operation::CreateDbCluster,
            &request.identifier,
            "no cluster identifier returned",
        )
    })?;

    tracing::info!(identifier = %identifier, "DB cluster created");
    Ok(Cluster { identifier })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_owner_as_master_credentials() {
        let tags = ResourceTags::new("jdoe", "ops-1");
        let spec = ClusterSpec {
            engine: "aurora-mysql".into(),
            engine_version: "5.7.mysql_aurora.2.04.5".into(),
        };

        let request = cluster_request(&tags, &spec).unwrap();

        assert_eq!(request.master_username, "jdoe");
        assert_eq!(request.master_password, "jdoe");
        assert_eq!(request.database_name, "DatabaseName");
        assert!(request.identifier.starts_with("jdoe-ops-1-aurora-mysql-"));
        assert!(request.identifier.ends_with("-test"));
        assert_eq!(
            request.tags,
            vec![
                ("owner".to_string(), "jdoe".to_string()),
                ("purpose".to_string(), "ops-1".to_string()),
            ]
        );
    }
}
