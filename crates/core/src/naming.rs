//! Resource naming conventions and the owner/purpose tags applied to every
//! resource this crate creates.
//!
//! Names are validated here, before any request leaves the process, so an
//! invalid owner or purpose fails fast instead of as an opaque AWS error.

use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::error::CoreError;

static ACCOUNT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{12}$").expect("valid regex"));

/// RDS: 1-63 chars, leading letter, letters/digits/hyphens.
static CLUSTER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]{0,62}$").expect("valid regex"));

/// SSM: 3-128 chars of letters, digits, `_`, `-`, `.`.
static DOCUMENT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_.\-]{3,128}$").expect("valid regex"));

/// Prefixes SSM reserves for AWS-owned documents.
const RESERVED_DOCUMENT_PREFIXES: &[&str] = &["aws", "amazon", "amzn"];

/// Tag key for the person who created the resource.
pub const TAG_OWNER: &str = "owner";

/// Tag key for why the resource exists (usually a ticket id).
pub const TAG_PURPOSE: &str = "purpose";

/// Number of hex characters of the engine-version digest kept in cluster ids.
const VERSION_HASH_LEN: usize = 8;

/// Owner/purpose metadata attached to every created resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTags {
    pub owner: String,
    pub purpose: String,
}

impl ResourceTags {
    pub fn new(owner: impl Into<String>, purpose: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            purpose: purpose.into(),
        }
    }

    /// Key/value pairs in a stable order.
    pub fn pairs(&self) -> [(&'static str, &str); 2] {
        [(TAG_OWNER, &self.owner), (TAG_PURPOSE, &self.purpose)]
    }
}

pub fn validate_account_id(account_id: &str) -> Result<(), CoreError> {
    if ACCOUNT_ID_RE.is_match(account_id) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Account id '{account_id}' must be exactly 12 digits"
        )))
    }
}

/// IAM role ARN for `role` in `account_id`.
pub fn role_arn(account_id: &str, role: &str) -> String {
    format!("arn:aws:iam::{account_id}:role/{role}")
}

/// Short, stable digest of an engine version string.
///
/// Engine versions such as `5.7.mysql_aurora.2.04.5` contain characters RDS
/// does not accept in identifiers, so only a digest goes into the name.
pub fn version_hash(engine_version: &str) -> String {
    let digest = Sha256::digest(engine_version.as_bytes());
    let hex = format!("{digest:x}");
    hex[..VERSION_HASH_LEN].to_string()
}

/// Build the DB cluster identifier `{owner}-{purpose}-{engine}-{hash}-test`.
///
/// RDS stores identifiers lowercased, so the result is lowercased before
/// validation.
pub fn cluster_identifier(
    tags: &ResourceTags,
    engine: &str,
    engine_version: &str,
) -> Result<String, CoreError> {
    let identifier = format!(
        "{}-{}-{}-{}-test",
        tags.owner,
        tags.purpose,
        engine,
        version_hash(engine_version)
    )
    .to_lowercase();

    validate_cluster_identifier(&identifier)?;
    Ok(identifier)
}

pub fn validate_cluster_identifier(identifier: &str) -> Result<(), CoreError> {
    if !CLUSTER_ID_RE.is_match(identifier) {
        return Err(CoreError::Validation(format!(
            "Cluster identifier '{identifier}' must start with a letter and contain only \
             lowercase letters, digits and hyphens (max 63)"
        )));
    }
    if identifier.contains("--") || identifier.ends_with('-') {
        return Err(CoreError::Validation(format!(
            "Cluster identifier '{identifier}' cannot contain '--' or end with '-'"
        )));
    }
    Ok(())
}

/// Build the automation document name `{owner}-{purpose}-SSM-Document`.
pub fn document_name(tags: &ResourceTags) -> Result<String, CoreError> {
    let name = format!("{}-{}-SSM-Document", tags.owner, tags.purpose);
    validate_document_name(&name)?;
    Ok(name)
}

pub fn validate_document_name(name: &str) -> Result<(), CoreError> {
    if !DOCUMENT_NAME_RE.is_match(name) {
        return Err(CoreError::Validation(format!(
            "Document name '{name}' must be 3-128 characters of letters, digits, '_', '-' or '.'"
        )));
    }
    let lower = name.to_lowercase();
    if let Some(prefix) = RESERVED_DOCUMENT_PREFIXES
        .iter()
        .find(|p| lower.starts_with(*p))
    {
        return Err(CoreError::Validation(format!(
            "Document name '{name}' cannot start with reserved prefix '{prefix}'"
        )));
    }
    Ok(())
}
