//! Core logic for RDS/SSM automation runbooks.
//!
//! Cloud services are reached through the traits in [`service`]; the AWS SDK
//! implementations live in `rdsops-cloud`. Everything here is testable with
//! in-memory fakes.

pub mod cluster;
pub mod document;
pub mod error;
pub mod naming;
pub mod poller;
pub mod region;
pub mod runbook;
pub mod service;
pub mod session;
pub mod status;
