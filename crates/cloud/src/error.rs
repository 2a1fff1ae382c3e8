//! Mapping of AWS SDK failures into [`CoreError`].

use aws_smithy_types::error::display::DisplayErrorContext;
use rdsops_core::error::{CoreError, Operation};

/// Wrap an SDK error, keeping the full source chain in the message.
///
/// `SdkError`'s own `Display` is just "service error"; the service error
/// code and message only show up in the source chain.
pub fn sdk_error<E>(operation: Operation, target: &str, err: E) -> CoreError
where
    E: std::error::Error,
{
    let message = DisplayErrorContext(err).to_string();
    tracing::warn!(operation = %operation, resource = target, error = %message, "AWS call failed");
    CoreError::service(operation, target, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_includes_source_chain() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");

        let err = sdk_error(Operation::DeleteDocument, "doc", inner);

        let rendered = err.to_string();
        assert!(rendered.starts_with("ssm:DeleteDocument(doc) failed: "));
        assert!(rendered.contains("connection reset"));
        assert_eq!(err.operation(), Some(Operation::DeleteDocument));
    }
}
