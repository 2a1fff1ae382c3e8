//! `KEY=VALUE` execution parameters from the command line.

use rdsops_core::service::Parameters;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("Parameter '{0}' must have the form KEY=VALUE")]
    MissingSeparator(String),

    #[error("Parameter '{0}' has an empty name")]
    EmptyName(String),
}

/// Collect `KEY=VALUE` pairs into execution parameters.
///
/// Repeating a key appends to its value list, in command-line order.
pub fn parse_parameters<S: AsRef<str>>(pairs: &[S]) -> Result<Parameters, ParamError> {
    let mut parameters = Parameters::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| ParamError::MissingSeparator(pair.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ParamError::EmptyName(pair.to_string()));
        }
        parameters
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
    }
    Ok(parameters)
}
