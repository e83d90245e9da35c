//! Environment variable expansion for configuration strings.
//!
//! Supports `${VAR}` and `${VAR:-default}`. A reference without a default
//! whose variable is unset is an error.

use crate::ConfigError;

/// Expand environment variables in `value` using the process environment.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    expand_with(value, field, |name| std::env::var(name).ok())
}

/// Expand variables in `value`, resolving names through `lookup`.
pub(crate) fn expand_with<F>(value: &str, field: &str, mut lookup: F) -> Result<String, ConfigError>
where
    F: FnMut(&str) -> Option<String>,
{
    if !value.contains('$') {
        return Ok(value.to_owned());
    }

    let expanded = shellexpand::env_with_context(value, |name: &str| {
        Ok::<_, std::convert::Infallible>(lookup(name))
    })
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: e.to_string(),
    })?;

    // Unresolved references without a default are left verbatim.
    if let Some(start) = expanded.find("${") {
        let rest = &expanded[start + 2..];
        let name = rest.split('}').next().unwrap_or(rest);
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{name}}} not set"),
        });
    }

    Ok(expanded.into_owned())
}
