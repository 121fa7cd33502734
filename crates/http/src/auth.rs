use std::fmt;
use std::str::FromStr;

use stitch_core::CoreError;

/// Authorization-header strategy.
///
/// One configurable scheme replaces per-variant client subclasses: the header
/// value is `"{scheme} {secret}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    #[default]
    Bearer,
    Basic,
}

impl AuthScheme {
    /// Render the full Authorization header value for a secret.
    pub fn header_value(&self, secret: &str) -> String {
        format!("{} {}", self, secret)
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthScheme::Bearer => write!(f, "Bearer"),
            AuthScheme::Basic => write!(f, "Basic"),
        }
    }
}

impl FromStr for AuthScheme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bearer" => Ok(AuthScheme::Bearer),
            "basic" => Ok(AuthScheme::Basic),
            other => Err(CoreError::Configuration(format!(
                "authorization scheme must be Bearer or Basic, got '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_schemes_case_insensitively() {
        assert_eq!("Bearer".parse::<AuthScheme>().unwrap(), AuthScheme::Bearer);
        assert_eq!("bearer".parse::<AuthScheme>().unwrap(), AuthScheme::Bearer);
        assert_eq!("BASIC".parse::<AuthScheme>().unwrap(), AuthScheme::Basic);
    }

    #[test]
    fn rejects_unknown_scheme() {
        let err = "Digest".parse::<AuthScheme>().unwrap_err();
        assert!(err.to_string().contains("Digest"));
    }

    #[test]
    fn header_value_shape() {
        assert_eq!(AuthScheme::Bearer.header_value("abc"), "Bearer abc");
        assert_eq!(AuthScheme::Basic.header_value("dXNlcg=="), "Basic dXNlcg==");
    }
}
