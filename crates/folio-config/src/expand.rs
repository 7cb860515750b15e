//! Environment references in `folio.toml` strings.
//!
//! Only `server.host` and `source.base_url` are expanded. A value without
//! `${` is kept as written, so a literal `$` needs no escaping.

use std::env::VarError;

use crate::{Config, ConfigError};

impl Config {
    /// Expand `${VAR}` and `${VAR:-default}` in the expandable fields.
    ///
    /// Runs on file values only; CLI overrides are applied afterwards and
    /// taken literally.
    pub(crate) fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let fields = [
            ("server.host", &mut self.server.host),
            ("source.base_url", &mut self.source.base_url),
        ];
        for (field, value) in fields {
            if value.contains("${") {
                *value = expand(value, field)?;
            }
        }
        Ok(())
    }
}

fn expand(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(value, |var| std::env::var(var).map(Some))
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: match e.cause {
                VarError::NotPresent => format!("${{{}}} not set", e.var_name),
                VarError::NotUnicode(_) => format!("${{{}}} is not valid UTF-8", e.var_name),
            },
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(host: &str, base_url: &str) -> Config {
        let mut config = Config::default();
        config.server.host = host.to_owned();
        config.source.base_url = base_url.to_owned();
        config
    }

    #[test]
    fn test_literal_fields_unchanged() {
        let mut config = config("0.0.0.0", "https://raw.example.com/$blog");
        config.expand_env_vars().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.source.base_url, "https://raw.example.com/$blog");
    }

    #[test]
    fn test_both_fields_expanded() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_EXPAND_OWNER", "octo");
            std::env::remove_var("FOLIO_EXPAND_HOST");
        }

        let mut config = config(
            "${FOLIO_EXPAND_HOST:-0.0.0.0}",
            "https://raw.example.com/${FOLIO_EXPAND_OWNER}/blog",
        );
        config.expand_env_vars().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.source.base_url, "https://raw.example.com/octo/blog");

        unsafe {
            std::env::remove_var("FOLIO_EXPAND_OWNER");
        }
    }

    #[test]
    fn test_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_EXPAND_MISSING");
        }

        let mut config = config("127.0.0.1", "${FOLIO_EXPAND_MISSING}");
        let err = config.expand_env_vars().unwrap_err();

        assert_eq!(
            err.to_string(),
            "Environment variable error in source.base_url: ${FOLIO_EXPAND_MISSING} not set"
        );
    }
}
