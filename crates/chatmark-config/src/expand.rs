//! `${VAR}` expansion for string settings in `chatmark.toml`.
//!
//! - `${VAR}` is replaced by the value of VAR and fails when VAR is unset
//! - `${VAR:-default}` falls back to `default` when VAR is unset
//!
//! A value without any `${` is returned untouched, bare `$VAR` included. Once
//! a value contains `${`, bare `$VAR` references in it are expanded too.

use crate::ConfigError;

/// Expand variable references in one setting.
///
/// `field` is the dotted config path reported in errors.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(UnsetVar(var.to_owned())),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Expand every entry of a list setting in place.
pub(crate) fn expand_env_list(values: &mut [String], field: &str) -> Result<(), ConfigError> {
    for value in values {
        *value = expand_env(value, field)?;
    }
    Ok(())
}

/// Name of a variable that was referenced but not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_dialect_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CHATMARK_TEST_DIALECT", "basic");
        }
        let result = expand_env("${CHATMARK_TEST_DIALECT}", "render.dialect").unwrap();
        assert_eq!(result, "basic");
        unsafe {
            std::env::remove_var("CHATMARK_TEST_DIALECT");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CHATMARK_TEST_UNSET");
        }
        let result = expand_env("${CHATMARK_TEST_UNSET:-extended}", "render.dialect").unwrap();
        assert_eq!(result, "extended");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CHATMARK_TEST_MISSING");
        }
        let err = expand_env("${CHATMARK_TEST_MISSING}", "render.dialect").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("CHATMARK_TEST_MISSING"));
        assert!(err.to_string().contains("render.dialect"));
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("extended", "f").unwrap(), "extended");
        assert_eq!(expand_env("$VAR", "f").unwrap(), "$VAR");
    }

    #[test]
    fn test_bare_var_expanded_alongside_braced() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CHATMARK_TEST_MIXED_A", "bold");
            std::env::set_var("CHATMARK_TEST_MIXED_B", "italic");
        }
        let result =
            expand_env("${CHATMARK_TEST_MIXED_A} $CHATMARK_TEST_MIXED_B", "render.disable").unwrap();
        assert_eq!(result, "bold italic");
        unsafe {
            std::env::remove_var("CHATMARK_TEST_MIXED_A");
            std::env::remove_var("CHATMARK_TEST_MIXED_B");
        }
    }

    #[test]
    fn test_expand_list() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CHATMARK_TEST_RULE", "italic");
        }
        let mut values = vec!["${CHATMARK_TEST_RULE}".to_owned(), "bold".to_owned()];
        expand_env_list(&mut values, "render.disable").unwrap();
        assert_eq!(values, vec!["italic".to_owned(), "bold".to_owned()]);
        unsafe {
            std::env::remove_var("CHATMARK_TEST_RULE");
        }
    }
}
