//! Instrument name validation.
//!
//! An instrument name doubles as the top-level directory segment under the
//! store root, so it must be a single, safe path component:
//!
//! - Must be non-empty
//! - Must not contain path separators (`/`, `\`), whitespace, or `:`
//! - Must not be `.` or `..`, and must not start with `.`
//! - Must not contain control characters

use crate::error::TypeError;

/// Characters that are forbidden anywhere in an instrument name.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', ' ', '\t', '\n', '\r'];

/// Validate an instrument name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use retune_types::validate_instrument_name;
///
/// assert!(validate_instrument_name("laser1").is_ok());
/// assert!(validate_instrument_name("opa-800_signal").is_ok());
/// assert!(validate_instrument_name("").is_err());
/// assert!(validate_instrument_name("../escape").is_err());
/// ```
pub fn validate_instrument_name(name: &str) -> Result<(), TypeError> {
    if name.is_empty() {
        return Err(TypeError::InvalidName {
            name: name.to_string(),
            reason: "name must not be empty".into(),
        });
    }

    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(TypeError::InvalidName {
                name: name.to_string(),
                reason: format!("contains forbidden character: {ch:?}"),
            });
        }
    }

    if name == "." || name == ".." {
        return Err(TypeError::InvalidName {
            name: name.to_string(),
            reason: "must not be a relative path component".into(),
        });
    }

    if name.starts_with('.') {
        return Err(TypeError::InvalidName {
            name: name.to_string(),
            reason: "must not start with '.'".into(),
        });
    }

    if name.chars().any(|c| c.is_control()) {
        return Err(TypeError::InvalidName {
            name: name.to_string(),
            reason: "must not contain control characters".into(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        assert!(validate_instrument_name("laser1").is_ok());
        assert!(validate_instrument_name("OPA-800").is_ok());
        assert!(validate_instrument_name("topas_c1_idler").is_ok());
        assert!(validate_instrument_name("w1").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(validate_instrument_name("").is_err());
    }

    #[test]
    fn reject_separators() {
        assert!(validate_instrument_name("a/b").is_err());
        assert!(validate_instrument_name("a\\b").is_err());
    }

    #[test]
    fn reject_whitespace() {
        assert!(validate_instrument_name("has space").is_err());
        assert!(validate_instrument_name("has\ttab").is_err());
    }

    #[test]
    fn reject_dot_components() {
        assert!(validate_instrument_name(".").is_err());
        assert!(validate_instrument_name("..").is_err());
        assert!(validate_instrument_name(".hidden").is_err());
    }

    #[test]
    fn reject_colon() {
        assert!(validate_instrument_name("a:b").is_err());
    }
}
