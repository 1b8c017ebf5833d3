use crate::utils::error::{MtgaError, Result};
use url::Url;

/// Set codes become part of a cache file name, so keep them within what a file name allows.
pub const MAX_SET_CODE_LEN: usize = 64;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(MtgaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(MtgaError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(MtgaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(MtgaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(MtgaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(MtgaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(MtgaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Accepts ASCII letters, digits, `_` and `-` (e.g. `DD3_DVD`), which keeps
/// path separators, `..` and NUL out of cache file names.
pub fn validate_set_code(set_code: &str) -> Result<()> {
    let invalid = |reason: &str| MtgaError::InvalidConfigValueError {
        field: "set_code".to_string(),
        value: set_code.to_string(),
        reason: reason.to_string(),
    };

    if set_code.trim().is_empty() {
        return Err(invalid("Set code cannot be empty"));
    }
    if set_code.len() > MAX_SET_CODE_LEN {
        return Err(invalid(&format!(
            "Set code must be at most {} characters",
            MAX_SET_CODE_LEN
        )));
    }
    if !set_code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(invalid("Set code may only contain letters, digits, '_' and '-'"));
    }
    Ok(())
}
