use crate::utils::error::{PredictError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> PredictError {
    PredictError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 端點必須是 http 或 https
pub fn validate_endpoint(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.trim().is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            ))
        }
    }

    if url.host_str().is_none() {
        return Err(invalid(field_name, url_str, "URL has no host"));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// 0/1 旗標欄位只接受 0 或 1
pub fn validate_flag(field_name: &str, value: f64) -> Result<()> {
    if value != 0.0 && value != 1.0 {
        return Err(invalid(field_name, value, "Flag must be 0 or 1"));
    }
    Ok(())
}

/// 同一組 one-hot 欄位最多只能有一個是 1
pub fn validate_one_hot_pair(group: &str, first: f64, second: f64) -> Result<()> {
    validate_flag(group, first)?;
    validate_flag(group, second)?;
    if first == 1.0 && second == 1.0 {
        return Err(invalid(
            group,
            format!("[{}, {}]", first, second),
            "At most one encoded field can be 1",
        ));
    }
    Ok(())
}
