pub mod boards;
pub mod cards;
pub mod comments;
pub mod reference;

use crate::error::{AppError, Result};

const MAX_TITLE_LEN: usize = 255;

/// Trim a required title and check it is 1..=255 characters.
fn required_title(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    if value.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_TITLE_LEN
        )));
    }
    Ok(value.to_string())
}

/// Blank optional text is stored as absent.
fn optional_text(field: &str, value: Option<String>, max_len: usize) -> Result<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.chars().count() > max_len {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(Some(value.to_string()))
}
