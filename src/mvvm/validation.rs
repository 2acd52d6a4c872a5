//! Input checks shared by view-models.
//!
//! Each helper answers with a boolean, or fails with [`ValidationError`] when
//! the caller passes `raise = true` and the input is invalid.

use std::path::Path;

use super::error::ValidationError;

pub fn validate_folder_exists(path: &str, raise: bool) -> Result<bool, ValidationError> {
    let valid = !path.is_empty() && Path::new(path).is_dir();

    if !valid && raise {
        return Err(ValidationError::FolderMissing {
            path: path.to_owned(),
        });
    }

    Ok(valid)
}

pub fn validate_not_empty(value: &str, raise: bool) -> Result<bool, ValidationError> {
    let valid = !value.is_empty();

    if !valid && raise {
        return Err(ValidationError::Required);
    }

    Ok(valid)
}
