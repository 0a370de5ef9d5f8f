use serde_json::Value;

use crate::error::InputError;

/// Trait for types that can be turned into a JSON value for validation or
/// spec loading.
///
/// Implemented for JSON strings (`&str`, `String`), raw bytes (`&[u8]`),
/// file paths (`Path`, `PathBuf`, with the `std` feature), and
/// `serde_json::Value`.
pub trait JsonInput {
    /// Convert this input into a `serde_json::Value`.
    fn to_json_value(&self) -> Result<Value, InputError>;
}

impl JsonInput for Value {
    fn to_json_value(&self) -> Result<Value, InputError> {
        Ok(self.clone())
    }
}

impl JsonInput for str {
    fn to_json_value(&self) -> Result<Value, InputError> {
        serde_json::from_str(self).map_err(|e| InputError::Json(e.to_string()))
    }
}

impl JsonInput for String {
    fn to_json_value(&self) -> Result<Value, InputError> {
        self.as_str().to_json_value()
    }
}

impl JsonInput for [u8] {
    fn to_json_value(&self) -> Result<Value, InputError> {
        serde_json::from_slice(self).map_err(|e| InputError::Json(e.to_string()))
    }
}

impl JsonInput for Vec<u8> {
    fn to_json_value(&self) -> Result<Value, InputError> {
        self.as_slice().to_json_value()
    }
}

#[cfg(feature = "std")]
impl JsonInput for std::path::Path {
    fn to_json_value(&self) -> Result<Value, InputError> {
        let content = std::fs::read_to_string(self)
            .map_err(|e| InputError::Io(format!("{}: {}", self.display(), e)))?;
        content.as_str().to_json_value()
    }
}

#[cfg(feature = "std")]
impl JsonInput for std::path::PathBuf {
    fn to_json_value(&self) -> Result<Value, InputError> {
        self.as_path().to_json_value()
    }
}
