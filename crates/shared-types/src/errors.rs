//! Common error types used across the tooltip crates
//! Provides consistent error handling and reporting

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base error type for tooltip operations
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum TooltipError {
    // Selection errors
    #[error("No data at index {index} (series length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No data point matches x value {x}")]
    NoMatchingX { x: String },

    #[error("Cannot parse time '{input}' with format '{format}'")]
    InvalidTime { input: String, format: String },

    // Rendering errors
    #[error("Selection fingerprint failed: {message}")]
    Fingerprint { message: String },

    // Instance errors
    #[error("Chart instance is busy: {id}")]
    InstanceBusy { id: String },

    #[error("Instance not found: {id}")]
    InstanceNotFound { id: String },

    // Configuration errors
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: String,
        field: Option<String>,
    },

    // WASM-specific errors
    #[error("JavaScript interop error: {message}")]
    JsInterop { message: String },
}

/// Result type alias for tooltip operations
pub type TooltipResult<T> = Result<T, TooltipError>;

/// Error response structure for JavaScript interop
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: TooltipError,
    pub timestamp: u64,
    pub context: Option<ErrorContext>,
}

/// Additional context for error reporting
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorContext {
    pub component: String,
    pub operation: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: TooltipError) -> Self {
        Self {
            success: false,
            error,
            timestamp: chrono::Utc::now().timestamp_millis() as u64,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, component: &str, operation: &str) -> Self {
        self.context = Some(ErrorContext {
            component: component.to_string(),
            operation: operation.to_string(),
        });
        self
    }

    /// Convert to JSON string for JavaScript
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":{"type":"JsInterop","details":{"message":"Failed to serialize error"}}}"#.to_string()
        })
    }
}

impl From<serde_json::Error> for TooltipError {
    fn from(err: serde_json::Error) -> Self {
        TooltipError::Fingerprint {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "wasm")]
impl From<wasm_bindgen::JsValue> for TooltipError {
    fn from(err: wasm_bindgen::JsValue) -> Self {
        TooltipError::JsInterop {
            message: format!("{err:?}"),
        }
    }
}
