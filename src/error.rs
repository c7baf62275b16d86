//! Structured error types for textframe.
//!
//! Layout, measurement and border compositing never fail; errors only come
//! from the boundaries (decoding input, acquiring a surface, exporting).

/// All errors that can occur while decoding input or exporting a render.
#[derive(Debug, thiserror::Error)]
pub enum TextframeError {
    /// Malformed delta JSON.
    #[error("JSON decoding: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings payload that does not decode.
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// Surface acquisition or drawing failure reported by the backend.
    #[error("Surface error: {0}")]
    Surface(String),

    /// PNG export failure.
    #[error("Export error: {0}")]
    Export(String),

    /// Base64 payload of a data URL could not be decoded.
    #[error("Base64 decoding: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TextframeError>;

impl From<&str> for TextframeError {
    fn from(s: &str) -> Self {
        Self::Surface(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<TextframeError> for wasm_bindgen::JsValue {
    fn from(e: TextframeError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
