//! PNG export helpers.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::{Result, TextframeError};

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Decode a `data:image/png;base64,...` URL into PNG bytes.
pub fn png_bytes_from_data_url(url: &str) -> Result<Vec<u8>> {
    let payload = url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or_else(|| TextframeError::Export("not a base64 PNG data URL".to_string()))?;
    let bytes = BASE64.decode(payload.trim())?;
    if bytes.is_empty() {
        return Err(TextframeError::Export("empty PNG payload".to_string()));
    }
    Ok(bytes)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_png_signature() {
        let bytes = png_bytes_from_data_url("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(bytes, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_rejects_other_mime_types() {
        let err = png_bytes_from_data_url("data:image/jpeg;base64,AAAA").unwrap_err();
        assert!(matches!(err, TextframeError::Export(_)));
    }

    #[test]
    fn test_rejects_bad_base64() {
        let err = png_bytes_from_data_url("data:image/png;base64,@@@").unwrap_err();
        assert!(matches!(err, TextframeError::Base64(_)));
    }
}
