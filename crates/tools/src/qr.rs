use base64::{Engine, engine::general_purpose::STANDARD};
use qrcode::{QrCode, render::svg};

use crate::error::{Result, ToolError};

const MIN_DIMENSION: u32 = 256;

/// Encode text as a QR code rendered to an SVG data URL
pub fn text_to_qr(text: &str) -> Result<String> {
    let code = QrCode::new(text.as_bytes())
        .map_err(|e| ToolError::validation(format!("text cannot be encoded as a QR code: {e}")))?;

    let image = code
        .render::<svg::Color<'_>>()
        .min_dimensions(MIN_DIMENSION, MIN_DIMENSION)
        .build();

    Ok(format!("data:image/svg+xml;base64,{}", STANDARD.encode(image)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_svg_data_url() {
        let qr = text_to_qr("https://example.com").unwrap();

        let encoded = qr.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let svg = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn oversized_text_is_rejected() {
        let err = text_to_qr(&"x".repeat(8000)).unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
    }
}
