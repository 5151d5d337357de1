//! QR symbol generation for device-to-device handoff.
//!
//! The payload is the raw CSV text of the finalized record; the consuming
//! side decodes the symbol back to identical text and runs it through the
//! codec.

use qrcode::render::unicode;
use qrcode::QrCode;

use crate::export::ExportError;

/// Render the CSV text into a unicode QR symbol.
pub fn qr_symbol(data: &str) -> Result<String, ExportError> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| ExportError::QrEncode(e.to_string()))?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .quiet_zone(false)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_symbol_renders() {
        let symbol = qr_symbol("254,3,254-R3,R1,R,Ann,\"\"").unwrap();
        assert!(!symbol.is_empty());
    }

    #[test]
    fn test_oversized_payload_fails() {
        // Past the byte capacity of the largest QR version.
        let huge = "x".repeat(5000);
        assert!(matches!(qr_symbol(&huge), Err(ExportError::QrEncode(_))));
    }
}
