use qrcode::{render::unicode::Dense1x2, QrCode};

use crate::infra::error::AppError;

/// Renders a pairing string as a compact unicode QR code for the terminal.
pub fn render(payload: &str) -> Result<String, AppError> {
    if payload.trim().is_empty() {
        return Err(AppError::QrRender("pairing payload is empty".to_owned()));
    }

    let code = QrCode::new(payload.as_bytes()).map_err(|err| AppError::QrRender(err.to_string()))?;

    Ok(code.render::<Dense1x2>().quiet_zone(true).build())
}
