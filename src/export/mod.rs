//! Handoff formatting: QR symbol and human-readable table.

pub mod qr;
pub mod view;

pub use qr::qr_symbol;
pub use view::record_table;

use thiserror::Error;

/// Errors during handoff formatting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// QR encoding failed (payload too large or unencodable)
    #[error("QR encoding failed: {0}")]
    QrEncode(String),

    /// The row does not parse as a match record
    #[error("cannot format malformed record: {0}")]
    MalformedRecord(String),
}

/// Everything the handoff screen displays for a finalized record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportView {
    /// The raw CSV text, byte-identical to the stored row
    pub csv: String,
    /// Unicode rendering of the QR symbol carrying `csv`
    pub qr: String,
    /// One `(header, value)` pair per logical field
    pub table: Vec<(String, String)>,
}

/// Build the full handoff view for a finalized row.
pub fn export_view(csv: &str) -> Result<ExportView, ExportError> {
    Ok(ExportView {
        csv: csv.to_string(),
        qr: qr_symbol(csv)?,
        table: record_table(csv)?,
    })
}
