//! Line framing and telemetry decode.
//!
//! The peripheral emits newline-delimited JSON. A line is treated as a
//! complete record only if, after trimming whitespace, it starts with `{`
//! and ends with `}`; anything else (boot noise, partial lines after a
//! reconnect, corrupted bytes) is discarded without further inspection.

use haven_core::Telemetry;

/// Decode one raw line into a telemetry record.
///
/// Returns `None` for lines that fail the brace framing check or JSON
/// decode; the caller decides whether that counts as a protocol error.
#[must_use]
pub fn decode_line(line: &str) -> Option<Telemetry> {
    let trimmed = line.trim();
    if !(trimmed.starts_with('{') && trimmed.ends_with('}')) {
        return None;
    }
    serde_json::from_str(trimmed).ok()
}
