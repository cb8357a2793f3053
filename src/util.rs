//! Miscellaneous helpers consumed by the walker and the hierarchy parser.

/// Number of bytes included in forensic previews.
pub const PREVIEW_LEN: usize = 64;

/// Formats the first 64 bytes of `data` as a hex string followed by an
/// ASCII rendering (non-printable bytes shown as `.`), for embedding into
/// framing and hierarchy errors.
pub fn preview(data: &[u8]) -> String {
    let snippet = &data[..data.len().min(PREVIEW_LEN)];
    let hex: String = snippet.iter().map(|b| format!("{b:02x}")).collect();
    let ascii: String = snippet
        .iter()
        .map(|&b| if (32..=126).contains(&b) { b as char } else { '.' })
        .collect();
    format!("hex={hex}; ascii={ascii}")
}
