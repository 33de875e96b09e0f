//! Boot entry label cleanup
//!
//! `efibootmgr -v` prints the description followed by a device path,
//! usually tab separated (`Windows Boot Manager\tHD(1,GPT,...)`), on older
//! versions only space separated. Only the description is kept.

/// Device path marker that ends the human readable description
const DEVICE_PATH_MARKER: &str = "HD(";

/// Reduce a raw entry description to a short OS name
pub fn normalize_label(raw: &str) -> String {
    let first = raw
        .split(['\t', '\r', '\n'])
        .next()
        .unwrap_or_default()
        .trim();

    let name = strip_device_path(first).trim();

    if name.to_lowercase().contains("windows boot manager") {
        return "Windows".to_string();
    }

    name.to_string()
}

/// Cut the string at the first whitespace run followed by `HD(`
fn strip_device_path(s: &str) -> &str {
    for (idx, _) in s.match_indices(DEVICE_PATH_MARKER) {
        let head = &s[..idx];
        let trimmed = head.trim_end();
        if trimmed.len() < head.len() {
            return trimmed;
        }
    }
    s
}
