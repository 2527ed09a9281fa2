//! Directory-name sanitization for article identifiers.

const MAX_NAME_BYTES: usize = 255;

const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Make `name` usable as a single directory component on Linux, macOS and
/// Windows.
///
/// - removes `/ \ : * ? " < > |` and control characters
/// - strips leading spaces and trailing dots/spaces
/// - appends `_` to reserved device names (`CON`, `com1.txt`, ...)
/// - truncates to 255 bytes
///
/// A name with nothing left becomes `_`, so it never collapses into its
/// parent directory.
pub fn sanitize_dir_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .filter(|c| !c.is_control())
        .collect();

    let mut result = truncate_to_bytes(cleaned.trim_start_matches(' '), MAX_NAME_BYTES)
        .trim_end_matches(['.', ' '])
        .to_string();

    if result.is_empty() {
        return "_".to_string();
    }

    if is_reserved(&result) {
        if result.len() >= MAX_NAME_BYTES {
            result = truncate_to_bytes(&result, MAX_NAME_BYTES - 1).to_string();
        }
        result.push('_');
    }

    result
}

fn is_reserved(name: &str) -> bool {
    let base = name.split('.').next().unwrap_or(name);
    RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(base))
}

fn truncate_to_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
