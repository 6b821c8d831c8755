//! Text normalization applied to every mirrored source file.
//!
//! Upstream headers arrive with a mix of LF, CRLF and occasionally lone CR
//! line terminators, plus stray trailing whitespace. Normalization makes the
//! mirrored tree deterministic: every line loses its trailing whitespace and
//! is terminated with exactly one line feed, including the final line.
//!
//! Invalid byte sequences are replaced with U+FFFD rather than failing the
//! run; a single malformed file must never abort a mirror pass.

/// Normalize raw file bytes into the canonical mirrored text form.
///
/// Accepts CR, LF, or CRLF line breaks uniformly. The result is a pure
/// function of the input bytes, so repeated runs over the same working copy
/// produce byte-identical output.
pub fn normalize(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let mut out = String::with_capacity(text.len() + 1);
    let mut line = String::new();

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' => flush_line(&mut out, &mut line),
            '\r' => {
                // CRLF counts as a single terminator
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                flush_line(&mut out, &mut line);
            }
            _ => line.push(c),
        }
    }

    // Terminate the final line even when the source lacked a trailing break
    if !line.is_empty() {
        flush_line(&mut out, &mut line);
    }

    out
}

fn flush_line(out: &mut String, line: &mut String) {
    out.push_str(line.trim_end());
    out.push('\n');
    line.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trailing_whitespace_and_mixed_terminators() {
        assert_eq!(normalize(b"a \r\nb\t\nc"), "a\nb\nc\n");
    }

    #[test]
    fn test_normalize_missing_final_newline() {
        assert_eq!(normalize(b"y"), "y\n");
    }

    #[test]
    fn test_normalize_crlf_only() {
        assert_eq!(normalize(b"  int x; \r\n"), "  int x;\n");
    }

    #[test]
    fn test_normalize_lone_carriage_returns() {
        assert_eq!(normalize(b"one\rtwo\rthree"), "one\ntwo\nthree\n");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize(b""), "");
    }

    #[test]
    fn test_normalize_preserves_blank_lines() {
        assert_eq!(normalize(b"a\n\nb\n"), "a\n\nb\n");
    }

    #[test]
    fn test_normalize_preserves_leading_whitespace() {
        assert_eq!(normalize(b"    indented\t \n"), "    indented\n");
    }

    #[test]
    fn test_normalize_already_normalized_is_identity() {
        let input = b"#pragma once\n\nnamespace etl\n{\n}\n";
        assert_eq!(normalize(input).as_bytes(), input);
    }

    #[test]
    fn test_normalize_replaces_invalid_bytes() {
        let normalized = normalize(b"valid \xff\xfe text\n");
        assert!(normalized.contains('\u{FFFD}'));
        assert!(normalized.starts_with("valid"));
        assert!(normalized.ends_with("text\n"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let input = b"a \r\nb\t\r\rc  ";
        let once = normalize(input);
        let twice = normalize(once.as_bytes());
        assert_eq!(once, twice);
    }
}
