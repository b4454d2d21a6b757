use typepipe_types::StripMode;

/// Normalize a matched line. Every mode yields a subslice of the input.
pub fn normalize(line: &[u8], mode: StripMode) -> &[u8] {
    match mode {
        StripMode::None => line,
        StripMode::TrimWhitespace => trim_whitespace(line),
        StripMode::StripTrailingNewlineOnly => line.strip_suffix(b"\n").unwrap_or(line),
    }
}

fn trim_whitespace(line: &[u8]) -> &[u8] {
    match std::str::from_utf8(line) {
        Ok(text) => text.trim().as_bytes(),
        // Not UTF-8: fall back to ASCII whitespace, including vertical tab
        Err(_) => {
            let start = line
                .iter()
                .position(|b| !is_ascii_space(*b))
                .unwrap_or(line.len());
            let end = line
                .iter()
                .rposition(|b| !is_ascii_space(*b))
                .map_or(start, |i| i + 1);
            &line[start..end]
        }
    }
}

fn is_ascii_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_keeps_line() {
        assert_eq!(normalize(b"hi\n", StripMode::None), b"hi\n");
        assert_eq!(normalize(b"  hi  \n", StripMode::None), b"  hi  \n");
    }

    #[test]
    fn test_trim_whitespace() {
        assert_eq!(normalize(b"  hi  \n", StripMode::TrimWhitespace), b"hi");
        assert_eq!(
            normalize(b"\t\x0b\x0c hi there \r\n", StripMode::TrimWhitespace),
            b"hi there"
        );
        assert_eq!(normalize(b" \n", StripMode::TrimWhitespace), b"");
        assert_eq!(normalize(b"", StripMode::TrimWhitespace), b"");
    }

    #[test]
    fn test_trim_whitespace_non_utf8() {
        assert_eq!(
            normalize(b" \x0b\xffbytes\xfe \n", StripMode::TrimWhitespace),
            b"\xffbytes\xfe"
        );
        assert_eq!(normalize(b"\xff", StripMode::TrimWhitespace), b"\xff");
    }

    #[test]
    fn test_strip_trailing_newline_only() {
        assert_eq!(normalize(b"hi\n", StripMode::StripTrailingNewlineOnly), b"hi");
        assert_eq!(
            normalize(b"  hi \r\n", StripMode::StripTrailingNewlineOnly),
            b"  hi \r"
        );
        assert_eq!(normalize(b"hi\n\n", StripMode::StripTrailingNewlineOnly), b"hi\n");
        assert_eq!(normalize(b"hi", StripMode::StripTrailingNewlineOnly), b"hi");
    }
}
