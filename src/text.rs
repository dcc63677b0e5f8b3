//! Text sanitation applied at the edges of the pipeline.
//!
//! Transcriber output is read as raw bytes and may contain broken UTF-8;
//! translation backends choke on stray replacement or control characters.

/// Decode UTF-8, dropping invalid byte sequences instead of replacing them.
pub fn sanitize_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

/// Strip characters that only ever come from lossy decoding or binary noise.
///
/// Newlines and tabs survive; other control characters and U+FFFD are removed.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|&c| c != char::REPLACEMENT_CHARACTER)
        .filter(|&c| !c.is_control() || c == '\n' || c == '\t')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_bytes_drops_invalid_sequences() {
        let mut bytes = "こんにちは".as_bytes().to_vec();
        bytes.insert(3, 0xff);
        bytes.push(0xe3); // truncated multi-byte sequence
        assert_eq!(sanitize_bytes(&bytes), "こんにちは");
    }

    #[test]
    fn test_sanitize_bytes_keeps_valid_input() {
        assert_eq!(sanitize_bytes("おはよう".as_bytes()), "おはよう");
        assert_eq!(sanitize_bytes(b""), "");
    }

    #[test]
    fn test_sanitize_strips_replacement_and_control_chars() {
        assert_eq!(sanitize("あ\u{FFFD}り\u{0000}が\u{0007}とう"), "ありがとう");
        assert_eq!(sanitize("一行目\n二行目\tタブ"), "一行目\n二行目\tタブ");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let once = sanitize("ね\u{FFFD}こ\u{001b}");
        assert_eq!(sanitize(&once), once);
    }
}
