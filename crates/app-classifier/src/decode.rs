use percent_encoding::percent_decode_str;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Incomplete escape sequence at byte {0}")]
    BadEscape(usize),

    #[error("Decoded text is not valid UTF-8")]
    InvalidUtf8,
}

/// Decode every `%XX` escape in `s`.
///
/// Stricter than [`percent_decode_str`] on its own: a `%` that isn't followed by
/// two hex digits is an error instead of being passed through.
pub fn decode_uri_component(s: &str) -> Result<String, DecodeError> {
    let bytes = s.as_bytes();

    for (i, _) in s.match_indices('%') {
        let is_escape = bytes
            .get(i + 1..i + 3)
            .is_some_and(|x| x.iter().all(u8::is_ascii_hexdigit));

        if !is_escape {
            return Err(DecodeError::BadEscape(i));
        }
    }

    percent_decode_str(s)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| DecodeError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_escapes() {
        assert_eq!(
            decode_uri_component("https%3A%2F%2Fyoutu.be%2FdQw4w9WgXcQ").as_deref(),
            Ok("https://youtu.be/dQw4w9WgXcQ")
        );
        assert_eq!(decode_uri_component("caf%C3%A9").as_deref(), Ok("café"));
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(
            decode_uri_component("https://vimeo.com/76979871").as_deref(),
            Ok("https://vimeo.com/76979871")
        );
        assert_eq!(decode_uri_component("").as_deref(), Ok(""));
    }

    #[test]
    fn rejects_broken_escapes() {
        assert_eq!(decode_uri_component("100%"), Err(DecodeError::BadEscape(3)));
        assert_eq!(decode_uri_component("%zz"), Err(DecodeError::BadEscape(0)));
        assert_eq!(decode_uri_component("%C3"), Err(DecodeError::InvalidUtf8));
    }
}
