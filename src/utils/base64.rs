use base64::{engine::general_purpose, Engine as _};

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Decodes a Base64 string to its original form.
///
/// Share links in the wild mix the standard and URL-safe alphabets and
/// frequently drop padding, so every engine is tried before giving up.
///
/// # Returns
/// The decoded string, or `None` if the input is not valid Base64 in any
/// accepted variant or does not decode to UTF-8.
pub fn base64_decode(input: &str) -> Option<String> {
    let engines = [
        general_purpose::STANDARD,
        general_purpose::STANDARD_NO_PAD,
        general_purpose::URL_SAFE,
        general_purpose::URL_SAFE_NO_PAD,
    ];

    for engine in engines {
        if let Ok(decoded) = engine.decode(input) {
            return String::from_utf8(decoded).ok();
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_encode() {
        assert_eq!(base64_encode("hello"), "aGVsbG8=");
        assert_eq!(base64_encode(""), "");
    }

    #[test]
    fn test_base64_decode_standard() {
        assert_eq!(base64_decode("aGVsbG8=").as_deref(), Some("hello"));
    }

    #[test]
    fn test_base64_decode_unpadded() {
        assert_eq!(base64_decode("aGVsbG8").as_deref(), Some("hello"));
    }

    #[test]
    fn test_base64_decode_url_safe() {
        // "??>" encodes to "Pz8+" in standard, "Pz8-" URL-safe
        assert_eq!(base64_decode("Pz8-").as_deref(), Some("??>"));
        assert_eq!(base64_decode("Pz8+").as_deref(), Some("??>"));
    }

    #[test]
    fn test_base64_decode_invalid() {
        assert_eq!(base64_decode("not base64!!"), None);
    }
}
