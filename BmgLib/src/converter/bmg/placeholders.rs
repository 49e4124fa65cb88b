//! Text substitutions between BMG message bodies and XML content
//!
//! `<` and `>` delimit in-game escape sequences and would otherwise collide
//! with markup, so they travel through XML as fixed tokens.

use crate::formats::bmg::MessageText;
use std::borrow::Cow;

pub const LESS_THAN_PLACEHOLDER: &str = "##LESS_THAN_SYMBOL##";
pub const GREATER_THAN_PLACEHOLDER: &str = "##GREATER_THAN_SYMBOL##";

/// XML content standing in for an empty message
pub const NULL_STRING_PLACEHOLDER: &str = "==== THIS STRING INTENTIONALLY LEFT NULL ====";

/// Message text as written inside `<str>`, before XML escaping
pub(super) fn encode_text(text: &MessageText) -> Cow<'_, str> {
    match text {
        _ if text.is_empty() => Cow::Borrowed(NULL_STRING_PLACEHOLDER),
        MessageText::Text(text) if text.contains(['<', '>']) => Cow::Owned(
            text.replace('<', LESS_THAN_PLACEHOLDER)
                .replace('>', GREATER_THAN_PLACEHOLDER),
        ),
        MessageText::Text(text) => Cow::Borrowed(text),
        // Covered by the `is_empty` guard above; spelled out for exhaustiveness
        MessageText::Empty => Cow::Borrowed(NULL_STRING_PLACEHOLDER),
    }
}

/// Inverse of [`encode_text`], applied to unescaped `<str>` content
pub(super) fn decode_text(content: &str) -> MessageText {
    let text = content
        .replace(LESS_THAN_PLACEHOLDER, "<")
        .replace(GREATER_THAN_PLACEHOLDER, ">");

    if text == NULL_STRING_PLACEHOLDER {
        MessageText::Empty
    } else {
        MessageText::from(text)
    }
}

/// Escape only what XML text content requires once `<` is gone: `&`
pub(super) fn escape_ampersand(s: &str) -> Cow<'_, str> {
    if s.contains('&') {
        Cow::Owned(s.replace('&', "&amp;"))
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_brackets() {
        let text = MessageText::from("<color=red>");
        let encoded = encode_text(&text);
        assert_eq!(
            encoded,
            "##LESS_THAN_SYMBOL##color=red##GREATER_THAN_SYMBOL##"
        );
        assert_eq!(decode_text(&encoded), text);
    }

    #[test]
    fn test_null_placeholder() {
        assert_eq!(encode_text(&MessageText::Empty), NULL_STRING_PLACEHOLDER);
        assert_eq!(
            encode_text(&MessageText::Text(String::new())),
            NULL_STRING_PLACEHOLDER
        );
        assert_eq!(decode_text(NULL_STRING_PLACEHOLDER), MessageText::Empty);
        assert_eq!(decode_text(""), MessageText::Empty);
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        let text = MessageText::from("plain");
        assert!(matches!(encode_text(&text), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_escape_ampersand() {
        assert_eq!(escape_ampersand("a & b"), "a &amp; b");
        assert_eq!(escape_ampersand("&amp;"), "&amp;amp;");
    }
}
