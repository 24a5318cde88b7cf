//! SVG format writing operations for choropleth export.

mod path;
mod scene;
mod writer;

use std::borrow::Cow;

pub(crate) use path::*;
pub(crate) use scene::*;
pub(crate) use writer::*;

/// Escape text for use in XML content and attribute values.
pub(crate) fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) { return Cow::Borrowed(text) }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_xml(r#"<a href="x">B & 'C'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;B &amp; &apos;C&apos;&lt;/a&gt;");
    }

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(escape_xml("Thừa Thiên Huế"), Cow::Borrowed(_)));
    }
}
