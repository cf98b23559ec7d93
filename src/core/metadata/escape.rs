//! XML text escaping
//!
//! Every piece of record text that reaches a metadata document goes through
//! [`escape`]. The document serializer calls it for text nodes and attribute
//! values alike, so no field can bypass it.

/// Replaces `< > & " '` with their named XML entities in a single pass.
///
/// # Examples
///
/// ```
/// use voyant_export::core::metadata::escape;
///
/// assert_eq!(escape("Test & <tag>"), "Test &amp; &lt;tag&gt;");
/// assert_eq!(escape("it's \"quoted\""), "it&apos;s &quot;quoted&quot;");
/// ```
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const ENTITIES: [(&str, char); 5] = [
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&amp;", '&'),
    ("&quot;", '"'),
    ("&apos;", '\''),
];

/// Inverse of [`escape`] for the five named entities.
///
/// Any other `&` sequence is copied through unchanged.
pub fn unescape(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        unescaped.push_str(&rest[..pos]);
        rest = &rest[pos..];

        match ENTITIES
            .iter()
            .find(|(entity, _)| rest.starts_with(entity))
        {
            Some((entity, c)) => {
                unescaped.push(*c);
                rest = &rest[entity.len()..];
            }
            None => {
                unescaped.push('&');
                rest = &rest[1..];
            }
        }
    }

    unescaped.push_str(rest);
    unescaped
}
