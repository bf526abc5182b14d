use std::borrow::Cow;
use std::fmt::Write;

/// XML 1.0 valid char ranges:
/// - 0x09, 0x0A, 0x0D
/// - 0x20..=0xD7FF
/// - 0xE000..=0xFFFD
/// - 0x10000..=0x10FFFF
fn is_valid_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

fn needs_escape(c: char) -> bool {
    matches!(c, '&' | '<' | '>' | '"' | '\'') || !is_valid_xml_char(c)
}

/// Escape text for element content or attribute values, dropping invalid chars.
///
/// Node ids are usually plain, so the input is borrowed when nothing changes.
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.chars().any(needs_escape) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if is_valid_xml_char(c) => escaped.push(c),
            _ => {}
        }
    }
    Cow::Owned(escaped)
}

/// Shortest attribute form of a coordinate: at most two decimals, no trailing zeros.
pub fn fmt_num(value: f32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let mut out = String::new();
    let _ = write!(out, "{value:.2}");
    let trimmed = out.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        t => t.to_string(),
    }
}

/// `x1,y1 x2,y2 ...` for `points` attributes.
pub fn fmt_points<I>(points: I) -> String
where
    I: IntoIterator<Item = (f32, f32)>,
{
    let mut out = String::new();
    for (i, (x, y)) in points.into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", fmt_num(x), fmt_num(y));
    }
    out
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{escape_xml, fmt_num, fmt_points};

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(escape_xml("node-1"), Cow::Borrowed("node-1")));
    }

    #[test]
    fn remove_invalid_control_chars() {
        assert_eq!(escape_xml("A\u{0007}B\u{000C}C"), "ABC");
        assert_eq!(escape_xml("a\tb\nc"), "a\tb\nc");
    }

    #[test]
    fn escape_special_xml_chars() {
        assert_eq!(
            escape_xml(r#"<tag attr="x&y">'z'"#),
            "&lt;tag attr=&quot;x&amp;y&quot;&gt;&apos;z&apos;"
        );
    }

    #[test]
    fn numbers_drop_trailing_zeros() {
        assert_eq!(fmt_num(10.0), "10");
        assert_eq!(fmt_num(2.5), "2.5");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(1.239), "1.24");
        assert_eq!(fmt_num(f32::NAN), "0");
        assert_eq!(fmt_points([(1.0, 2.0), (3.5, -4.0)]), "1,2 3.5,-4");
    }
}
