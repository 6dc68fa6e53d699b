use std::fmt::Write;

/// Serialize `ident` so it parses back as a single CSS identifier (CSSOM "serialize an
/// identifier", the algorithm behind `CSS.escape`).
pub fn serialize_identifier(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    let first = ident.chars().next();
    let single = ident.chars().nth(1).is_none();
    for (i, c) in ident.chars().enumerate() {
        match c {
            '\0' => out.push('\u{FFFD}'),
            '\u{1}'..='\u{1f}' | '\u{7f}' => escape_code_point(&mut out, c),
            '0'..='9' if i == 0 || (i == 1 && first == Some('-')) => {
                escape_code_point(&mut out, c)
            }
            '-' if i == 0 && single => out.push_str("\\-"),
            c if !c.is_ascii() || c.is_ascii_alphanumeric() || c == '-' || c == '_' => out.push(c),
            c => {
                out.push('\\');
                out.push(c);
            }
        }
    }
    out
}

fn escape_code_point(out: &mut String, c: char) {
    let _ = write!(out, "\\{:x} ", c as u32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{SimpleSelector, parse_selector_list};

    #[test]
    fn escapes_like_css_escape() {
        assert_eq!(serialize_identifier("plain-name_1"), "plain-name_1");
        assert_eq!(serialize_identifier("123"), "\\31 23");
        assert_eq!(serialize_identifier("-1x"), "-\\31 x");
        assert_eq!(serialize_identifier("-"), "\\-");
        assert_eq!(serialize_identifier("a:b.c"), "a\\:b\\.c");
        assert_eq!(serialize_identifier("tab\there"), "tab\\9 here");
        assert_eq!(serialize_identifier("café"), "café");
    }

    #[test]
    fn serialized_identifiers_parse_back() {
        for raw in ["123", "-1x", "a:b.c", "w-[50%]", "a b", "#x", "sm:flex", "-"] {
            let selector = format!(".{}", serialize_identifier(raw));
            let list = parse_selector_list(&selector)
                .unwrap_or_else(|e| panic!("{selector:?} failed to parse: {e}"));
            assert_eq!(
                list.0[0].compounds[0].0,
                vec![SimpleSelector::Class(raw.to_string())],
                "round trip through {selector:?}"
            );
        }
    }
}
