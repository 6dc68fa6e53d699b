use memchr::memchr;

const NAMED: &[(&str, char)] = &[
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&apos;", '\''),
    ("&nbsp;", '\u{00A0}'),
];

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

/// Decode the handful of entities markup fixtures actually use.
///
/// Named: `&amp; &lt; &gt; &quot; &apos; &nbsp;`. Numeric: `&#123;` and `&#x1F4A9;`, only when
/// semicolon-terminated and a valid scalar value. Anything else is copied through unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut copy_start = 0;
    let mut i = 0;

    while let Some(rel) = memchr(b'&', &bytes[i..]) {
        let amp = i + rel;
        out.push_str(&s[copy_start..amp]);
        let rest = &s[amp..];
        match decode_one(rest) {
            Some((ch, consumed)) => {
                out.push(ch);
                i = amp + consumed;
            }
            None => {
                out.push('&');
                i = amp + 1;
            }
        }
        copy_start = i;
    }
    out.push_str(&s[copy_start..]);
    out
}

fn decode_one(rest: &str) -> Option<(char, usize)> {
    if let Some((name, ch)) = NAMED.iter().find(|(name, _)| rest.starts_with(name)) {
        return Some((*ch, name.len()));
    }
    let numeric = rest.strip_prefix("&#")?;
    let (digits, radix, max, prefix) = match numeric.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16, MAX_HEX_DIGITS, 3),
        None => (numeric, 10, MAX_DEC_DIGITS, 2),
    };
    let end = digits.find(';')?;
    if end == 0 || end > max {
        return None;
    }
    let value = u32::from_str_radix(&digits[..end], radix).ok()?;
    let ch = char::from_u32(value)?;
    Some((ch, prefix + end + 1))
}
