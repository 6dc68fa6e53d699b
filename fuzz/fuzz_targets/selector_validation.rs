#![no_main]

use libfuzzer_sys::fuzz_target;
use pattern::{CssQuery, ValidationStatus, validate_now};

const PAGE: &str = "<html><body><main id=m><ul class=list>\
    <li class=\"item a\">1</li><li class=\"item b\"><a href=/x>2</a></li><li>3</li>\
    </ul><p class=item>p</p></main></body></html>";

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let doc = html::parse_document(PAGE);
    let v = validate_now(&doc, &CssQuery, text);
    match v.result.status {
        ValidationStatus::Valid => assert_eq!(v.result.match_count, v.matches.len()),
        _ => assert_eq!(v.result.match_count, 0),
    }
});
