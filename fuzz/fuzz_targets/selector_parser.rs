#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if let Err(err) = css::parse_selector_list(input) {
        assert!(err.position <= input.len());
    }
    // Any string becomes an identifier that parses back to itself.
    if !input.is_empty() && !input.contains('\0') {
        let class = format!(".{}", css::serialize_identifier(input));
        assert!(css::parse_selector_list(&class).is_ok(), "{class:?}");
    }
});
