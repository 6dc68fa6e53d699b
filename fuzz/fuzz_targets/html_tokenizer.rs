#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let tokens = html::tokenize(input);
    let doc = html::build_document(&tokens);
    // Every non-root node must be reachable from the root exactly once.
    let reachable = doc.descendants(doc.root()).count();
    assert_eq!(reachable + 1, doc.len());
});
