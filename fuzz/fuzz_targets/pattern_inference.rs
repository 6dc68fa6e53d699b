#![no_main]

use libfuzzer_sys::fuzz_target;
use pattern::{Capabilities, infer};

fuzz_target!(|data: &[u8]| {
    let Some((&pick, markup)) = data.split_first() else {
        return;
    };
    let Ok(markup) = std::str::from_utf8(markup) else {
        return;
    };
    let doc = html::parse_document(markup);
    let elements: Vec<_> = doc.element_descendants(doc.root()).collect();
    if elements.is_empty() {
        return;
    }
    let a = elements[usize::from(pick & 0x0f) % elements.len()];
    let b = elements[usize::from(pick >> 4) % elements.len()];
    let caps = Capabilities::default();
    if let Ok(inference) = infer(&doc, &caps, a, b, 2) {
        let depth = inference.pattern.depth;
        for node in &inference.resolution.matches {
            if !inference.resolution.used_fallback {
                assert_eq!(pattern::relative_depth(&doc, *node, inference.ancestor), Some(depth));
            }
        }
    }
});
