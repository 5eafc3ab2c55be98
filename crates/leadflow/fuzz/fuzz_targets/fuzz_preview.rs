//! Fuzz target for the preview parser.
//!
//! The parser must never panic and its sample windows must stay bounded.

#![no_main]

use libfuzzer_sys::fuzz_target;
use leadflow::parse_preview;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let table = parse_preview(text);
        for column in &table.columns {
            assert!(column.sample_values.len() <= 5);
        }
    }
});
