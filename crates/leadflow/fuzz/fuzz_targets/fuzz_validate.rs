//! Fuzz target for auto-mapping and validation.
//!
//! Fuzzed text is used as both headers and sample values, which exercises
//! header normalization and the format regexes.

#![no_main]

use libfuzzer_sys::fuzz_target;
use leadflow::{auto_map, parse_preview, validate};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(content) = std::str::from_utf8(data) {
        let csv = format!("name,phone,email,{}\n{},{},{},{}\n", content, content, content, content, content);
        let table = parse_preview(&csv);
        let mapping = auto_map(&table.columns);
        let report = validate(&table.columns, &mapping, table.row_count);

        assert!(report.valid_rows + report.invalid_rows + report.duplicate_rows <= report.total_rows);
    }
});
