//! Fuzz target: `LineAssembler::push`
//!
//! Drives arbitrary byte sequences through the line assembler and asserts
//! that it never panics, never yields an oversized or empty line, and
//! accepts a clean line again once the garbage is terminated.
//!
//! cargo fuzz run fuzz_line_assembler

#![no_main]

use libfuzzer_sys::fuzz_target;
use sprout::protocol::line::{LineAssembler, MAX_LINE_LEN};

fuzz_target!(|data: &[u8]| {
    let mut assembler = LineAssembler::new();

    for &b in data {
        if let Some(Ok(line)) = assembler.push(b) {
            assert!(!line.is_empty(), "assembler yielded an empty line");
            assert!(line.len() <= MAX_LINE_LEN, "line exceeds buffer");
            assert!(!line.contains('\n'), "terminator leaked into line");
        }
    }

    let _ = assembler.push(b'\n');
    let mut out = None;
    for &b in b"SET_AIR_HIGH:28\r\n" {
        if let Some(r) = assembler.push(b) {
            out = Some(r);
        }
    }
    assert!(matches!(out, Some(Ok(ref l)) if l.as_str() == "SET_AIR_HIGH:28"));
});
