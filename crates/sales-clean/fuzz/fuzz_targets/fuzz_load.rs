//! Fuzz target for loading and cleaning raw input.
//!
//! This fuzzer tests that:
//! 1. The loader never panics on malformed input
//! 2. Any table it accepts can be pushed through every transform without panicking

#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use sales_clean::{CleaningEngine, Parser, Transform};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let Ok(mut table) = Parser::new().parse_bytes(data, Path::new("fuzz.csv")) else {
        return;
    };

    let engine = CleaningEngine::new();
    for transform in Transform::ORDER {
        match engine.apply(transform, table) {
            Ok((next, _)) => table = next,
            Err(_) => return,
        }
    }
});
