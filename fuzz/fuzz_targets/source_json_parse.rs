//! Fuzz target for source region documents.
//!
//! Feeds arbitrary bytes to the source document parser and converts
//! whatever parses, checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use roibridge::convert::{to_toolkit_region, CoordinateContext};
use roibridge::io_json::source_from_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(doc) = source_from_slice(data) else {
        return;
    };
    let ctx = CoordinateContext::new(3.0, -7.0, 2.5);
    for region in &doc.regions {
        let _ = to_toolkit_region(region, &ctx);
    }
});
