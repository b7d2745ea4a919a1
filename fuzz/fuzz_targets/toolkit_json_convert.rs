//! Fuzz target for toolkit region documents and reverse conversion.
//!
//! Malformed paths and unsupported kinds must come back as errors.

#![no_main]

use libfuzzer_sys::fuzz_target;
use roibridge::convert::{to_source_region, CoordinateContext};
use roibridge::io_json::toolkit_from_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(doc) = toolkit_from_slice(data) else {
        return;
    };
    let ctx = CoordinateContext::new(0.5, 0.5, 4.0);
    for region in &doc.regions {
        let _ = to_source_region(region, &ctx, doc.plane);
    }
});
