#![no_main]

use bcd_query::compat_data::CompatData;
use bcd_query::projector;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Loading and projecting arbitrary JSON must fail cleanly, never panic
    if let Ok(compat) = CompatData::from_reader(data) {
        let categories: Vec<String> = compat.root.keys().cloned().collect();
        let _ = projector::project_categories(&compat, &categories);
    }
});
