#![no_main]

use bcd_query::query_state::QueryState;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Any state that parses must encode to a query string that parses back
        if let Ok(state) = QueryState::from_query_str(input) {
            let encoded = state.to_query_string();
            assert!(QueryState::from_query_str(&encoded).is_ok());
        }
    }
});
