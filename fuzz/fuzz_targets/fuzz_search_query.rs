#![no_main]
use libfuzzer_sys::fuzz_target;

use accommodations_service::http::dto::parse_search_query;

fuzz_target!(|data: &[u8]| {
    if let Ok(query) = std::str::from_utf8(data)
        && let Ok(criteria) = parse_search_query(Some(query))
    {
        let _ = criteria.kind();
        let _ = criteria.store_query();
    }
});
