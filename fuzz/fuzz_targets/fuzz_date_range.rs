#![no_main]
use libfuzzer_sys::fuzz_target;

use accommodations_service::domain::date_range::generate_date_range;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let (start, end) = input.split_once('|').unwrap_or((input, input));
        if let Ok(range) = generate_date_range(start, end) {
            assert!(range.windows(2).all(|w| w[0] < w[1]));
        }
    }
});
