#![no_main]
use libfuzzer_sys::fuzz_target;

use accommodations_service::domain::validation::validate;
use accommodations_service::http::dto::CreateAccommodationRequest;

fuzz_target!(|data: &[u8]| {
    if let Ok(request) = serde_json::from_slice::<CreateAccommodationRequest>(data)
        && let Ok((input, _image)) = request.into_parts()
    {
        let _ = validate(&input);
    }
});
