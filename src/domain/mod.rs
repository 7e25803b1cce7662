pub mod accommodation;
pub mod date_range;
pub mod filter;
pub mod search_criteria;
pub mod user;
pub mod validation;
