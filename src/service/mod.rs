pub mod accommodations;
pub mod search;
