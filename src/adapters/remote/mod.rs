pub mod reservations;
pub mod users;
