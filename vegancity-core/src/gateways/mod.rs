pub mod email;
pub mod geocode;
pub mod notify;
