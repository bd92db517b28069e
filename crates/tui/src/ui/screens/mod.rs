pub mod dashboard;
pub mod goals;
pub mod login;
pub mod profile;
