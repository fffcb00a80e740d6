pub mod envelope;
pub mod resources;
pub mod token;
pub mod users;
