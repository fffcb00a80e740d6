pub mod cart;
pub mod categories;
pub mod health;
pub mod resources;
pub mod reviews;
pub mod token;
pub mod users;
