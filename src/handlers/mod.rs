pub mod auth;
pub mod classes;
pub mod instructors;
pub mod users;
