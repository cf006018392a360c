pub mod admin;
pub mod extract;
pub mod ingredient;
pub mod pagination;
pub mod recipe;
pub mod short_link;
pub mod user;
