//! sea-orm entities for the Foodgram API database.

pub mod favorites;
pub mod ingredients;
pub mod recipe_ingredients;
pub mod recipes;
pub mod shopping_carts;
pub mod subscriptions;
pub mod users;
