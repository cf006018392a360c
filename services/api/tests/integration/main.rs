mod helpers;

mod ingredient_test;
mod recipe_test;
mod user_test;
