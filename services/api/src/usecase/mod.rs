pub mod avatar;
pub mod ingredient;
pub mod recipe;
pub mod relation;
pub mod shopping_list;
pub mod subscription;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;
