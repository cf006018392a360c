use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Favorites and shopping carts share one shape: a `(user_id, recipe_id)` edge.
fn user_recipe_edge_table(table: EdgeTable) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(Edge::UserId).integer().not_null())
        .col(ColumnDef::new(Edge::RecipeId).integer().not_null())
        .primary_key(Index::create().col(Edge::UserId).col(Edge::RecipeId))
        .foreign_key(
            ForeignKey::create()
                .from(table, Edge::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(table, Edge::RecipeId)
                .to(Recipes::Table, Recipes::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [EdgeTable::Favorites, EdgeTable::ShoppingCarts] {
            manager.create_table(user_recipe_edge_table(table)).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [EdgeTable::ShoppingCarts, EdgeTable::Favorites] {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden, Clone, Copy)]
enum EdgeTable {
    Favorites,
    ShoppingCarts,
}

#[derive(Iden)]
enum Edge {
    UserId,
    RecipeId,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}
