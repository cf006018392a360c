use std::collections::{HashMap, HashSet};

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, IntoActiveModel as _, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr, TransactionError, TransactionTrait,
    sea_query::{Expr, OnConflict, Query, SelectStatement, SimpleExpr},
};

use foodgram_api_schema::{
    favorites, ingredients, recipe_ingredients, recipes, shopping_carts, subscriptions, users,
};
use foodgram_core::sea_ext::StartsWithIgnoreCase as _;
use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_domain::user::UserRole;

use crate::domain::repository::{
    EdgeRepository, IngredientRepository, RecipeRepository, UserRepository,
};
use crate::domain::types::{
    EdgeKind, EdgeMembership, Ingredient, IngredientAmount, NewIngredient, NewUser, Recipe,
    RecipeChanges, RecipeDraft, RecipeIngredientLine, RecipeQuery, ShoppingRow, User, UserStats,
};
use crate::error::FoodgramError;

/// Rows per statement for bulk ingredient import.
const INSERT_CHUNK: usize = 500;

fn page_window<S: QuerySelect>(select: S, page: PageRequest) -> S {
    select.offset(page.offset()).limit(u64::from(page.limit))
}

fn count_map(rows: Vec<(i32, i64)>) -> HashMap<i32, u64> {
    rows.into_iter()
        .map(|(id, n)| (id, u64::try_from(n).unwrap_or_default()))
        .collect()
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, FoodgramError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_many(&self, ids: &[i32]) -> Result<Vec<User>, FoodgramError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find users by ids")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn is_taken(&self, email: &str, username: &str) -> Result<bool, FoodgramError> {
        let count = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Email.eq(email))
                    .add(users::Column::Username.eq(username)),
            )
            .count(&self.db)
            .await
            .context("check user uniqueness")?;
        Ok(count > 0)
    }

    async fn create(&self, user: &NewUser) -> Result<User, FoodgramError> {
        let result = users::ActiveModel {
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            avatar: Set(None),
            role: Set(i16::from(UserRole::Normal.as_u8())),
            date_joined: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(user_from_model(model)),
            // Lost a race against the uniqueness pre-check.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(FoodgramError::UserAlreadyExists)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, FoodgramError> {
        let select = users::Entity::find();
        let count = select.clone().count(&self.db).await.context("count users")?;
        let models = page_window(
            select
                .order_by_asc(users::Column::Username)
                .order_by_asc(users::Column::Id),
            page,
        )
        .all(&self.db)
        .await
        .context("list users")?;
        Ok(Page {
            items: models.into_iter().map(user_from_model).collect(),
            count,
        })
    }

    async fn list_subscribed_authors(
        &self,
        subscriber_id: i32,
        page: PageRequest,
    ) -> Result<Page<User>, FoodgramError> {
        let followed = Query::select()
            .column(subscriptions::Column::AuthorId)
            .from(subscriptions::Entity)
            .and_where(subscriptions::Column::SubscriberId.eq(subscriber_id))
            .to_owned();
        let select = users::Entity::find().filter(users::Column::Id.in_subquery(followed));
        let count = select
            .clone()
            .count(&self.db)
            .await
            .context("count subscriptions")?;
        let models = page_window(
            select
                .order_by_asc(users::Column::Username)
                .order_by_asc(users::Column::Id),
            page,
        )
        .all(&self.db)
        .await
        .context("list subscribed authors")?;
        Ok(Page {
            items: models.into_iter().map(user_from_model).collect(),
            count,
        })
    }

    async fn set_avatar(&self, id: i32, avatar: Option<&str>) -> Result<(), FoodgramError> {
        users::Entity::update_many()
            .col_expr(users::Column::Avatar, Expr::value(avatar.map(str::to_owned)))
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set user avatar")?;
        Ok(())
    }

    async fn stats(&self, page: PageRequest) -> Result<Page<UserStats>, FoodgramError> {
        let select = users::Entity::find();
        let count = select.clone().count(&self.db).await.context("count users")?;
        let models = page_window(select.order_by_asc(users::Column::Id), page)
            .all(&self.db)
            .await
            .context("list users for stats")?;
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        if ids.is_empty() {
            return Ok(Page {
                items: Vec::new(),
                count,
            });
        }

        let recipes_count = count_map(
            recipes::Entity::find()
                .select_only()
                .column(recipes::Column::AuthorId)
                .column_as(Expr::col(recipes::Column::Id).count(), "count")
                .filter(recipes::Column::AuthorId.is_in(ids.clone()))
                .group_by(recipes::Column::AuthorId)
                .into_tuple::<(i32, i64)>()
                .all(&self.db)
                .await
                .context("count recipes per author")?,
        );
        let subscriptions_count = count_map(
            subscriptions::Entity::find()
                .select_only()
                .column(subscriptions::Column::SubscriberId)
                .column_as(Expr::col(subscriptions::Column::AuthorId).count(), "count")
                .filter(subscriptions::Column::SubscriberId.is_in(ids.clone()))
                .group_by(subscriptions::Column::SubscriberId)
                .into_tuple::<(i32, i64)>()
                .all(&self.db)
                .await
                .context("count subscriptions per user")?,
        );
        let subscribers_count = count_map(
            subscriptions::Entity::find()
                .select_only()
                .column(subscriptions::Column::AuthorId)
                .column_as(Expr::col(subscriptions::Column::SubscriberId).count(), "count")
                .filter(subscriptions::Column::AuthorId.is_in(ids))
                .group_by(subscriptions::Column::AuthorId)
                .into_tuple::<(i32, i64)>()
                .all(&self.db)
                .await
                .context("count subscribers per author")?,
        );

        let items = models
            .into_iter()
            .map(|m| UserStats {
                recipes_count: recipes_count.get(&m.id).copied().unwrap_or_default(),
                subscriptions_count: subscriptions_count.get(&m.id).copied().unwrap_or_default(),
                subscribers_count: subscribers_count.get(&m.id).copied().unwrap_or_default(),
                user_id: m.id,
                username: m.username,
            })
            .collect();
        Ok(Page { items, count })
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        avatar: model.avatar,
        role: u8::try_from(model.role)
            .ok()
            .and_then(UserRole::from_u8)
            .unwrap_or(UserRole::Normal),
        date_joined: model.date_joined,
    }
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

impl IngredientRepository for DbIngredientRepository {
    async fn search(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = name_prefix {
            query = query.filter(ingredients::Column::Name.starts_with_ignore_case(prefix));
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::Id)
            .all(&self.db)
            .await
            .context("search ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, FoodgramError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, FoodgramError> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let found = ingredients::Entity::find()
            .select_only()
            .column(ingredients::Column::Id)
            .filter(ingredients::Column::Id.is_in(ids.iter().copied()))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("find existing ingredient ids")?;
        Ok(found.into_iter().collect())
    }

    async fn is_referenced(&self, id: i32) -> Result<bool, FoodgramError> {
        let count = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::IngredientId.eq(id))
            .count(&self.db)
            .await
            .context("count ingredient references")?;
        Ok(count > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, FoodgramError> {
        match ingredients::Entity::delete_by_id(id).exec(&self.db).await {
            Ok(result) => Ok(result.rows_affected > 0),
            // A recipe picked it up after the reference check.
            Err(e) if is_foreign_key_violation(&e) => Err(FoodgramError::IngredientInUse),
            Err(e) => Err(anyhow::Error::new(e).context("delete ingredient").into()),
        }
    }

    async fn insert_many(&self, items: &[NewIngredient]) -> Result<u64, FoodgramError> {
        let mut inserted = 0;
        for chunk in items.chunks(INSERT_CHUNK) {
            let models = chunk.iter().map(|item| ingredients::ActiveModel {
                name: Set(item.name.clone()),
                measurement_unit: Set(item.measurement_unit.clone()),
                ..Default::default()
            });
            inserted += ingredients::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::columns([
                        ingredients::Column::Name,
                        ingredients::Column::MeasurementUnit,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
                .context("bulk insert ingredients")?;
        }
        Ok(inserted)
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

fn is_foreign_key_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

fn favorites_of(user_id: i32) -> SelectStatement {
    Query::select()
        .column(favorites::Column::RecipeId)
        .from(favorites::Entity)
        .and_where(favorites::Column::UserId.eq(user_id))
        .to_owned()
}

fn shopping_cart_of(user_id: i32) -> SelectStatement {
    Query::select()
        .column(shopping_carts::Column::RecipeId)
        .from(shopping_carts::Entity)
        .and_where(shopping_carts::Column::UserId.eq(user_id))
        .to_owned()
}

fn membership_condition(
    recipe_ids: fn(i32) -> SelectStatement,
    membership: EdgeMembership,
) -> SimpleExpr {
    let subquery = recipe_ids(membership.user_id);
    if membership.member {
        recipes::Column::Id.in_subquery(subquery)
    } else {
        recipes::Column::Id.not_in_subquery(subquery)
    }
}

async fn insert_lines<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    items: &[IngredientAmount],
) -> Result<(), DbErr> {
    if items.is_empty() {
        return Ok(());
    }
    let models = items.iter().map(|item| recipe_ingredients::ActiveModel {
        recipe_id: Set(recipe_id),
        ingredient_id: Set(item.ingredient_id),
        amount: Set(item.amount),
    });
    recipe_ingredients::Entity::insert_many(models)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

impl RecipeRepository for DbRecipeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, FoodgramError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe by id")?;
        Ok(model.map(recipe_from_model))
    }

    async fn list(
        &self,
        query: &RecipeQuery,
        page: PageRequest,
    ) -> Result<Page<Recipe>, FoodgramError> {
        let mut select = recipes::Entity::find();
        if let Some(author) = query.author {
            select = select.filter(recipes::Column::AuthorId.eq(author));
        }
        if let Some(membership) = query.favorited {
            select = select.filter(membership_condition(favorites_of, membership));
        }
        if let Some(membership) = query.in_shopping_cart {
            select = select.filter(membership_condition(shopping_cart_of, membership));
        }
        let count = select
            .clone()
            .count(&self.db)
            .await
            .context("count recipes")?;
        let models = page_window(
            select
                .order_by_desc(recipes::Column::CreatedAt)
                .order_by_desc(recipes::Column::Id),
            page,
        )
        .all(&self.db)
        .await
        .context("list recipes")?;
        Ok(Page {
            items: models.into_iter().map(recipe_from_model).collect(),
            count,
        })
    }

    async fn list_by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, FoodgramError> {
        let models = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list recipes by author")?;
        Ok(models.into_iter().map(recipe_from_model).collect())
    }

    async fn count_by_author(&self, author_id: i32) -> Result<u64, FoodgramError> {
        Ok(recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .count(&self.db)
            .await
            .context("count recipes by author")?)
    }

    async fn ingredient_lines(
        &self,
        recipe_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<RecipeIngredientLine>>, FoodgramError> {
        if recipe_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .find_also_related(ingredients::Entity)
            .all(&self.db)
            .await
            .context("load recipe ingredients")?;

        let mut lines: HashMap<i32, Vec<RecipeIngredientLine>> = HashMap::new();
        for (line, ingredient) in rows {
            let Some(ingredient) = ingredient else {
                continue;
            };
            lines
                .entry(line.recipe_id)
                .or_default()
                .push(RecipeIngredientLine {
                    ingredient_id: ingredient.id,
                    name: ingredient.name,
                    measurement_unit: ingredient.measurement_unit,
                    amount: line.amount,
                });
        }
        for list in lines.values_mut() {
            list.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then(a.ingredient_id.cmp(&b.ingredient_id))
            });
        }
        Ok(lines)
    }

    async fn create(&self, author_id: i32, draft: &RecipeDraft) -> Result<Recipe, FoodgramError> {
        let result = self
            .db
            .transaction::<_, recipes::Model, DbErr>(|txn| {
                let draft = draft.clone();
                Box::pin(async move {
                    let recipe = recipes::ActiveModel {
                        author_id: Set(author_id),
                        name: Set(draft.name),
                        text: Set(draft.text),
                        cooking_time: Set(draft.cooking_time),
                        image: Set(draft.image),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    insert_lines(txn, recipe.id, &draft.ingredients).await?;
                    Ok(recipe)
                })
            })
            .await;
        match result {
            Ok(model) => Ok(recipe_from_model(model)),
            // Ingredient ids are checked up front, so only the author can dangle.
            Err(TransactionError::Transaction(e)) if is_foreign_key_violation(&e) => {
                Err(FoodgramError::UserNotFound)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create recipe").into()),
        }
    }

    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<Recipe, FoodgramError> {
        let model = self
            .db
            .transaction::<_, Option<recipes::Model>, DbErr>(|txn| {
                let changes = changes.clone();
                Box::pin(async move {
                    let Some(current) = recipes::Entity::find_by_id(id).one(txn).await? else {
                        return Ok(None);
                    };
                    let mut am = current.clone().into_active_model();
                    if let Some(name) = changes.name {
                        am.name = Set(name);
                    }
                    if let Some(text) = changes.text {
                        am.text = Set(text);
                    }
                    if let Some(cooking_time) = changes.cooking_time {
                        am.cooking_time = Set(cooking_time);
                    }
                    if let Some(image) = changes.image {
                        am.image = Set(image);
                    }
                    let updated = if am.is_changed() {
                        am.update(txn).await?
                    } else {
                        current
                    };

                    recipe_ingredients::Entity::delete_many()
                        .filter(recipe_ingredients::Column::RecipeId.eq(id))
                        .exec(txn)
                        .await?;
                    insert_lines(txn, id, &changes.ingredients).await?;
                    Ok(Some(updated))
                })
            })
            .await
            .context("update recipe")?;
        model
            .map(recipe_from_model)
            .ok_or(FoodgramError::RecipeNotFound)
    }

    async fn delete(&self, id: i32) -> Result<bool, FoodgramError> {
        let result = recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }

    async fn shopping_rows(&self, user_id: i32) -> Result<Vec<ShoppingRow>, FoodgramError> {
        let rows = recipe_ingredients::Entity::find()
            .select_only()
            .column(ingredients::Column::Name)
            .column(ingredients::Column::MeasurementUnit)
            .column(recipe_ingredients::Column::Amount)
            .inner_join(ingredients::Entity)
            .filter(
                recipe_ingredients::Column::RecipeId
                    .in_subquery(shopping_cart_of(user_id)),
            )
            .into_tuple::<(String, String, i32)>()
            .all(&self.db)
            .await
            .context("load shopping cart ingredients")?;
        Ok(rows
            .into_iter()
            .map(|(name, measurement_unit, amount)| ShoppingRow {
                name,
                measurement_unit,
                amount,
            })
            .collect())
    }
}

fn recipe_from_model(model: recipes::Model) -> Recipe {
    Recipe {
        id: model.id,
        author_id: model.author_id,
        name: model.name,
        text: model.text,
        cooking_time: model.cooking_time,
        image: model.image,
        created_at: model.created_at,
    }
}

// ── Edge repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEdgeRepository {
    pub db: DatabaseConnection,
}

impl EdgeRepository for DbEdgeRepository {
    async fn target_exists(&self, kind: EdgeKind, target_id: i32) -> Result<bool, FoodgramError> {
        let count = match kind {
            EdgeKind::Favorite | EdgeKind::ShoppingCart => {
                recipes::Entity::find_by_id(target_id).count(&self.db).await
            }
            EdgeKind::Subscription => users::Entity::find_by_id(target_id).count(&self.db).await,
        }
        .context("check edge target")?;
        Ok(count > 0)
    }

    async fn insert(
        &self,
        kind: EdgeKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<bool, FoodgramError> {
        // ON CONFLICT DO NOTHING: zero affected rows means the edge exists.
        let result = match kind {
            EdgeKind::Favorite => {
                favorites::Entity::insert(favorites::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(target_id),
                })
                .on_conflict(
                    OnConflict::columns([favorites::Column::UserId, favorites::Column::RecipeId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
            EdgeKind::ShoppingCart => {
                shopping_carts::Entity::insert(shopping_carts::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(target_id),
                })
                .on_conflict(
                    OnConflict::columns([
                        shopping_carts::Column::UserId,
                        shopping_carts::Column::RecipeId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
            EdgeKind::Subscription => {
                subscriptions::Entity::insert(subscriptions::ActiveModel {
                    subscriber_id: Set(user_id),
                    author_id: Set(target_id),
                    created_at: Set(Utc::now()),
                })
                .on_conflict(
                    OnConflict::columns([
                        subscriptions::Column::SubscriberId,
                        subscriptions::Column::AuthorId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
        };
        match result {
            Ok(affected) => Ok(affected > 0),
            // The identity names a user with no row.
            Err(e) if is_foreign_key_violation(&e) => Err(FoodgramError::UserNotFound),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("insert {} edge", kind.as_str()))
                .into()),
        }
    }

    async fn delete(
        &self,
        kind: EdgeKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<bool, FoodgramError> {
        let result = match kind {
            EdgeKind::Favorite => {
                favorites::Entity::delete_many()
                    .filter(favorites::Column::UserId.eq(user_id))
                    .filter(favorites::Column::RecipeId.eq(target_id))
                    .exec(&self.db)
                    .await
            }
            EdgeKind::ShoppingCart => {
                shopping_carts::Entity::delete_many()
                    .filter(shopping_carts::Column::UserId.eq(user_id))
                    .filter(shopping_carts::Column::RecipeId.eq(target_id))
                    .exec(&self.db)
                    .await
            }
            EdgeKind::Subscription => {
                subscriptions::Entity::delete_many()
                    .filter(subscriptions::Column::SubscriberId.eq(user_id))
                    .filter(subscriptions::Column::AuthorId.eq(target_id))
                    .exec(&self.db)
                    .await
            }
        }
        .with_context(|| format!("delete {} edge", kind.as_str()))?;
        Ok(result.rows_affected > 0)
    }

    async fn targets_among(
        &self,
        kind: EdgeKind,
        user_id: i32,
        target_ids: &[i32],
    ) -> Result<HashSet<i32>, FoodgramError> {
        if target_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let ids = target_ids.iter().copied();
        let found = match kind {
            EdgeKind::Favorite => {
                favorites::Entity::find()
                    .select_only()
                    .column(favorites::Column::RecipeId)
                    .filter(favorites::Column::UserId.eq(user_id))
                    .filter(favorites::Column::RecipeId.is_in(ids))
                    .into_tuple::<i32>()
                    .all(&self.db)
                    .await
            }
            EdgeKind::ShoppingCart => {
                shopping_carts::Entity::find()
                    .select_only()
                    .column(shopping_carts::Column::RecipeId)
                    .filter(shopping_carts::Column::UserId.eq(user_id))
                    .filter(shopping_carts::Column::RecipeId.is_in(ids))
                    .into_tuple::<i32>()
                    .all(&self.db)
                    .await
            }
            EdgeKind::Subscription => {
                subscriptions::Entity::find()
                    .select_only()
                    .column(subscriptions::Column::AuthorId)
                    .filter(subscriptions::Column::SubscriberId.eq(user_id))
                    .filter(subscriptions::Column::AuthorId.is_in(ids))
                    .into_tuple::<i32>()
                    .all(&self.db)
                    .await
            }
        }
        .with_context(|| format!("load {} edges", kind.as_str()))?;
        Ok(found.into_iter().collect())
    }
}
