use std::collections::{BTreeMap, BTreeSet};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};

use foodgram_domain::user::UserRole;

use crate::error::FoodgramError;

pub const USERNAME_MAX_LEN: usize = 150;
pub const EMAIL_MAX_LEN: usize = 254;
pub const PERSON_NAME_MAX_LEN: usize = 150;
pub const RECIPE_NAME_MAX_LEN: usize = 256;
pub const INGREDIENT_NAME_MAX_LEN: usize = 128;
pub const MEASUREMENT_UNIT_MAX_LEN: usize = 64;
pub const MIN_COOKING_TIME: i32 = 1;
pub const MIN_INGREDIENT_AMOUNT: i32 = 1;

/// Usernames that collide with fixed routes under `/users/`.
const RESERVED_USERNAMES: &[&str] = &["me", "subscriptions"];

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Media path relative to the media root.
    pub avatar: Option<String>,
    pub role: UserRole,
    pub date_joined: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), FoodgramError> {
        validate_email(&self.email)?;
        validate_username(&self.username)?;
        validate_text_field("first_name", &self.first_name, PERSON_NAME_MAX_LEN)?;
        validate_text_field("last_name", &self.last_name, PERSON_NAME_MAX_LEN)
    }
}

/// A user as seen by a particular viewer.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: User,
    pub is_subscribed: bool,
}

/// Subscription payload: author profile plus a preview of their recipes.
#[derive(Debug, Clone)]
pub struct AuthorWithRecipes {
    pub profile: UserProfile,
    pub recipes: Vec<Recipe>,
    pub recipes_count: u64,
}

/// Read-only per-user reporting row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub user_id: i32,
    pub username: String,
    pub recipes_count: u64,
    pub subscriptions_count: u64,
    pub subscribers_count: u64,
}

pub fn validate_username(username: &str) -> Result<(), FoodgramError> {
    if username.is_empty() || username.chars().count() > USERNAME_MAX_LEN {
        return Err(FoodgramError::validation(
            "username",
            format!("username must be 1-{USERNAME_MAX_LEN} characters"),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(FoodgramError::validation(
            "username",
            "username may contain only letters, digits and @.+-_",
        ));
    }
    if RESERVED_USERNAMES.contains(&username.to_lowercase().as_str()) {
        return Err(FoodgramError::validation(
            "username",
            format!("username {username:?} is reserved"),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), FoodgramError> {
    let invalid = || FoodgramError::validation("email", "enter a valid email address");
    if email.chars().count() > EMAIL_MAX_LEN || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(invalid()),
    }
}

/// Non-blank text no longer than `max_len` characters.
pub fn validate_text_field(
    field: &'static str,
    value: &str,
    max_len: usize,
) -> Result<(), FoodgramError> {
    if value.trim().is_empty() {
        return Err(FoodgramError::validation(
            field,
            format!("{field} must not be blank"),
        ));
    }
    if value.chars().count() > max_len {
        return Err(FoodgramError::validation(
            field,
            format!("{field} must be at most {max_len} characters"),
        ));
    }
    Ok(())
}

// ── Ingredients ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

impl NewIngredient {
    pub fn validate(&self) -> Result<(), FoodgramError> {
        validate_text_field("name", &self.name, INGREDIENT_NAME_MAX_LEN)?;
        validate_text_field(
            "measurement_unit",
            &self.measurement_unit,
            MEASUREMENT_UNIT_MAX_LEN,
        )
    }
}

// ── Recipes ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i32,
    pub author_id: i32,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    /// Media path relative to the media root.
    pub image: String,
    pub created_at: DateTime<Utc>,
}

/// One ingredient line of a recipe, joined with the ingredient catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredientLine {
    pub ingredient_id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// `{id, amount}` pair from a recipe write payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: i32,
    pub amount: i32,
}

/// Validated recipe fields ready to persist. `image` is already a stored
/// media path.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: String,
    pub ingredients: Vec<IngredientAmount>,
}

/// Partial update. Ingredients are always replaced wholesale.
#[derive(Debug, Clone)]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub image: Option<String>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Fully assembled recipe for one viewer.
#[derive(Debug, Clone)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub author: UserProfile,
    pub ingredients: Vec<RecipeIngredientLine>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

pub fn validate_recipe_name(name: &str) -> Result<(), FoodgramError> {
    validate_text_field("name", name, RECIPE_NAME_MAX_LEN)
}

pub fn validate_recipe_text(text: &str) -> Result<(), FoodgramError> {
    if text.trim().is_empty() {
        return Err(FoodgramError::validation("text", "text must not be blank"));
    }
    Ok(())
}

pub fn validate_cooking_time(cooking_time: i32) -> Result<(), FoodgramError> {
    if cooking_time < MIN_COOKING_TIME {
        return Err(FoodgramError::validation(
            "cooking_time",
            format!("cooking_time must be at least {MIN_COOKING_TIME}"),
        ));
    }
    Ok(())
}

/// Non-empty, every amount ≥ 1, no ingredient listed twice. Duplicates are
/// reported by id in ascending order.
pub fn validate_ingredient_amounts(items: &[IngredientAmount]) -> Result<(), FoodgramError> {
    if items.is_empty() {
        return Err(FoodgramError::validation(
            "ingredients",
            "at least one ingredient is required",
        ));
    }
    if let Some(item) = items.iter().find(|i| i.amount < MIN_INGREDIENT_AMOUNT) {
        return Err(FoodgramError::validation(
            "ingredients",
            format!(
                "amount of ingredient {} must be at least {MIN_INGREDIENT_AMOUNT}",
                item.ingredient_id
            ),
        ));
    }
    let mut seen = BTreeSet::new();
    let duplicates: BTreeSet<i32> = items
        .iter()
        .filter(|i| !seen.insert(i.ingredient_id))
        .map(|i| i.ingredient_id)
        .collect();
    if !duplicates.is_empty() {
        let ids = duplicates
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(FoodgramError::validation(
            "ingredients",
            format!("duplicate ingredient ids: {ids}"),
        ));
    }
    Ok(())
}

// ── Relations ────────────────────────────────────────────────────────────────

/// User → target edges. Favorites and shopping carts point at recipes,
/// subscriptions point at authors. Each kind lives in its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Favorite,
    ShoppingCart,
    Subscription,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Favorite => "favorite",
            Self::ShoppingCart => "shopping_cart",
            Self::Subscription => "subscription",
        }
    }

    pub fn already_exists(self) -> FoodgramError {
        match self {
            Self::Favorite => FoodgramError::AlreadyFavorited,
            Self::ShoppingCart => FoodgramError::AlreadyInShoppingCart,
            Self::Subscription => FoodgramError::AlreadySubscribed,
        }
    }

    pub fn not_found(self) -> FoodgramError {
        match self {
            Self::Favorite => FoodgramError::NotFavorited,
            Self::ShoppingCart => FoodgramError::NotInShoppingCart,
            Self::Subscription => FoodgramError::NotSubscribed,
        }
    }

    pub fn target_not_found(self) -> FoodgramError {
        match self {
            Self::Favorite | Self::ShoppingCart => FoodgramError::RecipeNotFound,
            Self::Subscription => FoodgramError::UserNotFound,
        }
    }
}

// ── Recipe filter ────────────────────────────────────────────────────────────

/// Raw list filters as supplied by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author: Option<i32>,
    pub is_favorited: Option<bool>,
    pub is_in_shopping_cart: Option<bool>,
}

/// Membership condition on one of the viewer's edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeMembership {
    pub user_id: i32,
    /// `true` keeps only members, `false` excludes them.
    pub member: bool,
}

/// Filters bound to a concrete viewer, ready for the repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecipeQuery {
    pub author: Option<i32>,
    pub favorited: Option<EdgeMembership>,
    pub in_shopping_cart: Option<EdgeMembership>,
}

impl RecipeFilter {
    /// Bind the filter to `viewer`. `None` means the result is empty without
    /// touching storage: an anonymous viewer asked for a per-user flag.
    pub fn resolve(&self, viewer: Option<i32>) -> Option<RecipeQuery> {
        let has_flag = self.is_favorited.is_some() || self.is_in_shopping_cart.is_some();
        let viewer = match viewer {
            Some(id) => id,
            None if has_flag => return None,
            None => {
                return Some(RecipeQuery {
                    author: self.author,
                    ..RecipeQuery::default()
                });
            }
        };
        let membership = |flag: Option<bool>| {
            flag.map(|member| EdgeMembership {
                user_id: viewer,
                member,
            })
        };
        Some(RecipeQuery {
            author: self.author,
            favorited: membership(self.is_favorited),
            in_shopping_cart: membership(self.is_in_shopping_cart),
        })
    }
}

// ── Shopping list ────────────────────────────────────────────────────────────

pub const EMPTY_SHOPPING_LIST: &str = "Empty list.";

/// One `(ingredient, amount)` pair from a recipe in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingRow {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub total: i64,
}

/// Group by `(name, unit)` and sum amounts. Ordered by name
/// case-insensitively, then by unit.
pub fn aggregate_shopping_list(
    rows: impl IntoIterator<Item = ShoppingRow>,
) -> Vec<ShoppingListItem> {
    let mut totals: BTreeMap<(String, String, String), i64> = BTreeMap::new();
    for row in rows {
        let key = (row.name.to_lowercase(), row.measurement_unit, row.name);
        *totals.entry(key).or_default() += i64::from(row.amount);
    }
    totals
        .into_iter()
        .map(|((_, measurement_unit, name), total)| ShoppingListItem {
            name,
            measurement_unit,
            total,
        })
        .collect()
}

pub fn render_shopping_list(items: &[ShoppingListItem]) -> String {
    if items.is_empty() {
        return EMPTY_SHOPPING_LIST.to_owned();
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!(
                "{}. {} — {} {}",
                i + 1,
                capitalize(&item.name),
                item.total,
                item.measurement_unit
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

// ── Media ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    RecipeImage,
    Avatar,
}

impl MediaKind {
    pub fn directory(self) -> &'static str {
        match self {
            Self::RecipeImage => "recipes/images",
            Self::Avatar => "users/avatars",
        }
    }
}

/// Image payload decoded from a `data:image/<type>;base64,<payload>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

impl DecodedImage {
    pub fn from_data_url(field: &'static str, raw: &str) -> Result<Self, FoodgramError> {
        let invalid = |message: &str| FoodgramError::validation(field, message);

        let rest = raw
            .strip_prefix("data:")
            .ok_or_else(|| invalid("image must be a base64 data URL"))?;
        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| invalid("image must be a base64 data URL"))?;
        let extension = match mime.to_ascii_lowercase().as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/gif" => "gif",
            "image/webp" => "webp",
            _ => return Err(invalid("unsupported image type")),
        };
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|_| invalid("image payload is not valid base64"))?;
        if bytes.is_empty() {
            return Err(invalid("image must not be empty"));
        }
        Ok(Self { extension, bytes })
    }
}
