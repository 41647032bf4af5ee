use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Catalogue Schemas ---

/// IngredientKind
///
/// The three ingredient categories served by the catalogue. A burger has exactly one
/// `Bun` (counted twice, top and bottom) and any number of fillings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum IngredientKind {
    #[default]
    Bun,
    Main,
    Sauce,
}

/// Ingredient
///
/// A single catalogue entry as returned by `GET /ingredients`.
/// Field names follow the remote API verbatim so payloads round-trip without adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Ingredient {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: IngredientKind,
    pub proteins: u32,
    pub fat: u32,
    pub carbohydrates: u32,
    pub calories: u32,
    pub price: u32,
    pub image: String,
    pub image_large: String,
    pub image_mobile: String,
}

/// ConstructorIngredient
///
/// An ingredient placed into the burger constructor. The same catalogue entry may be
/// added several times, so each placement carries its own `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ConstructorIngredient {
    pub id: String,
    #[serde(flatten)]
    pub ingredient: Ingredient,
}

// --- Order Schemas ---

/// Order
///
/// An order as it appears in feeds, in the profile history and after placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    // "created" | "pending" | "done"
    pub status: String,
    pub name: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
    pub number: u64,
    // Ingredient ids, bun first and last.
    pub ingredients: Vec<String>,
}

/// Feed
///
/// The public order feed (`GET /orders/all`) and the profile history (`GET /orders`)
/// share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Feed {
    pub orders: Vec<Order>,
    pub total: u64,
    pub total_today: u64,
}

/// PlacedOrder
///
/// Response of `POST /orders`: the burger's generated name plus the order record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct PlacedOrder {
    pub name: String,
    pub order: Order,
}

// --- Identity Schemas ---

/// User
///
/// The profile of the signed-in customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct User {
    pub email: String,
    pub name: String,
}

/// AuthTokens
///
/// The access/refresh pair issued by login, registration and token refresh.
/// The access token arrives with its `Bearer ` prefix and is stored as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// AuthSession
///
/// Result of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: User,
    #[serde(flatten)]
    pub tokens: AuthTokens,
}

// --- Request Payloads (Input Schemas) ---

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginData {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct RegisterData {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// UserUpdate
///
/// Partial profile update (`PATCH /auth/user`). Only provided fields are sent.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// NewOrder
///
/// Body of `POST /orders`: the ordered ingredient ids.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct NewOrder {
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ForgotPasswordData {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ResetPasswordData {
    pub password: String,
    pub token: String,
}
