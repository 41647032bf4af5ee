use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::dangerous::insecure_decode;
use reqwest::RequestBuilder;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::{
    credentials::{CredentialError, CredentialState},
    models::{
        AuthSession, AuthTokens, Feed, ForgotPasswordData, Ingredient, IngredientKind, LoginData,
        NewOrder, Order, PlacedOrder, RegisterData, ResetPasswordData, User, UserUpdate,
    },
};

/// The server's message for a stale access token; triggers one refresh-and-retry.
pub const JWT_EXPIRED: &str = "jwt expired";

/// ApiError
///
/// Why a call to the burger API failed. `Display` yields the human-readable text the
/// slices store; for a rejection that is the server's own message, verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Rejected(String),

    #[error("You should be authorised")]
    MissingCredentials,

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Credentials(#[from] CredentialError),
}

// 1. BurgerApi Contract
/// BurgerApi
///
/// The remote operations the application consumes. Implementations own token
/// handling for authenticated calls: they read the stored pair, refresh it when the
/// access token has expired, and retry once.
#[async_trait]
pub trait BurgerApi: Send + Sync {
    /// `GET /ingredients`: the full catalogue.
    async fn get_ingredients(&self) -> Result<Vec<Ingredient>, ApiError>;

    /// `GET /orders/all`: the public feed with today's and all-time totals.
    async fn get_feeds(&self) -> Result<Feed, ApiError>;

    /// `GET /orders` (authenticated): the customer's own order history.
    async fn get_orders(&self) -> Result<Feed, ApiError>;

    /// `POST /orders` (authenticated): places an order for the given ingredient ids.
    async fn order_burger(&self, ingredients: Vec<String>) -> Result<PlacedOrder, ApiError>;

    /// `GET /orders/{number}`: orders carrying that number (normally exactly one).
    async fn get_order_by_number(&self, number: u64) -> Result<Vec<Order>, ApiError>;

    async fn register(&self, data: RegisterData) -> Result<AuthSession, ApiError>;

    async fn login(&self, data: LoginData) -> Result<AuthSession, ApiError>;

    /// `POST /auth/token`: exchanges the stored refresh token and persists the new pair.
    async fn refresh_token(&self) -> Result<AuthTokens, ApiError>;

    /// `POST /auth/logout`: revokes the stored refresh token.
    async fn logout(&self) -> Result<(), ApiError>;

    /// `GET /auth/user` (authenticated).
    async fn get_user(&self) -> Result<User, ApiError>;

    /// `PATCH /auth/user` (authenticated).
    async fn update_user(&self, update: UserUpdate) -> Result<User, ApiError>;

    /// `POST /password-reset`: mails a reset code.
    async fn forgot_password(&self, data: ForgotPasswordData) -> Result<(), ApiError>;

    /// `POST /password-reset/reset`: sets a new password using the mailed code.
    async fn reset_password(&self, data: ResetPasswordData) -> Result<(), ApiError>;
}

/// ApiState
///
/// The concrete type used to share the API client across the application.
pub type ApiState = Arc<dyn BurgerApi>;

// --- Response Envelopes ---

#[derive(Deserialize)]
struct IngredientsEnvelope {
    data: Vec<Ingredient>,
}

#[derive(Deserialize)]
struct OrdersEnvelope {
    orders: Vec<Order>,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Deserialize)]
struct AccessClaims {
    exp: i64,
}

// 2. The Real Implementation
/// HttpBurgerApi
///
/// The reqwest-backed client for the burger REST API. Every response body carries a
/// `success` flag; a non-2xx status or `success: false` is a rejection carrying the
/// body's `message`.
#[derive(Clone)]
pub struct HttpBurgerApi {
    client: reqwest::Client,
    base_url: String,
    credentials: CredentialState,
}

impl HttpBurgerApi {
    pub fn new(base_url: &str, credentials: CredentialState) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// send
    ///
    /// Executes the request and unwraps the `success` envelope into `T`.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        // Error pages from proxies are often not JSON; report those by status.
        let body: Value = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(_) if !status.is_success() => Value::Null,
            Err(e) => return Err(e.into()),
        };

        let rejected = body.get("success").and_then(Value::as_bool) == Some(false);
        if !status.is_success() || rejected {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| format!("request failed with status {status}"));
            tracing::warn!(%status, %message, "burger api rejected request");
            return Err(ApiError::Rejected(message));
        }

        Ok(serde_json::from_value(body)?)
    }

    /// exchange
    ///
    /// Trades `refresh_token` for a new pair and persists it.
    async fn exchange(&self, refresh_token: &str) -> Result<AuthTokens, ApiError> {
        let tokens: AuthTokens = self
            .send(
                self.client
                    .post(self.url("/auth/token"))
                    .json(&json!({ "token": refresh_token })),
            )
            .await?;
        self.credentials.save(&tokens).await?;
        tracing::info!("access token refreshed");
        Ok(tokens)
    }

    /// authorized
    ///
    /// Runs an authenticated request. The stored access token is refreshed up front
    /// when its `exp` claim has passed, and once more if the server still answers
    /// `jwt expired`; the request is retried at most once.
    async fn authorized<T, F>(&self, build: F) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: Fn(&str) -> RequestBuilder + Send + Sync,
    {
        let mut tokens = self
            .credentials
            .load()
            .await?
            .ok_or(ApiError::MissingCredentials)?;

        if access_token_expired(&tokens.access_token) {
            tokens = self.exchange(&tokens.refresh_token).await?;
        }

        match self.send(build(tokens.access_token.as_str())).await {
            Err(ApiError::Rejected(message)) if message == JWT_EXPIRED => {
                let fresh = self.exchange(&tokens.refresh_token).await?;
                self.send(build(fresh.access_token.as_str())).await
            }
            other => other,
        }
    }
}

/// access_token_expired
///
/// Reads the `exp` claim of a (possibly `Bearer `-prefixed) access token without
/// verifying its signature; the server remains the authority on validity. Tokens
/// that are not decodable JWTs are reported as not expired.
pub fn access_token_expired(access_token: &str) -> bool {
    let token = access_token.strip_prefix("Bearer ").unwrap_or(access_token);

    match insecure_decode::<AccessClaims>(token) {
        Ok(data) => data.claims.exp < Utc::now().timestamp(),
        Err(_) => false,
    }
}

#[async_trait]
impl BurgerApi for HttpBurgerApi {
    async fn get_ingredients(&self) -> Result<Vec<Ingredient>, ApiError> {
        let envelope: IngredientsEnvelope =
            self.send(self.client.get(self.url("/ingredients"))).await?;
        Ok(envelope.data)
    }

    async fn get_feeds(&self) -> Result<Feed, ApiError> {
        self.send(self.client.get(self.url("/orders/all"))).await
    }

    async fn get_orders(&self) -> Result<Feed, ApiError> {
        let url = self.url("/orders");
        self.authorized(|token| self.client.get(&url).header("authorization", token))
            .await
    }

    async fn order_burger(&self, ingredients: Vec<String>) -> Result<PlacedOrder, ApiError> {
        let url = self.url("/orders");
        let body = NewOrder { ingredients };
        self.authorized(|token| {
            self.client
                .post(&url)
                .header("authorization", token)
                .json(&body)
        })
        .await
    }

    async fn get_order_by_number(&self, number: u64) -> Result<Vec<Order>, ApiError> {
        let envelope: OrdersEnvelope = self
            .send(self.client.get(self.url(&format!("/orders/{number}"))))
            .await?;
        Ok(envelope.orders)
    }

    async fn register(&self, data: RegisterData) -> Result<AuthSession, ApiError> {
        self.send(self.client.post(self.url("/auth/register")).json(&data))
            .await
    }

    async fn login(&self, data: LoginData) -> Result<AuthSession, ApiError> {
        self.send(self.client.post(self.url("/auth/login")).json(&data))
            .await
    }

    async fn refresh_token(&self) -> Result<AuthTokens, ApiError> {
        let tokens = self
            .credentials
            .load()
            .await?
            .ok_or(ApiError::MissingCredentials)?;
        self.exchange(&tokens.refresh_token).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let tokens = self
            .credentials
            .load()
            .await?
            .ok_or(ApiError::MissingCredentials)?;
        let _: Value = self
            .send(
                self.client
                    .post(self.url("/auth/logout"))
                    .json(&json!({ "token": tokens.refresh_token })),
            )
            .await?;
        Ok(())
    }

    async fn get_user(&self) -> Result<User, ApiError> {
        let url = self.url("/auth/user");
        let envelope: UserEnvelope = self
            .authorized(|token| self.client.get(&url).header("authorization", token))
            .await?;
        Ok(envelope.user)
    }

    async fn update_user(&self, update: UserUpdate) -> Result<User, ApiError> {
        let url = self.url("/auth/user");
        let envelope: UserEnvelope = self
            .authorized(|token| {
                self.client
                    .patch(&url)
                    .header("authorization", token)
                    .json(&update)
            })
            .await?;
        Ok(envelope.user)
    }

    async fn forgot_password(&self, data: ForgotPasswordData) -> Result<(), ApiError> {
        let _: Value = self
            .send(self.client.post(self.url("/password-reset")).json(&data))
            .await?;
        Ok(())
    }

    async fn reset_password(&self, data: ResetPasswordData) -> Result<(), ApiError> {
        let _: Value = self
            .send(
                self.client
                    .post(self.url("/password-reset/reset"))
                    .json(&data),
            )
            .await?;
        Ok(())
    }
}

// 3. The Mock Implementation (For Tests)
/// MockBurgerApi
///
/// An in-memory `BurgerApi` used by tests and local runs without network access.
/// Serves a small fixed catalogue and feed; with `failure` set, every operation is
/// rejected with that message.
#[derive(Clone)]
pub struct MockBurgerApi {
    pub ingredients: Vec<Ingredient>,
    pub feed: Feed,
    pub user: User,
    /// When set, all operations return `ApiError::Rejected` with this message.
    pub failure: Option<String>,
}

impl MockBurgerApi {
    pub fn new() -> Self {
        let ingredients = vec![
            mock_ingredient("bun-01", "Краторная булка N-200i", IngredientKind::Bun, 1255),
            mock_ingredient(
                "main-01",
                "Биокотлета из марсианской Магнолии",
                IngredientKind::Main,
                424,
            ),
            mock_ingredient("sauce-01", "Соус Spicy-X", IngredientKind::Sauce, 90),
        ];
        let feed = Feed {
            orders: vec![
                mock_order(42, &["bun-01", "main-01", "bun-01"]),
                mock_order(43, &["bun-01", "sauce-01", "bun-01"]),
            ],
            total: 1200,
            total_today: 12,
        };

        Self {
            ingredients,
            feed,
            user: User {
                email: "customer@example.com".to_string(),
                name: "Mock Customer".to_string(),
            },
            failure: None,
        }
    }

    pub fn new_failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    fn check(&self) -> Result<(), ApiError> {
        match &self.failure {
            Some(message) => Err(ApiError::Rejected(message.clone())),
            None => Ok(()),
        }
    }

    fn mock_tokens() -> AuthTokens {
        AuthTokens {
            access_token: "Bearer mock-access".to_string(),
            refresh_token: "mock-refresh".to_string(),
        }
    }
}

impl Default for MockBurgerApi {
    fn default() -> Self {
        Self::new()
    }
}

fn mock_ingredient(id: &str, name: &str, kind: IngredientKind, price: u32) -> Ingredient {
    Ingredient {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        price,
        image: format!("https://code.s3.yandex.net/react/code/{id}.png"),
        image_large: format!("https://code.s3.yandex.net/react/code/{id}-large.png"),
        image_mobile: format!("https://code.s3.yandex.net/react/code/{id}-mobile.png"),
        ..Ingredient::default()
    }
}

fn mock_order(number: u64, ingredients: &[&str]) -> Order {
    let now = Utc::now();
    Order {
        id: format!("order-{number}"),
        status: "done".to_string(),
        name: "Краторный бургер".to_string(),
        created_at: now,
        updated_at: now,
        number,
        ingredients: ingredients.iter().map(|id| id.to_string()).collect(),
    }
}

#[async_trait]
impl BurgerApi for MockBurgerApi {
    async fn get_ingredients(&self) -> Result<Vec<Ingredient>, ApiError> {
        self.check()?;
        Ok(self.ingredients.clone())
    }

    async fn get_feeds(&self) -> Result<Feed, ApiError> {
        self.check()?;
        Ok(self.feed.clone())
    }

    async fn get_orders(&self) -> Result<Feed, ApiError> {
        self.check()?;
        Ok(self.feed.clone())
    }

    async fn order_burger(&self, ingredients: Vec<String>) -> Result<PlacedOrder, ApiError> {
        self.check()?;
        let mut order = mock_order(4242, &[]);
        order.status = "created".to_string();
        order.ingredients = ingredients;
        Ok(PlacedOrder {
            name: order.name.clone(),
            order,
        })
    }

    async fn get_order_by_number(&self, number: u64) -> Result<Vec<Order>, ApiError> {
        self.check()?;
        Ok(self
            .feed
            .orders
            .iter()
            .filter(|order| order.number == number)
            .cloned()
            .collect())
    }

    async fn register(&self, data: RegisterData) -> Result<AuthSession, ApiError> {
        self.check()?;
        Ok(AuthSession {
            user: User {
                email: data.email,
                name: data.name,
            },
            tokens: Self::mock_tokens(),
        })
    }

    async fn login(&self, data: LoginData) -> Result<AuthSession, ApiError> {
        self.check()?;
        Ok(AuthSession {
            user: User {
                email: data.email,
                name: self.user.name.clone(),
            },
            tokens: Self::mock_tokens(),
        })
    }

    async fn refresh_token(&self) -> Result<AuthTokens, ApiError> {
        self.check()?;
        Ok(Self::mock_tokens())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.check()
    }

    async fn get_user(&self) -> Result<User, ApiError> {
        self.check()?;
        Ok(self.user.clone())
    }

    async fn update_user(&self, update: UserUpdate) -> Result<User, ApiError> {
        self.check()?;
        Ok(User {
            email: update.email.unwrap_or_else(|| self.user.email.clone()),
            name: update.name.unwrap_or_else(|| self.user.name.clone()),
        })
    }

    async fn forgot_password(&self, _data: ForgotPasswordData) -> Result<(), ApiError> {
        self.check()
    }

    async fn reset_password(&self, _data: ResetPasswordData) -> Result<(), ApiError> {
        self.check()
    }
}
