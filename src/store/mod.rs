//! Application Store
//!
//! One process-wide `RootState` split into four slices (user, ingredients, order,
//! feed). Every change goes through `Store::dispatch`, which applies a single action
//! under the write lock, so each transition is atomic relative to all others.
//!
//! Network-backed operations ("thunks") share one lifecycle: dispatch `Pending`,
//! await the API client with no lock held, then dispatch exactly one of `Fulfilled`
//! or `Rejected`. Failures become state (a message string on the slice); they are
//! also returned to the caller, who is free to ignore them.

use serde::Serialize;
use std::future::Future;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::{
    api::{ApiError, ApiState},
    credentials::{CredentialError, CredentialState},
    gate::AuthStatus,
    models::{
        Feed, ForgotPasswordData, Ingredient, LoginData, Order, PlacedOrder, RegisterData,
        ResetPasswordData, User, UserUpdate,
    },
};

pub mod feed;
pub mod ingredients;
pub mod order;
pub mod user;

pub use feed::{FeedAction, FeedState};
pub use ingredients::{IngredientsAction, IngredientsState};
pub use order::{ConstructorItems, OrderAction, OrderState};
pub use user::{UserAction, UserState};

/// Request
///
/// The three phases of one async operation as seen by a slice.
#[derive(Debug, Clone, PartialEq)]
pub enum Request<T> {
    Pending,
    Fulfilled(T),
    Rejected(String),
}

impl<T> Request<T> {
    pub fn phase(&self) -> &'static str {
        match self {
            Request::Pending => "pending",
            Request::Fulfilled(_) => "fulfilled",
            Request::Rejected(_) => "rejected",
        }
    }
}

/// The rejection text to store: the error's own message, or the slice default when
/// the error carried none.
pub(crate) fn message_or(message: String, default: &str) -> String {
    if message.trim().is_empty() {
        default.to_string()
    } else {
        message
    }
}

/// StoreError
///
/// Why a store operation did not complete. API failures are also written to the
/// owning slice before being returned.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error("unknown ingredient: {0}")]
    UnknownIngredient(String),

    #[error("the burger has no bun")]
    EmptyConstructor,

    #[error("an order is already being placed")]
    OrderInProgress,
}

/// Action
///
/// Anything the store can apply, routed to the slice that owns it.
#[derive(Debug, Clone)]
pub enum Action {
    User(UserAction),
    Ingredients(IngredientsAction),
    Order(OrderAction),
    Feed(FeedAction),
}

impl Action {
    /// Redux-style type string, e.g. `user/fetchUser/pending`.
    pub fn kind(&self) -> String {
        match self {
            Action::User(action) => format!("user/{}", action.kind()),
            Action::Ingredients(action) => format!("ingredients/{}", action.kind()),
            Action::Order(action) => format!("order/{}", action.kind()),
            Action::Feed(action) => format!("feed/{}", action.kind()),
        }
    }
}

/// RootState
///
/// The whole client state. Serialised as the `/store` snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct RootState {
    pub user: UserState,
    pub ingredients: IngredientsState,
    pub order: OrderState,
    pub feed: FeedState,
}

impl RootState {
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::User(action) => self.user.reduce(action),
            Action::Ingredients(action) => self.ingredients.reduce(action),
            Action::Order(action) => self.order.reduce(action),
            Action::Feed(action) => self.feed.reduce(action),
        }
    }

    pub fn auth_status(&self) -> AuthStatus {
        AuthStatus::from_flags(self.user.auth_checked, self.user.is_authenticated)
    }
}

/// Store
///
/// Owns the `RootState` together with the collaborators thunks need: the API client
/// and the session credential store.
pub struct Store {
    state: RwLock<RootState>,
    api: ApiState,
    credentials: CredentialState,
}

impl Store {
    pub fn new(api: ApiState, credentials: CredentialState) -> Self {
        Self {
            state: RwLock::new(RootState::default()),
            api,
            credentials,
        }
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> RootState {
        self.state.read().await.clone()
    }

    /// Reads a projection of the state without cloning all of it.
    pub async fn select<R>(&self, selector: impl FnOnce(&RootState) -> R) -> R {
        selector(&*self.state.read().await)
    }

    pub async fn auth_status(&self) -> AuthStatus {
        self.select(RootState::auth_status).await
    }

    /// dispatch
    ///
    /// Applies one action under the write lock.
    pub async fn dispatch(&self, action: Action) {
        tracing::debug!(action = %action.kind(), "dispatch");
        self.state.write().await.reduce(action);
    }

    /// thunk
    ///
    /// Wraps `call` in the pending → fulfilled | rejected lifecycle.
    async fn thunk<T, W, Fut>(&self, wrap: W, call: Fut) -> Result<T, StoreError>
    where
        T: Clone,
        W: Fn(Request<T>) -> Action,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        self.dispatch(wrap(Request::Pending)).await;
        self.settle(wrap, call).await
    }

    /// settle
    ///
    /// The second half of `thunk`, for callers that already applied `Pending`.
    async fn settle<T, W, Fut>(&self, wrap: W, call: Fut) -> Result<T, StoreError>
    where
        T: Clone,
        W: Fn(Request<T>) -> Action,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        match call.await {
            Ok(payload) => {
                self.dispatch(wrap(Request::Fulfilled(payload.clone())))
                    .await;
                Ok(payload)
            }
            Err(e) => {
                let action = wrap(Request::Rejected(e.to_string()));
                tracing::warn!(action = %action.kind(), error = %e, "request rejected");
                self.dispatch(action).await;
                Err(e)
            }
        }
    }

    // --- Startup ---

    /// bootstrap
    ///
    /// The two startup fetches: the session check and the catalogue. They run
    /// concurrently and settle independently; neither failure affects the other.
    pub async fn bootstrap(&self) {
        let (user, ingredients) = tokio::join!(self.fetch_user(), self.fetch_ingredients());
        tracing::info!(
            session = user.is_ok(),
            catalogue = ingredients.is_ok(),
            "startup fetches settled"
        );
    }

    // --- User Thunks ---

    pub async fn fetch_user(&self) -> Result<User, StoreError> {
        self.thunk(
            |r| Action::User(UserAction::Fetch(r)),
            async { self.api.get_user().await.map_err(StoreError::from) },
        )
        .await
    }

    /// Signs in and persists the issued token pair before the session is marked
    /// authenticated.
    pub async fn login_user(&self, data: LoginData) -> Result<User, StoreError> {
        self.thunk(|r| Action::User(UserAction::Login(r)), async {
            let session = self.api.login(data).await?;
            self.credentials.save(&session.tokens).await?;
            Ok::<_, StoreError>(session.user)
        })
        .await
    }

    pub async fn register_user(&self, data: RegisterData) -> Result<User, StoreError> {
        self.thunk(|r| Action::User(UserAction::Register(r)), async {
            let session = self.api.register(data).await?;
            self.credentials.save(&session.tokens).await?;
            Ok::<_, StoreError>(session.user)
        })
        .await
    }

    pub async fn update_user(&self, update: UserUpdate) -> Result<User, StoreError> {
        self.thunk(
            |r| Action::User(UserAction::Update(r)),
            async { self.api.update_user(update).await.map_err(StoreError::from) },
        )
        .await
    }

    /// Revokes the session remotely, then forgets the stored tokens. Once the server
    /// has revoked the session the logout succeeds even if the local tokens cannot be
    /// cleared.
    pub async fn logout_user(&self) -> Result<(), StoreError> {
        self.thunk(|r| Action::User(UserAction::Logout(r)), async {
            self.api.logout().await?;
            if let Err(e) = self.credentials.clear().await {
                tracing::warn!(error = %e, "session revoked but stored tokens not cleared");
            }
            Ok::<_, StoreError>(())
        })
        .await
    }

    pub async fn fetch_user_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.thunk(|r| Action::User(UserAction::FetchOrders(r)), async {
            Ok::<_, StoreError>(self.api.get_orders().await?.orders)
        })
        .await
    }

    // --- Password Recovery ---
    //
    // Not tracked in any slice: the recovery screens keep their own progress.

    /// Asks the API to mail a reset code to `data.email`.
    pub async fn forgot_password(&self, data: ForgotPasswordData) -> Result<(), StoreError> {
        self.api.forgot_password(data).await?;
        tracing::info!("password reset code requested");
        Ok(())
    }

    pub async fn reset_password(&self, data: ResetPasswordData) -> Result<(), StoreError> {
        self.api.reset_password(data).await?;
        tracing::info!("password reset");
        Ok(())
    }

    // --- Catalogue Thunks ---

    pub async fn fetch_ingredients(&self) -> Result<Vec<Ingredient>, StoreError> {
        self.thunk(
            |r| Action::Ingredients(IngredientsAction::Fetch(r)),
            async { self.api.get_ingredients().await.map_err(StoreError::from) },
        )
        .await
    }

    // --- Order Thunks ---

    /// add_ingredient
    ///
    /// Looks `id` up in the loaded catalogue and places it in the constructor.
    pub async fn add_ingredient(&self, id: &str) -> Result<(), StoreError> {
        let ingredient = self
            .select(|state| state.ingredients.find(id).cloned())
            .await
            .ok_or_else(|| StoreError::UnknownIngredient(id.to_string()))?;
        self.dispatch(Action::Order(OrderAction::add_ingredient(ingredient)))
            .await;
        Ok(())
    }

    /// order_burger
    ///
    /// Places the burger currently in the constructor. Refused without a bun or while
    /// a previous placement is still in flight.
    pub async fn order_burger(&self) -> Result<PlacedOrder, StoreError> {
        let wrap = |r| Action::Order(OrderAction::Place(r));

        // Check and mark in flight under one write lock.
        let ids = {
            let mut state = self.state.write().await;
            if state.order.order_request {
                return Err(StoreError::OrderInProgress);
            }
            let ids = state
                .order
                .constructor
                .ingredient_ids()
                .ok_or(StoreError::EmptyConstructor)?;
            let pending = wrap(Request::Pending);
            tracing::debug!(action = %pending.kind(), "dispatch");
            state.reduce(pending);
            ids
        };

        self.settle(
            wrap,
            async { self.api.order_burger(ids).await.map_err(StoreError::from) },
        )
        .await
    }

    pub async fn fetch_order_by_number(&self, number: u64) -> Result<Vec<Order>, StoreError> {
        self.thunk(
            |r| Action::Order(OrderAction::FetchByNumber(r)),
            async { self.api.get_order_by_number(number).await.map_err(StoreError::from) },
        )
        .await
    }

    // --- Feed Thunks ---

    pub async fn fetch_feeds(&self) -> Result<Feed, StoreError> {
        self.thunk(
            |r| Action::Feed(FeedAction::Fetch(r)),
            async { self.api.get_feeds().await.map_err(StoreError::from) },
        )
        .await
    }
}
