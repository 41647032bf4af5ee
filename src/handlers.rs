use crate::{
    NavigatorState, StoreState,
    gate::AuthStatus,
    models::{ForgotPasswordData, LoginData, RegisterData, ResetPasswordData, UserUpdate},
    navigation::LocationState,
    renderer::Frame,
    shell::present,
    store::{
        Action, FeedState, OrderAction, OrderState, RootState, StoreError, UserState,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

// --- Request Structs ---

/// FrameQuery
///
/// `follow_redirects=false` returns the raw frame, redirect instructions included,
/// without touching history.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FrameQuery {
    pub follow_redirects: Option<bool>,
}

/// NavigateRequest
///
/// A target href plus the state payload to attach to the new history entry.
#[derive(Deserialize, ToSchema)]
pub struct NavigateRequest {
    #[schema(example = "/feed/42")]
    pub to: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub state: LocationState,
}

/// OverlayRequest
///
/// An in-app link to an overlay-capable path; the current location becomes its
/// Background Marker.
#[derive(Deserialize, ToSchema)]
pub struct OverlayRequest {
    #[schema(example = "/ingredients/643d69a5c3f7b9001cfa093c")]
    pub to: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AddIngredientRequest {
    pub id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct MoveIngredientRequest {
    pub from: usize,
    pub to: usize,
}

// --- Navigation Handlers ---

async fn frame_after(
    store: &StoreState,
    navigator: &NavigatorState,
    follow_redirects: bool,
    navigate: impl FnOnce(&mut crate::navigation::Navigator),
) -> Json<Frame> {
    let mut navigator = navigator.lock().await;
    navigate(&mut navigator);
    Json(present(store, &mut navigator, follow_redirects).await)
}

/// get_frame
///
/// [Navigation] Renders the current location: base layer plus optional overlay.
#[utoipa::path(
    get,
    path = "/frame",
    params(FrameQuery),
    responses((status = 200, description = "Rendered frame"))
)]
pub async fn get_frame(
    State(store): State<StoreState>,
    State(navigator): State<NavigatorState>,
    Query(query): Query<FrameQuery>,
) -> Json<Frame> {
    let follow = query.follow_redirects.unwrap_or(true);
    frame_after(&store, &navigator, follow, |_| {}).await
}

/// push_location
///
/// [Navigation] Pushes a new history entry with the given state payload.
#[utoipa::path(
    post,
    path = "/navigation/push",
    request_body = NavigateRequest,
    responses((status = 200, description = "Rendered frame"))
)]
pub async fn push_location(
    State(store): State<StoreState>,
    State(navigator): State<NavigatorState>,
    Json(payload): Json<NavigateRequest>,
) -> Json<Frame> {
    frame_after(&store, &navigator, true, |nav| {
        nav.push(&payload.to, payload.state);
    })
    .await
}

/// replace_location
///
/// [Navigation] Replaces the current history entry.
#[utoipa::path(
    post,
    path = "/navigation/replace",
    request_body = NavigateRequest,
    responses((status = 200, description = "Rendered frame"))
)]
pub async fn replace_location(
    State(store): State<StoreState>,
    State(navigator): State<NavigatorState>,
    Json(payload): Json<NavigateRequest>,
) -> Json<Frame> {
    frame_after(&store, &navigator, true, |nav| {
        nav.replace(&payload.to, payload.state);
    })
    .await
}

/// open_overlay
///
/// [Navigation] Navigates to an overlay-capable path from inside the app.
#[utoipa::path(
    post,
    path = "/navigation/overlay",
    request_body = OverlayRequest,
    responses((status = 200, description = "Rendered frame"))
)]
pub async fn open_overlay(
    State(store): State<StoreState>,
    State(navigator): State<NavigatorState>,
    Json(payload): Json<OverlayRequest>,
) -> Json<Frame> {
    frame_after(&store, &navigator, true, |nav| {
        nav.open_overlay(&payload.to);
    })
    .await
}

/// go_back
///
/// [Navigation] One step back in history.
#[utoipa::path(
    post,
    path = "/navigation/back",
    responses((status = 200, description = "Rendered frame"))
)]
pub async fn go_back(
    State(store): State<StoreState>,
    State(navigator): State<NavigatorState>,
) -> Json<Frame> {
    frame_after(&store, &navigator, true, |nav| {
        nav.back();
    })
    .await
}

/// go_forward
///
/// [Navigation] One step forward in history.
#[utoipa::path(
    post,
    path = "/navigation/forward",
    responses((status = 200, description = "Rendered frame"))
)]
pub async fn go_forward(
    State(store): State<StoreState>,
    State(navigator): State<NavigatorState>,
) -> Json<Frame> {
    frame_after(&store, &navigator, true, |nav| {
        nav.forward();
    })
    .await
}

/// close_overlay
///
/// [Navigation] Dismisses the overlay by stepping back to the entry it was opened from.
#[utoipa::path(
    post,
    path = "/navigation/close-overlay",
    responses((status = 200, description = "Rendered frame"))
)]
pub async fn close_overlay(
    State(store): State<StoreState>,
    State(navigator): State<NavigatorState>,
) -> Json<Frame> {
    frame_after(&store, &navigator, true, |nav| {
        nav.close_overlay();
    })
    .await
}

// --- Store Handlers ---

/// get_store
///
/// [Store] Snapshot of every slice.
#[utoipa::path(
    get,
    path = "/store",
    responses((status = 200, description = "Root state", body = RootState))
)]
pub async fn get_store(State(store): State<StoreState>) -> Json<RootState> {
    Json(store.snapshot().await)
}

// --- Session Handlers ---
//
// Thunk failures are already recorded on the user slice, which is what these return.

async fn user_slice(store: &StoreState) -> Json<UserState> {
    Json(store.select(|state| state.user.clone()).await)
}

/// login
///
/// [Session] Signs in and persists the issued tokens.
#[utoipa::path(
    post,
    path = "/session/login",
    request_body = LoginData,
    responses((status = 200, description = "User slice", body = UserState))
)]
pub async fn login(
    State(store): State<StoreState>,
    Json(payload): Json<LoginData>,
) -> Json<UserState> {
    let _ = store.login_user(payload).await;
    user_slice(&store).await
}

/// register
///
/// [Session] Creates an account and signs in.
#[utoipa::path(
    post,
    path = "/session/register",
    request_body = RegisterData,
    responses((status = 200, description = "User slice", body = UserState))
)]
pub async fn register(
    State(store): State<StoreState>,
    Json(payload): Json<RegisterData>,
) -> Json<UserState> {
    let _ = store.register_user(payload).await;
    user_slice(&store).await
}

/// logout
///
/// [Session] Revokes the session and forgets the stored tokens.
#[utoipa::path(
    post,
    path = "/session/logout",
    responses((status = 200, description = "User slice", body = UserState))
)]
pub async fn logout(State(store): State<StoreState>) -> Json<UserState> {
    let _ = store.logout_user().await;
    user_slice(&store).await
}

/// update_user
///
/// [Session] Partial profile update; only provided fields change.
#[utoipa::path(
    patch,
    path = "/session/user",
    request_body = UserUpdate,
    responses((status = 200, description = "User slice", body = UserState))
)]
pub async fn update_user(
    State(store): State<StoreState>,
    Json(payload): Json<UserUpdate>,
) -> Json<UserState> {
    let _ = store.update_user(payload).await;
    user_slice(&store).await
}

/// refresh_session
///
/// [Session] Re-runs the session check.
#[utoipa::path(
    post,
    path = "/session/refresh",
    responses((status = 200, description = "User slice", body = UserState))
)]
pub async fn refresh_session(State(store): State<StoreState>) -> Json<UserState> {
    let _ = store.fetch_user().await;
    user_slice(&store).await
}

/// refresh_profile_orders
///
/// [Session] Reloads the signed-in customer's order history.
#[utoipa::path(
    post,
    path = "/profile/orders/refresh",
    responses((status = 200, description = "User slice", body = UserState))
)]
pub async fn refresh_profile_orders(State(store): State<StoreState>) -> Json<UserState> {
    let _ = store.fetch_user_orders().await;
    user_slice(&store).await
}

/// forgot_password
///
/// [Session] Requests a password reset code by e-mail.
#[utoipa::path(
    post,
    path = "/session/forgot-password",
    request_body = ForgotPasswordData,
    responses(
        (status = 204, description = "Reset code sent"),
        (status = 400, description = "Rejected, with the server's message")
    )
)]
pub async fn forgot_password(
    State(store): State<StoreState>,
    Json(payload): Json<ForgotPasswordData>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    store
        .forgot_password(payload)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(rejection)
}

/// reset_password
///
/// [Session] Sets a new password using the mailed code.
#[utoipa::path(
    post,
    path = "/session/reset-password",
    request_body = ResetPasswordData,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Rejected, with the server's message")
    )
)]
pub async fn reset_password(
    State(store): State<StoreState>,
    Json(payload): Json<ResetPasswordData>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    store
        .reset_password(payload)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(rejection)
}

fn rejection(error: StoreError) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": error.to_string() })),
    )
}

// --- Constructor & Order Handlers ---

async fn order_slice(store: &StoreState) -> Json<OrderState> {
    Json(store.select(|state| state.order.clone()).await)
}

/// add_ingredient
///
/// [Constructor] Adds a catalogue ingredient; a bun replaces the current bun.
#[utoipa::path(
    post,
    path = "/constructor/ingredients",
    request_body = AddIngredientRequest,
    responses(
        (status = 200, description = "Order slice", body = OrderState),
        (status = 404, description = "Not in the catalogue")
    )
)]
pub async fn add_ingredient(
    State(store): State<StoreState>,
    Json(payload): Json<AddIngredientRequest>,
) -> Result<Json<OrderState>, StatusCode> {
    match store.add_ingredient(&payload.id).await {
        Ok(()) => Ok(order_slice(&store).await),
        Err(_) => Err(StatusCode::NOT_FOUND),
    }
}

/// remove_ingredient
///
/// [Constructor] Removes one placed filling by its placement id.
#[utoipa::path(
    delete,
    path = "/constructor/ingredients/{id}",
    params(("id" = String, Path, description = "Placement id")),
    responses((status = 200, description = "Order slice", body = OrderState))
)]
pub async fn remove_ingredient(
    State(store): State<StoreState>,
    Path(id): Path<String>,
) -> Json<OrderState> {
    store
        .dispatch(Action::Order(OrderAction::RemoveIngredient(id)))
        .await;
    order_slice(&store).await
}

/// move_ingredient
///
/// [Constructor] Moves a filling from one position to another.
#[utoipa::path(
    post,
    path = "/constructor/move",
    request_body = MoveIngredientRequest,
    responses((status = 200, description = "Order slice", body = OrderState))
)]
pub async fn move_ingredient(
    State(store): State<StoreState>,
    Json(payload): Json<MoveIngredientRequest>,
) -> Json<OrderState> {
    store
        .dispatch(Action::Order(OrderAction::MoveIngredient {
            from: payload.from,
            to: payload.to,
        }))
        .await;
    order_slice(&store).await
}

/// place_order
///
/// [Constructor] Places the constructed burger.
///
/// Requires a signed-in session. A remote failure is reported in the returned
/// slice's `error`, not as an HTTP error.
#[utoipa::path(
    post,
    path = "/orders",
    responses(
        (status = 200, description = "Order slice", body = OrderState),
        (status = 400, description = "No bun in the constructor"),
        (status = 401, description = "Not signed in"),
        (status = 409, description = "An order is already being placed")
    )
)]
pub async fn place_order(
    State(store): State<StoreState>,
) -> Result<Json<OrderState>, StatusCode> {
    if store.auth_status().await != AuthStatus::Authenticated {
        return Err(StatusCode::UNAUTHORIZED);
    }

    match store.order_burger().await {
        Err(StoreError::EmptyConstructor) => Err(StatusCode::BAD_REQUEST),
        Err(StoreError::OrderInProgress) => Err(StatusCode::CONFLICT),
        _ => Ok(order_slice(&store).await),
    }
}

/// close_order_modal
///
/// [Constructor] Dismisses the placed-order confirmation.
#[utoipa::path(
    post,
    path = "/orders/modal/close",
    responses((status = 200, description = "Order slice", body = OrderState))
)]
pub async fn close_order_modal(State(store): State<StoreState>) -> Json<OrderState> {
    store.dispatch(Action::Order(OrderAction::CloseOrderModal)).await;
    order_slice(&store).await
}

/// get_order
///
/// [Orders] Looks an order up by its number.
#[utoipa::path(
    get,
    path = "/orders/{number}",
    params(("number" = u64, Path, description = "Order number")),
    responses((status = 200, description = "Order slice", body = OrderState))
)]
pub async fn get_order(
    State(store): State<StoreState>,
    Path(number): Path<u64>,
) -> Json<OrderState> {
    let _ = store.fetch_order_by_number(number).await;
    order_slice(&store).await
}

/// refresh_feed
///
/// [Feed] Reloads the public order feed.
#[utoipa::path(
    post,
    path = "/feed/refresh",
    responses((status = 200, description = "Feed slice", body = FeedState))
)]
pub async fn refresh_feed(State(store): State<StoreState>) -> Json<FeedState> {
    let _ = store.fetch_feeds().await;
    Json(store.select(|state| state.feed.clone()).await)
}
