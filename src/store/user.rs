use serde::Serialize;
use utoipa::ToSchema;

use super::{Request, message_or};
use crate::models::{Order, User};

/// UserState
///
/// The session as the client sees it. `auth_checked` flips to true once the first
/// session check settles (either way); until then the authorization gate shows a
/// preloader instead of redirecting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct UserState {
    pub user_data: Option<User>,
    pub is_authenticated: bool,
    pub auth_checked: bool,
    pub loading: bool,
    pub error: Option<String>,
    // Profile order history.
    pub user_orders: Vec<Order>,
    pub orders_loading: bool,
}

#[derive(Debug, Clone)]
pub enum UserAction {
    Fetch(Request<User>),
    Login(Request<User>),
    Register(Request<User>),
    Update(Request<User>),
    Logout(Request<()>),
    FetchOrders(Request<Vec<Order>>),
    SetAuthChecked(bool),
    /// Drops the profile locally without contacting the server.
    UserLogout,
    ResetError,
}

impl UserAction {
    pub fn kind(&self) -> String {
        match self {
            UserAction::Fetch(r) => format!("fetchUser/{}", r.phase()),
            UserAction::Login(r) => format!("login/{}", r.phase()),
            UserAction::Register(r) => format!("register/{}", r.phase()),
            UserAction::Update(r) => format!("update/{}", r.phase()),
            UserAction::Logout(r) => format!("logout/{}", r.phase()),
            UserAction::FetchOrders(r) => format!("fetchOrders/{}", r.phase()),
            UserAction::SetAuthChecked(_) => "setAuthChecked".to_string(),
            UserAction::UserLogout => "userLogout".to_string(),
            UserAction::ResetError => "resetError".to_string(),
        }
    }
}

impl UserState {
    fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fail(&mut self, message: String, default: &str) {
        self.loading = false;
        self.error = Some(message_or(message, default));
    }

    fn sign_in(&mut self, user: User) {
        self.loading = false;
        self.user_data = Some(user);
        self.is_authenticated = true;
        self.auth_checked = true;
    }

    pub fn reduce(&mut self, action: UserAction) {
        match action {
            UserAction::Fetch(Request::Pending) => self.start(),
            UserAction::Fetch(Request::Fulfilled(user)) => self.sign_in(user),
            UserAction::Fetch(Request::Rejected(message)) => {
                self.fail(message, "Failed to fetch user");
                self.is_authenticated = false;
                self.auth_checked = true;
            }

            UserAction::Login(Request::Pending) => self.start(),
            UserAction::Login(Request::Fulfilled(user)) => self.sign_in(user),
            UserAction::Login(Request::Rejected(message)) => self.fail(message, "Login failed"),

            UserAction::Register(Request::Pending) => self.start(),
            UserAction::Register(Request::Fulfilled(user)) => self.sign_in(user),
            UserAction::Register(Request::Rejected(message)) => {
                self.fail(message, "Registration failed")
            }

            UserAction::Update(Request::Pending) => self.start(),
            UserAction::Update(Request::Fulfilled(user)) => {
                self.loading = false;
                self.user_data = Some(user);
            }
            UserAction::Update(Request::Rejected(message)) => {
                self.fail(message, "Failed to update user")
            }

            UserAction::Logout(Request::Pending) => self.start(),
            UserAction::Logout(Request::Fulfilled(())) => {
                self.loading = false;
                self.user_data = None;
                self.is_authenticated = false;
                self.user_orders.clear();
            }
            UserAction::Logout(Request::Rejected(message)) => self.fail(message, "Logout failed"),

            UserAction::FetchOrders(Request::Pending) => {
                self.orders_loading = true;
                self.error = None;
            }
            UserAction::FetchOrders(Request::Fulfilled(orders)) => {
                self.orders_loading = false;
                self.user_orders = orders;
            }
            UserAction::FetchOrders(Request::Rejected(message)) => {
                self.orders_loading = false;
                self.error = Some(message_or(message, "Failed to fetch orders"));
            }

            UserAction::SetAuthChecked(checked) => self.auth_checked = checked,
            UserAction::UserLogout => self.user_data = None,
            UserAction::ResetError => self.error = None,
        }
    }
}
