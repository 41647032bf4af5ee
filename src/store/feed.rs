use serde::Serialize;
use utoipa::ToSchema;

use super::{Request, message_or};
use crate::models::{Feed, Order};

/// FeedState
///
/// The public order feed with its counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct FeedState {
    pub orders: Vec<Order>,
    pub total: u64,
    pub total_today: u64,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum FeedAction {
    Fetch(Request<Feed>),
}

impl FeedAction {
    pub fn kind(&self) -> String {
        match self {
            FeedAction::Fetch(r) => format!("getFeeds/{}", r.phase()),
        }
    }
}

impl FeedState {
    pub fn reduce(&mut self, action: FeedAction) {
        match action {
            FeedAction::Fetch(Request::Pending) => {
                self.loading = true;
                self.error = None;
            }
            FeedAction::Fetch(Request::Fulfilled(feed)) => {
                self.loading = false;
                self.orders = feed.orders;
                self.total = feed.total;
                self.total_today = feed.total_today;
            }
            FeedAction::Fetch(Request::Rejected(message)) => {
                self.loading = false;
                self.error = Some(message_or(message, "Failed to fetch feeds"));
            }
        }
    }

    /// Numbers of orders in `status`, newest first as served.
    pub fn numbers_with_status(&self, status: &str) -> Vec<u64> {
        self.orders
            .iter()
            .filter(|order| order.status == status)
            .map(|order| order.number)
            .collect()
    }
}
