use serde::Serialize;
use utoipa::ToSchema;

use super::{Request, message_or};
use crate::models::{Ingredient, IngredientKind};

/// IngredientsState
///
/// The catalogue, loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct IngredientsState {
    pub items: Vec<Ingredient>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum IngredientsAction {
    Fetch(Request<Vec<Ingredient>>),
}

impl IngredientsAction {
    pub fn kind(&self) -> String {
        match self {
            IngredientsAction::Fetch(r) => format!("fetchIngredients/{}", r.phase()),
        }
    }
}

impl IngredientsState {
    pub fn reduce(&mut self, action: IngredientsAction) {
        match action {
            IngredientsAction::Fetch(Request::Pending) => {
                self.loading = true;
                self.error = None;
            }
            IngredientsAction::Fetch(Request::Fulfilled(items)) => {
                self.loading = false;
                self.items = items;
            }
            IngredientsAction::Fetch(Request::Rejected(message)) => {
                self.loading = false;
                self.error = Some(message_or(message, "Failed to fetch ingredients"));
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<&Ingredient> {
        self.items.iter().find(|ingredient| ingredient.id == id)
    }

    pub fn of_kind(&self, kind: IngredientKind) -> impl Iterator<Item = &Ingredient> {
        self.items
            .iter()
            .filter(move |ingredient| ingredient.kind == kind)
    }
}
