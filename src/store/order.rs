use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Request, message_or};
use crate::models::{ConstructorIngredient, Ingredient, IngredientKind, Order, PlacedOrder};

/// ConstructorItems
///
/// The burger being assembled: at most one bun plus an ordered list of fillings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ConstructorItems {
    pub bun: Option<Ingredient>,
    pub ingredients: Vec<ConstructorIngredient>,
}

impl ConstructorItems {
    pub fn is_empty(&self) -> bool {
        self.bun.is_none() && self.ingredients.is_empty()
    }

    /// Bun counts twice (top and bottom).
    pub fn total_price(&self) -> u32 {
        let bun = self.bun.as_ref().map_or(0, |bun| bun.price * 2);
        bun + self
            .ingredients
            .iter()
            .map(|item| item.ingredient.price)
            .sum::<u32>()
    }

    /// The ids sent when ordering: bun, fillings, bun. `None` without a bun.
    pub fn ingredient_ids(&self) -> Option<Vec<String>> {
        let bun = self.bun.as_ref()?;
        let mut ids = Vec::with_capacity(self.ingredients.len() + 2);
        ids.push(bun.id.clone());
        ids.extend(self.ingredients.iter().map(|item| item.ingredient.id.clone()));
        ids.push(bun.id.clone());
        Some(ids)
    }

    /// How many times catalogue entry `id` is in the burger.
    pub fn count_of(&self, id: &str) -> usize {
        match &self.bun {
            Some(bun) if bun.id == id => 2,
            _ => self
                .ingredients
                .iter()
                .filter(|item| item.ingredient.id == id)
                .count(),
        }
    }
}

/// OrderState
///
/// The constructor plus the state of placing an order and of looking one up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct OrderState {
    pub constructor: ConstructorItems,
    pub order_request: bool,
    pub order_modal_data: Option<Order>,
    pub order_by_number: Option<Order>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum OrderAction {
    AddIngredient(ConstructorIngredient),
    RemoveIngredient(String),
    MoveIngredient { from: usize, to: usize },
    ClearConstructor,
    CloseOrderModal,
    Place(Request<PlacedOrder>),
    FetchByNumber(Request<Vec<Order>>),
}

impl OrderAction {
    /// Builds the add action, assigning the placement its own id so the reducer stays
    /// deterministic.
    pub fn add_ingredient(ingredient: Ingredient) -> Self {
        OrderAction::AddIngredient(ConstructorIngredient {
            id: Uuid::new_v4().to_string(),
            ingredient,
        })
    }

    pub fn kind(&self) -> String {
        match self {
            OrderAction::AddIngredient(_) => "addIngredient".to_string(),
            OrderAction::RemoveIngredient(_) => "removeIngredient".to_string(),
            OrderAction::MoveIngredient { .. } => "moveIngredient".to_string(),
            OrderAction::ClearConstructor => "clearConstructor".to_string(),
            OrderAction::CloseOrderModal => "closeOrderModal".to_string(),
            OrderAction::Place(r) => format!("orderBurger/{}", r.phase()),
            OrderAction::FetchByNumber(r) => format!("getOrderByNumber/{}", r.phase()),
        }
    }
}

impl OrderState {
    pub fn reduce(&mut self, action: OrderAction) {
        match action {
            OrderAction::AddIngredient(item) => {
                if item.ingredient.kind == IngredientKind::Bun {
                    self.constructor.bun = Some(item.ingredient);
                } else {
                    self.constructor.ingredients.push(item);
                }
            }
            OrderAction::RemoveIngredient(id) => {
                self.constructor.ingredients.retain(|item| item.id != id);
            }
            OrderAction::MoveIngredient { from, to } => {
                let items = &mut self.constructor.ingredients;
                if from < items.len() && to < items.len() && from != to {
                    let item = items.remove(from);
                    items.insert(to, item);
                }
            }
            OrderAction::ClearConstructor => self.constructor = ConstructorItems::default(),
            OrderAction::CloseOrderModal => self.order_modal_data = None,

            OrderAction::Place(Request::Pending) => {
                self.order_request = true;
                self.error = None;
            }
            OrderAction::Place(Request::Fulfilled(placed)) => {
                self.order_request = false;
                self.order_modal_data = Some(placed.order);
                self.constructor = ConstructorItems::default();
            }
            OrderAction::Place(Request::Rejected(message)) => {
                self.order_request = false;
                self.error = Some(message_or(message, "Failed to place order"));
            }

            OrderAction::FetchByNumber(Request::Pending) => {
                self.loading = true;
                self.error = None;
            }
            OrderAction::FetchByNumber(Request::Fulfilled(orders)) => {
                self.loading = false;
                self.order_by_number = orders.into_iter().next();
            }
            OrderAction::FetchByNumber(Request::Rejected(message)) => {
                self.loading = false;
                self.error = Some(message_or(message, "Failed to fetch order"));
            }
        }
    }
}
