//! HTTP handlers

mod account;
mod exercise;
mod food;
mod health;

use serde::Serialize;

pub use account::{delete_by_id, delete_self, login, me, signup};
pub use exercise::{create_exercise, delete_exercise, get_exercise, list_exercises, update_exercise};
pub use food::{create_food, delete_food, get_food, list_foods, update_food};
pub use health::{health, ready};

/// Plain confirmation body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
