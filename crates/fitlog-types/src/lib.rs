//! Fitlog Types - Shared domain types
//!
//! This crate contains domain types used across fitlog crates:
//! - User identity and login credentials
//! - Exercise and food records
//! - Field-level validation error shapes

pub mod exercise;
pub mod food;
pub mod user;
pub mod validation;

pub use exercise::*;
pub use food::*;
pub use user::*;
pub use validation::*;
