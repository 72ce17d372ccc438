//! # SnackIt Core
//!
//! Core engine for a grocery/recipe companion app: the mock-store cart and
//! inventory engine, weekly meal-plan shopping-list aggregation, and parsing
//! of AI recipe suggestions into typed records.

pub mod circuit_breaker;
pub mod meal_plan;
pub mod storage;
pub mod store;
pub mod store_errors;
pub mod store_model;
pub mod suggestion;
pub mod suggestion_client;
pub mod suggestion_config;
