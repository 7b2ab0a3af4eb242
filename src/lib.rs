//! Rust client core for the Monthly Budget API.
//!
//! This crate provides the typed domain-state layer of a personal finance
//! tracker: entity models, an async HTTP client for the REST surface,
//! reactive resource stores with screen-level load orchestration, pure
//! aggregation views (balances, monthly buckets, chart series, goal
//! progress), and the dialog workflow state machines that drive
//! create/edit/delete/fund operations.

pub mod client;
pub mod error;
pub mod loader;
pub mod models;
pub mod screens;
pub mod session;
pub mod store;
pub mod views;
pub mod workflow;
