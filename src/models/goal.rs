//! Savings goal model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CategoryId, GoalId};

/// A savings goal with a target amount and optional deadline.
///
/// `progress_percentage` is computed by the server and is not guaranteed
/// to stay within `[0, 100]` — overfunded goals report more than 100.
/// Threshold logic must clamp before comparing
/// (see [`crate::views::goals::clamped_progress`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Unique identifier assigned by the server.
    pub id: GoalId,
    /// Display name.
    pub name: String,
    /// Amount the user wants to reach.
    pub target_amount: f64,
    /// Amount saved so far.
    pub current_amount: f64,
    /// Day the goal should be reached by, if any.
    pub deadline: Option<NaiveDate>,
    /// Category the goal belongs to, if any.
    pub category_id: Option<CategoryId>,
    /// Denormalized category name.
    pub category_name: Option<String>,
    /// Server-computed progress, in percent.
    pub progress_percentage: f64,
}

/// Request body for creating or updating a goal.
///
/// The update endpoint accepts an optional `currentAmount` override;
/// the fund workflow composes a full update payload around it to express
/// a deposit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRequest {
    /// Display name.
    pub name: String,
    /// Amount the user wants to reach (must be > 0).
    pub target_amount: f64,
    /// Day the goal should be reached by, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    /// Category the goal belongs to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    /// New saved amount; only sent by the fund workflow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_amount: Option<f64>,
}
