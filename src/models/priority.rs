//! This file defines the priority model and its supporting types.

use serde::{Deserialize, Serialize};

use crate::models::{PriorityId, UserId};

/// An urgency rank that transactions are filed under, e.g. "Essential".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Priority {
    /// The priority's ID in the database.
    pub id: PriorityId,
    /// The priority's display name.
    pub name: String,
    /// A free-form description of what the priority covers.
    pub description: String,
    /// The urgency rank. Higher levels are more urgent.
    pub level: i64,
    /// The ID of the user that owns the priority.
    pub user_id: UserId,
}

/// The data needed to create a new priority.
///
/// The store assigns the ID when the priority is persisted.
#[derive(Debug, Clone)]
pub struct NewPriority {
    /// The priority's display name.
    pub name: String,
    /// A free-form description of what the priority covers.
    pub description: String,
    /// The urgency rank. Higher levels are more urgent.
    pub level: i64,
    /// The ID of the user that owns the priority.
    pub user_id: UserId,
}

/// The caller-supplied fields of a priority edit.
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriorityUpdate {
    /// The new display name, if any.
    pub name: Option<String>,
    /// The new description, if any.
    pub description: Option<String>,
    /// The new urgency rank, if any.
    pub level: Option<i64>,
}
