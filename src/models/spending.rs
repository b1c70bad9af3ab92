//! This file defines the read-only aggregate rows produced by the spending
//! reports. These rows are derived from transactions and are never persisted.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::models::{CategoryId, PriorityId};

/// The total amount moved on a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spending {
    /// The calendar day the transactions fall on.
    pub date: Date,
    /// The sum of the matching transactions' amounts.
    pub total: i64,
    /// Whether the total covers expenses (`true`) or income (`false`).
    pub negative: bool,
}

/// The total amount moved against a single category over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingCategory {
    /// The category the transactions are filed under.
    pub category_id: CategoryId,
    /// The category's display name.
    pub name: String,
    /// The sum of the matching transactions' amounts.
    pub total: i64,
    /// Whether the total covers expenses (`true`) or income (`false`).
    pub negative: bool,
}

/// The total amount moved against a single priority over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingPriority {
    /// The priority the transactions are filed under.
    pub priority_id: PriorityId,
    /// The priority's display name.
    pub name: String,
    /// The priority's urgency rank.
    pub level: i64,
    /// The sum of the matching transactions' amounts.
    pub total: i64,
    /// Whether the total covers expenses (`true`) or income (`false`).
    pub negative: bool,
}
