//! Defines the domain models of the application.

mod category;
mod password;
mod priority;
mod spending;
mod transaction;
mod user;

pub use crate::database_id::{CategoryId, PriorityId, TransactionId, UserId};
pub use category::{Category, CategoryUpdate, NewCategory};
pub use password::{PasswordHash, ValidatedPassword};
pub use priority::{NewPriority, Priority, PriorityUpdate};
pub use spending::{Spending, SpendingCategory, SpendingPriority};
pub use transaction::{NewTransaction, Transaction, TransactionUpdate};
pub use user::{NewUser, User};
