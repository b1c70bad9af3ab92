//! Contains the storage trait for the domain [models](crate::models) along
//! with its SQLite-backed production implementation and an in-memory
//! implementation for tests.

mod fake;
mod sqlite;

pub use fake::FakeStore;
pub use sqlite::SQLiteStore;

use time::OffsetDateTime;

use crate::{
    Error,
    models::{
        Category, CategoryId, CategoryUpdate, NewCategory, NewPriority, NewTransaction, NewUser,
        Priority, PriorityId, PriorityUpdate, Spending, SpendingCategory, SpendingPriority,
        Transaction, TransactionId, TransactionUpdate, User, UserId,
    },
    pagination::Page,
};

/// The date range and sign filter shared by the spending reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRange {
    /// The start of the range (inclusive).
    pub start: OffsetDateTime,
    /// The end of the range (inclusive).
    pub end: OffsetDateTime,
    /// Selects expenses (`true`) or income (`false`).
    pub negative: bool,
}

/// One page of a user's transactions along with the total row count.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionPage {
    /// The transactions on the requested page, newest first.
    pub transactions: Vec<Transaction>,
    /// The number of transactions the user has across all pages.
    pub total: u64,
}

/// Creates, retrieves and aggregates the application's domain models.
///
/// Every operation that touches user-owned rows is scoped by the owner's ID,
/// so one user can never read, edit or delete another user's data. Writes
/// that reference another entity (a transaction's category and priority)
/// resolve the reference scoped to the same owner first and fail the whole
/// operation if it does not resolve.
pub trait Store {
    /// Create a new user.
    ///
    /// # Errors
    /// Returns [Error::DuplicateEmail] if the email already belongs to a user.
    fn sign_up(&self, new_user: NewUser) -> Result<User, Error>;

    /// Get a user by their ID.
    fn get_user(&self, id: UserId) -> Result<User, Error>;

    /// Get all users.
    fn get_users(&self) -> Result<Vec<User>, Error>;

    /// Find the user registered with the given email address.
    fn find_user(&self, email: &str) -> Result<User, Error>;

    /// Create a new category.
    fn create_category(&self, new_category: NewCategory) -> Result<Category, Error>;

    /// Get a category by its ID, scoped to its owner.
    fn get_category(&self, id: CategoryId, user_id: UserId) -> Result<Category, Error>;

    /// Get all of a user's categories.
    fn get_categories(&self, user_id: UserId) -> Result<Vec<Category>, Error>;

    /// Apply the supplied fields to an existing category and persist it.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the category does not exist for this owner.
    fn update_category(
        &self,
        id: CategoryId,
        user_id: UserId,
        update: CategoryUpdate,
    ) -> Result<Category, Error>;

    /// Delete a category, scoped to its owner, and return the deleted row.
    fn delete_category(&self, id: CategoryId, user_id: UserId) -> Result<Category, Error>;

    /// Create a new priority.
    fn create_priority(&self, new_priority: NewPriority) -> Result<Priority, Error>;

    /// Get a priority by its ID, scoped to its owner.
    fn get_priority(&self, id: PriorityId, user_id: UserId) -> Result<Priority, Error>;

    /// Get all of a user's priorities.
    fn get_priorities(&self, user_id: UserId) -> Result<Vec<Priority>, Error>;

    /// Apply the supplied fields to an existing priority and persist it.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the priority does not exist for this owner.
    fn update_priority(
        &self,
        id: PriorityId,
        user_id: UserId,
        update: PriorityUpdate,
    ) -> Result<Priority, Error>;

    /// Delete a priority, scoped to its owner, and return the deleted row.
    fn delete_priority(&self, id: PriorityId, user_id: UserId) -> Result<Priority, Error>;

    /// Create a new transaction.
    ///
    /// # Errors
    /// Returns [Error::CategoryNotFound] or [Error::PriorityNotFound] if the
    /// referenced rows do not resolve for the transaction's owner.
    fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Get a transaction by its ID, scoped to its owner.
    fn get_transaction(&self, id: TransactionId, user_id: UserId) -> Result<Transaction, Error>;

    /// Get one page of a user's transactions, newest first, along with the
    /// total number of matching rows.
    fn get_transactions(&self, user_id: UserId, page: Page) -> Result<TransactionPage, Error>;

    /// Apply the supplied fields to an existing transaction and persist it.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the transaction does not exist for this
    /// owner, and [Error::CategoryNotFound] or [Error::PriorityNotFound] if a
    /// new reference does not resolve for the owner.
    fn update_transaction(
        &self,
        id: TransactionId,
        user_id: UserId,
        update: TransactionUpdate,
    ) -> Result<Transaction, Error>;

    /// Delete a transaction, scoped to its owner, and return the deleted row.
    fn delete_transaction(&self, id: TransactionId, user_id: UserId)
    -> Result<Transaction, Error>;

    /// Sum a user's matching transactions per calendar day, days ascending.
    ///
    /// Days with no matching transactions are omitted.
    fn daily_spending(&self, user_id: UserId, range: ReportRange) -> Result<Vec<Spending>, Error>;

    /// Sum a user's matching transactions per category, largest total first.
    ///
    /// Categories with no matching transactions are omitted. Equal totals are
    /// ordered by category ID for a stable order.
    fn spending_by_category(
        &self,
        user_id: UserId,
        range: ReportRange,
    ) -> Result<Vec<SpendingCategory>, Error>;

    /// Sum a user's matching transactions per priority, largest total first.
    ///
    /// Priorities with no matching transactions are omitted. Equal totals are
    /// ordered by priority ID for a stable order.
    fn spending_by_priority(
        &self,
        user_id: UserId,
        range: ReportRange,
    ) -> Result<Vec<SpendingPriority>, Error>;
}
