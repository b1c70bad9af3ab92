//! Implements a SQLite backed store for the domain models.

use std::sync::{Arc, Mutex};

use email_address::EmailAddress;
use rusqlite::{Connection, Row, params};

use crate::{
    Error,
    db::{MapRow, get_uuid},
    models::{
        Category, CategoryId, CategoryUpdate, NewCategory, NewPriority, NewTransaction, NewUser,
        PasswordHash, Priority, PriorityId, PriorityUpdate, Spending, SpendingCategory,
        SpendingPriority, Transaction, TransactionId, TransactionUpdate, User, UserId,
    },
    pagination::Page,
    stores::{ReportRange, Store, TransactionPage},
};

const USER_COLUMNS: &str = "id, email, first_name, last_name, password";
const CATEGORY_COLUMNS: &str = "id, name, description, user_id";
const PRIORITY_COLUMNS: &str = "id, name, description, level, user_id";
const TRANSACTION_COLUMNS: &str =
    "id, title, description, amount, negative, category_id, priority_id, user_id, created_at";

/// Stores the application's domain models in a SQLite database.
///
/// The tables must be set up with [initialize](crate::initialize_db) before
/// the store is used.
#[derive(Debug, Clone)]
pub struct SQLiteStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl Store for SQLiteStore {
    /// Create a new user in the database.
    ///
    /// # Errors
    /// This function will return an [Error::DuplicateEmail] if the email is
    /// already registered, or an [Error::SqlError] if there is some other SQL
    /// error.
    fn sign_up(&self, new_user: NewUser) -> Result<User, Error> {
        let id = UserId::new();

        self.connection.lock().unwrap().execute(
            "INSERT INTO user (id, email, first_name, last_name, password)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id.to_string(),
                new_user.email.to_string(),
                new_user.first_name,
                new_user.last_name,
                new_user.password_hash.to_string(),
            ],
        )?;

        Ok(User {
            id,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash: new_user.password_hash,
        })
    }

    fn get_user(&self, id: UserId) -> Result<User, Error> {
        let user = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!("SELECT {USER_COLUMNS} FROM user WHERE id = ?1"))?
            .query_row(params![id.to_string()], User::map_row)?;

        Ok(user)
    }

    fn get_users(&self) -> Result<Vec<User>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!("SELECT {USER_COLUMNS} FROM user"))?
            .query_map([], User::map_row)?
            .map(|maybe_user| maybe_user.map_err(Error::from))
            .collect()
    }

    fn find_user(&self, email: &str) -> Result<User, Error> {
        let user = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!("SELECT {USER_COLUMNS} FROM user WHERE email = ?1"))?
            .query_row(params![email], User::map_row)?;

        Ok(user)
    }

    fn create_category(&self, new_category: NewCategory) -> Result<Category, Error> {
        let id = CategoryId::new();

        self.connection.lock().unwrap().execute(
            "INSERT INTO category (id, name, description, user_id) VALUES (?1, ?2, ?3, ?4)",
            params![
                id.to_string(),
                new_category.name,
                new_category.description,
                new_category.user_id.to_string(),
            ],
        )?;

        Ok(Category {
            id,
            name: new_category.name,
            description: new_category.description,
            user_id: new_category.user_id,
        })
    }

    /// Retrieve a category by its ID.
    ///
    /// # Errors
    /// This function will return an [Error::NotFound] if the category does
    /// not exist or belongs to another user.
    fn get_category(&self, id: CategoryId, user_id: UserId) -> Result<Category, Error> {
        let category = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {CATEGORY_COLUMNS} FROM category WHERE id = ?1 AND user_id = ?2"
            ))?
            .query_row(
                params![id.to_string(), user_id.to_string()],
                Category::map_row,
            )?;

        Ok(category)
    }

    fn get_categories(&self, user_id: UserId) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {CATEGORY_COLUMNS} FROM category WHERE user_id = ?1"
            ))?
            .query_map(params![user_id.to_string()], Category::map_row)?
            .map(|maybe_category| maybe_category.map_err(Error::from))
            .collect()
    }

    fn update_category(
        &self,
        id: CategoryId,
        user_id: UserId,
        update: CategoryUpdate,
    ) -> Result<Category, Error> {
        let mut category = self.get_category(id, user_id)?;

        if let Some(name) = update.name {
            category.name = name;
        }
        if let Some(description) = update.description {
            category.description = description;
        }

        self.connection.lock().unwrap().execute(
            "UPDATE category SET name = ?1, description = ?2 WHERE id = ?3 AND user_id = ?4",
            params![
                category.name,
                category.description,
                id.to_string(),
                user_id.to_string(),
            ],
        )?;

        Ok(category)
    }

    fn delete_category(&self, id: CategoryId, user_id: UserId) -> Result<Category, Error> {
        let category = self.get_category(id, user_id)?;

        self.connection.lock().unwrap().execute(
            "DELETE FROM category WHERE id = ?1 AND user_id = ?2",
            params![id.to_string(), user_id.to_string()],
        )?;

        Ok(category)
    }

    fn create_priority(&self, new_priority: NewPriority) -> Result<Priority, Error> {
        let id = PriorityId::new();

        self.connection.lock().unwrap().execute(
            "INSERT INTO priority (id, name, description, level, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id.to_string(),
                new_priority.name,
                new_priority.description,
                new_priority.level,
                new_priority.user_id.to_string(),
            ],
        )?;

        Ok(Priority {
            id,
            name: new_priority.name,
            description: new_priority.description,
            level: new_priority.level,
            user_id: new_priority.user_id,
        })
    }

    /// Retrieve a priority by its ID.
    ///
    /// # Errors
    /// This function will return an [Error::NotFound] if the priority does
    /// not exist or belongs to another user.
    fn get_priority(&self, id: PriorityId, user_id: UserId) -> Result<Priority, Error> {
        let priority = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {PRIORITY_COLUMNS} FROM priority WHERE id = ?1 AND user_id = ?2"
            ))?
            .query_row(
                params![id.to_string(), user_id.to_string()],
                Priority::map_row,
            )?;

        Ok(priority)
    }

    fn get_priorities(&self, user_id: UserId) -> Result<Vec<Priority>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {PRIORITY_COLUMNS} FROM priority WHERE user_id = ?1"
            ))?
            .query_map(params![user_id.to_string()], Priority::map_row)?
            .map(|maybe_priority| maybe_priority.map_err(Error::from))
            .collect()
    }

    fn update_priority(
        &self,
        id: PriorityId,
        user_id: UserId,
        update: PriorityUpdate,
    ) -> Result<Priority, Error> {
        let mut priority = self.get_priority(id, user_id)?;

        if let Some(name) = update.name {
            priority.name = name;
        }
        if let Some(description) = update.description {
            priority.description = description;
        }
        if let Some(level) = update.level {
            priority.level = level;
        }

        self.connection.lock().unwrap().execute(
            "UPDATE priority SET name = ?1, description = ?2, level = ?3
             WHERE id = ?4 AND user_id = ?5",
            params![
                priority.name,
                priority.description,
                priority.level,
                id.to_string(),
                user_id.to_string(),
            ],
        )?;

        Ok(priority)
    }

    fn delete_priority(&self, id: PriorityId, user_id: UserId) -> Result<Priority, Error> {
        let priority = self.get_priority(id, user_id)?;

        self.connection.lock().unwrap().execute(
            "DELETE FROM priority WHERE id = ?1 AND user_id = ?2",
            params![id.to_string(), user_id.to_string()],
        )?;

        Ok(priority)
    }

    /// Create a new transaction in the database.
    ///
    /// The referenced category and priority are resolved scoped to the
    /// transaction's owner before anything is written, so a user cannot
    /// attach transactions to another user's rows.
    ///
    /// # Errors
    /// This function will return an [Error::CategoryNotFound] or
    /// [Error::PriorityNotFound] if a reference does not resolve, or an
    /// [Error::SqlError] if there is some other SQL error.
    fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        self.get_category(new_transaction.category_id, new_transaction.user_id)
            .map_err(|error| match error {
                Error::NotFound => Error::CategoryNotFound,
                error => error,
            })?;
        self.get_priority(new_transaction.priority_id, new_transaction.user_id)
            .map_err(|error| match error {
                Error::NotFound => Error::PriorityNotFound,
                error => error,
            })?;

        let id = TransactionId::new();

        self.connection.lock().unwrap().execute(
            "INSERT INTO \"transaction\"
             (id, title, description, amount, negative, category_id, priority_id, user_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id.to_string(),
                new_transaction.title,
                new_transaction.description,
                new_transaction.amount,
                new_transaction.negative,
                new_transaction.category_id.to_string(),
                new_transaction.priority_id.to_string(),
                new_transaction.user_id.to_string(),
                new_transaction.created_at,
            ],
        )?;

        Ok(Transaction {
            id,
            title: new_transaction.title,
            description: new_transaction.description,
            amount: new_transaction.amount,
            negative: new_transaction.negative,
            category_id: new_transaction.category_id,
            priority_id: new_transaction.priority_id,
            user_id: new_transaction.user_id,
            created_at: new_transaction.created_at,
        })
    }

    fn get_transaction(&self, id: TransactionId, user_id: UserId) -> Result<Transaction, Error> {
        let transaction = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE id = ?1 AND user_id = ?2"
            ))?
            .query_row(
                params![id.to_string(), user_id.to_string()],
                Transaction::map_row,
            )?;

        Ok(transaction)
    }

    fn get_transactions(&self, user_id: UserId, page: Page) -> Result<TransactionPage, Error> {
        let connection = self.connection.lock().unwrap();

        let total: u64 = connection.query_row(
            "SELECT COUNT(id) FROM \"transaction\" WHERE user_id = ?1",
            params![user_id.to_string()],
            |row| row.get::<_, i64>(0),
        )? as u64;

        // Tie-break on ID so rows created at the same instant keep a stable order.
        let transactions = connection
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE user_id = ?1
                 ORDER BY created_at DESC, id ASC LIMIT ?2 OFFSET ?3"
            ))?
            .query_map(
                params![
                    user_id.to_string(),
                    page.page_size as i64,
                    page.offset() as i64,
                ],
                Transaction::map_row,
            )?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TransactionPage {
            transactions,
            total,
        })
    }

    fn update_transaction(
        &self,
        id: TransactionId,
        user_id: UserId,
        update: TransactionUpdate,
    ) -> Result<Transaction, Error> {
        let mut transaction = self.get_transaction(id, user_id)?;

        if let Some(category_id) = update.category_id {
            self.get_category(category_id, user_id)
                .map_err(|error| match error {
                    Error::NotFound => Error::CategoryNotFound,
                    error => error,
                })?;
            transaction.category_id = category_id;
        }
        if let Some(priority_id) = update.priority_id {
            self.get_priority(priority_id, user_id)
                .map_err(|error| match error {
                    Error::NotFound => Error::PriorityNotFound,
                    error => error,
                })?;
            transaction.priority_id = priority_id;
        }
        if let Some(title) = update.title {
            transaction.title = title;
        }
        if let Some(description) = update.description {
            transaction.description = description;
        }
        if let Some(amount) = update.amount {
            transaction.amount = amount;
        }
        if let Some(negative) = update.negative {
            transaction.negative = negative;
        }

        self.connection.lock().unwrap().execute(
            "UPDATE \"transaction\"
             SET title = ?1, description = ?2, amount = ?3, negative = ?4,
                 category_id = ?5, priority_id = ?6
             WHERE id = ?7 AND user_id = ?8",
            params![
                transaction.title,
                transaction.description,
                transaction.amount,
                transaction.negative,
                transaction.category_id.to_string(),
                transaction.priority_id.to_string(),
                id.to_string(),
                user_id.to_string(),
            ],
        )?;

        Ok(transaction)
    }

    fn delete_transaction(
        &self,
        id: TransactionId,
        user_id: UserId,
    ) -> Result<Transaction, Error> {
        let transaction = self.get_transaction(id, user_id)?;

        self.connection.lock().unwrap().execute(
            "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
            params![id.to_string(), user_id.to_string()],
        )?;

        Ok(transaction)
    }

    fn daily_spending(&self, user_id: UserId, range: ReportRange) -> Result<Vec<Spending>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT date(created_at) AS day, SUM(amount) AS total FROM \"transaction\"
                 WHERE user_id = ?1 AND negative = ?2
                   AND date(created_at) BETWEEN date(?3) AND date(?4)
                 GROUP BY date(created_at)
                 ORDER BY day ASC",
            )?
            .query_map(
                params![user_id.to_string(), range.negative, range.start, range.end],
                |row| {
                    Ok(Spending {
                        date: row.get(0)?,
                        total: row.get(1)?,
                        negative: range.negative,
                    })
                },
            )?
            .map(|maybe_spending| maybe_spending.map_err(Error::from))
            .collect()
    }

    fn spending_by_category(
        &self,
        user_id: UserId,
        range: ReportRange,
    ) -> Result<Vec<SpendingCategory>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT t.category_id, c.name, SUM(t.amount) AS total
                 FROM \"transaction\" t
                 INNER JOIN category c ON c.id = t.category_id
                 WHERE t.user_id = ?1 AND t.negative = ?2
                   AND datetime(t.created_at) BETWEEN datetime(?3) AND datetime(?4)
                 GROUP BY t.category_id, c.name
                 ORDER BY total DESC, t.category_id ASC",
            )?
            .query_map(
                params![user_id.to_string(), range.negative, range.start, range.end],
                |row| {
                    Ok(SpendingCategory {
                        category_id: CategoryId::from_uuid(get_uuid(row, 0)?),
                        name: row.get(1)?,
                        total: row.get(2)?,
                        negative: range.negative,
                    })
                },
            )?
            .map(|maybe_spending| maybe_spending.map_err(Error::from))
            .collect()
    }

    fn spending_by_priority(
        &self,
        user_id: UserId,
        range: ReportRange,
    ) -> Result<Vec<SpendingPriority>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT t.priority_id, p.name, p.level, SUM(t.amount) AS total
                 FROM \"transaction\" t
                 INNER JOIN priority p ON p.id = t.priority_id
                 WHERE t.user_id = ?1 AND t.negative = ?2
                   AND datetime(t.created_at) BETWEEN datetime(?3) AND datetime(?4)
                 GROUP BY t.priority_id, p.name, p.level
                 ORDER BY total DESC, t.priority_id ASC",
            )?
            .query_map(
                params![user_id.to_string(), range.negative, range.start, range.end],
                |row| {
                    Ok(SpendingPriority {
                        priority_id: PriorityId::from_uuid(get_uuid(row, 0)?),
                        name: row.get(1)?,
                        level: row.get(2)?,
                        total: row.get(3)?,
                        negative: range.negative,
                    })
                },
            )?
            .map(|maybe_spending| maybe_spending.map_err(Error::from))
            .collect()
    }
}

impl MapRow for User {
    type ReturnType = Self;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = UserId::from_uuid(get_uuid(row, offset)?);

        let raw_email: String = row.get(offset + 1)?;
        let email = EmailAddress::new_unchecked(raw_email);

        let first_name = row.get(offset + 2)?;
        let last_name = row.get(offset + 3)?;

        let raw_password_hash: String = row.get(offset + 4)?;
        let password_hash = PasswordHash::new_unchecked(&raw_password_hash);

        Ok(Self::ReturnType {
            id,
            email,
            first_name,
            last_name,
            password_hash,
        })
    }
}

impl MapRow for Category {
    type ReturnType = Self;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Self::ReturnType {
            id: CategoryId::from_uuid(get_uuid(row, offset)?),
            name: row.get(offset + 1)?,
            description: row.get(offset + 2)?,
            user_id: UserId::from_uuid(get_uuid(row, offset + 3)?),
        })
    }
}

impl MapRow for Priority {
    type ReturnType = Self;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Self::ReturnType {
            id: PriorityId::from_uuid(get_uuid(row, offset)?),
            name: row.get(offset + 1)?,
            description: row.get(offset + 2)?,
            level: row.get(offset + 3)?,
            user_id: UserId::from_uuid(get_uuid(row, offset + 4)?),
        })
    }
}

impl MapRow for Transaction {
    type ReturnType = Self;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Self::ReturnType {
            id: TransactionId::from_uuid(get_uuid(row, offset)?),
            title: row.get(offset + 1)?,
            description: row.get(offset + 2)?,
            amount: row.get(offset + 3)?,
            negative: row.get(offset + 4)?,
            category_id: CategoryId::from_uuid(get_uuid(row, offset + 5)?),
            priority_id: PriorityId::from_uuid(get_uuid(row, offset + 6)?),
            user_id: UserId::from_uuid(get_uuid(row, offset + 7)?),
            created_at: row.get(offset + 8)?,
        })
    }
}


#[cfg(test)]
mod user_tests {
    use email_address::EmailAddress;

    use crate::{
        Error,
        models::{NewUser, PasswordHash, UserId},
        stores::Store,
    };

    use super::test_utils::{create_test_user, get_test_store};

    #[test]
    fn sign_up_assigns_an_id() {
        let store = get_test_store();

        let user = create_test_user(&store, "hello@world.com");

        assert_eq!(user.email.to_string(), "hello@world.com");
    }

    #[test]
    fn sign_up_fails_on_duplicate_email() {
        let store = get_test_store();
        create_test_user(&store, "hello@world.com");

        let result = store.sign_up(NewUser {
            email: EmailAddress::new_unchecked("hello@world.com"),
            first_name: "Second".to_owned(),
            last_name: "User".to_owned(),
            password_hash: PasswordHash::new_unchecked("hunter3"),
        });

        assert_eq!(result, Err(Error::DuplicateEmail));
    }

    #[test]
    fn get_user_round_trips() {
        let store = get_test_store();
        let inserted_user = create_test_user(&store, "foo@bar.baz");

        let selected_user = store.get_user(inserted_user.id).unwrap();

        assert_eq!(inserted_user, selected_user);
    }

    #[test]
    fn get_user_fails_with_unknown_id() {
        let store = get_test_store();
        create_test_user(&store, "foo@bar.baz");

        let result = store.get_user(UserId::new());

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn find_user_by_email() {
        let store = get_test_store();
        let inserted_user = create_test_user(&store, "foo@bar.baz");

        let found_user = store.find_user("foo@bar.baz").unwrap();

        assert_eq!(inserted_user, found_user);
    }

    #[test]
    fn find_user_fails_with_unknown_email() {
        let store = get_test_store();

        let result = store.find_user("nobody@nowhere.com");

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn get_users_returns_everyone() {
        let store = get_test_store();
        create_test_user(&store, "foo@bar.baz");
        create_test_user(&store, "qux@bar.baz");

        let users = store.get_users().unwrap();

        assert_eq!(users.len(), 2);
    }
}




#[cfg(test)]
mod report_tests {
    use time::macros::{date, datetime};

    use crate::stores::{ReportRange, Store};

    use super::test_utils::{
        create_test_category, create_test_priority, create_test_user, get_test_store,
        new_transaction,
    };

    fn august_range(negative: bool) -> ReportRange {
        ReportRange {
            start: datetime!(2024-08-01 00:00 UTC),
            end: datetime!(2024-08-31 23:59:59 UTC),
            negative,
        }
    }

    #[test]
    fn daily_spending_groups_by_calendar_day() {
        let store = get_test_store();
        let user = create_test_user(&store, "foo@bar.baz");
        let category = create_test_category(&store, &user, "Groceries");
        let priority = create_test_priority(&store, &user, "Essential", 1);

        // Two expenses on the 7th, one on the 9th, income on the 9th, and an
        // expense outside the queried range.
        for (created_at, amount, negative) in [
            (datetime!(2024-08-07 09:00 UTC), 10, true),
            (datetime!(2024-08-07 18:30 UTC), 15, true),
            (datetime!(2024-08-09 12:00 UTC), 7, true),
            (datetime!(2024-08-09 13:00 UTC), 1000, false),
            (datetime!(2024-09-02 12:00 UTC), 99, true),
        ] {
            store
                .create_transaction(new_transaction(
                    &user, &category, &priority, amount, negative, created_at,
                ))
                .unwrap();
        }

        let spending = store.daily_spending(user.id, august_range(true)).unwrap();

        assert_eq!(spending.len(), 2);
        assert_eq!(spending[0].date, date!(2024 - 08 - 07));
        assert_eq!(spending[0].total, 25);
        assert!(spending[0].negative);
        assert_eq!(spending[1].date, date!(2024 - 08 - 09));
        assert_eq!(spending[1].total, 7);
    }

    #[test]
    fn daily_spending_filters_by_sign() {
        let store = get_test_store();
        let user = create_test_user(&store, "foo@bar.baz");
        let category = create_test_category(&store, &user, "Salary");
        let priority = create_test_priority(&store, &user, "Essential", 1);

        store
            .create_transaction(new_transaction(
                &user,
                &category,
                &priority,
                1000,
                false,
                datetime!(2024-08-15 12:00 UTC),
            ))
            .unwrap();

        let income = store.daily_spending(user.id, august_range(false)).unwrap();
        let expenses = store.daily_spending(user.id, august_range(true)).unwrap();

        assert_eq!(income.len(), 1);
        assert_eq!(income[0].total, 1000);
        assert!(!income[0].negative);
        assert!(expenses.is_empty());
    }

    #[test]
    fn spending_by_category_orders_largest_total_first() {
        let store = get_test_store();
        let user = create_test_user(&store, "foo@bar.baz");
        let groceries = create_test_category(&store, &user, "Groceries");
        let rent = create_test_category(&store, &user, "Rent");
        let unused = create_test_category(&store, &user, "Travel");
        let priority = create_test_priority(&store, &user, "Essential", 1);

        for (category, amount) in [(&groceries, 10), (&groceries, 15), (&rent, 800)] {
            store
                .create_transaction(new_transaction(
                    &user,
                    category,
                    &priority,
                    amount,
                    true,
                    datetime!(2024-08-07 12:00 UTC),
                ))
                .unwrap();
        }

        let spending = store
            .spending_by_category(user.id, august_range(true))
            .unwrap();

        assert_eq!(spending.len(), 2);
        assert_eq!(spending[0].category_id, rent.id);
        assert_eq!(spending[0].name, "Rent");
        assert_eq!(spending[0].total, 800);
        assert_eq!(spending[1].category_id, groceries.id);
        assert_eq!(spending[1].total, 25);
        // A category with no matching transactions must not appear.
        assert!(spending.iter().all(|row| row.category_id != unused.id));
    }

    #[test]
    fn spending_by_priority_carries_the_level() {
        let store = get_test_store();
        let user = create_test_user(&store, "foo@bar.baz");
        let category = create_test_category(&store, &user, "Groceries");
        let essential = create_test_priority(&store, &user, "Essential", 1);
        let luxury = create_test_priority(&store, &user, "Luxury", 3);

        for (priority, amount) in [(&essential, 100), (&luxury, 250)] {
            store
                .create_transaction(new_transaction(
                    &user,
                    &category,
                    priority,
                    amount,
                    true,
                    datetime!(2024-08-07 12:00 UTC),
                ))
                .unwrap();
        }

        let spending = store
            .spending_by_priority(user.id, august_range(true))
            .unwrap();

        assert_eq!(spending.len(), 2);
        assert_eq!(spending[0].priority_id, luxury.id);
        assert_eq!(spending[0].level, 3);
        assert_eq!(spending[0].total, 250);
        assert_eq!(spending[1].priority_id, essential.id);
        assert_eq!(spending[1].level, 1);
    }

    #[test]
    fn reports_only_cover_the_requesting_user() {
        let store = get_test_store();
        let owner = create_test_user(&store, "foo@bar.baz");
        let other_user = create_test_user(&store, "qux@bar.baz");
        let category = create_test_category(&store, &owner, "Groceries");
        let priority = create_test_priority(&store, &owner, "Essential", 1);

        store
            .create_transaction(new_transaction(
                &owner,
                &category,
                &priority,
                314,
                true,
                datetime!(2024-08-07 12:00 UTC),
            ))
            .unwrap();

        let spending = store
            .daily_spending(other_user.id, august_range(true))
            .unwrap();

        assert!(spending.is_empty());
    }
}
