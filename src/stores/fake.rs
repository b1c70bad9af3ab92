//! Implements an in-memory store for use in tests.

use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex},
};

use time::Date;

use crate::{
    Error,
    models::{
        Category, CategoryId, CategoryUpdate, NewCategory, NewPriority, NewTransaction, NewUser,
        Priority, PriorityId, PriorityUpdate, Spending, SpendingCategory, SpendingPriority,
        Transaction, TransactionId, TransactionUpdate, User, UserId,
    },
    pagination::Page,
    stores::{ReportRange, Store, TransactionPage},
};

/// An in-memory [Store] for tests.
///
/// Rows live in plain vectors behind a mutex and follow the same ownership
/// scoping rules as [SQLiteStore](crate::stores::SQLiteStore), so middleware
/// and handler tests can run without a database.
#[derive(Debug, Clone, Default)]
pub struct FakeStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<User>,
    categories: Vec<Category>,
    priorities: Vec<Priority>,
    transactions: Vec<Transaction>,
}

impl FakeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for FakeStore {
    fn sign_up(&self, new_user: NewUser) -> Result<User, Error> {
        let mut inner = self.inner.lock().unwrap();

        if inner.users.iter().any(|user| user.email == new_user.email) {
            return Err(Error::DuplicateEmail);
        }

        let user = User {
            id: UserId::new(),
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash: new_user.password_hash,
        };
        inner.users.push(user.clone());

        Ok(user)
    }

    fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.inner
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn get_users(&self) -> Result<Vec<User>, Error> {
        Ok(self.inner.lock().unwrap().users.clone())
    }

    fn find_user(&self, email: &str) -> Result<User, Error> {
        self.inner
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|user| user.email.to_string() == email)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn create_category(&self, new_category: NewCategory) -> Result<Category, Error> {
        let category = Category {
            id: CategoryId::new(),
            name: new_category.name,
            description: new_category.description,
            user_id: new_category.user_id,
        };
        self.inner
            .lock()
            .unwrap()
            .categories
            .push(category.clone());

        Ok(category)
    }

    fn get_category(&self, id: CategoryId, user_id: UserId) -> Result<Category, Error> {
        self.inner
            .lock()
            .unwrap()
            .categories
            .iter()
            .find(|category| category.id == id && category.user_id == user_id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn get_categories(&self, user_id: UserId) -> Result<Vec<Category>, Error> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .categories
            .iter()
            .filter(|category| category.user_id == user_id)
            .cloned()
            .collect())
    }

    fn update_category(
        &self,
        id: CategoryId,
        user_id: UserId,
        update: CategoryUpdate,
    ) -> Result<Category, Error> {
        let mut inner = self.inner.lock().unwrap();

        let category = inner
            .categories
            .iter_mut()
            .find(|category| category.id == id && category.user_id == user_id)
            .ok_or(Error::NotFound)?;

        if let Some(name) = update.name {
            category.name = name;
        }
        if let Some(description) = update.description {
            category.description = description;
        }

        Ok(category.clone())
    }

    fn delete_category(&self, id: CategoryId, user_id: UserId) -> Result<Category, Error> {
        let mut inner = self.inner.lock().unwrap();

        let position = inner
            .categories
            .iter()
            .position(|category| category.id == id && category.user_id == user_id)
            .ok_or(Error::NotFound)?;

        Ok(inner.categories.remove(position))
    }

    fn create_priority(&self, new_priority: NewPriority) -> Result<Priority, Error> {
        let priority = Priority {
            id: PriorityId::new(),
            name: new_priority.name,
            description: new_priority.description,
            level: new_priority.level,
            user_id: new_priority.user_id,
        };
        self.inner
            .lock()
            .unwrap()
            .priorities
            .push(priority.clone());

        Ok(priority)
    }

    fn get_priority(&self, id: PriorityId, user_id: UserId) -> Result<Priority, Error> {
        self.inner
            .lock()
            .unwrap()
            .priorities
            .iter()
            .find(|priority| priority.id == id && priority.user_id == user_id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn get_priorities(&self, user_id: UserId) -> Result<Vec<Priority>, Error> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .priorities
            .iter()
            .filter(|priority| priority.user_id == user_id)
            .cloned()
            .collect())
    }

    fn update_priority(
        &self,
        id: PriorityId,
        user_id: UserId,
        update: PriorityUpdate,
    ) -> Result<Priority, Error> {
        let mut inner = self.inner.lock().unwrap();

        let priority = inner
            .priorities
            .iter_mut()
            .find(|priority| priority.id == id && priority.user_id == user_id)
            .ok_or(Error::NotFound)?;

        if let Some(name) = update.name {
            priority.name = name;
        }
        if let Some(description) = update.description {
            priority.description = description;
        }
        if let Some(level) = update.level {
            priority.level = level;
        }

        Ok(priority.clone())
    }

    fn delete_priority(&self, id: PriorityId, user_id: UserId) -> Result<Priority, Error> {
        let mut inner = self.inner.lock().unwrap();

        let position = inner
            .priorities
            .iter()
            .position(|priority| priority.id == id && priority.user_id == user_id)
            .ok_or(Error::NotFound)?;

        Ok(inner.priorities.remove(position))
    }

    fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        self.get_category(new_transaction.category_id, new_transaction.user_id)
            .map_err(|_| Error::CategoryNotFound)?;
        self.get_priority(new_transaction.priority_id, new_transaction.user_id)
            .map_err(|_| Error::PriorityNotFound)?;

        let transaction = Transaction {
            id: TransactionId::new(),
            title: new_transaction.title,
            description: new_transaction.description,
            amount: new_transaction.amount,
            negative: new_transaction.negative,
            category_id: new_transaction.category_id,
            priority_id: new_transaction.priority_id,
            user_id: new_transaction.user_id,
            created_at: new_transaction.created_at,
        };
        self.inner
            .lock()
            .unwrap()
            .transactions
            .push(transaction.clone());

        Ok(transaction)
    }

    fn get_transaction(&self, id: TransactionId, user_id: UserId) -> Result<Transaction, Error> {
        self.inner
            .lock()
            .unwrap()
            .transactions
            .iter()
            .find(|transaction| transaction.id == id && transaction.user_id == user_id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn get_transactions(&self, user_id: UserId, page: Page) -> Result<TransactionPage, Error> {
        let inner = self.inner.lock().unwrap();

        let mut matching: Vec<Transaction> = inner
            .transactions
            .iter()
            .filter(|transaction| transaction.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total = matching.len() as u64;
        let transactions = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.page_size as usize)
            .collect();

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
        if let Some(category_id) = update.category_id {
            self.get_category(category_id, user_id)
                .map_err(|_| Error::CategoryNotFound)?;
        }
        if let Some(priority_id) = update.priority_id {
            self.get_priority(priority_id, user_id)
                .map_err(|_| Error::PriorityNotFound)?;
        }

        let mut inner = self.inner.lock().unwrap();

        let transaction = inner
            .transactions
            .iter_mut()
            .find(|transaction| transaction.id == id && transaction.user_id == user_id)
            .ok_or(Error::NotFound)?;

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
        if let Some(category_id) = update.category_id {
            transaction.category_id = category_id;
        }
        if let Some(priority_id) = update.priority_id {
            transaction.priority_id = priority_id;
        }

        Ok(transaction.clone())
    }

    fn delete_transaction(
        &self,
        id: TransactionId,
        user_id: UserId,
    ) -> Result<Transaction, Error> {
        let mut inner = self.inner.lock().unwrap();

        let position = inner
            .transactions
            .iter()
            .position(|transaction| transaction.id == id && transaction.user_id == user_id)
            .ok_or(Error::NotFound)?;

        Ok(inner.transactions.remove(position))
    }

    fn daily_spending(&self, user_id: UserId, range: ReportRange) -> Result<Vec<Spending>, Error> {
        let inner = self.inner.lock().unwrap();

        let mut totals: BTreeMap<Date, i64> = BTreeMap::new();
        for transaction in inner.transactions.iter().filter(|transaction| {
            transaction.user_id == user_id
                && transaction.negative == range.negative
                && transaction.created_at.date() >= range.start.date()
                && transaction.created_at.date() <= range.end.date()
        }) {
            *totals.entry(transaction.created_at.date()).or_insert(0) += transaction.amount;
        }

        Ok(totals
            .into_iter()
            .map(|(date, total)| Spending {
                date,
                total,
                negative: range.negative,
            })
            .collect())
    }

    fn spending_by_category(
        &self,
        user_id: UserId,
        range: ReportRange,
    ) -> Result<Vec<SpendingCategory>, Error> {
        let inner = self.inner.lock().unwrap();

        let mut totals: HashMap<CategoryId, i64> = HashMap::new();
        for transaction in inner.transactions.iter().filter(|transaction| {
            transaction.user_id == user_id
                && transaction.negative == range.negative
                && transaction.created_at >= range.start
                && transaction.created_at <= range.end
        }) {
            *totals.entry(transaction.category_id).or_insert(0) += transaction.amount;
        }

        let mut spending: Vec<SpendingCategory> = totals
            .into_iter()
            .filter_map(|(category_id, total)| {
                let category = inner
                    .categories
                    .iter()
                    .find(|category| category.id == category_id)?;

                Some(SpendingCategory {
                    category_id,
                    name: category.name.clone(),
                    total,
                    negative: range.negative,
                })
            })
            .collect();
        spending.sort_by(|a, b| b.total.cmp(&a.total).then(a.category_id.cmp(&b.category_id)));

        Ok(spending)
    }

    fn spending_by_priority(
        &self,
        user_id: UserId,
        range: ReportRange,
    ) -> Result<Vec<SpendingPriority>, Error> {
        let inner = self.inner.lock().unwrap();

        let mut totals: HashMap<PriorityId, i64> = HashMap::new();
        for transaction in inner.transactions.iter().filter(|transaction| {
            transaction.user_id == user_id
                && transaction.negative == range.negative
                && transaction.created_at >= range.start
                && transaction.created_at <= range.end
        }) {
            *totals.entry(transaction.priority_id).or_insert(0) += transaction.amount;
        }

        let mut spending: Vec<SpendingPriority> = totals
            .into_iter()
            .filter_map(|(priority_id, total)| {
                let priority = inner
                    .priorities
                    .iter()
                    .find(|priority| priority.id == priority_id)?;

                Some(SpendingPriority {
                    priority_id,
                    name: priority.name.clone(),
                    level: priority.level,
                    total,
                    negative: range.negative,
                })
            })
            .collect();
        spending.sort_by(|a, b| b.total.cmp(&a.total).then(a.priority_id.cmp(&b.priority_id)));

        Ok(spending)
    }
}

#[cfg(test)]
mod fake_store_tests {
    use email_address::EmailAddress;
    use time::macros::datetime;

    use crate::{
        Error,
        models::{NewCategory, NewPriority, NewTransaction, NewUser, PasswordHash},
        pagination::Page,
        stores::Store,
    };

    use super::FakeStore;

    fn create_test_user(store: &FakeStore, email: &str) -> crate::models::User {
        store
            .sign_up(NewUser {
                email: EmailAddress::new_unchecked(email),
                first_name: "Test".to_owned(),
                last_name: "User".to_owned(),
                password_hash: PasswordHash::new_unchecked("hunter2"),
            })
            .unwrap()
    }

    #[test]
    fn sign_up_fails_on_duplicate_email() {
        let store = FakeStore::new();
        create_test_user(&store, "foo@bar.baz");

        let result = store.sign_up(NewUser {
            email: EmailAddress::new_unchecked("foo@bar.baz"),
            first_name: "Second".to_owned(),
            last_name: "User".to_owned(),
            password_hash: PasswordHash::new_unchecked("hunter3"),
        });

        assert_eq!(result, Err(Error::DuplicateEmail));
    }

    #[test]
    fn delete_category_fails_for_another_users_row() {
        let store = FakeStore::new();
        let owner = create_test_user(&store, "foo@bar.baz");
        let other_user = create_test_user(&store, "qux@bar.baz");
        let category = store
            .create_category(NewCategory {
                name: "Groceries".to_owned(),
                description: String::new(),
                user_id: owner.id,
            })
            .unwrap();

        let result = store.delete_category(category.id, other_user.id);

        assert_eq!(result, Err(Error::NotFound));
        assert!(store.get_category(category.id, owner.id).is_ok());
    }

    #[test]
    fn get_transactions_orders_newest_first() {
        let store = FakeStore::new();
        let user = create_test_user(&store, "foo@bar.baz");
        let category = store
            .create_category(NewCategory {
                name: "Groceries".to_owned(),
                description: String::new(),
                user_id: user.id,
            })
            .unwrap();
        let priority = store
            .create_priority(NewPriority {
                name: "Essential".to_owned(),
                description: String::new(),
                level: 1,
                user_id: user.id,
            })
            .unwrap();

        for day in 1..=3u8 {
            store
                .create_transaction(NewTransaction {
                    title: format!("day {day}"),
                    description: String::new(),
                    amount: day as i64,
                    negative: true,
                    category_id: category.id,
                    priority_id: priority.id,
                    user_id: user.id,
                    created_at: datetime!(2024-08-01 12:00 UTC).replace_day(day).unwrap(),
                })
                .unwrap();
        }

        let page = store
            .get_transactions(
                user.id,
                Page {
                    page: 1,
                    page_size: 2,
                },
            )
            .unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.transactions[0].amount, 3);
        assert_eq!(page.transactions[1].amount, 2);
    }
}
