use async_trait::async_trait;

use super::domain::{Customer, CustomerUpdate, NewCustomer};
use crate::errors::ServiceError;

/// Data-access abstraction for customer persistence.
///
/// Implementations must be interchangeable: the service relies only on the
/// behaviour described here, never on the storage engine behind it.
/// Existence checks are the caller's job; `delete_customer_by_id` on an
/// unknown id is a no-op and `update_customer` on an unknown id is `NotFound`.
#[async_trait]
pub trait CustomerDao: Send + Sync {
    /// All rows ordered by id.
    async fn select_all_customers(&self) -> Result<Vec<Customer>, ServiceError>;
    async fn select_customer_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError>;
    async fn insert_customer(&self, customer: &NewCustomer) -> Result<(), ServiceError>;
    async fn exists_customer_with_email(&self, email: &str) -> Result<bool, ServiceError>;
    async fn exists_customer_with_id(&self, id: i32) -> Result<bool, ServiceError>;
    async fn delete_customer_by_id(&self, id: i32) -> Result<(), ServiceError>;
    /// Write the `Some` fields of `update`; an update without fields does nothing.
    async fn update_customer(&self, update: &CustomerUpdate) -> Result<(), ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Table {
        rows: BTreeMap<i32, Customer>, // key: id
        last_id: i32,
    }

    /// Behaves like the `customer` table (including the unique email key) and
    /// records every write so tests can assert which persistence calls happened.
    #[derive(Default)]
    pub struct MockCustomerDao {
        table: Mutex<Table>,
        inserts: Mutex<Vec<NewCustomer>>,
        updates: Mutex<Vec<CustomerUpdate>>,
        deletes: Mutex<Vec<i32>>,
    }

    impl MockCustomerDao {
        pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
            let dao = Self::default();
            {
                let mut table = dao.table.lock().unwrap();
                for c in customers {
                    table.last_id = table.last_id.max(c.id);
                    table.rows.insert(c.id, c);
                }
            }
            dao
        }

        pub fn inserted(&self) -> Vec<NewCustomer> {
            self.inserts.lock().unwrap().clone()
        }

        pub fn updated(&self) -> Vec<CustomerUpdate> {
            self.updates.lock().unwrap().clone()
        }

        pub fn deleted(&self) -> Vec<i32> {
            self.deletes.lock().unwrap().clone()
        }

        fn email_taken(table: &Table, email: &str, except: Option<i32>) -> bool {
            table.rows.values().any(|c| c.email == email && Some(c.id) != except)
        }
    }

    #[async_trait]
    impl CustomerDao for MockCustomerDao {
        async fn select_all_customers(&self) -> Result<Vec<Customer>, ServiceError> {
            let table = self.table.lock().unwrap();
            Ok(table.rows.values().cloned().collect())
        }

        async fn select_customer_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError> {
            let table = self.table.lock().unwrap();
            Ok(table.rows.get(&id).cloned())
        }

        async fn insert_customer(&self, customer: &NewCustomer) -> Result<(), ServiceError> {
            self.inserts.lock().unwrap().push(customer.clone());
            let mut table = self.table.lock().unwrap();
            if Self::email_taken(&table, &customer.email, None) {
                return Err(ServiceError::Db("duplicate key value violates unique constraint on email".into()));
            }
            table.last_id += 1;
            let id = table.last_id;
            table.rows.insert(id, Customer { id, name: customer.name.clone(), email: customer.email.clone(), age: customer.age });
            Ok(())
        }

        async fn exists_customer_with_email(&self, email: &str) -> Result<bool, ServiceError> {
            let table = self.table.lock().unwrap();
            Ok(Self::email_taken(&table, email, None))
        }

        async fn exists_customer_with_id(&self, id: i32) -> Result<bool, ServiceError> {
            let table = self.table.lock().unwrap();
            Ok(table.rows.contains_key(&id))
        }

        async fn delete_customer_by_id(&self, id: i32) -> Result<(), ServiceError> {
            self.deletes.lock().unwrap().push(id);
            self.table.lock().unwrap().rows.remove(&id);
            Ok(())
        }

        async fn update_customer(&self, update: &CustomerUpdate) -> Result<(), ServiceError> {
            self.updates.lock().unwrap().push(update.clone());
            if update.is_empty() {
                return Ok(());
            }
            let mut table = self.table.lock().unwrap();
            if let Some(email) = &update.email {
                if Self::email_taken(&table, email, Some(update.id)) {
                    return Err(ServiceError::Db("duplicate key value violates unique constraint on email".into()));
                }
            }
            let row = table
                .rows
                .get_mut(&update.id)
                .ok_or_else(|| ServiceError::NotFound(format!("customer {} not found", update.id)))?;
            update.apply_to(row);
            Ok(())
        }
    }
}
