use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use models::customer;

use crate::customer::domain::{Customer, CustomerUpdate, NewCustomer};
use crate::customer::repository::CustomerDao;
use crate::errors::ServiceError;

/// SeaORM-backed implementation. Updates rewrite the whole row.
pub struct SeaOrmCustomerDao {
    pub db: DatabaseConnection,
}

impl SeaOrmCustomerDao {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl CustomerDao for SeaOrmCustomerDao {
    async fn select_all_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        let rows = customer::Entity::find()
            .order_by_asc(customer::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn select_customer_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError> {
        let found = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(found.map(Customer::from))
    }

    async fn insert_customer(&self, c: &NewCustomer) -> Result<(), ServiceError> {
        customer::create(&self.db, &c.name, &c.email, c.age).await?;
        Ok(())
    }

    async fn exists_customer_with_email(&self, email: &str) -> Result<bool, ServiceError> {
        let n = customer::Entity::find()
            .filter(customer::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(n > 0)
    }

    async fn exists_customer_with_id(&self, id: i32) -> Result<bool, ServiceError> {
        let n = customer::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(n > 0)
    }

    async fn delete_customer_by_id(&self, id: i32) -> Result<(), ServiceError> {
        customer::hard_delete(&self.db, id).await?;
        Ok(())
    }

    async fn update_customer(&self, update: &CustomerUpdate) -> Result<(), ServiceError> {
        if update.is_empty() {
            return Ok(());
        }
        customer::overwrite(&self.db, update.id, update.name.as_deref(), update.email.as_deref(), update.age).await?;
        Ok(())
    }
}
