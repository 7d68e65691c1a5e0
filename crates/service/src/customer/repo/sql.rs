use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, QueryResult, Statement, Value};

use crate::customer::domain::{Customer, CustomerUpdate, NewCustomer};
use crate::customer::repository::CustomerDao;
use crate::errors::ServiceError;

const SELECT_CUSTOMER: &str = "SELECT id, name, email, age FROM customer";

/// Plain-SQL implementation: hand-written Postgres statements with bound values.
/// Updates touch only the columns present in the change set.
pub struct SqlCustomerDao {
    pub db: DatabaseConnection,
}

impl SqlCustomerDao {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn statement(sql: &str, values: Vec<Value>) -> Statement {
    Statement::from_sql_and_values(DatabaseBackend::Postgres, sql, values)
}

/// Decode one `customer` row.
pub fn map_row(row: &QueryResult) -> Result<Customer, DbErr> {
    Ok(Customer {
        id: row.try_get("", "id")?,
        name: row.try_get("", "name")?,
        email: row.try_get("", "email")?,
        age: row.try_get("", "age")?,
    })
}

/// `UPDATE` covering only the present columns, or `None` when nothing is set.
pub(crate) fn update_statement(update: &CustomerUpdate) -> Option<Statement> {
    let mut sets: Vec<String> = Vec::new();
    let mut values: Vec<Value> = Vec::new();
    if let Some(name) = &update.name {
        values.push(name.clone().into());
        sets.push(format!("name = ${}", values.len()));
    }
    if let Some(email) = &update.email {
        values.push(email.clone().into());
        sets.push(format!("email = ${}", values.len()));
    }
    if let Some(age) = update.age {
        values.push(age.into());
        sets.push(format!("age = ${}", values.len()));
    }
    if sets.is_empty() {
        return None;
    }
    values.push(update.id.into());
    let sql = format!("UPDATE customer SET {} WHERE id = ${}", sets.join(", "), values.len());
    Some(statement(&sql, values))
}

impl SqlCustomerDao {
    async fn exists(&self, sql: &str, value: Value) -> Result<bool, ServiceError> {
        let row = self.db.query_one(statement(sql, vec![value])).await?;
        match row {
            Some(r) => Ok(r.try_get::<bool>("", "present")?),
            None => Ok(false),
        }
    }
}

#[async_trait]
impl CustomerDao for SqlCustomerDao {
    async fn select_all_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        let sql = format!("{SELECT_CUSTOMER} ORDER BY id");
        let rows = self
            .db
            .query_all(Statement::from_string(DatabaseBackend::Postgres, sql))
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        let customers = rows.iter().map(map_row).collect::<Result<Vec<_>, _>>()?;
        Ok(customers)
    }

    async fn select_customer_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError> {
        let sql = format!("{SELECT_CUSTOMER} WHERE id = $1");
        let row = self
            .db
            .query_one(statement(&sql, vec![id.into()]))
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(row.as_ref().map(map_row).transpose()?)
    }

    async fn insert_customer(&self, c: &NewCustomer) -> Result<(), ServiceError> {
        self.db
            .execute(statement(
                "INSERT INTO customer (name, email, age) VALUES ($1, $2, $3)",
                vec![c.name.clone().into(), c.email.clone().into(), c.age.into()],
            ))
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }

    async fn exists_customer_with_email(&self, email: &str) -> Result<bool, ServiceError> {
        self.exists("SELECT EXISTS(SELECT 1 FROM customer WHERE email = $1) AS present", email.into()).await
    }

    async fn exists_customer_with_id(&self, id: i32) -> Result<bool, ServiceError> {
        self.exists("SELECT EXISTS(SELECT 1 FROM customer WHERE id = $1) AS present", id.into()).await
    }

    async fn delete_customer_by_id(&self, id: i32) -> Result<(), ServiceError> {
        self.db
            .execute(statement("DELETE FROM customer WHERE id = $1", vec![id.into()]))
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }

    async fn update_customer(&self, update: &CustomerUpdate) -> Result<(), ServiceError> {
        let Some(stmt) = update_statement(update) else { return Ok(()) };
        let res = self.db.execute(stmt).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        if res.rows_affected() == 0 {
            return Err(ServiceError::NotFound(format!("customer {} not found", update.id)));
        }
        Ok(())
    }
}
