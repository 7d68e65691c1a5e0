//! Behaviour every `CustomerDao` variant must share, run against a live database.

use anyhow::{anyhow, Result};
use uuid::Uuid;

use crate::customer::domain::{Customer, CustomerUpdate, NewCustomer};
use crate::customer::repository::CustomerDao;
use crate::errors::ServiceError;

fn new_customer() -> NewCustomer {
    NewCustomer {
        name: format!("Contract {}", Uuid::new_v4()),
        email: format!("contract-{}@example.com", Uuid::new_v4()),
        age: 28,
    }
}

/// Insert and look the row up by email, the way a caller without the generated id would.
async fn insert_and_find(dao: &dyn CustomerDao) -> Result<(NewCustomer, i32)> {
    let c = new_customer();
    dao.insert_customer(&c).await?;
    let id = dao
        .select_all_customers()
        .await?
        .into_iter()
        .find(|row| row.email == c.email)
        .map(|row| row.id)
        .ok_or_else(|| anyhow!("inserted customer missing"))?;
    Ok((c, id))
}

async fn expect_row(dao: &dyn CustomerDao, id: i32) -> Result<Customer> {
    dao.select_customer_by_id(id).await?.ok_or_else(|| anyhow!("customer {id} missing"))
}

pub async fn run_all(dao: &dyn CustomerDao) -> Result<()> {
    select_all_customers(dao).await?;
    select_customer_by_id(dao).await?;
    empty_when_select_unknown_id(dao).await?;
    exists_customer_with_email(dao).await?;
    exists_customer_with_id(dao).await?;
    delete_customer_by_id(dao).await?;
    update_single_fields(dao).await?;
    update_all_properties(dao).await?;
    empty_update_changes_nothing(dao).await?;
    update_unknown_id_is_not_found(dao).await?;
    Ok(())
}

async fn select_all_customers(dao: &dyn CustomerDao) -> Result<()> {
    insert_and_find(dao).await?;
    let all = dao.select_all_customers().await?;
    assert!(!all.is_empty());
    assert!(all.windows(2).all(|w| w[0].id < w[1].id), "rows ordered by id");
    Ok(())
}

async fn select_customer_by_id(dao: &dyn CustomerDao) -> Result<()> {
    let (c, id) = insert_and_find(dao).await?;
    let actual = expect_row(dao, id).await?;
    assert_eq!(actual, Customer { id, name: c.name, email: c.email, age: c.age });
    Ok(())
}

async fn empty_when_select_unknown_id(dao: &dyn CustomerDao) -> Result<()> {
    assert!(dao.select_customer_by_id(-1).await?.is_none());
    Ok(())
}

async fn exists_customer_with_email(dao: &dyn CustomerDao) -> Result<()> {
    let (c, _) = insert_and_find(dao).await?;
    assert!(dao.exists_customer_with_email(&c.email).await?);
    let unknown = format!("nobody-{}@example.com", Uuid::new_v4());
    assert!(!dao.exists_customer_with_email(&unknown).await?);
    Ok(())
}

async fn exists_customer_with_id(dao: &dyn CustomerDao) -> Result<()> {
    let (_, id) = insert_and_find(dao).await?;
    assert!(dao.exists_customer_with_id(id).await?);
    assert!(!dao.exists_customer_with_id(-1).await?);
    Ok(())
}

async fn delete_customer_by_id(dao: &dyn CustomerDao) -> Result<()> {
    let (_, id) = insert_and_find(dao).await?;
    dao.delete_customer_by_id(id).await?;
    assert!(dao.select_customer_by_id(id).await?.is_none());
    // second delete of the same id is a silent no-op
    dao.delete_customer_by_id(id).await?;
    Ok(())
}

async fn update_single_fields(dao: &dyn CustomerDao) -> Result<()> {
    let (c, id) = insert_and_find(dao).await?;

    dao.update_customer(&CustomerUpdate { name: Some("foo".into()), ..CustomerUpdate::new(id) }).await?;
    let actual = expect_row(dao, id).await?;
    assert_eq!(actual, Customer { id, name: "foo".into(), email: c.email.clone(), age: c.age });

    let new_email = Uuid::new_v4().to_string();
    dao.update_customer(&CustomerUpdate { email: Some(new_email.clone()), ..CustomerUpdate::new(id) }).await?;
    let actual = expect_row(dao, id).await?;
    assert_eq!(actual, Customer { id, name: "foo".into(), email: new_email.clone(), age: c.age });

    dao.update_customer(&CustomerUpdate { age: Some(50), ..CustomerUpdate::new(id) }).await?;
    let actual = expect_row(dao, id).await?;
    assert_eq!(actual, Customer { id, name: "foo".into(), email: new_email, age: 50 });
    Ok(())
}

async fn update_all_properties(dao: &dyn CustomerDao) -> Result<()> {
    let (_, id) = insert_and_find(dao).await?;
    let update = CustomerUpdate {
        id,
        name: Some("foo".into()),
        email: Some(Uuid::new_v4().to_string()),
        age: Some(60),
    };
    dao.update_customer(&update).await?;

    let actual = expect_row(dao, id).await?;
    assert_eq!(
        actual,
        Customer { id, name: "foo".into(), email: update.email.clone().unwrap_or_default(), age: 60 }
    );
    Ok(())
}

async fn empty_update_changes_nothing(dao: &dyn CustomerDao) -> Result<()> {
    let (c, id) = insert_and_find(dao).await?;
    dao.update_customer(&CustomerUpdate::new(id)).await?;
    let actual = expect_row(dao, id).await?;
    assert_eq!(actual, Customer { id, name: c.name, email: c.email, age: c.age });
    Ok(())
}

async fn update_unknown_id_is_not_found(dao: &dyn CustomerDao) -> Result<()> {
    let res = dao.update_customer(&CustomerUpdate { age: Some(1), ..CustomerUpdate::new(-1) }).await;
    assert!(matches!(res, Err(ServiceError::NotFound(_))));
    Ok(())
}
