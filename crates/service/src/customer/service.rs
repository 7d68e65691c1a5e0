use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{Customer, CustomerRegistrationRequest, CustomerUpdate, CustomerUpdateRequest, NewCustomer};
use super::repository::CustomerDao;
use crate::errors::ServiceError;

/// Customer business service independent of web framework and storage engine.
///
/// Email uniqueness is checked here before every write. The check and the
/// write are not atomic; the unique key on `customer.email` is the backstop.
pub struct CustomerService {
    dao: Arc<dyn CustomerDao>,
}

impl CustomerService {
    pub fn new(dao: Arc<dyn CustomerDao>) -> Self { Self { dao } }

    #[instrument(skip(self))]
    pub async fn get_all_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        let customers = self.dao.select_all_customers().await?;
        info!(count = customers.len(), "customers_listed");
        Ok(customers)
    }

    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: i32) -> Result<Customer, ServiceError> {
        let customer = self
            .dao
            .select_customer_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer with id {id} not found.")))?;
        info!(customer_id = id, "customer_loaded");
        Ok(customer)
    }

    /// Register a new customer.
    ///
    /// # Examples
    /// ```
    /// use service::customer::{service::CustomerService, repository::mock::MockCustomerDao};
    /// use service::customer::domain::CustomerRegistrationRequest;
    /// use std::sync::Arc;
    /// let svc = CustomerService::new(Arc::new(MockCustomerDao::default()));
    /// let req = CustomerRegistrationRequest { name: "Ann Lee".into(), email: "ann.lee@x.com".into(), age: 30 };
    /// tokio_test::block_on(svc.add_customer(req)).unwrap();
    /// let all = tokio_test::block_on(svc.get_all_customers()).unwrap();
    /// assert_eq!(all[0].email, "ann.lee@x.com");
    /// ```
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn add_customer(&self, request: CustomerRegistrationRequest) -> Result<(), ServiceError> {
        if self.dao.exists_customer_with_email(&request.email).await? {
            return Err(ServiceError::Duplicate("Email taken".into()));
        }
        let customer = NewCustomer::from(request);
        self.dao.insert_customer(&customer).await?;
        info!(email = %customer.email, "customer_registered");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_customer_by_id(&self, id: i32) -> Result<(), ServiceError> {
        if !self.dao.exists_customer_with_id(id).await? {
            return Err(ServiceError::NotFound(format!("Customer with ID [{id}] not found.")));
        }
        self.dao.delete_customer_by_id(id).await?;
        info!(customer_id = id, "customer_deleted");
        Ok(())
    }

    /// Apply the fields of `request` that differ from the stored customer.
    ///
    /// Fails with `Duplicate` when a changed email belongs to another customer
    /// and with `Validation` when nothing would change.
    #[instrument(skip(self, request))]
    pub async fn update_customer(&self, id: i32, request: CustomerUpdateRequest) -> Result<Customer, ServiceError> {
        let mut customer = self.get_customer(id).await?;

        let changes = CustomerUpdate::diff(&customer, &request);
        if let Some(email) = &changes.email {
            if self.dao.exists_customer_with_email(email).await? {
                return Err(ServiceError::Duplicate("Email taken".into()));
            }
        }
        if changes.is_empty() {
            debug!(customer_id = id, "update without changes rejected");
            return Err(ServiceError::Validation("No data changes found.".into()));
        }

        self.dao.update_customer(&changes).await?;
        changes.apply_to(&mut customer);
        info!(customer_id = id, "customer_updated");
        Ok(customer)
    }
}
