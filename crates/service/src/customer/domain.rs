use serde::{Deserialize, Serialize};

/// Persisted customer (business view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl From<models::customer::Model> for Customer {
    fn from(m: models::customer::Model) -> Self {
        Self { id: m.id, name: m.name, email: m.email, age: m.age }
    }
}

/// Customer that has not been stored yet; storage assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Registration input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRegistrationRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl From<CustomerRegistrationRequest> for NewCustomer {
    fn from(r: CustomerRegistrationRequest) -> Self {
        Self { name: r.name, email: r.email, age: r.age }
    }
}

/// Partial update input. `None` (absent or JSON `null`) leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

/// Change set for one row: only the `Some` fields are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub id: i32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl CustomerUpdate {
    pub fn new(id: i32) -> Self {
        Self { id, name: None, email: None, age: None }
    }

    /// Keep the requested values that differ from `current`.
    /// Empty strings never clear a field.
    pub fn diff(current: &Customer, request: &CustomerUpdateRequest) -> Self {
        Self {
            id: current.id,
            name: request.name.as_ref().filter(|n| !n.is_empty() && **n != current.name).cloned(),
            email: request.email.as_ref().filter(|e| !e.is_empty() && **e != current.email).cloned(),
            age: request.age.filter(|a| *a != current.age),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }

    pub fn apply_to(&self, customer: &mut Customer) {
        if let Some(name) = &self.name {
            customer.name = name.clone();
        }
        if let Some(email) = &self.email {
            customer.email = email.clone();
        }
        if let Some(age) = self.age {
            customer.age = age;
        }
    }
}
