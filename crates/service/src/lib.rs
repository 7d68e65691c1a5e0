//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business rules from data access through the `CustomerDao` trait.
//! - Ships two interchangeable persistence variants (SeaORM entities, plain SQL).
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod customer;
#[cfg(test)]
pub mod test_support;

pub use customer::CustomerService;
