//! Customer module: three-layer architecture (domain, data access, service).
//!
//! `CustomerService` owns the business rules; `CustomerDao` implementations
//! in `repo` are interchangeable and picked once at startup.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use repository::CustomerDao;
pub use service::CustomerService;
