//! Student records: domain types, the persistence seam and the business service.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::StudentService;
