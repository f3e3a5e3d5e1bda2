//! Service layer for student records.
//! - Separates business logic (duplicate checks, not-found policy) from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Persistence goes through the `StudentRepository` seam.

pub mod errors;
pub mod db;
pub mod student;
#[cfg(test)]
pub mod test_support;

pub use student::StudentService;
