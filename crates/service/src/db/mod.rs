//! SeaORM data-access functions, one module per table.

pub mod student_store;
