/// Entity validation and CRUD against an in-process SQLite store
pub mod student_tests;
