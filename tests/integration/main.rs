//! Integration test suite entry point.

mod concurrency_tests;
mod config_tests;
mod engine_tests;
mod sqlite_tests;
