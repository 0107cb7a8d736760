//! Integration tests for ytstamps


mod cli_test;
mod lifecycle_test;
mod session_test;
