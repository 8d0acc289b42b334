//! Raffleboard Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests for the
//! raffleboard application. This crate offers a builder pattern for creating test contexts
//! with in-memory SQLite databases and customizable table schemas, plus fixtures for
//! generating valid participant data.
//!
//! # Overview
//!
//! The test utilities consist of four main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing database connection and setup
//! - **TestError**: Error types that can occur during test setup
//! - **fixture**: Factories and constants for participant test data
//!
//! # Usage
//!
//! Use `TestBuilder` to create a test context with the required database tables:
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_participant_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_participant_table()
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod fixture;
