//! REST service for user records stored in DynamoDB.
//!
//! The `userstore` binary serves [`app::create_app`]. Store configuration and
//! the DynamoDB item layout are public so developer tooling writes the same
//! items the server reads.

pub mod app;
pub mod config;
pub mod handlers;
pub mod state;
pub mod storage;
