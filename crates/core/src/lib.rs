//! Functional core for the userstore service.
//!
//! Pure data types, the storage contract and error mappings. Nothing in this
//! crate performs I/O; backends live in the `userstore` binary crate.

pub mod storage;
pub mod user;
