//! Domain model and application support modules.
//!
//! - **Model**: [`task`], [`query`], [`error`]
//! - **Infrastructure**: [`config`], [`data_storage`], [`messages`]
//! - **Output**: [`view`], [`export`]

pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod messages;
pub mod query;
pub mod task;
pub mod view;
