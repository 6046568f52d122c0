//! Core types, configuration, and error handling for the attache toolkit.
//!
//! This crate provides the shared foundation used by all other attache crates:
//! - [`AttacheError`]: unified error type using `thiserror`
//! - [`AttacheConfig`]: configuration loaded from `attache.toml`
//! - Typed portal records: [`ContactMessage`], [`DonorProfile`],
//!   [`BloodRequest`], [`StockEntry`], and the [`Record`] sum type

mod config;
mod error;
mod types;

pub use config::{AssistantConfig, AttacheConfig, SessionConfig, StorageConfig, DEFAULT_CONFIG};
pub use error::AttacheError;
pub use types::{
    BloodGroup, BloodRequest, ContactMessage, DonorProfile, Record, RecordKind, RequestStatus,
    StockEntry, Urgency,
};

/// A convenience `Result` type for attache operations.
pub type Result<T> = std::result::Result<T, AttacheError>;
