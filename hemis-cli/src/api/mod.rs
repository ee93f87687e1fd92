//! Registry API surface: endpoint routing and the HTTP record store

pub mod client;
pub mod operations;

pub use client::{RecordStore, RegistryClient};
pub use operations::{CreateOutcome, RecordType};
