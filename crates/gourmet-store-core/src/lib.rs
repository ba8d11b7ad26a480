//! Core types and traits for the gourmet place directory.
//!
//! This crate defines the abstractions shared between storage backends and
//! the HTTP frontend:
//! - `Place`, `NewPlace`, `MenuItem`: the record model
//! - `PlaceStore`: serialized CRUD access to the place collection
//! - `StoreError`: the error taxonomy surfaced to adapters

mod error;
mod store;
mod types;

pub use error::StoreError;
pub use store::{MenuQuery, PlaceStore};
pub use types::{MenuItem, NewPlace, Place};
