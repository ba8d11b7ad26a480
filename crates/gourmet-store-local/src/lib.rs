//! File-backed storage for the gourmet place directory.
//!
//! [`JsonFileStore`] persists the whole collection as one pretty-printed
//! JSON array and serializes every read-modify-persist span behind a
//! process-local mutex.

mod file;

pub use file::JsonFileStore;
