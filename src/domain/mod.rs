//! Domain layer: trees, forests and the delimited record format
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).
//! Randomness is always supplied by the caller.

pub mod entities;
pub mod error;
pub mod forest;
pub mod records;

pub use entities::{Species, Tree};
pub use error::{DomainError, DomainResult};
pub use forest::{Forest, Reaping};
pub use records::{parse_record, parse_records, FIELD_SEPARATOR};
