//! forestry: simulate a forest of trees
//!
//! A forest is a named, ordered collection of trees. Forests are imported from
//! delimited text, grown year by year, reaped when trees get too tall, and
//! persisted as whole-forest snapshots.
//!
//! # Layers
//!
//! - [`domain`]: trees, forests and the delimited record format (no I/O)
//! - [`application`]: load/save services and the snapshot codec
//! - [`infrastructure`]: filesystem boundary and service wiring
//! - [`config`]: layered settings
//! - [`cli`]: argument parsing, command dispatch, terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
