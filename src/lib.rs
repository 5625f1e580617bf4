//! Health-support resource directory: dataset loading, facet indexing and
//! filtering, shared by the desktop browser and the command-line tool.
//!
//! Nothing in this library touches the UI; the `care-directory` binary
//! renders what these functions return.

pub mod cli;
pub mod config;
pub mod data;
pub mod debounce;
pub mod error;
pub mod nav;
pub mod suggest;
