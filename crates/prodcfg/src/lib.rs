//! Product configuration CLI tools.
//!
//! This crate provides command-line tools for working with bank product
//! configurations:
//!
//! - `prodcfg-check`: Validate a configuration snapshot file
//! - `prodcfg-fetch`: Pull reference data or a product's configuration
//!   from a live back-office API
//!
//! # Example Usage
//!
//! ```bash
//! prodcfg-check snapshot.json
//! prodcfg-check snapshot.json --as-of 2024-06-30 --format json
//! prodcfg-fetch --base-url http://localhost:8080 chart-of-accounts
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod snapshot;
