//! Product configuration orchestration.
//!
//! This crate drives the product configuration page: seven tabs (rates,
//! fees, limits, periods, penalties, eligibility rules, GL mappings), each
//! with a table view and at most one open form, and a write path of
//! validate, project, submit, refetch:
//!
//! - [`FormState`] - per-kind `Viewing` / `Adding` / `Editing` state; two
//!   open forms for one kind are unrepresentable
//! - [`TabKind`] - binds each row spec to its tab, rows, projection, and
//!   submit-time rules
//! - [`ProductConsole`] - the page: load, open/cancel forms, submit,
//!   two-step delete, reference catalog refresh
//! - [`ConfigApi`] - the seam to the network client, faked in tests
//!
//! Mutations never merge optimistically: every successful write refetches
//! the full row set so server-computed fields cannot drift. Failed
//! submissions keep the form open with the entered values intact and the
//! server's message shown verbatim.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod console;
pub mod form;
pub mod kinds;

pub use console::{ConfigApi, ConsoleError, ProductConsole};
pub use form::{FormState, TabState};
pub use kinds::{TabKind, Tabs, ValidationContext};
