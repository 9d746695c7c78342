//! Filesystem-backed hierarchical document store.
//!
//! Arbitrary nested objects, lists, scalars, and long strings are
//! serialized into a directory tree of small YAML documents, addressable
//! and mutable through a compact dot/bracket path language. The store
//! behaves like an embedded, schema-less database whose storage engine
//! *is* the filesystem.
//!
//! # On-Disk Layout
//!
//! - Object element `X`: directory `X/` containing `_this.yaml`
//! - List element `X`: file `X.yaml` (positional sequence, keys stripped)
//! - List metadata: sidecar `.X.yaml` holding `idCounter: <n>`
//! - Reference token: the scalar `((payload))`, payload relative to the
//!   document's directory
//! - Complex string (a string with a line break): plain-text sibling
//!   file, byte-for-byte
//!
//! # Operations
//!
//! - [`load`] — hydrate an addressed element into memory, to a depth bound
//! - [`store`] — serialize an element into an empty working directory
//! - [`delete_element`] — remove an addressed element and its artifacts
//! - [`clear`] — reset an addressed element to its empty default
//!
//! All four return the uniform [`YdsResult`]: recoverable, expected
//! conditions (bad path grammar, unknown property, illegal name,
//! non-empty target) surface as `success == false` with a descriptive
//! message; unexpected filesystem or codec failures propagate as
//! [`StoreError`].
//!
//! # Design Rules
//!
//! 1. Nothing is cached: every operation re-reads or re-writes from
//!    scratch.
//! 2. Single-threaded, blocking I/O, no locks. Concurrent external
//!    mutation of the tree during an operation is undefined behavior.
//! 3. delete/clear are not transactional: artifact removal happens before
//!    the parent rewrite, and a crash between the two leaves the tree
//!    inconsistent.
//! 4. Object key order is insertion order, list order is positional, and
//!    both round-trip exactly through store → load.

pub mod clear;
pub mod delete;
pub mod error;
pub mod load;
pub mod naming;
pub mod resolve;
pub mod result;
pub mod store;

pub use clear::clear;
pub use delete::delete_element;
pub use error::{OpError, StoreError, StoreResult};
pub use load::load;
pub use resolve::{resolve, Resolution};
pub use result::YdsResult;
pub use store::{store, store_yaml};

pub use yds_types::Element;
