//! Foundation types for YDS, the YAML document store.
//!
//! This crate provides the pure, filesystem-free leaves that the storage
//! engine (`yds-store`) is built on. Nothing here performs I/O.
//!
//! # Key Pieces
//!
//! - [`Element`] — the universal in-memory value (object, list, scalar, or
//!   complex string), backed by `serde_yaml::Value`
//! - [`reference_payload`] — the reference-token grammar (`((payload))`)
//! - [`path`] — element-path segmentation and parent/child splitting
//! - [`keyname`] — the key name ↔ file name bijection
//! - [`IdGenerator`] — deterministic short-identifier stream for naming
//!   list-item artifacts

pub mod element;
pub mod idgen;
pub mod keyname;
pub mod path;

pub use element::{
    is_complex_string, is_inline, key_string, reference_payload, reference_token, Element,
};
pub use idgen::{is_generated_id, IdGenerator, ID_LEN};
pub use path::{parse_segments, split_parent};
