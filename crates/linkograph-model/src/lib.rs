//! Linkograph data model
//!
//! Shared types for the cross-domain link integrity tooling:
//! - `domain`: the fixed domain set and per-domain canonical path templates
//! - `entity`: raw (untrusted) entity records as found in domain files
//! - `edge`: the typed edge record produced by relationship extraction
//! - `relmap`: the forward↔reverse relationship-type map
//!
//! Everything here is deliberately passive: no IO, no traversal, no
//! validation logic. Loading lives in `linkograph-ingest`; the validators
//! live in `linkograph-validate`.

pub mod domain;
pub mod edge;
pub mod entity;
pub mod relmap;

pub use domain::{Domain, PathTemplate, PathTemplateRegistry, UnknownDomainError};
pub use edge::ExtractedEdge;
pub use entity::{DomainRecords, RawEntity};
pub use relmap::RelationshipMap;
