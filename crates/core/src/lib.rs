//! # evtjson Core
//!
//! Extraction engine for pulling named string fields out of event payloads
//! that are believed to be JSON. A host creates one [`Extractor`] per session
//! and calls it once per field request; several requests for the same event
//! share one parse through the single-slot [`DocumentCache`].
//!
//! ## Layout
//!
//! - [`path`] walks a parsed document along a `/`-separated key path
//! - [`cache`] remembers the last parsed document and its event id
//! - [`pretty`] re-renders a payload with two-space indentation
//! - [`extract`] dispatches field names to the behaviors above
//! - [`field`] declares the field catalog advertised to the host
//!
//! This crate does no I/O and has no FFI; the plugin crate wraps it.

pub mod cache;
pub mod error;
pub mod extract;
pub mod field;
pub mod path;
pub mod pretty;

// Re-export key types at crate root for ergonomics
pub use cache::{CacheRecord, DocumentCache, DocumentParser, SerdeParser};
pub use error::{Error, ExtractError, Result};
pub use extract::{ExtractionResult, Extractor, NO_ERROR, sniff};
pub use field::{FieldDescriptor, FieldKind, descriptors, fields_json};
