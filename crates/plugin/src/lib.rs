//! # evtjson Plugin
//!
//! Wraps the `evtjson-core` extraction engine in the host's C plugin ABI.
//!
//! The host loads the shared library, calls [`ffi::plugin_init`] once per
//! session to get an opaque handle, asks for the field list once, and then
//! calls [`ffi::plugin_extract_str`] for every field of every event. All
//! extraction logic lives in the core crate; this crate only marshals
//! pointers, owns the per-session [`PluginState`], and sets up logging.

pub mod ffi;
pub mod info;
pub mod state;

pub use info::{PluginInfo, info};
pub use state::PluginState;
