//! C ABI exports.
//!
//! Every string handed back to the host is a heap C string owned by the
//! caller, released with [`plugin_free_mem`]. Extraction results cut at the
//! first interior NUL, as a C consumer would read them. Null input pointers
//! are never dereferenced, and no panic unwinds across the boundary.

use std::ffi::{CStr, CString, c_char, c_void};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::ptr;

use tracing::{info, warn};

use crate::info as meta;
use crate::state::PluginState;

fn into_c_string(s: &str) -> *mut c_char {
    let visible = s.split('\0').next().unwrap_or_default();
    CString::new(visible).map_or(ptr::null_mut(), CString::into_raw)
}

/// Borrow a C string as UTF-8. Null or non-UTF-8 input yields `None`.
///
/// # Safety
/// `p` must be null or point to a NUL-terminated string that outlives `'a`.
unsafe fn borrow_str<'a>(p: *const c_char) -> Option<&'a str> {
    if p.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated per the caller contract.
    unsafe { CStr::from_ptr(p) }.to_str().ok()
}

/// # Safety
/// `data` must be null or valid for `len` bytes for the lifetime `'a`.
unsafe fn borrow_bytes<'a>(data: *const u8, len: u32) -> &'a [u8] {
    if data.is_null() || len == 0 {
        return &[];
    }
    // SAFETY: non-null and valid for `len` bytes per the caller contract.
    unsafe { std::slice::from_raw_parts(data, len as usize) }
}

/// # Safety
/// `handle` must be null or a live pointer returned by [`plugin_init`].
unsafe fn state_mut<'a>(handle: *mut c_void) -> Option<&'a mut PluginState> {
    // SAFETY: the host passes back the pointer produced by `plugin_init`,
    // and drives each handle from one thread at a time.
    unsafe { handle.cast::<PluginState>().as_mut() }
}

// ── Metadata ─────────────────────────────────────────────────────────────

#[unsafe(no_mangle)]
pub extern "C" fn plugin_get_required_api_version() -> *mut c_char {
    into_c_string(meta::REQUIRED_API_VERSION)
}

#[unsafe(no_mangle)]
pub extern "C" fn plugin_get_type() -> u32 {
    meta::TYPE_EXTRACTOR_PLUGIN
}

#[unsafe(no_mangle)]
pub extern "C" fn plugin_get_name() -> *mut c_char {
    into_c_string(meta::NAME)
}

#[unsafe(no_mangle)]
pub extern "C" fn plugin_get_description() -> *mut c_char {
    into_c_string(meta::DESCRIPTION)
}

#[unsafe(no_mangle)]
pub extern "C" fn plugin_get_contact() -> *mut c_char {
    into_c_string(meta::CONTACT)
}

#[unsafe(no_mangle)]
pub extern "C" fn plugin_get_version() -> *mut c_char {
    into_c_string(meta::VERSION)
}

#[unsafe(no_mangle)]
pub extern "C" fn plugin_get_fields() -> *mut c_char {
    match evtjson_core::fields_json() {
        Ok(json) => into_c_string(&json),
        Err(err) => {
            warn!("cannot serialize field list: {err}");
            ptr::null_mut()
        }
    }
}

// ── Lifecycle ────────────────────────────────────────────────────────────

/// Create a session. On failure `*rc` is set to a non-zero code and null is returned.
///
/// # Safety
/// `config` must be null or a NUL-terminated string; `rc` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn plugin_init(config: *const c_char, rc: *mut i32) -> *mut c_void {
    // SAFETY: forwarded caller contract.
    let config = unsafe { borrow_str(config) }.unwrap_or_default();
    let result = catch_unwind(|| PluginState::from_init_string(config));

    let (handle, code) = match result {
        Ok(Ok(state)) => (Box::into_raw(Box::new(state)).cast::<c_void>(), meta::SUCCESS),
        Ok(Err(err)) => {
            warn!("plugin_init rejected config: {err}");
            (ptr::null_mut(), meta::FAILURE)
        }
        Err(_) => (ptr::null_mut(), meta::FAILURE),
    };

    // SAFETY: `rc` is null or writable per the caller contract.
    if let Some(rc) = unsafe { rc.as_mut() } {
        *rc = code;
    }
    handle
}

/// # Safety
/// `handle` must be null or a pointer from [`plugin_init`] not yet destroyed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn plugin_destroy(handle: *mut c_void) {
    if handle.is_null() {
        return;
    }
    info!("[{}] plugin_destroy", meta::NAME);
    // SAFETY: produced by `Box::into_raw` in `plugin_init` and destroyed once.
    drop(unsafe { Box::from_raw(handle.cast::<PluginState>()) });
}

/// # Safety
/// `handle` must be null or a live pointer from [`plugin_init`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn plugin_get_last_error(handle: *mut c_void) -> *mut c_char {
    // SAFETY: forwarded caller contract.
    match unsafe { state_mut(handle) } {
        Some(state) => into_c_string(&state.last_error()),
        None => into_c_string(evtjson_core::NO_ERROR),
    }
}

// ── Extraction ───────────────────────────────────────────────────────────

/// Extract a string field. Returns null when the field is absent.
///
/// # Safety
/// `handle` must be a live pointer from [`plugin_init`]; `field` and `arg`
/// must be null or NUL-terminated; `data` must be null or valid for `datalen` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn plugin_extract_str(
    handle: *mut c_void,
    evtnum: u64,
    field: *const c_char,
    arg: *const c_char,
    data: *const u8,
    datalen: u32,
) -> *mut c_char {
    // SAFETY: forwarded caller contract for every pointer below.
    let (Some(state), Some(field)) = (unsafe { state_mut(handle) }, unsafe { borrow_str(field) }) else {
        return ptr::null_mut();
    };
    let arg = unsafe { borrow_str(arg) };
    let data = unsafe { borrow_bytes(data, datalen) };

    match catch_unwind(AssertUnwindSafe(|| state.extract_str(evtnum, field, arg, data))) {
        Ok(Some(value)) => into_c_string(&value),
        Ok(None) => ptr::null_mut(),
        Err(_) => {
            warn!(evtnum, field, "extraction panicked");
            ptr::null_mut()
        }
    }
}

/// There are no numeric fields: always returns 0 with `*field_present = 0`.
///
/// # Safety
/// Same contract as [`plugin_extract_str`]; `field_present` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn plugin_extract_u64(
    handle: *mut c_void,
    evtnum: u64,
    field: *const c_char,
    arg: *const c_char,
    data: *const u8,
    datalen: u32,
    field_present: *mut u32,
) -> u64 {
    // SAFETY: forwarded caller contract for every pointer below.
    let value = match (unsafe { state_mut(handle) }, unsafe { borrow_str(field) }) {
        (Some(state), Some(field)) => {
            let arg = unsafe { borrow_str(arg) };
            let data = unsafe { borrow_bytes(data, datalen) };
            state.extract_u64(evtnum, field, arg, data)
        }
        _ => None,
    };

    if let Some(present) = unsafe { field_present.as_mut() } {
        *present = u32::from(value.is_some());
    }
    value.unwrap_or(0)
}

/// Release a string previously returned by this plugin.
///
/// # Safety
/// `ptr` must be null or a pointer returned by one of this plugin's exports,
/// freed at most once.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn plugin_free_mem(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }
    // SAFETY: produced by `CString::into_raw` in `into_c_string`.
    drop(unsafe { CString::from_raw(ptr) });
}
