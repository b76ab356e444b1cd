//! End-to-end extraction tests against the public `evtjson-core` API.
//!
//! These drive an [`Extractor`] the way a host does: one call per field
//! request, with event ids deciding when the payload is parsed again.

use std::cell::Cell;
use std::rc::Rc;

use evtjson_core::{
    DocumentParser, ExtractError, ExtractionResult, Extractor, NO_ERROR, SerdeParser,
};
use serde_json::Value;

// ── Instrumented parser ──────────────────────────────────────────────────

/// Counts parses through a shared cell so the test keeps a handle after
/// the parser moves into the extractor.
struct CountingParser {
    calls: Rc<Cell<usize>>,
}

impl DocumentParser for CountingParser {
    fn parse(&mut self, raw: &[u8]) -> Result<Value, ExtractError> {
        self.calls.set(self.calls.get() + 1);
        SerdeParser.parse(raw)
    }
}

fn counting_extractor() -> (Extractor<CountingParser>, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let ex = Extractor::with_parser(CountingParser {
        calls: Rc::clone(&calls),
    });
    (ex, calls)
}

fn present(text: &str) -> ExtractionResult {
    ExtractionResult::Present(text.into())
}

const FIELDS: [&str; 4] = ["json.value", "jevt.value", "json.obj", "jevt.obj"];

// ── Sniff ────────────────────────────────────────────────────────────────

#[test]
fn non_json_payloads_are_always_absent() {
    let (mut ex, calls) = counting_extractor();
    let payloads: [&[u8]; 6] = [b"hello", b" {\"a\":\"b\"}", b"\"a\"", b"1", b"null", b"\x00\x01"];

    for (evt, raw) in payloads.iter().enumerate() {
        for field in FIELDS {
            assert_eq!(
                ex.extract_str(evt as u64, field, Some("a"), raw),
                ExtractionResult::Absent,
                "field {field} on {raw:?}"
            );
        }
    }
    assert_eq!(calls.get(), 0);
}

#[test]
fn empty_payload_is_absent() {
    let mut ex = Extractor::new();
    assert_eq!(ex.extract_str(1, "json.value", Some("a"), b""), ExtractionResult::Absent);
    assert_eq!(ex.extract_str(1, "json.obj", None, b""), ExtractionResult::Absent);
}

// ── Value lookup ─────────────────────────────────────────────────────────

#[test]
fn nested_object_lookup() {
    let mut ex = Extractor::new();
    let raw = br#"{"a":{"b":"c"}}"#;

    assert_eq!(ex.extract_str(1, "json.value", Some("a/b"), raw), present("c"));
    assert_eq!(ex.extract_str(1, "json.value", Some("/a/b"), raw), present("c"));
    assert_eq!(ex.extract_str(1, "json.value", Some("a/x"), raw), ExtractionResult::Absent);
    assert_eq!(ex.extract_str(1, "json.value", Some("a"), raw), ExtractionResult::Absent);
}

#[test]
fn legacy_alias_behaves_identically() {
    let mut ex = Extractor::new();
    let raw = br#"{"user":{"name":"root","uid":0}}"#;

    for arg in ["user/name", "/user/name", "user/uid", "user", "nope"] {
        let current = ex.extract_str(1, "json.value", Some(arg), raw);
        let legacy = ex.extract_str(1, "jevt.value", Some(arg), raw);
        assert_eq!(current, legacy, "arg {arg}");
    }
}

#[test]
fn array_root_is_not_indexable() {
    let mut ex = Extractor::new();
    assert_eq!(ex.extract_str(1, "json.value", Some("0"), b"[1,2,3]"), ExtractionResult::Absent);
    assert_eq!(ex.last_error(), NO_ERROR);
}

#[test]
fn escaped_strings_are_unescaped() {
    let mut ex = Extractor::new();
    let raw = br#"{"msg":"line\nbreak \"quoted\" \u00e9"}"#;
    assert_eq!(
        ex.extract_str(1, "json.value", Some("msg"), raw),
        present("line\nbreak \"quoted\" \u{e9}")
    );
}

// ── Cache behavior ───────────────────────────────────────────────────────

#[test]
fn same_event_parses_at_most_once() {
    let (mut ex, calls) = counting_extractor();

    ex.extract_str(10, "json.value", Some("a"), br#"{"a":"first"}"#);
    let second = ex.extract_str(10, "json.value", Some("a"), br#"{"a":"second"}"#);

    assert_eq!(calls.get(), 1);
    assert_eq!(second, present("first"));
}

#[test]
fn different_event_reparses_identical_bytes() {
    let (mut ex, calls) = counting_extractor();
    let raw = br#"{"a":"same"}"#;

    ex.extract_str(1, "json.value", Some("a"), raw);
    ex.extract_str(2, "json.value", Some("a"), raw);

    assert_eq!(calls.get(), 2);
}

#[test]
fn object_rendering_reflects_current_bytes_not_cache() {
    let (mut ex, calls) = counting_extractor();

    ex.extract_str(3, "json.value", Some("a"), br#"{"a":"cached"}"#);
    let rendered = ex.extract_str(3, "json.obj", None, br#"{"a":"fresh"}"#);

    assert_eq!(rendered, present("{\n  \"a\": \"fresh\"\n}"));
    assert_eq!(calls.get(), 1);
}

#[test]
fn failed_parse_does_not_evict_cached_event() {
    let (mut ex, calls) = counting_extractor();

    ex.extract_str(1, "json.value", Some("k"), br#"{"k":"v"}"#);
    assert_eq!(ex.extract_str(2, "json.value", Some("k"), br#"{"k":"#), ExtractionResult::Absent);
    assert_eq!(ex.cache().event_id(), Some(1));

    // Event 1 is still served from the cache.
    assert_eq!(ex.extract_str(1, "json.value", Some("k"), b"{garbage"), present("v"));
    assert_eq!(calls.get(), 2);
}

// ── Diagnostics ──────────────────────────────────────────────────────────

#[test]
fn malformed_payload_reports_failure() {
    let mut ex = Extractor::new();
    assert_eq!(ex.last_error(), NO_ERROR);

    assert_eq!(ex.extract_str(1, "json.value", Some("a"), br#"{"a":"#), ExtractionResult::Absent);
    let message = ex.last_error();
    assert_ne!(message, NO_ERROR);
    assert!(!message.is_empty());
}

#[test]
fn last_error_survives_later_success() {
    let mut ex = Extractor::new();
    ex.extract_str(1, "json.value", Some("a"), b"[1,");
    let failure = ex.last_error();

    assert_eq!(ex.extract_str(2, "json.value", Some("a"), br#"{"a":"ok"}"#), present("ok"));
    assert_eq!(ex.last_error(), failure);
}

// ── Whole-object rendering ───────────────────────────────────────────────

#[test]
fn rendered_object_round_trips() {
    let docs: [&[u8]; 6] = [
        br#"{"a":{"b":"c"}}"#,
        br#"[1,2,3]"#,
        br#"{"n":null,"t":true,"f":false,"x":-1.25e-3}"#,
        br#"{"nested":[{"k":[]},{"k":{}}],"s":"A\n"}"#,
        br#"[]"#,
        br#"{"z":"last","a":"first"}"#,
    ];

    let mut ex = Extractor::new();
    for (evt, raw) in docs.iter().enumerate() {
        for field in ["json.obj", "jevt.obj"] {
            let rendered = ex
                .extract_str(evt as u64, field, None, raw)
                .into_option()
                .unwrap_or_else(|| panic!("{field} absent for {raw:?}"));
            let original: Value = serde_json::from_slice(raw).unwrap();
            let reparsed: Value = serde_json::from_str(&rendered).unwrap();
            assert_eq!(original, reparsed);
        }
    }
}

#[test]
fn malformed_object_is_absent() {
    let mut ex = Extractor::new();
    assert_eq!(ex.extract_str(1, "json.obj", None, b"{\"a\":1,}"), ExtractionResult::Absent);
    assert_ne!(ex.last_error(), NO_ERROR);
}
