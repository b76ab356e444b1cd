//! Document cache: single-slot memoization of the last parsed payload.
//!
//! A host typically asks for several fields of the same event in a row. The
//! cache keeps the most recently parsed document together with the event
//! identifier it came from, and only parses again when the identifier changes.
//!
//! The cache has two states: empty (before the first successful parse) and
//! holding one event. A failed parse never clears or replaces the record.

use serde_json::Value;
use tracing::debug;

use crate::error::ExtractError;

/// Turns a raw payload into a document tree.
///
/// This is the seam where tests plug in an instrumented parser.
pub trait DocumentParser {
    fn parse(&mut self, raw: &[u8]) -> Result<Value, ExtractError>;
}

/// The production parser, backed by `serde_json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerdeParser;

impl DocumentParser for SerdeParser {
    fn parse(&mut self, raw: &[u8]) -> Result<Value, ExtractError> {
        Ok(serde_json::from_slice(raw)?)
    }
}

/// A parsed document and the event it was derived from.
#[derive(Debug, Clone)]
pub struct CacheRecord {
    pub event_id: u64,
    pub document: Value,
}

/// One-entry cache keyed by event identifier.
#[derive(Debug, Default)]
pub struct DocumentCache<P = SerdeParser> {
    parser: P,
    record: Option<CacheRecord>,
}

impl DocumentCache<SerdeParser> {
    pub fn new() -> Self {
        Self::with_parser(SerdeParser)
    }
}

impl<P: DocumentParser> DocumentCache<P> {
    pub fn with_parser(parser: P) -> Self {
        Self {
            parser,
            record: None,
        }
    }

    /// Return the document for `event_id`, parsing `raw` only on a cache miss.
    ///
    /// On a hit `raw` is not looked at. On a parse failure the previous record
    /// is kept and the error is returned.
    pub fn ensure_parsed(&mut self, event_id: u64, raw: &[u8]) -> Result<&Value, ExtractError> {
        let record = match self.record.take() {
            Some(record) if record.event_id == event_id => record,
            previous => match self.parser.parse(raw) {
                Ok(document) => {
                    debug!(event_id, bytes = raw.len(), "parsed new event payload");
                    CacheRecord { event_id, document }
                }
                Err(err) => {
                    debug!(event_id, error = %err, "event payload did not parse");
                    self.record = previous;
                    return Err(err);
                }
            },
        };
        Ok(&self.record.insert(record).document)
    }

    /// The event identifier currently held, if any.
    pub fn event_id(&self) -> Option<u64> {
        self.record.as_ref().map(|r| r.event_id)
    }

    pub fn document(&self) -> Option<&Value> {
        self.record.as_ref().map(|r| &r.document)
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }
}
