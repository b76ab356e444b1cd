//! Field dispatcher: the per-session extraction context.
//!
//! An [`Extractor`] is created once per host session and called once per
//! field request. It owns the single-slot [`DocumentCache`] and the last
//! parse failure. Every failure mode resolves to [`ExtractionResult::Absent`];
//! the host can poll [`Extractor::last_error`] for an explanation.

use tracing::trace;

use crate::cache::{DocumentCache, DocumentParser, SerdeParser};
use crate::error::ExtractError;
use crate::field::FieldKind;
use crate::path;
use crate::pretty;

/// Returned by [`Extractor::last_error`] when no parse has failed yet.
pub const NO_ERROR: &str = "no error";

/// Outcome of one field request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    Present(String),
    Absent,
}

impl ExtractionResult {
    pub fn is_present(&self) -> bool {
        matches!(self, ExtractionResult::Present(_))
    }

    pub fn into_option(self) -> Option<String> {
        match self {
            ExtractionResult::Present(text) => Some(text),
            ExtractionResult::Absent => None,
        }
    }
}

impl From<Option<String>> for ExtractionResult {
    fn from(value: Option<String>) -> Self {
        value.map_or(ExtractionResult::Absent, ExtractionResult::Present)
    }
}

/// Cheap first-byte check for JSON containers.
pub fn sniff(raw: &[u8]) -> bool {
    matches!(raw.first(), Some(b'{' | b'['))
}

/// Session context: document cache plus last diagnostic.
#[derive(Debug, Default)]
pub struct Extractor<P = SerdeParser> {
    cache: DocumentCache<P>,
    last_error: Option<ExtractError>,
    max_payload: Option<usize>,
}

impl Extractor<SerdeParser> {
    pub fn new() -> Self {
        Self::with_parser(SerdeParser)
    }
}

impl<P: DocumentParser> Extractor<P> {
    pub fn with_parser(parser: P) -> Self {
        Self {
            cache: DocumentCache::with_parser(parser),
            last_error: None,
            max_payload: None,
        }
    }

    /// Treat payloads longer than `limit` bytes as absent without parsing them.
    pub fn with_max_payload(mut self, limit: Option<usize>) -> Self {
        self.max_payload = limit;
        self
    }

    /// Extract a string field from the payload of event `event_id`.
    pub fn extract_str(
        &mut self,
        event_id: u64,
        field: &str,
        arg: Option<&str>,
        raw: &[u8],
    ) -> ExtractionResult {
        trace!(event_id, field, arg, "extract_str");
        if !sniff(raw) {
            return ExtractionResult::Absent;
        }
        match self.try_extract(event_id, field, arg, raw) {
            Ok(text) => ExtractionResult::Present(text),
            Err(err) => {
                trace!(event_id, field, reason = %err, "field absent");
                if err.is_parse_failure() || matches!(err, ExtractError::PayloadTooLarge { .. }) {
                    self.last_error = Some(err);
                }
                ExtractionResult::Absent
            }
        }
    }

    /// There are no numeric fields; every request is absent.
    pub fn extract_u64(&mut self, event_id: u64, field: &str, _arg: Option<&str>, _raw: &[u8]) -> Option<u64> {
        trace!(event_id, field, "extract_u64: no numeric fields");
        None
    }

    /// Description of the most recent parse failure, or [`NO_ERROR`].
    pub fn last_error(&self) -> String {
        self.last_error
            .as_ref()
            .map_or_else(|| NO_ERROR.to_string(), |e| e.to_string())
    }

    pub fn cache(&self) -> &DocumentCache<P> {
        &self.cache
    }

    fn try_extract(
        &mut self,
        event_id: u64,
        field: &str,
        arg: Option<&str>,
        raw: &[u8],
    ) -> Result<String, ExtractError> {
        let kind = FieldKind::lookup(field).ok_or_else(|| ExtractError::UnknownField(field.into()))?;
        if let Some(limit) = self.max_payload {
            if raw.len() > limit {
                return Err(ExtractError::PayloadTooLarge { size: raw.len(), limit });
            }
        }

        match kind {
            FieldKind::Value => {
                let arg = arg
                    .filter(|a| !a.is_empty())
                    .ok_or_else(|| ExtractError::MalformedArgument(field.into()))?;
                let document = self.cache.ensure_parsed(event_id, raw)?;
                path::lookup(document, arg).map(str::to_owned)
            }
            FieldKind::Object => pretty::render(raw),
        }
    }
}
