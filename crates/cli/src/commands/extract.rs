//! `evtjson extract`: Run one field request against each payload line.
//!
//! Every input line is treated as a separate event, numbered from 1, so the
//! document cache parses each line once.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use evtjson_config::PluginConfig;
use evtjson_core::{DocumentParser, ExtractionResult, Extractor};
use tracing::{debug, info};

/// Printed for lines where the field is absent.
pub const ABSENT: &str = "<absent>";

pub fn run(
    config: &PluginConfig,
    field: &str,
    arg: Option<&str>,
    input: Option<&Path>,
    explain: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if evtjson_core::FieldKind::lookup(field).is_none() {
        tracing::warn!("{field} is not a known field; every line will be absent");
    }

    let mut extractor = Extractor::new().with_max_payload(config.max_payload_bytes);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let stats = match input {
        Some(path) => {
            let file = File::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
            extract_lines(&mut extractor, field, arg, explain, BufReader::new(file), &mut out)?
        }
        None => extract_lines(&mut extractor, field, arg, explain, io::stdin().lock(), &mut out)?,
    };

    info!(lines = stats.lines, present = stats.present, "extraction finished");
    Ok(())
}

/// Counters for one `extract` run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractStats {
    pub lines: u64,
    pub present: u64,
}

/// Extract `field` from every line of `reader`, writing one result line per input line.
pub fn extract_lines<P, R, W>(
    extractor: &mut Extractor<P>,
    field: &str,
    arg: Option<&str>,
    explain: bool,
    reader: R,
    out: &mut W,
) -> io::Result<ExtractStats>
where
    P: DocumentParser,
    R: BufRead,
    W: Write,
{
    let mut stats = ExtractStats::default();

    for line in reader.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        stats.lines += 1;
        let event_id = stats.lines;

        match extractor.extract_str(event_id, field, arg, &line) {
            ExtractionResult::Present(text) => {
                stats.present += 1;
                writeln!(out, "{text}")?;
            }
            ExtractionResult::Absent => {
                debug!(event_id, "field absent");
                if explain {
                    writeln!(out, "{ABSENT} ({})", extractor.last_error())?;
                } else {
                    writeln!(out, "{ABSENT}")?;
                }
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_on(input: &str, field: &str, arg: Option<&str>, explain: bool) -> (String, ExtractStats) {
        let mut extractor = Extractor::new();
        let mut out = Vec::new();
        let stats = extract_lines(&mut extractor, field, arg, explain, input.as_bytes(), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn one_result_per_line() {
        let input = "{\"u\":{\"name\":\"alice\"}}\nnot json\n{\"u\":{\"name\":\"bob\"}}\n";
        let (out, stats) = run_on(input, "json.value", Some("u/name"), false);
        assert_eq!(out, "alice\n<absent>\nbob\n");
        assert_eq!(stats, ExtractStats { lines: 3, present: 2 });
    }

    #[test]
    fn each_line_is_a_new_event() {
        let input = "{\"k\":\"1\"}\n{\"k\":\"2\"}";
        let (out, _) = run_on(input, "jevt.value", Some("/k"), false);
        assert_eq!(out, "1\n2\n");
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let (out, _) = run_on("{\"k\":\"v\"}\r\n", "json.value", Some("k"), false);
        assert_eq!(out, "v\n");
    }

    #[test]
    fn explain_appends_last_error() {
        let (out, stats) = run_on("{\"k\":\n", "json.value", Some("k"), true);
        assert!(out.starts_with("<absent> ("));
        assert!(!out.contains("no error"));
        assert_eq!(stats.present, 0);
    }

    #[test]
    fn object_field_renders_each_line() {
        let (out, _) = run_on("[1]\n", "json.obj", None, false);
        assert_eq!(out, "[\n  1\n]\n");
    }

    #[test]
    fn run_reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"k\":\"v\"}}").unwrap();
        let config = PluginConfig::default();
        assert!(run(&config, "json.value", Some("k"), Some(file.path()), false).is_ok());
    }

    #[test]
    fn run_reports_missing_file() {
        let config = PluginConfig::default();
        let err = run(&config, "json.value", Some("k"), Some(Path::new("/nonexistent/evts.jsonl")), false)
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/evts.jsonl"));
    }
}
