//! Command implementations for the gotrace CLI.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use gotrace_analysis::{Analyzer, Report};
use gotrace_core::{catalog as event_catalog, Event, PayloadShape};
use gotrace_parser::Parser;
use serde::Serialize;
use tracing::debug;

use crate::OutputFormat;

/// Open a trace file, treating `-` as stdin.
fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdin()));
    }
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(Box::new(file))
}

/// Open a trace and validate its header.
fn open_parser(path: &Path) -> Result<Parser<Box<dyn Read>>> {
    let input = open_input(path)?;
    let parser = Parser::new(input)
        .with_context(|| format!("{} is not a supported trace", path.display()))?;
    debug!(path = %path.display(), "opened trace");
    Ok(parser)
}

/// One dumped event in JSON output.
#[derive(Serialize)]
struct DumpRecord<'a> {
    index: u64,
    offset: u64,
    ty: u8,
    name: String,
    args: &'a [u64],
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<String>,
}

/// Dump command: print every decoded event.
pub fn dump(path: &Path, format: OutputFormat, limit: Option<u64>) -> Result<()> {
    let mut parser = open_parser(path)?;
    let mut out = BufWriter::new(io::stdout().lock());
    let mut event = Event::new();
    let mut index = 0u64;

    while limit.map_or(true, |limit| index < limit) {
        let offset = parser.offset();
        let more = parser
            .parse(&mut event)
            .with_context(|| format!("Failed to decode event #{} in {}", index, path.display()))?;
        if !more {
            break;
        }

        match format {
            OutputFormat::Text => write_text(&mut out, index, offset, &event)?,
            OutputFormat::Json => {
                let record = DumpRecord {
                    index,
                    offset,
                    ty: event.ty.as_u8(),
                    name: event.ty.to_string(),
                    args: &event.args,
                    payload: (!event.payload.is_empty()).then(|| event.payload_str().into_owned()),
                };
                serde_json::to_writer(&mut out, &record).context("Failed to serialize event")?;
                writeln!(out)?;
            }
        }
        index += 1;
    }

    out.flush()?;
    Ok(())
}

fn write_text<W: Write>(out: &mut W, index: u64, offset: u64, event: &Event) -> io::Result<()> {
    write!(out, "{:>8} @{:<10} {:<18}", index, offset, event.ty.to_string())?;
    for (name, value) in event.named_args() {
        match name {
            Some(name) => write!(out, " {}={}", name, value)?,
            None => write!(out, " {}", value)?,
        }
    }
    if !event.payload.is_empty() {
        write!(out, " {:?}", event.payload_str())?;
    }
    writeln!(out)
}

/// Stats command: summarize event counts per type.
pub fn stats(path: &Path, json: bool, limit: Option<u64>) -> Result<()> {
    let mut parser = open_parser(path)?;

    let mut analyzer = Analyzer::new();
    if let Some(limit) = limit {
        analyzer = analyzer.with_limit(limit);
    }
    let metrics = analyzer
        .analyze(&mut parser)
        .with_context(|| format!("Failed to analyze {}", path.display()))?;

    let report = Report::new(metrics);
    if json {
        println!("{}", report.to_json().context("Failed to serialize report")?);
    } else {
        println!("Trace: {}", path.display());
        println!();
        print!("{}", report.to_text());
    }
    Ok(())
}

/// Catalog command: list the known event types.
pub fn catalog() -> Result<()> {
    println!("Event types: {}", event_catalog().len());
    println!();

    for info in event_catalog() {
        let mut args = info.args.join(", ");
        if info.variadic {
            args.push_str(", ...");
        }
        println!("  {:>2} {} [{}]", info.ty.as_u8(), info.name, args);
        println!("     {}", info.description);
        match info.payload {
            PayloadShape::None => {}
            PayloadShape::DictionaryString => println!("     Payload: dictionary string"),
            PayloadShape::UserLogValue => println!("     Payload: log value"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gotrace_core::EventType;
    use gotrace_parser::HEADER;

    fn write_temp(name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("gotrace-{}-{}", std::process::id(), name));
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_open_parser_reads_file() {
        let mut bytes = HEADER.to_vec();
        bytes.extend_from_slice(&[EventType::GO_END.as_u8(), 0x09]);
        let path = write_temp("valid.trace", &bytes);

        let mut parser = open_parser(&path).unwrap();
        assert_eq!(parser.offset(), 16);
        let mut event = Event::new();
        assert!(parser.parse(&mut event).unwrap());
        assert_eq!(event.ty, EventType::GO_END);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_open_parser_names_bad_file() {
        let path = write_temp("bad.trace", b"go 1.18 trace\0\0\0");
        let err = open_parser(&path).err().unwrap();
        assert!(format!("{:#}", err).contains("is not a supported trace"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_text_names_args() {
        let event = Event {
            ty: EventType::GO_START,
            args: vec![100, 7, 1],
            payload: vec![],
        };
        let mut out = Vec::new();
        write_text(&mut out, 3, 40, &event).unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.contains("GoStart"));
        assert!(line.contains("timestamp=100 goroutine_id=7 seq=1"));
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn test_write_text_shows_payload() {
        let event = Event {
            ty: EventType::STRING,
            args: vec![4],
            payload: b"runtime.main".to_vec(),
        };
        let mut out = Vec::new();
        write_text(&mut out, 0, 16, &event).unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.contains("string_id=4 \"runtime.main\""));
    }

    #[test]
    fn test_dump_record_skips_empty_payload() {
        let record = DumpRecord {
            index: 0,
            offset: 16,
            ty: 15,
            name: "GoEnd".to_string(),
            args: &[9],
            payload: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"index":0,"offset":16,"ty":15,"name":"GoEnd","args":[9]}"#);
    }
}
