use std::io::Read;

use gotrace_core::{Event, Result};
use gotrace_parser::Parser;
use tracing::debug;

use crate::metrics::Metrics;

/// Folds a decoded trace stream into [`Metrics`].
pub struct Analyzer {
    limit: Option<u64>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self { limit: None }
    }

    /// Stop after `limit` events instead of reading to the end of the stream.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Decode events from `parser` until the stream ends, the limit is hit,
    /// or a decode error occurs.
    pub fn analyze<R: Read>(&self, parser: &mut Parser<R>) -> Result<Metrics> {
        let mut metrics = Metrics::default();
        let mut event = Event::new();

        while self.limit.map_or(true, |limit| metrics.total_events < limit) {
            if !parser.parse(&mut event)? {
                break;
            }
            metrics.record(&event);
        }
        metrics.stream_bytes = parser.offset();

        debug!(
            events = metrics.total_events,
            bytes = metrics.stream_bytes,
            "trace analyzed"
        );
        Ok(metrics)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gotrace_core::{Error, EventType};
    use gotrace_parser::HEADER;

    fn trace() -> Vec<u8> {
        let mut data = HEADER.to_vec();
        data.extend_from_slice(&[(1 << 6) | EventType::BATCH.as_u8(), 0, 100]);
        data.extend_from_slice(&[EventType::STRING.as_u8(), 1, 2, b'h', b'i']);
        data.extend_from_slice(&[EventType::GO_END.as_u8(), 3]);
        data.extend_from_slice(&[EventType::GO_END.as_u8(), 4]);
        data
    }

    #[test]
    fn test_analyze_whole_stream() {
        let data = trace();
        let mut parser = Parser::new(data.as_slice()).unwrap();
        let metrics = Analyzer::new().analyze(&mut parser).unwrap();

        assert_eq!(metrics.total_events, 4);
        assert_eq!(metrics.total_args, 5);
        assert_eq!(metrics.payload_bytes, 2);
        assert_eq!(metrics.stream_bytes, data.len() as u64);
        assert_eq!(metrics.by_type[&EventType::GO_END].count, 2);
    }

    #[test]
    fn test_analyze_with_limit() {
        let data = trace();
        let mut parser = Parser::new(data.as_slice()).unwrap();
        let metrics = Analyzer::new().with_limit(2).analyze(&mut parser).unwrap();

        assert_eq!(metrics.total_events, 2);
        assert!(!metrics.by_type.contains_key(&EventType::GO_END));
    }

    #[test]
    fn test_analyze_propagates_decode_error() {
        let mut data = trace();
        data.extend_from_slice(&[EventType::STRING.as_u8(), 2, 9, b'x']);
        let mut parser = Parser::new(data.as_slice()).unwrap();
        let err = Analyzer::new().analyze(&mut parser).unwrap_err();
        assert!(matches!(err, Error::Truncated { .. }));
    }
}
