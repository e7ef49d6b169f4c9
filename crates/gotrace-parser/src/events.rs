//! Iterator adapter over a [`Parser`].

use std::io::Read;
use std::iter::FusedIterator;

use gotrace_core::{Event, Result};

use crate::parser::Parser;

/// Iterator yielding owned events from a [`Parser`].
///
/// Ends after a clean end of stream, or right after yielding the first error.
pub struct Events<'p, R> {
    parser: &'p mut Parser<R>,
    done: bool,
}

impl<'p, R: Read> Events<'p, R> {
    pub(crate) fn new(parser: &'p mut Parser<R>) -> Self {
        let done = parser.is_failed();
        Self { parser, done }
    }
}

impl<R: Read> Iterator for Events<'_, R> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut event = Event::new();
        match self.parser.parse(&mut event) {
            Ok(true) => Some(Ok(event)),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> FusedIterator for Events<'_, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::HEADER;
    use gotrace_core::{Error, EventType};

    #[test]
    fn test_collects_all_events() {
        let mut data = HEADER.to_vec();
        data.extend_from_slice(&[EventType::PROC_STOP.as_u8(), 7]);
        data.extend_from_slice(&[(1 << 6) | EventType::PROC_START.as_u8(), 8, 2]);

        let mut parser = Parser::new(data.as_slice()).unwrap();
        let events: Vec<Event> = parser.events().collect::<Result<_>>().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].ty, EventType::PROC_STOP);
        assert_eq!(events[1].args, vec![8, 2]);
    }

    #[test]
    fn test_fuses_after_error() {
        let mut data = HEADER.to_vec();
        data.extend_from_slice(&[EventType::GO_END.as_u8(), 1]);
        data.extend_from_slice(&[(2 << 6) | EventType::GC_START.as_u8(), 1]);

        let mut parser = Parser::new(data.as_slice()).unwrap();
        let mut events = parser.events();
        assert!(events.next().unwrap().is_ok());
        assert!(matches!(events.next(), Some(Err(Error::Truncated { .. }))));
        assert!(events.next().is_none());
        assert!(events.next().is_none());
        drop(events);

        assert!(parser.is_failed());
        assert!(parser.events().next().is_none());
    }

    #[test]
    fn test_for_loop_over_parser() {
        let mut data = HEADER.to_vec();
        data.extend_from_slice(&[EventType::GC_DONE.as_u8(), 5]);

        let mut parser = Parser::new(data.as_slice()).unwrap();
        let mut count = 0;
        for event in &mut parser {
            assert_eq!(event.unwrap().ty, EventType::GC_DONE);
            count += 1;
        }
        assert_eq!(count, 1);
    }
}
