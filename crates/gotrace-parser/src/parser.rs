//! Event stream decoder.

use std::io::{self, BufReader, Read};

use gotrace_core::{Error, Event, EventType, Result};
use tracing::{debug, trace};

use crate::events::Events;
use crate::varint::read_uvarint;

/// Length of the stream header.
pub const HEADER_LEN: usize = 16;

/// Header of the only supported format version: `"go 1.19 trace"` padded with
/// zero bytes to 16 bytes.
pub const HEADER: [u8; HEADER_LEN] = *b"go 1.19 trace\0\0\0";

/// Default capacity of the read buffer wrapped around the source.
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Value of the 2-bit argument hint meaning "length-prefixed argument block".
const NARG_OUT_OF_LINE: u8 = 4;

/// Reader adapter counting consumed bytes.
struct Tracked<R> {
    inner: R,
    pos: u64,
}

impl<R: Read> Read for Tracked<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.pos += n as u64;
        Ok(n)
    }
}

/// Pull-based decoder for a binary execution trace.
///
/// The header is validated when the parser is created. Each call to
/// [`Parser::parse`] then decodes exactly one event record.
///
/// # Example
///
/// ```no_run
/// use gotrace_core::Event;
/// use gotrace_parser::Parser;
///
/// let file = std::fs::File::open("trace.out")?;
/// let mut parser = Parser::new(file)?;
/// let mut event = Event::new();
/// while parser.parse(&mut event)? {
///     println!("{} {:?}", event.ty, event.args);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Parser<R> {
    input: Tracked<BufReader<R>>,
    /// Out-of-line argument block of the current record.
    scratch: Vec<u8>,
    failed: bool,
}

impl<R: Read> Parser<R> {
    /// Open a trace stream and validate its header.
    pub fn new(reader: R) -> Result<Self> {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY, reader)
    }

    /// Like [`Parser::new`], with a read buffer of `capacity` bytes.
    pub fn with_capacity(capacity: usize, reader: R) -> Result<Self> {
        let mut input = Tracked {
            inner: BufReader::with_capacity(capacity, reader),
            pos: 0,
        };

        let mut found = [0u8; HEADER_LEN];
        input.read_exact(&mut found).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::TruncatedHeader,
            _ => Error::Io(e),
        })?;
        if found != HEADER {
            return Err(Error::InvalidHeader {
                found: found.to_vec(),
            });
        }
        debug!(header = %HEADER.escape_ascii(), "trace header accepted");

        Ok(Self {
            input,
            scratch: Vec::new(),
            failed: false,
        })
    }

    /// Decode the next event record into `event`.
    ///
    /// Returns `Ok(true)` when `event` holds a freshly decoded record and
    /// `Ok(false)` when the stream ends cleanly at a record boundary. Any other
    /// short read is an error, after which the stream position is undefined
    /// and the parser must not be used again.
    pub fn parse(&mut self, event: &mut Event) -> Result<bool> {
        let offset = self.input.pos;
        let Some(lead) = self.read_leading_byte()? else {
            return Ok(false);
        };

        let ty = EventType::from_leading_byte(lead);
        let narg = (lead >> 6) + 1;
        event.reset(ty);
        self.scratch.clear();

        if let Err(e) = self.parse_body(event, ty, narg, offset) {
            self.failed = true;
            event.reset(ty);
            return Err(e);
        }

        trace!(
            ty = %event.ty,
            args = ?event.args,
            payload_len = event.payload.len(),
            offset,
            "decoded event"
        );
        Ok(true)
    }

    fn parse_body(&mut self, event: &mut Event, ty: EventType, narg: u8, offset: u64) -> Result<()> {
        if ty == EventType::STRING {
            let id = read_uvarint(&mut self.input).map_err(truncated(offset, "string id"))?;
            event.args.push(id);
            self.read_payload(&mut event.payload, offset, "string")?;
        } else if narg < NARG_OUT_OF_LINE {
            for _ in 0..narg {
                let arg = read_uvarint(&mut self.input).map_err(truncated(offset, "argument"))?;
                event.args.push(arg);
            }
        } else {
            let len = read_uvarint(&mut self.input)
                .map_err(truncated(offset, "argument block length"))?;
            read_exact_into(&mut self.input, len, &mut self.scratch)
                .map_err(truncated(offset, "argument block"))?;

            // Running out of block bytes ends the list, even mid-varint.
            let mut block = self.scratch.as_slice();
            while !block.is_empty() {
                match read_uvarint(&mut block) {
                    Ok(arg) => event.args.push(arg),
                    Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                    Err(e) => return Err(e.into()),
                }
            }
        }

        if ty == EventType::USER_LOG {
            self.read_payload(&mut event.payload, offset, "user log value")?;
        }

        Ok(())
    }

    fn read_leading_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.failed = true;
                    return Err(e.into());
                }
            }
        }
    }

    /// Read a varint length followed by that many bytes, appended to `out`.
    fn read_payload(&mut self, out: &mut Vec<u8>, offset: u64, context: &'static str) -> Result<()> {
        let len = read_uvarint(&mut self.input).map_err(truncated(offset, context))?;
        read_exact_into(&mut self.input, len, out).map_err(truncated(offset, context))?;
        Ok(())
    }

    /// Number of bytes consumed from the source, header included.
    pub fn offset(&self) -> u64 {
        self.input.pos
    }

    /// Whether a previous call to [`Parser::parse`] failed.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Iterate over the remaining events as owned values.
    pub fn events(&mut self) -> Events<'_, R> {
        Events::new(self)
    }

    /// Unwrap the source. Bytes still held in the read buffer are lost.
    pub fn into_inner(self) -> R {
        self.input.inner.into_inner()
    }
}

impl<'a, R: Read> IntoIterator for &'a mut Parser<R> {
    type Item = Result<Event>;
    type IntoIter = Events<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.events()
    }
}

/// Append exactly `len` bytes from `r` to `out`.
///
/// Reads through `take` so a corrupt length never triggers a large up-front
/// allocation.
fn read_exact_into<R: Read>(r: &mut R, len: u64, out: &mut Vec<u8>) -> io::Result<()> {
    let read = r.take(len).read_to_end(out)?;
    if (read as u64) < len {
        return Err(io::ErrorKind::UnexpectedEof.into());
    }
    Ok(())
}

fn truncated(offset: u64, context: &'static str) -> impl FnOnce(io::Error) -> Error {
    move |e| match e.kind() {
        io::ErrorKind::UnexpectedEof => Error::Truncated { offset, context },
        _ => Error::Io(e),
    }
}
