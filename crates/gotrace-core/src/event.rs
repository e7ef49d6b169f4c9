//! Decoded trace events.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, EventInfo};

/// Tag of a trace event.
///
/// Only the low 6 bits of a record's leading byte carry the tag, so every
/// value in `0..=63` is representable. Tags `50..=63` are unassigned but still
/// decode by structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventType(pub u8);

impl EventType {
    pub const NONE: EventType = EventType(0);
    pub const BATCH: EventType = EventType(1);
    pub const FREQUENCY: EventType = EventType(2);
    pub const STACK: EventType = EventType(3);
    pub const GOMAXPROCS: EventType = EventType(4);
    pub const PROC_START: EventType = EventType(5);
    pub const PROC_STOP: EventType = EventType(6);
    pub const GC_START: EventType = EventType(7);
    pub const GC_DONE: EventType = EventType(8);
    pub const GC_STW_START: EventType = EventType(9);
    pub const GC_STW_DONE: EventType = EventType(10);
    pub const GC_SWEEP_START: EventType = EventType(11);
    pub const GC_SWEEP_DONE: EventType = EventType(12);
    pub const GO_CREATE: EventType = EventType(13);
    pub const GO_START: EventType = EventType(14);
    pub const GO_END: EventType = EventType(15);
    pub const GO_STOP: EventType = EventType(16);
    pub const GO_SCHED: EventType = EventType(17);
    pub const GO_PREEMPT: EventType = EventType(18);
    pub const GO_SLEEP: EventType = EventType(19);
    pub const GO_BLOCK: EventType = EventType(20);
    pub const GO_UNBLOCK: EventType = EventType(21);
    pub const GO_BLOCK_SEND: EventType = EventType(22);
    pub const GO_BLOCK_RECV: EventType = EventType(23);
    pub const GO_BLOCK_SELECT: EventType = EventType(24);
    pub const GO_BLOCK_SYNC: EventType = EventType(25);
    pub const GO_BLOCK_COND: EventType = EventType(26);
    pub const GO_BLOCK_NET: EventType = EventType(27);
    pub const GO_SYSCALL: EventType = EventType(28);
    pub const GO_SYS_EXIT: EventType = EventType(29);
    pub const GO_SYS_BLOCK: EventType = EventType(30);
    pub const GO_WAITING: EventType = EventType(31);
    pub const GO_IN_SYSCALL: EventType = EventType(32);
    pub const HEAP_ALLOC: EventType = EventType(33);
    pub const HEAP_GOAL: EventType = EventType(34);
    pub const TIMER_GOROUTINE: EventType = EventType(35);
    pub const FUTILE_WAKEUP: EventType = EventType(36);
    pub const STRING: EventType = EventType(37);
    pub const GO_START_LOCAL: EventType = EventType(38);
    pub const GO_UNBLOCK_LOCAL: EventType = EventType(39);
    pub const GO_SYS_EXIT_LOCAL: EventType = EventType(40);
    pub const GO_START_LABEL: EventType = EventType(41);
    pub const GO_BLOCK_GC: EventType = EventType(42);
    pub const GC_MARK_ASSIST_START: EventType = EventType(43);
    pub const GC_MARK_ASSIST_DONE: EventType = EventType(44);
    pub const USER_TASK_CREATE: EventType = EventType(45);
    pub const USER_TASK_END: EventType = EventType(46);
    pub const USER_REGION: EventType = EventType(47);
    pub const USER_LOG: EventType = EventType(48);
    pub const CPU_SAMPLE: EventType = EventType(49);

    /// Number of assigned tags (`0..COUNT`).
    pub const COUNT: u8 = 50;

    /// Largest tag that fits in the 6 bits of a leading byte.
    pub const MAX: u8 = 0x3f;

    /// Extract the tag from a record's leading byte.
    pub const fn from_leading_byte(b: u8) -> Self {
        EventType(b & Self::MAX)
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Catalog entry for this tag, `None` for unassigned tags.
    pub fn info(self) -> Option<&'static EventInfo> {
        catalog::lookup(self)
    }

    /// Catalog name, `None` for unassigned tags.
    pub fn name(self) -> Option<&'static str> {
        self.info().map(|info| info.name)
    }

    pub fn is_assigned(self) -> bool {
        self.0 < Self::COUNT
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "EventType({})", self.0),
        }
    }
}

/// A single decoded trace event.
///
/// The parser clears and refills `args` and `payload` on every call, so one
/// `Event` can be reused for a whole stream without reallocating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub ty: EventType,
    pub args: Vec<u64>,
    /// Raw string bytes; only set for `STRING` and `USER_LOG` events.
    pub payload: Vec<u8>,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to an empty event of type `ty`, keeping allocations.
    pub fn reset(&mut self, ty: EventType) {
        self.ty = ty;
        self.args.clear();
        self.payload.clear();
    }

    pub fn info(&self) -> Option<&'static EventInfo> {
        self.ty.info()
    }

    /// Arguments paired with their catalog names, if documented.
    pub fn named_args(&self) -> impl Iterator<Item = (Option<&'static str>, u64)> + '_ {
        let names = self.info().map(|info| info.args).unwrap_or(&[]);
        self.args
            .iter()
            .enumerate()
            .map(move |(i, &value)| (names.get(i).copied(), value))
    }

    /// Payload as text, replacing invalid UTF-8 sequences.
    pub fn payload_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}
