//! Static catalog of trace event types.
//!
//! Each assigned tag maps to a name, a short description, the documented
//! argument names in wire order, and the shape of its string payload. The
//! table is reference data for diagnostics; the parser decodes records by
//! structure and never consults it.

use serde::Serialize;

use crate::event::EventType;

/// Kind of inline string data carried by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PayloadShape {
    /// No string payload.
    None,
    /// `[id, length, bytes]` dictionary entry, referenced elsewhere by id.
    DictionaryString,
    /// Length-prefixed log value following the regular arguments.
    UserLogValue,
}

/// Catalog entry describing one event type.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EventInfo {
    pub ty: EventType,
    pub name: &'static str,
    pub description: &'static str,
    /// Argument names in wire order.
    pub args: &'static [&'static str],
    /// Whether more values may follow the named arguments.
    pub variadic: bool,
    pub payload: PayloadShape,
}

impl EventInfo {
    const fn new(
        ty: EventType,
        name: &'static str,
        description: &'static str,
        args: &'static [&'static str],
    ) -> Self {
        Self {
            ty,
            name,
            description,
            args,
            variadic: false,
            payload: PayloadShape::None,
        }
    }

    const fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    const fn with_payload(mut self, payload: PayloadShape) -> Self {
        self.payload = payload;
        self
    }

    /// Whether the tracer must emit this event with a length-prefixed
    /// argument block (more than 3 arguments).
    pub const fn is_out_of_line(&self) -> bool {
        self.variadic || self.args.len() > 3
    }
}

const TS: &str = "timestamp";

#[rustfmt::skip]
static CATALOG: [EventInfo; EventType::COUNT as usize] = [
    EventInfo::new(EventType::NONE, "None", "unused", &[]),
    EventInfo::new(EventType::BATCH, "Batch", "start of per-P batch of events", &["pid", TS]),
    EventInfo::new(EventType::FREQUENCY, "Frequency", "tracer timer frequency in ticks per second", &["frequency"]),
    EventInfo::new(EventType::STACK, "Stack", "stack record followed by {pc, func string id, file string id, line} per frame", &["stack_id", "pc_count"]).variadic(),
    EventInfo::new(EventType::GOMAXPROCS, "Gomaxprocs", "current value of GOMAXPROCS", &[TS, "gomaxprocs", "stack_id"]),
    EventInfo::new(EventType::PROC_START, "ProcStart", "start of P", &[TS, "thread_id"]),
    EventInfo::new(EventType::PROC_STOP, "ProcStop", "stop of P", &[TS]),
    EventInfo::new(EventType::GC_START, "GCStart", "GC start", &[TS, "seq", "stack_id"]),
    EventInfo::new(EventType::GC_DONE, "GCDone", "GC done", &[TS]),
    EventInfo::new(EventType::GC_STW_START, "GCSTWStart", "GC stop-the-world start", &[TS, "kind"]),
    EventInfo::new(EventType::GC_STW_DONE, "GCSTWDone", "GC stop-the-world done", &[TS]),
    EventInfo::new(EventType::GC_SWEEP_START, "GCSweepStart", "GC sweep start", &[TS, "stack_id"]),
    EventInfo::new(EventType::GC_SWEEP_DONE, "GCSweepDone", "GC sweep done", &[TS, "swept", "reclaimed"]),
    EventInfo::new(EventType::GO_CREATE, "GoCreate", "goroutine creation", &[TS, "goroutine_id", "new_stack_id", "stack_id"]),
    EventInfo::new(EventType::GO_START, "GoStart", "goroutine starts running", &[TS, "goroutine_id", "seq"]),
    EventInfo::new(EventType::GO_END, "GoEnd", "goroutine ends", &[TS]),
    EventInfo::new(EventType::GO_STOP, "GoStop", "goroutine stops, e.g. in select{}", &[TS, "stack_id"]),
    EventInfo::new(EventType::GO_SCHED, "GoSched", "goroutine calls Gosched", &[TS, "stack_id"]),
    EventInfo::new(EventType::GO_PREEMPT, "GoPreempt", "goroutine is preempted", &[TS, "stack_id"]),
    EventInfo::new(EventType::GO_SLEEP, "GoSleep", "goroutine calls Sleep", &[TS, "stack_id"]),
    EventInfo::new(EventType::GO_BLOCK, "GoBlock", "goroutine blocks", &[TS, "stack_id"]),
    EventInfo::new(EventType::GO_UNBLOCK, "GoUnblock", "goroutine is unblocked", &[TS, "goroutine_id", "seq", "stack_id"]),
    EventInfo::new(EventType::GO_BLOCK_SEND, "GoBlockSend", "goroutine blocks on chan send", &[TS, "stack_id"]),
    EventInfo::new(EventType::GO_BLOCK_RECV, "GoBlockRecv", "goroutine blocks on chan recv", &[TS, "stack_id"]),
    EventInfo::new(EventType::GO_BLOCK_SELECT, "GoBlockSelect", "goroutine blocks on select", &[TS, "stack_id"]),
    EventInfo::new(EventType::GO_BLOCK_SYNC, "GoBlockSync", "goroutine blocks on Mutex/RWMutex", &[TS, "stack_id"]),
    EventInfo::new(EventType::GO_BLOCK_COND, "GoBlockCond", "goroutine blocks on Cond", &[TS, "stack_id"]),
    EventInfo::new(EventType::GO_BLOCK_NET, "GoBlockNet", "goroutine blocks on network", &[TS, "stack_id"]),
    EventInfo::new(EventType::GO_SYSCALL, "GoSysCall", "syscall enter", &[TS, "stack_id"]),
    EventInfo::new(EventType::GO_SYS_EXIT, "GoSysExit", "syscall exit", &[TS, "goroutine_id", "seq", "real_timestamp"]),
    EventInfo::new(EventType::GO_SYS_BLOCK, "GoSysBlock", "syscall blocks", &[TS]),
    EventInfo::new(EventType::GO_WAITING, "GoWaiting", "goroutine is blocked when tracing starts", &[TS, "goroutine_id"]),
    EventInfo::new(EventType::GO_IN_SYSCALL, "GoInSyscall", "goroutine is in syscall when tracing starts", &[TS, "goroutine_id"]),
    EventInfo::new(EventType::HEAP_ALLOC, "HeapAlloc", "live heap size change", &[TS, "heap_alloc"]),
    EventInfo::new(EventType::HEAP_GOAL, "HeapGoal", "heap goal change in bytes", &[TS, "heap_goal"]),
    EventInfo::new(EventType::TIMER_GOROUTINE, "TimerGoroutine", "timer goroutine (no longer emitted)", &["goroutine_id"]),
    EventInfo::new(EventType::FUTILE_WAKEUP, "FutileWakeup", "previous wakeup of this goroutine was futile", &[TS]),
    EventInfo::new(EventType::STRING, "String", "string dictionary entry", &["string_id"]).with_payload(PayloadShape::DictionaryString),
    EventInfo::new(EventType::GO_START_LOCAL, "GoStartLocal", "goroutine starts running on the same P as the last event", &[TS, "goroutine_id"]),
    EventInfo::new(EventType::GO_UNBLOCK_LOCAL, "GoUnblockLocal", "goroutine is unblocked on the same P as the last event", &[TS, "goroutine_id", "stack_id"]),
    EventInfo::new(EventType::GO_SYS_EXIT_LOCAL, "GoSysExitLocal", "syscall exit on the same P as the last event", &[TS, "goroutine_id", "real_timestamp"]),
    EventInfo::new(EventType::GO_START_LABEL, "GoStartLabel", "goroutine starts running with label", &[TS, "goroutine_id", "seq", "label_string_id"]),
    EventInfo::new(EventType::GO_BLOCK_GC, "GoBlockGC", "goroutine blocks on GC assist", &[TS, "stack_id"]),
    EventInfo::new(EventType::GC_MARK_ASSIST_START, "GCMarkAssistStart", "GC mark assist start", &[TS, "stack_id"]),
    EventInfo::new(EventType::GC_MARK_ASSIST_DONE, "GCMarkAssistDone", "GC mark assist done", &[TS]),
    EventInfo::new(EventType::USER_TASK_CREATE, "UserTaskCreate", "user task created", &[TS, "task_id", "parent_task_id", "stack_id", "name_string_id"]),
    EventInfo::new(EventType::USER_TASK_END, "UserTaskEnd", "end of a user task", &[TS, "task_id", "stack_id"]),
    EventInfo::new(EventType::USER_REGION, "UserRegion", "user region start or end", &[TS, "task_id", "mode", "stack_id", "name_string_id"]),
    EventInfo::new(EventType::USER_LOG, "UserLog", "user log message", &[TS, "task_id", "key_string_id", "stack_id"]).with_payload(PayloadShape::UserLogValue),
    EventInfo::new(EventType::CPU_SAMPLE, "CPUSample", "CPU profiling sample", &[TS, "stack_id", "real_timestamp", "real_pid", "goroutine_id"]),
];

/// Every assigned event type, indexed by tag.
pub fn catalog() -> &'static [EventInfo] {
    &CATALOG
}

/// Catalog entry for `ty`, `None` for tags `50..=63`.
pub fn lookup(ty: EventType) -> Option<&'static EventInfo> {
    CATALOG.get(ty.0 as usize)
}
