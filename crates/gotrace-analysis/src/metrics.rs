use std::collections::BTreeMap;

use gotrace_core::{Event, EventType};
use serde::{Deserialize, Serialize};

/// Counts extracted from a decoded trace stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Bytes consumed from the stream, header included.
    pub stream_bytes: u64,
    pub total_events: u64,
    pub total_args: u64,
    pub payload_bytes: u64,
    pub by_type: BTreeMap<EventType, TypeMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeMetrics {
    pub name: String,
    pub count: u64,
    pub args: u64,
    pub payload_bytes: u64,
}

impl Metrics {
    /// Fold one decoded event into the totals.
    pub fn record(&mut self, event: &Event) {
        let args = event.args.len() as u64;
        let payload = event.payload.len() as u64;

        self.total_events += 1;
        self.total_args += args;
        self.payload_bytes += payload;

        let entry = self
            .by_type
            .entry(event.ty)
            .or_insert_with(|| TypeMetrics {
                name: event.ty.to_string(),
                ..TypeMetrics::default()
            });
        entry.count += 1;
        entry.args += args;
        entry.payload_bytes += payload;
    }

    /// Number of records with an unassigned tag.
    pub fn unassigned_events(&self) -> u64 {
        self.by_type
            .iter()
            .filter(|(ty, _)| !ty.is_assigned())
            .map(|(_, m)| m.count)
            .sum()
    }

    /// Event types ordered by descending record count.
    pub fn busiest(&self) -> Vec<(EventType, &TypeMetrics)> {
        let mut types: Vec<_> = self.by_type.iter().map(|(ty, m)| (*ty, m)).collect();
        types.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.0.cmp(&b.0)));
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(ty: EventType, args: Vec<u64>, payload: &[u8]) -> Event {
        Event {
            ty,
            args,
            payload: payload.to_vec(),
        }
    }

    #[test]
    fn should_accumulate_per_type() {
        let mut metrics = Metrics::default();
        metrics.record(&event(EventType::GO_START, vec![1, 2, 3], b""));
        metrics.record(&event(EventType::GO_START, vec![4, 5, 6], b""));
        metrics.record(&event(EventType::STRING, vec![1], b"main"));
        metrics.record(&event(EventType(60), vec![], b""));

        assert_eq!(metrics.total_events, 4);
        assert_eq!(metrics.total_args, 7);
        assert_eq!(metrics.payload_bytes, 4);
        assert_eq!(metrics.unassigned_events(), 1);

        let go_start = &metrics.by_type[&EventType::GO_START];
        assert_eq!(go_start.name, "GoStart");
        assert_eq!(go_start.count, 2);
        assert_eq!(go_start.args, 6);
        assert_eq!(metrics.by_type[&EventType(60)].name, "EventType(60)");
    }

    #[test]
    fn should_order_busiest_first() {
        let mut metrics = Metrics::default();
        metrics.record(&event(EventType::GC_DONE, vec![1], b""));
        metrics.record(&event(EventType::GO_END, vec![1], b""));
        metrics.record(&event(EventType::GO_END, vec![2], b""));

        let order: Vec<_> = metrics.busiest().into_iter().map(|(ty, _)| ty).collect();
        assert_eq!(order, vec![EventType::GO_END, EventType::GC_DONE]);
    }
}
