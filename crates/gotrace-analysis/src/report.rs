use std::fmt::Write;

use crate::metrics::Metrics;

/// Generates human-readable and machine-readable reports.
pub struct Report {
    metrics: Metrics,
}

impl Report {
    pub fn new(metrics: Metrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Generate a human-readable text report.
    pub fn to_text(&self) -> String {
        let m = &self.metrics;
        let mut out = String::new();

        let _ = writeln!(out, "Stream bytes:  {}", m.stream_bytes);
        let _ = writeln!(out, "Events:        {}", m.total_events);
        let _ = writeln!(out, "Arguments:     {}", m.total_args);
        let _ = writeln!(out, "Payload bytes: {}", m.payload_bytes);
        let unassigned = m.unassigned_events();
        if unassigned > 0 {
            let _ = writeln!(out, "Unassigned:    {}", unassigned);
        }

        if !m.by_type.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{:>3}  {:<18} {:>10} {:>10} {:>10}",
                "tag", "type", "count", "args", "payload"
            );
            for (ty, t) in m.busiest() {
                let _ = writeln!(
                    out,
                    "{:>3}  {:<18} {:>10} {:>10} {:>10}",
                    ty.as_u8(),
                    t.name,
                    t.count,
                    t.args,
                    t.payload_bytes
                );
            }
        }

        out
    }

    /// Generate a JSON report.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gotrace_core::{Event, EventType};

    fn metrics() -> Metrics {
        let mut metrics = Metrics::default();
        metrics.stream_bytes = 64;
        metrics.record(&Event {
            ty: EventType::GC_START,
            args: vec![1, 2, 3],
            payload: vec![],
        });
        metrics.record(&Event {
            ty: EventType::USER_LOG,
            args: vec![1, 2, 3, 4],
            payload: b"value".to_vec(),
        });
        metrics
    }

    #[test]
    fn test_text_report_lists_types() {
        let text = Report::new(metrics()).to_text();
        assert!(text.contains("Events:        2"));
        assert!(text.contains("GCStart"));
        assert!(text.contains("UserLog"));
        assert!(!text.contains("Unassigned"));
    }

    #[test]
    fn test_json_report_round_trips() {
        let report = Report::new(metrics());
        let json = report.to_json().unwrap();
        let parsed: Metrics = serde_json::from_str(&json).unwrap();
        assert_eq!(&parsed, report.metrics());
    }
}
