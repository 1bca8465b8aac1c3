use std::time::Duration;

use serde_json::json;

use crate::logging::{LogEvent, LogFields, LogLevel};

/// Counters accumulated across the lifetime of a reflow controller.
#[derive(Debug, Default, Clone)]
pub struct LayoutMetrics {
    reflows: u64,
    rows_resolved: u64,
    placements_applied: u64,
    hidden_columns: u64,
    elements_removed: u64,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_reflow(&mut self, rows: usize, hidden: usize) {
        self.reflows = self.reflows.saturating_add(1);
        self.rows_resolved = self.rows_resolved.saturating_add(rows as u64);
        self.hidden_columns = self.hidden_columns.saturating_add(hidden as u64);
    }

    pub fn record_applied(&mut self, count: usize) {
        if count > 0 {
            self.placements_applied = self.placements_applied.saturating_add(count as u64);
        }
    }

    pub fn record_removal(&mut self) {
        self.elements_removed = self.elements_removed.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            reflows: self.reflows,
            rows_resolved: self.rows_resolved,
            placements_applied: self.placements_applied,
            hidden_columns: self.hidden_columns,
            elements_removed: self.elements_removed,
        }
    }
}

/// Point-in-time copy of the counters, ready for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub reflows: u64,
    pub rows_resolved: u64,
    pub placements_applied: u64,
    pub hidden_columns: u64,
    pub elements_removed: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("reflows".to_string(), json!(self.reflows));
        map.insert("rows_resolved".to_string(), json!(self.rows_resolved));
        map.insert(
            "placements_applied".to_string(),
            json!(self.placements_applied),
        );
        map.insert("hidden_columns".to_string(), json!(self.hidden_columns));
        map.insert("elements_removed".to_string(), json!(self.elements_removed));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            target.to_string(),
            "layout_metrics".to_string(),
            self.as_fields(),
        )
    }
}
