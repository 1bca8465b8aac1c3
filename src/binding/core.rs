use std::io::Write;

use crate::container::ElementPlacement;
use crate::error::Result;

/// Receiver for resolved placements.
///
/// The reflow controller calls `apply` with the batch of placements that
/// actually changed since the last reflow, in element-id order. An adapter
/// translates each placement into the host toolkit's constraints; the
/// provided implementations record or serialize them instead.
pub trait ConstraintSink {
    fn apply(&mut self, batch: &[ElementPlacement]) -> Result<()>;
}

/// Sink that drops every batch. Useful for benches and warm-up passes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ConstraintSink for NullSink {
    fn apply(&mut self, _batch: &[ElementPlacement]) -> Result<()> {
        Ok(())
    }
}

/// Sink that keeps every applied placement in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    applied: Vec<ElementPlacement>,
    batches: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All placements applied so far, oldest first.
    pub fn applied(&self) -> &[ElementPlacement] {
        &self.applied
    }

    /// Number of non-empty batches received.
    pub fn batches(&self) -> usize {
        self.batches
    }

    /// Most recent placement applied for an element, if any.
    pub fn last_for(&self, id: &str) -> Option<&ElementPlacement> {
        self.applied.iter().rev().find(|p| p.id == id)
    }

    pub fn clear(&mut self) {
        self.applied.clear();
        self.batches = 0;
    }
}

impl ConstraintSink for RecordingSink {
    fn apply(&mut self, batch: &[ElementPlacement]) -> Result<()> {
        if !batch.is_empty() {
            self.batches += 1;
            self.applied.extend_from_slice(batch);
        }
        Ok(())
    }
}

/// Sink that writes each applied placement as one JSON line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ConstraintSink for JsonLinesSink<W> {
    fn apply(&mut self, batch: &[ElementPlacement]) -> Result<()> {
        for placement in batch {
            let line = serde_json::to_string(placement)?;
            self.writer.write_all(line.as_bytes())?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
