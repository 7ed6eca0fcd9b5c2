//! Event Logger
//!
//! Append-only JSONL sinks. One file per record stream, mirroring the
//! per-role interaction and travel logs of the source model.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::SimError;
use crate::events::EventBuffer;

/// Append-only JSONL writer with an optional discarding mode for tests.
pub struct JsonlWriter {
    writer: Option<BufWriter<File>>,
    record_count: u64,
}

impl JsonlWriter {
    /// Create a writer that truncates and appends to the given path.
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
            record_count: 0,
        })
    }

    /// Create a writer that counts but discards records (for testing).
    pub fn null() -> Self {
        Self {
            writer: None,
            record_count: 0,
        }
    }

    /// Number of records written so far.
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Append one record as a JSON line.
    pub fn log<T: Serialize>(&mut self, record: &T) -> Result<(), SimError> {
        self.record_count += 1;
        if let Some(writer) = &mut self.writer {
            let json = serde_json::to_string(record)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), SimError> {
        if let Some(writer) = &mut self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

/// The full set of per-role sinks the driver drains the event buffer into.
pub struct EventSink {
    scientist_interactions: JsonlWriter,
    citizen_interactions: JsonlWriter,
    policymaker_interactions: JsonlWriter,
    journalist_consults: JsonlWriter,
    citizen_travel: JsonlWriter,
}

impl EventSink {
    /// Open all sink files under the given directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, SimError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            scientist_interactions: JsonlWriter::create(dir.join("interactions_scientists.jsonl"))?,
            citizen_interactions: JsonlWriter::create(dir.join("interactions_citizens.jsonl"))?,
            policymaker_interactions: JsonlWriter::create(
                dir.join("interactions_policymakers.jsonl"),
            )?,
            journalist_consults: JsonlWriter::create(dir.join("consultations_journalists.jsonl"))?,
            citizen_travel: JsonlWriter::create(dir.join("travel_citizens.jsonl"))?,
        })
    }

    /// A sink that counts but discards everything (for testing).
    pub fn null() -> Self {
        Self {
            scientist_interactions: JsonlWriter::null(),
            citizen_interactions: JsonlWriter::null(),
            policymaker_interactions: JsonlWriter::null(),
            journalist_consults: JsonlWriter::null(),
            citizen_travel: JsonlWriter::null(),
        }
    }

    /// Write out and clear a drained event buffer.
    pub fn consume(&mut self, buffer: &mut EventBuffer) -> Result<(), SimError> {
        for record in &buffer.scientist_interactions {
            self.scientist_interactions.log(record)?;
        }
        for record in &buffer.citizen_interactions {
            self.citizen_interactions.log(record)?;
        }
        for record in &buffer.policymaker_interactions {
            self.policymaker_interactions.log(record)?;
        }
        for record in &buffer.journalist_consults {
            self.journalist_consults.log(record)?;
        }
        for record in &buffer.citizen_travel {
            self.citizen_travel.log(record)?;
        }
        buffer.clear();
        Ok(())
    }

    /// Total records written across all sinks.
    pub fn record_count(&self) -> u64 {
        self.scientist_interactions.record_count()
            + self.citizen_interactions.record_count()
            + self.policymaker_interactions.record_count()
            + self.journalist_consults.record_count()
            + self.citizen_travel.record_count()
    }

    pub fn flush(&mut self) -> Result<(), SimError> {
        self.scientist_interactions.flush()?;
        self.citizen_interactions.flush()?;
        self.policymaker_interactions.flush()?;
        self.journalist_consults.flush()?;
        self.citizen_travel.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{InteractionRecord, TravelRecord};

    #[test]
    fn test_null_writer_counts_without_writing() {
        let mut writer = JsonlWriter::null();
        let record = TravelRecord {
            agent_id: 40_000_000,
            x: 1,
            y: 2,
            step: 3,
        };
        writer.log(&record).unwrap();
        writer.log(&record).unwrap();
        assert_eq!(writer.record_count(), 2);
    }

    #[test]
    fn test_writer_appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("travel.jsonl");
        let mut writer = JsonlWriter::create(&path).unwrap();
        for step in 1..=3 {
            writer
                .log(&TravelRecord {
                    agent_id: 40_000_000,
                    x: 0,
                    y: 0,
                    step,
                })
                .unwrap();
        }
        writer.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        let parsed: TravelRecord = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(parsed.step, 3);
    }

    #[test]
    fn test_sink_consumes_and_clears_buffer() {
        let mut sink = EventSink::null();
        let mut buffer = EventBuffer::new();
        buffer.citizen_interactions.push(InteractionRecord {
            self_id: 40_000_000,
            other_id: 40_000_001,
            belief_difference: 0.05,
            updated: true,
            step: 1,
        });
        buffer.citizen_travel.push(TravelRecord {
            agent_id: 40_000_000,
            x: 5,
            y: 5,
            step: 1,
        });

        sink.consume(&mut buffer).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(sink.record_count(), 2);
    }
}
