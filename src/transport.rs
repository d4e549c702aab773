//! Actuator transport seam. The serial/Firmata link itself lives outside this
//! crate; these sinks receive one complete batch per frame.

use anyhow::{Context, Result};
use colored::*;
use std::io::Write;

use crate::types::CommandBatch;

pub trait ActuatorTransport {
    fn send(&mut self, batch: &CommandBatch) -> Result<()>;
}

impl<T: ActuatorTransport + ?Sized> ActuatorTransport for Box<T> {
    fn send(&mut self, batch: &CommandBatch) -> Result<()> {
        (**self).send(batch)
    }
}

/// Prints each batch as a one-line pin table.
#[derive(Default)]
pub struct ConsoleTransport {
    frames: u64,
}

impl ConsoleTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ActuatorTransport for ConsoleTransport {
    fn send(&mut self, batch: &CommandBatch) -> Result<()> {
        self.frames += 1;
        let cells: Vec<String> = batch
            .iter()
            .map(|c| format!("{}={:>3}", c.pin, c.angle))
            .collect();
        println!("{} {}", format!("#{:<4}", self.frames).cyan(), cells.join("  "));
        Ok(())
    }
}

/// Writes each batch as one JSON array line, for piping into a serial bridge.
pub struct JsonLinesTransport<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesTransport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ActuatorTransport for JsonLinesTransport<W> {
    fn send(&mut self, batch: &CommandBatch) -> Result<()> {
        serde_json::to_writer(&mut self.writer, batch).context("Failed to encode command batch")?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps every batch in memory.
#[derive(Default)]
pub struct RecordingTransport {
    pub batches: Vec<CommandBatch>,
}

impl ActuatorTransport for RecordingTransport {
    fn send(&mut self, batch: &CommandBatch) -> Result<()> {
        self.batches.push(batch.clone());
        Ok(())
    }
}
