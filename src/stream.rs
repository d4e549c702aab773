//! Live frame loop: one JSON detection per line, one command batch per frame.
//!
//! A frame that fails to parse, or is not UTF-8, is sent as the all-closed
//! batch. The loop only ends at end of input, on a read error, or when the
//! transport fails.

use anyhow::{Context, Result};
use log::warn;
use std::io::BufRead;

use crate::bindings::ActuatorBindings;
use crate::orchestrator::process;
use crate::source::{Detection, DetectionFilter};
use crate::transport::ActuatorTransport;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub frames: u64,
    pub bad_frames: u64,
}

pub fn run_stream<R, T>(
    mut reader: R,
    bindings: &ActuatorBindings,
    filter: &DetectionFilter,
    transport: &mut T,
) -> Result<StreamStats>
where
    R: BufRead,
    T: ActuatorTransport,
{
    let mut stats = StreamStats::default();
    let mut buf = Vec::new();
    let mut line_no = 0u64;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).context("Failed to read frame")? == 0 {
            break;
        }
        line_no += 1;

        let parsed = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => Detection::parse(line),
            Err(e) => Err(anyhow::Error::new(e).context("Frame is not UTF-8")),
        };

        let hands = match parsed {
            Ok(detection) => filter.apply(detection),
            Err(e) => {
                warn!("Frame on line {}: {:#}", line_no, e);
                stats.bad_frames += 1;
                Vec::new()
            }
        };

        let report = process(&hands, bindings);
        transport.send(&report.commands)?;
        stats.frames += 1;
    }

    Ok(stats)
}
