use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use hockey_proto::Snapshot;

/// Appends COBS framed snapshots to a recording file
pub struct Recorder {
    writer: BufWriter<File>,
    frames: u32,
}

impl Recorder {
    pub fn create(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open recording {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
            frames: 0,
        })
    }

    pub fn record(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let frame = snapshot.to_frame()?;
        self.writer.write_all(&frame)?;
        self.frames += 1;
        Ok(())
    }

    /// Flush and return the number of frames written
    pub fn finish(mut self) -> anyhow::Result<u32> {
        self.writer.flush().context("failed to flush recording")?;
        Ok(self.frames)
    }
}
