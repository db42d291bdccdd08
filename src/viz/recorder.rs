//! Frame recorder
//!
//! Renders frames off-screen and dumps them as plain text, one row of cell
//! symbols per line with a blank line between frames. Useful for eyeballing
//! the animation without a live terminal and for diffing runs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use ratatui::buffer::Buffer;

/// Plain-text frame recorder
pub struct FrameRecorder {
    writer: BufWriter<File>,
    width: u16,
    height: u16,
    frames_written: u64,
}

impl FrameRecorder {
    /// Create a recorder targeting `path` with a fixed canvas size
    pub fn new(path: &Path, width: u16, height: u16) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create recording file: {:?}", path))?;

        Ok(Self {
            writer: BufWriter::new(file),
            width,
            height,
            frames_written: 0,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Write one rendered frame. The buffer must match the recorder's size.
    pub fn write_frame(&mut self, buf: &Buffer) -> Result<()> {
        let area = buf.area;
        if area.width != self.width || area.height != self.height {
            anyhow::bail!(
                "frame is {}x{}, recorder expects {}x{}",
                area.width,
                area.height,
                self.width,
                self.height
            );
        }

        for y in area.y..area.y + area.height {
            let mut line = String::with_capacity(self.width as usize);
            for x in area.x..area.x + area.width {
                line.push_str(buf[(x, y)].symbol());
            }
            writeln!(self.writer, "{}", line).context("failed to write frame row")?;
        }
        writeln!(self.writer).context("failed to write frame separator")?;

        self.frames_written += 1;
        Ok(())
    }

    /// Flush and close the recording
    pub fn finalize(mut self) -> Result<()> {
        self.writer.flush().context("failed to flush recording")
    }
}
