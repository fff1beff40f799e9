//! Hex trace capture via a [`Transport`](crate::Transport) wrapper.
//!
//! [`CapturingTransport`] wraps any transport and appends every command
//! exchange to a text trace: a `#` comment line with the direction and
//! command block, then the data phase as space separated hex, 16 bytes per
//! line. The format matches the golden fixtures so a captured response can be
//! dropped into the test corpus.

use crate::{DeviceAddress, Direction, Transport, TransportError};
use rustmam_core::cdb::CommandBlock;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

const BYTES_PER_LINE: usize = 16;

fn write_hex_lines<W: Write>(w: &mut W, data: &[u8]) -> io::Result<()> {
    for chunk in data.chunks(BYTES_PER_LINE) {
        let mut first = true;
        for b in chunk {
            if !first {
                w.write_all(b" ")?;
            }
            write!(w, "{b:02x}")?;
            first = false;
        }
        w.write_all(b"\n")?;
    }
    Ok(())
}

/// A [`Transport`] wrapper that records every exchange to a writer.
pub struct CapturingTransport<T, W: Write> {
    inner: T,
    writer: W,
}

impl<T: Transport> CapturingTransport<T, BufWriter<File>> {
    /// Create a capturing wrapper that writes the trace to the given file path.
    /// An existing file is truncated.
    pub fn to_file(inner: T, path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(inner, BufWriter::new(file)))
    }
}

impl<T, W: Write> CapturingTransport<T, W> {
    pub fn new(inner: T, writer: W) -> Self {
        Self { inner, writer }
    }

    pub fn into_parts(self) -> (T, W) {
        (self.inner, self.writer)
    }

    fn record(
        &mut self,
        direction: Direction,
        cdb: &CommandBlock,
        data: &[u8],
        result: &Result<usize, TransportError>,
    ) -> io::Result<()> {
        let label = match direction {
            Direction::Read => "read",
            Direction::Write => "write",
        };
        write!(self.writer, "# {label}")?;
        for b in cdb.as_bytes() {
            write!(self.writer, " {b:02x}")?;
        }
        self.writer.write_all(b"\n")?;
        match result {
            Ok(n) => {
                let shown = match direction {
                    Direction::Read => &data[..(*n).min(data.len())],
                    Direction::Write => data,
                };
                write_hex_lines(&mut self.writer, shown)?;
            }
            Err(e) => writeln!(self.writer, "# error: {e}")?,
        }
        self.writer.flush()
    }
}

impl<T: Transport, W: Write> Transport for CapturingTransport<T, W> {
    fn issue_command(
        &mut self,
        direction: Direction,
        cdb: &CommandBlock,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        let result = self.inner.issue_command(direction, cdb, buf, timeout);
        if let Err(e) = self.record(direction, cdb, buf, &result) {
            log::warn!("capture write failed: {e}");
        }
        result
    }

    fn identify(&mut self) -> Result<DeviceAddress, TransportError> {
        self.inner.identify()
    }
}
