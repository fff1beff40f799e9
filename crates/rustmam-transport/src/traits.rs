use crate::{DeviceAddress, Sense};
use rustmam_core::cdb::CommandBlock;
use std::time::Duration;
use thiserror::Error;

/// Per-command timeout used unless the caller configures another.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while opening a device or executing a command on it.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a SCSI device: {source}")]
    NotScsiDevice {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("sg driver version {0} is older than 30000")]
    UnsupportedDriver(i32),
    #[error("command timed out")]
    Timeout,
    #[error("check condition: {0}")]
    CheckCondition(Sense),
    #[error("SCSI status 0x{0:02x}")]
    Status(u8),
    #[error("host adapter status 0x{0:04x}")]
    HostStatus(u16),
    #[error("driver status 0x{0:04x}")]
    DriverStatus(u16),
    #[error("device command transport unavailable on this platform")]
    Unavailable,
}

/// Data phase direction of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Device to host.
    Read,
    /// Host to device.
    Write,
}

/// Blocking command transport to a single device.
///
/// At most one command is outstanding at a time: every call blocks until the
/// device completes the command or `timeout` elapses.
pub trait Transport {
    /// Executes `cdb` with `buf` as the data phase, returning how many bytes
    /// were actually transferred.
    fn issue_command(
        &mut self,
        direction: Direction,
        cdb: &CommandBlock,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize, TransportError>;

    /// Reports where the device sits on its bus.
    fn identify(&mut self) -> Result<DeviceAddress, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn issue_command(
        &mut self,
        direction: Direction,
        cdb: &CommandBlock,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        (**self).issue_command(direction, cdb, buf, timeout)
    }

    fn identify(&mut self) -> Result<DeviceAddress, TransportError> {
        (**self).identify()
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn issue_command(
        &mut self,
        direction: Direction,
        cdb: &CommandBlock,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        (**self).issue_command(direction, cdb, buf, timeout)
    }

    fn identify(&mut self) -> Result<DeviceAddress, TransportError> {
        (**self).identify()
    }
}
