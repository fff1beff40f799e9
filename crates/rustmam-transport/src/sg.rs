//! Linux SCSI generic transport using the `SG_IO` ioctl.
//!
//! Works on `/dev/sg*` nodes as well as on tape nodes (`/dev/nst*`), which
//! accept `SG_IO` through the block layer.

use crate::{DeviceAddress, Direction, Sense, Transport, TransportError};
use nix::libc::{c_int, c_uchar, c_uint, c_ushort, c_void};
use rustmam_core::cdb::{CommandBlock, CDB_LEN};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::{AsRawFd, IntoRawFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::ptr;
use std::time::Duration;

const SG_INTERFACE_ID: c_int = b'S' as c_int;
const SG_DXFER_TO_DEV: c_int = -2;
const SG_DXFER_FROM_DEV: c_int = -3;
const SG_INFO_OK_MASK: c_uint = 0x1;
const MIN_SG_VERSION: c_int = 30000;
const SENSE_LEN: usize = 64;

const STATUS_CHECK_CONDITION: c_uchar = 0x02;
const DID_TIME_OUT: c_ushort = 0x03;
const DRIVER_TIMEOUT: c_ushort = 0x06;
const DRIVER_STATUS_MASK: c_ushort = 0x0F;

// Mirrors `struct sg_io_hdr` from <scsi/sg.h>.
#[repr(C)]
#[allow(dead_code)]
struct SgIoHdr {
    interface_id: c_int,
    dxfer_direction: c_int,
    cmd_len: c_uchar,
    mx_sb_len: c_uchar,
    iovec_count: c_ushort,
    dxfer_len: c_uint,
    dxferp: *mut c_void,
    cmdp: *mut c_uchar,
    sbp: *mut c_uchar,
    timeout: c_uint,
    flags: c_uint,
    pack_id: c_int,
    usr_ptr: *mut c_void,
    status: c_uchar,
    masked_status: c_uchar,
    msg_status: c_uchar,
    sb_len_wr: c_uchar,
    host_status: c_ushort,
    driver_status: c_ushort,
    resid: c_int,
    duration: c_uint,
    info: c_uint,
}

impl SgIoHdr {
    fn empty() -> Self {
        Self {
            interface_id: SG_INTERFACE_ID,
            dxfer_direction: 0,
            cmd_len: 0,
            mx_sb_len: 0,
            iovec_count: 0,
            dxfer_len: 0,
            dxferp: ptr::null_mut(),
            cmdp: ptr::null_mut(),
            sbp: ptr::null_mut(),
            timeout: 0,
            flags: 0,
            pack_id: 0,
            usr_ptr: ptr::null_mut(),
            status: 0,
            masked_status: 0,
            msg_status: 0,
            sb_len_wr: 0,
            host_status: 0,
            driver_status: 0,
            resid: 0,
            duration: 0,
            info: 0,
        }
    }
}

#[repr(C)]
#[derive(Default)]
struct ScsiIdLun {
    four_in_one: c_int,
    host_unique_id: c_int,
}

mod ioctl {
    use super::{ScsiIdLun, SgIoHdr};
    use nix::libc::c_int;

    nix::ioctl_readwrite_bad!(sg_io, 0x2285, SgIoHdr);
    nix::ioctl_read_bad!(sg_get_version_num, 0x2282, c_int);
    nix::ioctl_read_bad!(scsi_get_idlun, 0x5382, ScsiIdLun);
    nix::ioctl_read_bad!(scsi_get_bus_number, 0x5386, c_int);
}

/// An open SCSI generic capable device node.
#[derive(Debug)]
pub struct ScsiGenericTransport {
    file: File,
    path: PathBuf,
}

impl ScsiGenericTransport {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TransportError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(nix::libc::O_NONBLOCK)
            .open(path)
            .map_err(|source| TransportError::Open {
                path: path.display().to_string(),
                source,
            })?;
        log::debug!("opened {}", path.display());
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fails unless the node speaks the SG v3 interface.
    pub fn check_is_supported_device(&self) -> Result<(), TransportError> {
        let mut version: c_int = 0;
        // SAFETY: the fd is open for the lifetime of `self` and `version` is a
        // valid out-pointer for the ioctl's int result.
        let rc = unsafe { ioctl::sg_get_version_num(self.file.as_raw_fd(), &mut version) };
        match rc {
            Ok(_) if version >= MIN_SG_VERSION => Ok(()),
            Ok(_) => Err(TransportError::UnsupportedDriver(version)),
            Err(errno) => Err(TransportError::NotScsiDevice {
                path: self.path.display().to_string(),
                source: io::Error::from(errno),
            }),
        }
    }

    /// Closes the device node, reporting any error from `close(2)`. Dropping
    /// the transport also closes it, silently.
    pub fn close(self) -> Result<(), TransportError> {
        let Self { file, path } = self;
        log::debug!("closing {}", path.display());
        nix::unistd::close(file.into_raw_fd()).map_err(io::Error::from)?;
        Ok(())
    }
}

impl Transport for ScsiGenericTransport {
    fn issue_command(
        &mut self,
        direction: Direction,
        cdb: &CommandBlock,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        let mut cdb_bytes = *cdb.as_bytes();
        let mut sense = [0u8; SENSE_LEN];
        let dxfer_len = c_uint::try_from(buf.len())
            .map_err(|_| io::Error::from(io::ErrorKind::InvalidInput))?;

        let mut hdr = SgIoHdr {
            dxfer_direction: match direction {
                Direction::Read => SG_DXFER_FROM_DEV,
                Direction::Write => SG_DXFER_TO_DEV,
            },
            cmd_len: CDB_LEN as c_uchar,
            mx_sb_len: SENSE_LEN as c_uchar,
            dxfer_len,
            dxferp: buf.as_mut_ptr().cast(),
            cmdp: cdb_bytes.as_mut_ptr(),
            sbp: sense.as_mut_ptr(),
            timeout: c_uint::try_from(timeout.as_millis()).unwrap_or(c_uint::MAX),
            ..SgIoHdr::empty()
        };

        // SAFETY: every pointer in `hdr` refers to a live buffer of the length
        // recorded beside it, and all of them outlive the blocking ioctl.
        unsafe { ioctl::sg_io(self.file.as_raw_fd(), &mut hdr) }.map_err(io::Error::from)?;

        check_completion(&hdr, &sense)?;
        let resid = usize::try_from(hdr.resid).unwrap_or(0);
        Ok(buf.len().saturating_sub(resid))
    }

    fn identify(&mut self) -> Result<DeviceAddress, TransportError> {
        let fd = self.file.as_raw_fd();
        let mut idlun = ScsiIdLun::default();
        let mut bus: c_int = 0;
        // SAFETY: both out-pointers are valid for the structures the kernel
        // writes for these ioctls.
        unsafe {
            ioctl::scsi_get_idlun(fd, &mut idlun).map_err(io::Error::from)?;
            ioctl::scsi_get_bus_number(fd, &mut bus).map_err(io::Error::from)?;
        }
        log::debug!(
            "idlun 0x{:08x} host id {}",
            idlun.four_in_one,
            idlun.host_unique_id
        );
        let address = DeviceAddress::from_idlun(idlun.four_in_one as u32, bus as u32);
        Ok(address)
    }
}

fn check_completion(hdr: &SgIoHdr, sense: &[u8]) -> Result<(), TransportError> {
    if hdr.info & SG_INFO_OK_MASK == 0 {
        return Ok(());
    }
    let host_timeout = hdr.host_status == DID_TIME_OUT;
    let driver_timeout = hdr.driver_status & DRIVER_STATUS_MASK == DRIVER_TIMEOUT;
    if host_timeout || driver_timeout {
        return Err(TransportError::Timeout);
    }
    let written = usize::from(hdr.sb_len_wr).min(sense.len());
    if hdr.status == STATUS_CHECK_CONDITION || written > 0 {
        if let Some(parsed) = Sense::parse(&sense[..written]) {
            if parsed.key.is_benign() {
                log::debug!("ignoring sense {parsed}");
                return Ok(());
            }
            log::warn!("command failed: {parsed}");
            return Err(TransportError::CheckCondition(parsed));
        }
    }
    if hdr.host_status != 0 {
        return Err(TransportError::HostStatus(hdr.host_status));
    }
    if hdr.driver_status != 0 {
        return Err(TransportError::DriverStatus(hdr.driver_status));
    }
    Err(TransportError::Status(hdr.status))
}

#[cfg(test)]
mod tests {
    use super::{
        check_completion, ScsiGenericTransport, SgIoHdr, DID_TIME_OUT, STATUS_CHECK_CONDITION,
    };
    use crate::{SenseKey, TransportError};
    use std::error::Error;

    #[test]
    fn non_scsi_node_keeps_system_error() {
        let sg = ScsiGenericTransport::open("/dev/null").unwrap();
        let err = sg.check_is_supported_device().unwrap_err();
        assert!(matches!(err, TransportError::NotScsiDevice { .. }));
        let source = err.source().expect("system error should be attached");
        let io = source.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.raw_os_error(), Some(nix::libc::ENOTTY));
        let message = err.to_string();
        assert!(message.starts_with("/dev/null is not a SCSI device: "));
    }

    #[test]
    fn close_reports_success() {
        let sg = ScsiGenericTransport::open("/dev/null").unwrap();
        assert_eq!(sg.path(), std::path::Path::new("/dev/null"));
        sg.close().unwrap();
    }

    #[test]
    fn clean_completion() {
        assert!(check_completion(&SgIoHdr::empty(), &[]).is_ok());
    }

    #[test]
    fn check_condition_carries_sense() {
        let mut hdr = SgIoHdr::empty();
        hdr.info = 1;
        hdr.status = STATUS_CHECK_CONDITION;
        let mut sense = [0u8; 18];
        sense[0] = 0x70;
        sense[2] = 0x05;
        sense[12] = 0x24;
        hdr.sb_len_wr = 18;
        match check_completion(&hdr, &sense) {
            Err(TransportError::CheckCondition(s)) => assert_eq!(s.key, SenseKey::IllegalRequest),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn recovered_error_is_success() {
        let mut hdr = SgIoHdr::empty();
        hdr.info = 1;
        hdr.status = STATUS_CHECK_CONDITION;
        hdr.sb_len_wr = 3;
        assert!(check_completion(&hdr, &[0x70, 0x00, 0x01]).is_ok());
    }

    #[test]
    fn host_timeout() {
        let mut hdr = SgIoHdr::empty();
        hdr.info = 1;
        hdr.host_status = DID_TIME_OUT;
        assert!(matches!(check_completion(&hdr, &[]), Err(TransportError::Timeout)));
    }
}
