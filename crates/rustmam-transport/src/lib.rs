pub mod address;
pub mod capture;
pub mod sense;
#[cfg(target_os = "linux")]
pub mod sg;
pub mod traits;

pub use address::DeviceAddress;
pub use capture::CapturingTransport;
pub use sense::{Sense, SenseKey};
#[cfg(target_os = "linux")]
pub use sg::ScsiGenericTransport;
pub use traits::{Direction, Transport, TransportError, DEFAULT_COMMAND_TIMEOUT};
