use rustmam_core::types::AttributeId;
use rustmam_transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("encode error: {0}")]
    Encode(#[from] rustmam_core::EncodeError),
    #[error("decode error: {0}")]
    Decode(#[from] rustmam_core::DecodeError),
    #[error("requested attribute {requested} but device returned {returned}")]
    IdentityMismatch {
        requested: AttributeId,
        returned: AttributeId,
    },
    #[error("cannot allocate a {len} byte buffer")]
    AllocationFailure { len: usize },
}
