//! Wire vocabulary for the binary key/value cache protocol
//!
//! The network client that actually speaks the protocol lives elsewhere;
//! this crate owns the response-status code set and the failure envelope
//! that the rest of the gateway matches on. A failed [`Response`] travels
//! as an error value inside `anyhow::Error`, so it implements
//! [`std::error::Error`].

use std::fmt;

use thiserror::Error;

/// Response status codes defined by the binary cache protocol.
///
/// Wire values and symbolic names are fixed by the protocol and must not
/// change across releases; peers and operator logs both rely on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Status {
    /// Operation succeeded.
    Success = 0x00,
    /// Key does not exist.
    KeyNotFound = 0x01,
    /// Key already exists.
    KeyExists = 0x02,
    /// Value exceeds the server's size limit.
    TooBig = 0x03,
    /// Request arguments were invalid.
    InvalidArgs = 0x04,
    /// Conditional store (append, prepend, cas) did not apply.
    NotStored = 0x05,
    /// Increment/decrement applied to a non-numeric value.
    DeltaBadValue = 0x06,
    /// Key is not owned by the addressed vbucket.
    NotMyVbucket = 0x07,
    /// Authentication failed.
    AuthError = 0x20,
    /// Authentication requires further steps.
    AuthContinue = 0x21,
    /// Opcode not recognized by the server.
    UnknownCommand = 0x81,
    /// Server is out of memory.
    OutOfMemory = 0x82,
    /// Operation not supported by this server build.
    NotSupported = 0x83,
    /// Internal server failure.
    InternalError = 0x84,
    /// Server is too busy to handle the request.
    Busy = 0x85,
    /// Transient server failure.
    TempFailure = 0x86,
}

impl Status {
    /// Wire value of this status.
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Decode a wire value, `None` for codes the protocol does not define.
    #[must_use]
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            0x00 => Some(Self::Success),
            0x01 => Some(Self::KeyNotFound),
            0x02 => Some(Self::KeyExists),
            0x03 => Some(Self::TooBig),
            0x04 => Some(Self::InvalidArgs),
            0x05 => Some(Self::NotStored),
            0x06 => Some(Self::DeltaBadValue),
            0x07 => Some(Self::NotMyVbucket),
            0x20 => Some(Self::AuthError),
            0x21 => Some(Self::AuthContinue),
            0x81 => Some(Self::UnknownCommand),
            0x82 => Some(Self::OutOfMemory),
            0x83 => Some(Self::NotSupported),
            0x84 => Some(Self::InternalError),
            0x85 => Some(Self::Busy),
            0x86 => Some(Self::TempFailure),
            _ => None,
        }
    }

    /// Stable protocol symbolic name (e.g. `"KEY_ENOENT"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::KeyNotFound => "KEY_ENOENT",
            Self::KeyExists => "KEY_EEXISTS",
            Self::TooBig => "E2BIG",
            Self::InvalidArgs => "EINVAL",
            Self::NotStored => "NOT_STORED",
            Self::DeltaBadValue => "DELTA_BADVAL",
            Self::NotMyVbucket => "NOT_MY_VBUCKET",
            Self::AuthError => "AUTH_ERROR",
            Self::AuthContinue => "AUTH_CONTINUE",
            Self::UnknownCommand => "UNKNOWN_COMMAND",
            Self::OutOfMemory => "ENOMEM",
            Self::NotSupported => "NOT_SUPPORTED",
            Self::InternalError => "EINTERNAL",
            Self::Busy => "EBUSY",
            Self::TempFailure => "TMPFAIL",
        }
    }

    /// Whether this status reports success.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure envelope reported by the cache backend.
///
/// Carries the protocol status plus the opaque request correlator and the
/// raw server message bytes (usually short ASCII).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("kv response status={}, opaque={}, msg={}", .status, .opaque, String::from_utf8_lossy(.body))]
pub struct Response {
    /// Protocol status reported by the server.
    pub status: Status,
    /// Opaque correlator echoed back from the request.
    pub opaque: u32,
    /// Raw server message bytes.
    pub body: Vec<u8>,
}

impl Response {
    /// A response with the given status and no message body.
    #[must_use]
    pub const fn new(status: Status) -> Self {
        Self {
            status,
            opaque: 0,
            body: Vec::new(),
        }
    }
}
