//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

//
// Type aliases.
//
pub type Result<T> = std::result::Result<T, SrError>;

//
// Result codes shared by every client/daemon exchange.
//
// The numeric codes are part of the wire contract; `Ok` is represented as
// code 0 and is not a member of this enum.
//
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SrError {
    InvalArg,
    NotFound,
    Internal,
    Unsupported,
    NoMem,
    Locked,
    Unauthorized,
    MalformedMsg,
    RestartNeeded,
    Io,
    DataExists,
    DataMissing,
    OperationFailed,
}

// Coarse classification of the result codes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Input,
    State,
    Environment,
    Control,
}

// ===== impl SrError =====

impl SrError {
    /// Numeric wire code. Code 0 is reserved for success.
    pub fn code(&self) -> u32 {
        match self {
            SrError::InvalArg => 1,
            SrError::NotFound => 2,
            SrError::Internal => 3,
            SrError::Unsupported => 4,
            SrError::NoMem => 5,
            SrError::Locked => 6,
            SrError::Unauthorized => 7,
            SrError::MalformedMsg => 8,
            SrError::RestartNeeded => 9,
            SrError::Io => 10,
            SrError::DataExists => 11,
            SrError::DataMissing => 12,
            SrError::OperationFailed => 13,
        }
    }

    /// Decodes a wire result code. Unknown codes decode as `Internal`.
    pub fn from_code(code: u32) -> Result<()> {
        match code {
            0 => Ok(()),
            1 => Err(SrError::InvalArg),
            2 => Err(SrError::NotFound),
            3 => Err(SrError::Internal),
            4 => Err(SrError::Unsupported),
            5 => Err(SrError::NoMem),
            6 => Err(SrError::Locked),
            7 => Err(SrError::Unauthorized),
            8 => Err(SrError::MalformedMsg),
            9 => Err(SrError::RestartNeeded),
            10 => Err(SrError::Io),
            11 => Err(SrError::DataExists),
            12 => Err(SrError::DataMissing),
            13 => Err(SrError::OperationFailed),
            _ => Err(SrError::Internal),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SrError::InvalArg
            | SrError::MalformedMsg
            | SrError::Unsupported => ErrorKind::Input,
            SrError::DataExists
            | SrError::DataMissing
            | SrError::NotFound
            | SrError::Locked => ErrorKind::State,
            SrError::Io | SrError::NoMem | SrError::Unauthorized => {
                ErrorKind::Environment
            }
            SrError::RestartNeeded
            | SrError::OperationFailed
            | SrError::Internal => ErrorKind::Control,
        }
    }
}

impl std::fmt::Display for SrError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SrError::InvalArg => write!(f, "invalid argument"),
            SrError::NotFound => write!(f, "item not found"),
            SrError::Internal => write!(f, "internal error"),
            SrError::Unsupported => write!(f, "unsupported operation"),
            SrError::NoMem => write!(f, "out of memory"),
            SrError::Locked => write!(f, "requested resource is locked"),
            SrError::Unauthorized => write!(f, "operation not authorized"),
            SrError::MalformedMsg => write!(f, "malformed message"),
            SrError::RestartNeeded => write!(f, "daemon restart needed"),
            SrError::Io => write!(f, "input/output error"),
            SrError::DataExists => write!(f, "item already exists"),
            SrError::DataMissing => write!(f, "item expected to exist is missing"),
            SrError::OperationFailed => write!(f, "operation failed"),
        }
    }
}

impl std::error::Error for SrError {}

impl From<std::io::Error> for SrError {
    fn from(error: std::io::Error) -> SrError {
        match error.kind() {
            std::io::ErrorKind::NotFound => SrError::NotFound,
            std::io::ErrorKind::PermissionDenied => SrError::Unauthorized,
            std::io::ErrorKind::AlreadyExists => SrError::DataExists,
            _ => SrError::Io,
        }
    }
}
