//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

use std::path::PathBuf;

use sysrepo_utils::SrError;

//
// Type aliases.
//
pub type Result<T> = std::result::Result<T, Error>;

//
// Module repository errors.
//
#[derive(Debug)]
pub enum Error {
    InvalidArgument(String),
    ModuleNotFound(String, Option<String>),
    UnresolvedDependency(String, String),
    SchemaScan(String),
    YangParse(yang3::Error),
    Io(PathBuf, std::io::Error),
    GraphCorrupted(String),
    AlreadyInstalled(String),
    UnknownUser(String),
    UnknownGroup(String),
    InvalidPermissions(String),
    DaemonNotReachable,
    Daemon(SrError, Option<String>),
    RestartNeeded(String),
}

// ===== impl Error =====

impl Error {
    /// Wire result code corresponding to this error.
    pub fn sr_error(&self) -> SrError {
        match self {
            Error::InvalidArgument(..)
            | Error::InvalidPermissions(..)
            | Error::UnresolvedDependency(..) => SrError::InvalArg,
            Error::ModuleNotFound(..)
            | Error::UnknownUser(..)
            | Error::UnknownGroup(..) => SrError::NotFound,
            Error::SchemaScan(..) | Error::YangParse(..) => SrError::InvalArg,
            Error::Io(_, error) => match error.kind() {
                std::io::ErrorKind::NotFound => SrError::NotFound,
                std::io::ErrorKind::PermissionDenied => SrError::Unauthorized,
                _ => SrError::Io,
            },
            Error::GraphCorrupted(..) => SrError::Internal,
            Error::AlreadyInstalled(..) => SrError::DataExists,
            Error::DaemonNotReachable => SrError::Io,
            Error::Daemon(error, _) => *error,
            Error::RestartNeeded(..) => SrError::RestartNeeded,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidArgument(msg) => {
                write!(f, "invalid argument: {msg}")
            }
            Error::ModuleNotFound(name, revision) => {
                write!(
                    f,
                    "module '{}@{}' is not installed",
                    name,
                    revision.as_deref().unwrap_or("<latest>")
                )
            }
            Error::UnresolvedDependency(module, dependency) => {
                write!(
                    f,
                    "unable to resolve the dependency of '{module}' on '{dependency}'"
                )
            }
            Error::SchemaScan(msg) => {
                write!(f, "failed to scan schema file: {msg}")
            }
            Error::YangParse(error) => {
                write!(f, "failed to parse YANG module: {error}")
            }
            Error::Io(path, error) => {
                write!(f, "I/O error on '{}': {}", path.display(), error)
            }
            Error::GraphCorrupted(msg) => {
                write!(f, "dependency graph is corrupted: {msg}")
            }
            Error::AlreadyInstalled(name) => {
                write!(f, "module '{name}' is already installed")
            }
            Error::UnknownUser(user) => {
                write!(f, "unable to obtain UID for the user '{user}'")
            }
            Error::UnknownGroup(group) => {
                write!(f, "unable to obtain GID for the group '{group}'")
            }
            Error::InvalidPermissions(perms) => {
                write!(f, "invalid permissions '{perms}'")
            }
            Error::DaemonNotReachable => {
                write!(f, "unable to connect to the daemon")
            }
            Error::Daemon(error, message) => match message {
                Some(message) => {
                    write!(f, "daemon error: {error} ({message})")
                }
                None => write!(f, "daemon error: {error}"),
            },
            Error::RestartNeeded(module) => {
                write!(
                    f,
                    "the daemon must be restarted before the previously \
                     uninstalled module '{module}' can be reinstalled"
                )
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<yang3::Error> for Error {
    fn from(error: yang3::Error) -> Error {
        Error::YangParse(error)
    }
}
