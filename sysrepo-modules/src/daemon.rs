//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

//! Transient client connection to a running daemon.
//!
//! The module repository is coordinated with the daemon through a short
//! lived Unix-socket session: connect, `SESSION_START`, one or two
//! operations, `SESSION_STOP`. Envelopes travel length-prefixed (4-byte
//! big-endian) in their protobuf encoding. The graph file stays the source
//! of truth; daemon notification is best-effort unless the caller requires
//! the daemon to be up.

use std::io::{Read, Write};
use std::os::unix::net::UnixStream;

use prost::Message;
use sysrepo_proto::wire::{Msg, MsgType, Operation};
use sysrepo_proto::{builder, validate};
use sysrepo_utils::SrError;
use sysrepo_utils::paths::Repository;
use tracing::{debug, warn};

use crate::error::{Error, Result};

const MAX_MSG_SIZE: u32 = 1 << 24;

/// Connected daemon session.
#[derive(Debug)]
pub struct DaemonClient {
    stream: UnixStream,
    session_id: u32,
}

// ===== impl DaemonClient =====

impl DaemonClient {
    /// Attempts to connect to the daemon and start a session.
    ///
    /// Returns `Ok(None)` when the daemon is unreachable and not required;
    /// with `required` set, an unreachable daemon is a hard failure.
    pub fn connect(
        repo: &Repository,
        required: bool,
    ) -> Result<Option<DaemonClient>> {
        let stream = match UnixStream::connect(&repo.daemon_socket) {
            Ok(stream) => stream,
            Err(error) => {
                debug!(socket = %repo.daemon_socket.display(), %error,
                    "daemon not reachable");
                if required {
                    return Err(Error::DaemonNotReachable);
                }
                return Ok(None);
            }
        };

        let mut client = DaemonClient {
            stream,
            session_id: 0,
        };
        let mut msg =
            builder::request(None, Operation::SessionStart, 0).unwrap();
        let req = msg.request.as_mut().unwrap();
        let start = req.session_start_req.as_mut().unwrap();
        start.user_name = nix::unistd::User::from_uid(nix::unistd::getuid())
            .ok()
            .flatten()
            .map(|user| user.name);

        let resp = client.roundtrip(msg, Operation::SessionStart)?;
        client.session_id = resp
            .response
            .as_ref()
            .and_then(|response| response.session_start_resp.as_ref())
            .map(|start| start.session_id)
            .unwrap_or_default();
        debug!(session_id = client.session_id, "daemon session started");
        Ok(Some(client))
    }

    /// Announces a module (un)installation.
    pub fn module_install(
        &mut self,
        module: &str,
        revision: Option<&str>,
        file_path: Option<&str>,
        installed: bool,
    ) -> Result<()> {
        let mut msg = builder::request(
            None,
            Operation::ModuleInstall,
            self.session_id,
        )
        .unwrap();
        let req = msg.request.as_mut().unwrap();
        let install = req.module_install_req.as_mut().unwrap();
        install.module_name = module.to_owned();
        install.revision = revision.map(str::to_owned);
        install.file_path = file_path.map(str::to_owned);
        install.installed = installed;

        self.roundtrip(msg, Operation::ModuleInstall).map(|_| ())
    }

    /// Announces a feature state change.
    pub fn feature_enable(
        &mut self,
        module: &str,
        feature: &str,
        enabled: bool,
    ) -> Result<()> {
        let mut msg = builder::request(
            None,
            Operation::FeatureEnable,
            self.session_id,
        )
        .unwrap();
        let req = msg.request.as_mut().unwrap();
        let enable = req.feature_enable_req.as_mut().unwrap();
        enable.module_name = module.to_owned();
        enable.feature_name = feature.to_owned();
        enable.enabled = enabled;

        self.roundtrip(msg, Operation::FeatureEnable).map(|_| ())
    }

    /// Ends the session; connection teardown is enough for the daemon to
    /// clean up, so failures are only logged.
    pub fn close(mut self) {
        if let Ok(msg) =
            builder::request(None, Operation::SessionStop, self.session_id)
            && let Err(error) = self.send(&msg)
        {
            warn!(%error, "failed to send session-stop");
        }
    }

    // Sends a request and receives its validated response.
    fn roundtrip(&mut self, msg: Msg, operation: Operation) -> Result<Msg> {
        self.send(&msg)?;
        let resp = self.receive()?;
        validate::validate(&resp, MsgType::Response, operation)
            .map_err(|error| Error::Daemon(error, None))?;

        let response = resp.response.as_ref().unwrap();
        if let Err(error) = SrError::from_code(response.result) {
            let message = response
                .errors
                .first()
                .and_then(|error| error.message.clone());
            return Err(Error::Daemon(error, message));
        }
        Ok(resp)
    }

    fn send(&mut self, msg: &Msg) -> Result<()> {
        let body = msg.encode_to_vec();
        let mut frame = Vec::with_capacity(body.len() + 4);
        frame.extend_from_slice(&(body.len() as u32).to_be_bytes());
        frame.extend_from_slice(&body);
        self.stream
            .write_all(&frame)
            .map_err(|_| Error::DaemonNotReachable)
    }

    fn receive(&mut self) -> Result<Msg> {
        let mut len = [0u8; 4];
        self.stream
            .read_exact(&mut len)
            .map_err(|_| Error::DaemonNotReachable)?;
        let len = u32::from_be_bytes(len);
        if len > MAX_MSG_SIZE {
            return Err(Error::Daemon(SrError::MalformedMsg, None));
        }
        let mut body = vec![0u8; len as usize];
        self.stream
            .read_exact(&mut body)
            .map_err(|_| Error::DaemonNotReachable)?;
        Msg::decode(body.as_slice())
            .map_err(|_| Error::Daemon(SrError::MalformedMsg, None))
    }
}
