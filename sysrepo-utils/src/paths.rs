//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

//! Filesystem layout of a repository.

use std::path::{Path, PathBuf};

/// Configuration datastores.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Datastore {
    #[default]
    Startup,
    Running,
    Candidate,
}

/// Schema file formats.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SchemaFormat {
    Yang,
    Yin,
}

/// Extensions of the per-module data files, in creation order.
pub const DATA_FILE_EXTS: [&str; 7] = [
    ".startup",
    ".running",
    ".candidate",
    ".persist",
    ".startup.lock",
    ".running.lock",
    ".candidate.lock",
];

pub const PERSIST_FILE_EXT: &str = ".persist";

/// Resolved repository directories.
///
/// The compiled-in defaults serve the system repository; `with_root`
/// retargets everything under a single prefix (custom repository, used by
/// the test suites).
#[derive(Clone, Debug)]
pub struct Repository {
    pub schema_dir: PathBuf,
    pub data_dir: PathBuf,
    pub internal_dir: PathBuf,
    pub sockets_dir: PathBuf,
    pub daemon_socket: PathBuf,
    pub custom: bool,
}

// ===== impl Datastore =====

impl Datastore {
    pub fn file_ext(&self) -> &'static str {
        match self {
            Datastore::Startup => ".startup",
            Datastore::Running => ".running",
            Datastore::Candidate => ".candidate",
        }
    }
}

// ===== impl SchemaFormat =====

impl SchemaFormat {
    pub fn file_ext(&self) -> &'static str {
        match self {
            SchemaFormat::Yang => ".yang",
            SchemaFormat::Yin => ".yin",
        }
    }

    /// Classifies a schema file by its extension.
    pub fn from_path(path: &Path) -> Option<SchemaFormat> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yang") => Some(SchemaFormat::Yang),
            Some("yin") => Some(SchemaFormat::Yin),
            _ => None,
        }
    }
}

// ===== impl Repository =====

impl Repository {
    const DFLT_SCHEMA_DIR: &'static str = "/etc/sysrepo/yang";
    const DFLT_DATA_DIR: &'static str = "/etc/sysrepo/data";
    const DFLT_INTERNAL_DIR: &'static str = "/etc/sysrepo/data/internal";
    const DFLT_SOCKETS_DIR: &'static str = "/var/run/sysrepo-subscriptions";
    const DFLT_DAEMON_SOCKET: &'static str = "/var/run/sysrepod.sock";

    /// Retargets every directory under a single prefix.
    pub fn with_root<P: AsRef<Path>>(root: P) -> Repository {
        let root = root.as_ref();
        Repository {
            schema_dir: root.join("yang"),
            data_dir: root.join("data"),
            internal_dir: root.join("data").join("internal"),
            sockets_dir: root.join("sockets"),
            daemon_socket: root.join("sysrepod.sock"),
            custom: true,
        }
    }

    /// Canonical schema file path: `{schema_dir}/{name}[@{revision}].{ext}`.
    pub fn schema_file(
        &self,
        module: &str,
        revision: Option<&str>,
        format: SchemaFormat,
    ) -> PathBuf {
        let mut file = module.to_owned();
        if let Some(revision) = revision {
            file.push('@');
            file.push_str(revision);
        }
        file.push_str(format.file_ext());
        self.schema_dir.join(file)
    }

    /// Data file path for the given datastore.
    pub fn data_file(&self, module: &str, ds: Datastore) -> PathBuf {
        self.data_dir.join(format!("{}{}", module, ds.file_ext()))
    }

    pub fn persist_file(&self, module: &str) -> PathBuf {
        self.data_dir.join(format!("{}{}", module, PERSIST_FILE_EXT))
    }

    /// All data files of a module, existing or not.
    pub fn data_files(&self, module: &str) -> Vec<PathBuf> {
        DATA_FILE_EXTS
            .iter()
            .map(|ext| self.data_dir.join(format!("{}{}", module, ext)))
            .collect()
    }

    /// Per-module subscription socket directory.
    pub fn socket_dir(&self, module: &str) -> PathBuf {
        self.sockets_dir.join(module)
    }

    /// Dependency-graph file, the single source of truth for the set of
    /// installed modules.
    pub fn graph_file(&self) -> PathBuf {
        self.internal_dir.join("dependencies.json")
    }

    /// Lock companion of the graph file. The advisory write lock on it is
    /// the cross-process contract between the control tool and the daemon.
    pub fn graph_lock_file(&self) -> PathBuf {
        self.internal_dir.join("dependencies.lock")
    }
}

impl Default for Repository {
    fn default() -> Repository {
        Repository {
            schema_dir: Repository::DFLT_SCHEMA_DIR.into(),
            data_dir: Repository::DFLT_DATA_DIR.into(),
            internal_dir: Repository::DFLT_INTERNAL_DIR.into(),
            sockets_dir: Repository::DFLT_SOCKETS_DIR.into(),
            daemon_socket: Repository::DFLT_DAEMON_SOCKET.into(),
            custom: false,
        }
    }
}
