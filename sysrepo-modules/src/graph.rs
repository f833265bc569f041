//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

//! Inter-module dependency graph.
//!
//! The graph file is the single source of truth for the set of installed
//! modules, shared between the control tool and the daemon. All access
//! happens under an exclusive advisory lock on the lock companion file,
//! acquired before the first side effect and held until the flush (or the
//! rollback) completes. The flush itself is write-temp + rename, the only
//! committing operation.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;

use nix::fcntl::{Flock, FlockArg};
use serde::{Deserialize, Serialize};
use sysrepo_utils::paths::Repository;
use tracing::debug;

use crate::error::{Error, Result};
use crate::scan;

/// Dependency edge kinds.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyKind {
    Import,
    Include,
    UsesGrouping,
    Augment,
}

/// Outgoing dependency edge of a module vertex.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DependencyEdge {
    pub kind: DependencyKind,
    pub name: String,
}

/// Submodule installed along with its parent module.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SubmoduleRecord {
    pub name: String,
    pub revision: Option<String>,
    pub filepath: String,
}

/// One vertex: a `(module-name, primary-revision)` pair plus everything the
/// repository tracks about it.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ModuleVertex {
    pub name: String,
    pub revision: Option<String>,
    pub ns: Option<String>,
    pub prefix: Option<String>,
    pub filepath: String,
    // Explicitly installed modules are implemented; modules pulled in as
    // dependencies are not and may ride out with their last dependent.
    pub implemented: bool,
    pub has_data: bool,
    pub submodules: Vec<SubmoduleRecord>,
    pub enabled_features: Vec<String>,
    pub dependencies: Vec<DependencyEdge>,
}

/// Key identifying a removed vertex, kept for file cleanup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModuleKey {
    pub name: String,
    pub revision: Option<String>,
    pub filepath: String,
}

/// Graph context: the loaded graph plus the held file lock.
pub struct GraphCtx {
    graph_file: PathBuf,
    modules: Vec<ModuleVertex>,
    // Exclusive advisory lock, held for the whole context lifetime.
    _lock: Flock<File>,
}

// ===== impl ModuleVertex =====

impl ModuleVertex {
    pub fn key(&self) -> ModuleKey {
        ModuleKey {
            name: self.name.clone(),
            revision: self.revision.clone(),
            filepath: self.filepath.clone(),
        }
    }
}

// ===== impl GraphCtx =====

impl GraphCtx {
    /// Opens the graph: creates the internal directory if needed, acquires
    /// the exclusive lock (blocking) and loads the current content.
    pub fn init(repo: &Repository) -> Result<GraphCtx> {
        std::fs::create_dir_all(&repo.internal_dir)
            .map_err(|error| Error::Io(repo.internal_dir.clone(), error))?;

        let lock_file = repo.graph_lock_file();
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_file)
            .map_err(|error| Error::Io(lock_file.clone(), error))?;
        let lock = Flock::lock(file, FlockArg::LockExclusive).map_err(
            |(_, errno)| {
                Error::Io(lock_file.clone(), std::io::Error::from(errno))
            },
        )?;
        debug!(path = %lock_file.display(), "dependency graph locked");

        let graph_file = repo.graph_file();
        let modules = match std::fs::read_to_string(&graph_file) {
            Ok(content) => serde_json::from_str(&content).map_err(|error| {
                Error::GraphCorrupted(error.to_string())
            })?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                Vec::new()
            }
            Err(error) => return Err(Error::Io(graph_file, error)),
        };

        let ctx = GraphCtx {
            graph_file,
            modules,
            _lock: lock,
        };
        ctx.check_integrity()?;
        Ok(ctx)
    }

    pub fn modules(&self) -> &[ModuleVertex] {
        &self.modules
    }

    /// Looks up a vertex; without a revision, the latest one wins.
    pub fn get_module(
        &self,
        name: &str,
        revision: Option<&str>,
    ) -> Option<&ModuleVertex> {
        self.modules
            .iter()
            .filter(|vertex| vertex.name == name)
            .filter(|vertex| {
                revision.is_none() || vertex.revision.as_deref() == revision
            })
            .max_by(|a, b| a.revision.cmp(&b.revision))
    }

    /// Inserts a new vertex. An existing vertex with the same name and
    /// revision reports `AlreadyInstalled`, which install treats as
    /// success.
    pub fn insert_module(&mut self, vertex: ModuleVertex) -> Result<()> {
        if self
            .modules
            .iter()
            .any(|v| v.name == vertex.name && v.revision == vertex.revision)
        {
            return Err(Error::AlreadyInstalled(vertex.name));
        }
        debug!(name = %vertex.name, "inserting module vertex");
        self.modules.push(vertex);
        Ok(())
    }

    /// Inserts a dependency vertex unless an equivalent one is present.
    pub fn insert_implicit(&mut self, vertex: ModuleVertex) {
        if self.modules.iter().any(|v| v.name == vertex.name) {
            return;
        }
        debug!(name = %vertex.name, "inserting implicit module vertex");
        self.modules.push(vertex);
    }

    /// Removes a vertex and cascade-removes dependency vertices that no
    /// remaining module references. Returns the keys of the implicitly
    /// removed vertices.
    ///
    /// Fails with `InvalidArgument` when the vertex still has dependents, or
    /// when the removal would leave a dangling edge; the graph is left
    /// unchanged in both cases.
    pub fn remove_module(
        &mut self,
        name: &str,
        revision: Option<&str>,
    ) -> Result<Vec<ModuleKey>> {
        let vertex = self
            .get_module(name, revision)
            .ok_or_else(|| {
                Error::ModuleNotFound(
                    name.to_owned(),
                    revision.map(str::to_owned),
                )
            })?
            .clone();

        // Removing a module someone still depends on would leave the
        // repository with unresolved inter-module dependencies.
        if self.dependents_of(&vertex.name).next().is_some() {
            return Err(Error::InvalidArgument(format!(
                "module '{}' is required by other installed modules",
                vertex.name
            )));
        }

        let mut modules = self.modules.clone();
        modules.retain(|v| {
            !(v.name == vertex.name && v.revision == vertex.revision)
        });

        // Garbage-collect dependency vertices that lost their last
        // dependent.
        let mut implicitly_removed = Vec::new();
        loop {
            let Some(pos) = modules.iter().position(|v| {
                !v.implemented
                    && !modules.iter().any(|other| {
                        other
                            .dependencies
                            .iter()
                            .any(|edge| edge.name == v.name)
                    })
            }) else {
                break;
            };
            implicitly_removed.push(modules[pos].key());
            modules.remove(pos);
        }

        // Every surviving edge must still resolve.
        for v in &modules {
            for edge in &v.dependencies {
                if !edge_resolves(&modules, &edge.name) {
                    return Err(Error::InvalidArgument(format!(
                        "removal would leave the dependency of '{}' on '{}' \
                         unresolved",
                        v.name, edge.name
                    )));
                }
            }
        }

        self.modules = modules;
        Ok(implicitly_removed)
    }

    /// Modules that depend on the given one.
    pub fn dependents_of<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a ModuleVertex> {
        self.modules.iter().filter(move |vertex| {
            vertex.implemented
                && vertex.dependencies.iter().any(|edge| edge.name == name)
        })
    }

    /// Commits the graph to disk: deterministic content, write-temp +
    /// rename.
    pub fn flush(&mut self) -> Result<()> {
        self.modules.sort_by(|a, b| {
            a.name.cmp(&b.name).then(a.revision.cmp(&b.revision))
        });
        let content = serde_json::to_string_pretty(&self.modules)
            .map_err(|error| Error::GraphCorrupted(error.to_string()))?;

        let tmp_file = self.graph_file.with_extension("json.tmp");
        std::fs::write(&tmp_file, content)
            .map_err(|error| Error::Io(tmp_file.clone(), error))?;
        std::fs::rename(&tmp_file, &self.graph_file)
            .map_err(|error| Error::Io(self.graph_file.clone(), error))?;
        debug!(path = %self.graph_file.display(), "dependency graph flushed");
        Ok(())
    }

    /// Switches one feature of a module on or off.
    pub fn set_feature(
        &mut self,
        name: &str,
        revision: Option<&str>,
        feature: &str,
        enabled: bool,
    ) -> Result<()> {
        let key = self
            .get_module(name, revision)
            .map(|vertex| (vertex.name.clone(), vertex.revision.clone()))
            .ok_or_else(|| {
                Error::ModuleNotFound(
                    name.to_owned(),
                    revision.map(str::to_owned),
                )
            })?;
        let vertex = self
            .modules
            .iter_mut()
            .find(|v| v.name == key.0 && v.revision == key.1)
            .unwrap();
        if enabled {
            if !vertex.enabled_features.iter().any(|f| f == feature) {
                vertex.enabled_features.push(feature.to_owned());
            }
        } else {
            vertex.enabled_features.retain(|f| f != feature);
        }
        Ok(())
    }

    // Edge targets named by the graph must exist.
    fn check_integrity(&self) -> Result<()> {
        for vertex in &self.modules {
            for edge in &vertex.dependencies {
                if !edge_resolves(&self.modules, &edge.name) {
                    return Err(Error::GraphCorrupted(format!(
                        "module '{}' depends on unknown module '{}'",
                        vertex.name, edge.name
                    )));
                }
            }
        }
        Ok(())
    }
}

// ===== helper functions =====

// An edge resolves against a module vertex, a submodule installed with one,
// or a module built into the YANG library.
fn edge_resolves(modules: &[ModuleVertex], name: &str) -> bool {
    scan::is_builtin_module(name)
        || modules.iter().any(|vertex| {
            vertex.name == name
                || vertex
                    .submodules
                    .iter()
                    .any(|submodule| submodule.name == name)
        })
}
