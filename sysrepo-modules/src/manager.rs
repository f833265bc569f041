//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

//! Module repository manager.
//!
//! Orchestrates module installation, removal and maintenance so that the
//! dependency graph, the schema files and the data files always describe
//! the same set of installed modules. All mutations run under the graph
//! lock; the ordering rules are load-bearing: on install the graph is
//! committed before the daemon hears about the module, on uninstall the
//! daemon may veto the removal before any file is deleted.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use sysrepo_proto::catalog::{
    ModuleState, RevisionInfo, SchemaDescriptor, SubmoduleInfo,
};
use sysrepo_utils::SrError;
use sysrepo_utils::paths::Repository;
use tracing::{debug, info, warn};
use yang3::context::{Context, ContextFlags};

use crate::daemon::DaemonClient;
use crate::error::{Error, Result};
use crate::graph::{
    DependencyEdge, DependencyKind, GraphCtx, ModuleVertex, SubmoduleRecord,
};
use crate::scan::{self, ModuleInfo};
use crate::store;

/// Module repository manager.
#[derive(Debug)]
pub struct ModuleMgr {
    repo: Repository,
}

// Transitive dependency closure of a module being installed.
#[derive(Debug, Default)]
struct Closure {
    // Imported modules, in resolution order.
    imports: Vec<(ModuleInfo, PathBuf)>,
    // Submodules keyed by the including module.
    submodules: HashMap<String, Vec<(ModuleInfo, PathBuf)>>,
}

// Side effects performed so far by an in-progress install, for reversal.
#[derive(Debug, Default)]
struct InstallState {
    copied_files: Vec<PathBuf>,
    data_modules: Vec<String>,
    graph_flushed: bool,
}

// ===== impl ModuleMgr =====

impl ModuleMgr {
    pub fn new(repo: Repository) -> ModuleMgr {
        ModuleMgr { repo }
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Enumerates the installed modules.
    pub fn list(&self) -> Result<Vec<SchemaDescriptor>> {
        let graph = GraphCtx::init(&self.repo)?;
        Ok(graph.modules().iter().map(vertex_descriptor).collect())
    }

    /// Installs a new module from the given schema file, along with every
    /// dependency the module resolves to.
    pub fn install(
        &self,
        yang: Option<&Path>,
        yin: Option<&Path>,
        owner: Option<&str>,
        permissions: Option<&str>,
        search_dir: Option<&Path>,
    ) -> Result<()> {
        let src = yang.or(yin).ok_or_else(|| {
            Error::InvalidArgument(
                "either a YANG or a YIN file must be specified".to_owned(),
            )
        })?;
        let info = scan::scan_module_file(src)?;
        if info.is_submodule {
            return Err(Error::InvalidArgument(format!(
                "'{}' is a submodule and cannot be installed on its own",
                info.name
            )));
        }

        // Search the input file's directory unless told otherwise.
        let mut search_dirs = Vec::new();
        if let Some(dir) = src.parent() {
            search_dirs.push(dir.to_path_buf());
        }
        if let Some(dir) = search_dir {
            search_dirs.push(dir.to_path_buf());
        }

        info!(module = %info.name, src = %src.display(), "installing module");
        let mut state = InstallState::default();
        match self.try_install(&info, src, &search_dirs, owner, permissions,
            &mut state)
        {
            Ok(()) => Ok(()),
            Err(error) => {
                warn!(module = %info.name, %error,
                    "install failed, reverting");
                self.rollback_install(&info, &state);
                Err(error)
            }
        }
    }

    /// Removes a module installed earlier, cascading over dependencies that
    /// lose their last dependent.
    pub fn uninstall(
        &self,
        module: &str,
        revision: Option<&str>,
    ) -> Result<()> {
        info!(module, "uninstalling module");
        let mut graph = GraphCtx::init(&self.repo)?;
        let vertex = graph
            .get_module(module, revision)
            .ok_or_else(|| {
                Error::ModuleNotFound(
                    module.to_owned(),
                    revision.map(str::to_owned),
                )
            })?
            .clone();

        let implicitly_removed = graph.remove_module(module, revision)?;

        // The daemon is asked first so it can refuse while the module is in
        // active use; on failure the graph edit is simply not committed.
        if !self.repo.custom
            && let Some(mut client) = DaemonClient::connect(&self.repo, false)?
        {
            let result = client.module_install(
                &vertex.name,
                vertex.revision.as_deref(),
                None,
                false,
            );
            client.close();
            match result {
                Ok(()) | Err(Error::Daemon(SrError::NotFound, _)) => (),
                Err(error) => return Err(error),
            }
        }

        graph.flush()?;
        drop(graph);

        // Past this point the module is gone from the graph; file removal
        // failures leave the most-cleaned-up reachable state.
        store::remove_schema_files(
            &self.repo,
            &vertex.name,
            vertex.revision.as_deref(),
        );
        for submodule in &vertex.submodules {
            remove_schema_path(&submodule.filepath);
        }
        store::remove_data_files(&self.repo, &vertex.name);
        for key in &implicitly_removed {
            info!(module = %key.name,
                "automatically removing no longer needed module");
            remove_schema_path(&key.filepath);
            store::remove_schema_files(
                &self.repo,
                &key.name,
                key.revision.as_deref(),
            );
            store::remove_data_files(&self.repo, &key.name);
        }

        info!(module, "uninstall completed");
        Ok(())
    }

    /// Starts tracking a module whose schema file is already present in the
    /// schema directory.
    pub fn init(
        &self,
        module: &str,
        revision: Option<&str>,
        owner: Option<&str>,
        permissions: Option<&str>,
    ) -> Result<()> {
        info!(module, "initializing module");
        let mut graph = GraphCtx::init(&self.repo)?;

        let src = self.find_installed_schema(module, revision).ok_or_else(
            || {
                Error::ModuleNotFound(
                    module.to_owned(),
                    revision.map(str::to_owned),
                )
            },
        )?;
        let info = scan::scan_module_file(&src)?;
        let search_dirs = vec![self.repo.schema_dir.clone()];
        self.staging_parse(&search_dirs, &info.name, info.latest_revision())?;
        let closure = self.resolve_closure(&search_dirs, &info)?;

        self.install_data(&info, &closure, owner, permissions, None)?;

        let vertex =
            self.build_vertex(&info, src.clone(), true, &closure)?;
        match graph.insert_module(vertex) {
            Ok(()) => (),
            Err(Error::AlreadyInstalled(_)) => {
                info!(module, "module is already tracked");
                return Ok(());
            }
            Err(error) => return Err(error),
        }
        for (dep, src) in &closure.imports {
            let vertex =
                self.build_vertex(dep, src.clone(), false, &closure)?;
            graph.insert_implicit(vertex);
        }
        graph.flush()?;

        info!(module, "init completed");
        Ok(())
    }

    /// Changes owner and/or permissions of every data file of a module.
    pub fn change(
        &self,
        module: &str,
        owner: Option<&str>,
        permissions: Option<&str>,
    ) -> Result<()> {
        if owner.is_none() && permissions.is_none() {
            return Err(Error::InvalidArgument(
                "either an owner or permissions must be specified".to_owned(),
            ));
        }
        let graph = GraphCtx::init(&self.repo)?;
        graph.get_module(module, None).ok_or_else(|| {
            Error::ModuleNotFound(module.to_owned(), None)
        })?;
        drop(graph);

        info!(module, "changing ownership/permissions");
        store::change_permissions(&self.repo, module, owner, permissions)
    }

    /// Enables or disables a feature, daemon first, then the stored module
    /// record.
    pub fn feature_change(
        &self,
        module: &str,
        feature: &str,
        enable: bool,
    ) -> Result<()> {
        info!(module, feature, enable, "changing feature state");
        let mut graph = GraphCtx::init(&self.repo)?;
        graph.get_module(module, None).ok_or_else(|| {
            Error::ModuleNotFound(module.to_owned(), None)
        })?;

        if !self.repo.custom {
            let mut client = DaemonClient::connect(&self.repo, true)?
                .ok_or(Error::DaemonNotReachable)?;
            let result = client.feature_enable(module, feature, enable);
            client.close();
            result?;
        }

        graph.set_feature(module, None, feature, enable)?;
        graph.flush()
    }

    // ===== install internals =====

    fn try_install(
        &self,
        info: &ModuleInfo,
        src: &Path,
        search_dirs: &[PathBuf],
        owner: Option<&str>,
        permissions: Option<&str>,
        state: &mut InstallState,
    ) -> Result<()> {
        // Exclusive graph lock precedes any side effect.
        let mut graph = GraphCtx::init(&self.repo)?;

        // Semantic validation through the YANG library.
        self.staging_parse(search_dirs, &info.name, info.latest_revision())?;

        // Resolve and copy the schema files.
        let closure = self.resolve_closure(search_dirs, info)?;
        let main_schema = store::install_schema_file(
            &self.repo,
            src,
            &info.name,
            info.latest_revision(),
        )?;
        if main_schema.copied {
            state.copied_files.push(main_schema.dst.clone());
        }
        for (dep, dep_src) in closure
            .imports
            .iter()
            .chain(closure.submodules.values().flatten())
        {
            let installed = store::install_schema_file(
                &self.repo,
                dep_src,
                &dep.name,
                dep.latest_revision(),
            )?;
            if installed.copied {
                state.copied_files.push(installed.dst);
            }
        }

        // Data files for every data-bearing module of the closure.
        self.install_data(info, &closure, owner, permissions, Some(state))?;

        // Graph update; an existing equivalent vertex means the module is
        // already installed and the operation is a no-op success.
        let vertex = self.build_vertex(
            info,
            main_schema.dst.clone(),
            true,
            &closure,
        )?;
        match graph.insert_module(vertex) {
            Ok(()) => (),
            Err(Error::AlreadyInstalled(_)) => {
                info!(module = %info.name,
                    "module is already installed, exiting");
                return Ok(());
            }
            Err(error) => return Err(error),
        }
        for (dep, dep_src) in &closure.imports {
            let filepath = self.repo.schema_file(
                &dep.name,
                dep.latest_revision(),
                sysrepo_utils::paths::SchemaFormat::from_path(dep_src)
                    .unwrap_or(sysrepo_utils::paths::SchemaFormat::Yang),
            );
            let vertex =
                self.build_vertex(dep, filepath, false, &closure)?;
            graph.insert_implicit(vertex);
        }
        graph.flush()?;
        state.graph_flushed = true;

        // Lock released before the daemon round-trip; the graph already
        // reflects the install when the daemon reads it.
        drop(graph);

        if !self.repo.custom
            && let Some(mut client) = DaemonClient::connect(&self.repo, false)?
        {
            info!("notifying the daemon about the change");
            let result = client.module_install(
                &info.name,
                info.latest_revision(),
                main_schema.dst.to_str(),
                true,
            );
            client.close();
            match result {
                Ok(()) => (),
                Err(Error::Daemon(SrError::RestartNeeded, _)) => {
                    return Err(Error::RestartNeeded(info.name.clone()));
                }
                Err(error) => return Err(error),
            }
        }

        info!(module = %info.name, "install completed");
        Ok(())
    }

    fn rollback_install(&self, info: &ModuleInfo, state: &InstallState) {
        for path in &state.copied_files {
            if let Err(error) = std::fs::remove_file(path)
                && error.kind() != std::io::ErrorKind::NotFound
            {
                warn!(path = %path.display(), %error,
                    "failed to revert schema file installation");
            }
        }
        for module in &state.data_modules {
            store::remove_data_files(&self.repo, module);
        }
        if state.graph_flushed {
            match GraphCtx::init(&self.repo) {
                Ok(mut graph) => {
                    let result = graph
                        .remove_module(&info.name, info.latest_revision())
                        .and_then(|_| graph.flush());
                    if let Err(error) = result {
                        warn!(%error, "failed to revert the graph update");
                    }
                }
                Err(error) => {
                    warn!(%error, "failed to re-open the dependency graph");
                }
            }
        }
    }

    // Creates data files (or the bare persist file) and applies ownership
    // for the module and every data-bearing import.
    fn install_data(
        &self,
        info: &ModuleInfo,
        closure: &Closure,
        owner: Option<&str>,
        permissions: Option<&str>,
        mut state: Option<&mut InstallState>,
    ) -> Result<()> {
        let mut modules = vec![info];
        modules.extend(closure.imports.iter().map(|(dep, _)| dep));
        for minfo in modules {
            if minfo.has_data {
                debug!(module = %minfo.name, "installing data files");
                store::create_data_files(&self.repo, &minfo.name)?;
                if let Some(state) = state.as_deref_mut() {
                    state.data_modules.push(minfo.name.clone());
                }
                store::change_permissions(
                    &self.repo,
                    &minfo.name,
                    owner,
                    permissions,
                )?;
            } else if minfo.name == info.name && !minfo.features.is_empty() {
                // Feature state still needs a persist file.
                store::create_persist_file(&self.repo, &minfo.name)?;
                if let Some(state) = state.as_deref_mut() {
                    state.data_modules.push(minfo.name.clone());
                }
            } else {
                debug!(module = %minfo.name,
                    "skipping installation of data files");
            }
        }
        Ok(())
    }

    // Validates that the module loads cleanly, resolving its dependencies
    // from the given search directories.
    fn staging_parse(
        &self,
        search_dirs: &[PathBuf],
        module: &str,
        revision: Option<&str>,
    ) -> Result<()> {
        let mut ctx = Context::new(ContextFlags::NO_YANGLIBRARY)?;
        for dir in search_dirs {
            ctx.set_searchdir(dir)?;
        }
        ctx.load_module(module, revision, &[])?;
        Ok(())
    }

    // Resolves the transitive import/include closure of a module from the
    // search directories, via the statement scanner.
    fn resolve_closure(
        &self,
        search_dirs: &[PathBuf],
        root: &ModuleInfo,
    ) -> Result<Closure> {
        let mut closure = Closure::default();
        let mut visited = HashSet::new();
        visited.insert(root.name.clone());

        let mut queue = VecDeque::new();
        queue.push_back(root.clone());
        while let Some(minfo) = queue.pop_front() {
            for include in &minfo.includes {
                if !visited.insert(include.clone()) {
                    continue;
                }
                debug!(module = %minfo.name, submodule = %include,
                    "resolving dependency");
                let src = store::find_schema_source(search_dirs, include)
                    .ok_or_else(|| {
                        Error::UnresolvedDependency(
                            minfo.name.clone(),
                            include.clone(),
                        )
                    })?;
                let sub_info = scan::scan_module_file(&src)?;
                // A submodule belongs to the module that includes it.
                let owner = sub_info
                    .belongs_to
                    .clone()
                    .unwrap_or_else(|| minfo.name.clone());
                queue.push_back(sub_info.clone());
                closure
                    .submodules
                    .entry(owner)
                    .or_default()
                    .push((sub_info, src));
            }
            for import in &minfo.imports {
                if scan::is_builtin_module(import)
                    || !visited.insert(import.clone())
                {
                    continue;
                }
                debug!(module = %minfo.name, import = %import,
                    "resolving dependency");
                let src = store::find_schema_source(search_dirs, import)
                    .ok_or_else(|| {
                        Error::UnresolvedDependency(
                            minfo.name.clone(),
                            import.clone(),
                        )
                    })?;
                let dep_info = scan::scan_module_file(&src)?;
                queue.push_back(dep_info.clone());
                closure.imports.push((dep_info, src));
            }
        }
        Ok(closure)
    }

    fn build_vertex(
        &self,
        info: &ModuleInfo,
        filepath: PathBuf,
        implemented: bool,
        closure: &Closure,
    ) -> Result<ModuleVertex> {
        let mut dependencies = Vec::new();
        for import in &info.imports {
            if scan::is_builtin_module(import) {
                continue;
            }
            dependencies.push(DependencyEdge {
                kind: DependencyKind::Import,
                name: import.clone(),
            });
        }
        for include in &info.includes {
            dependencies.push(DependencyEdge {
                kind: DependencyKind::Include,
                name: include.clone(),
            });
        }

        let submodules = closure
            .submodules
            .get(&info.name)
            .map(|submodules| {
                submodules
                    .iter()
                    .map(|(sub_info, _)| SubmoduleRecord {
                        name: sub_info.name.clone(),
                        revision: sub_info
                            .latest_revision()
                            .map(str::to_owned),
                        filepath: self
                            .repo
                            .schema_file(
                                &sub_info.name,
                                sub_info.latest_revision(),
                                sysrepo_utils::paths::SchemaFormat::Yang,
                            )
                            .display()
                            .to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(ModuleVertex {
            name: info.name.clone(),
            revision: info.latest_revision().map(str::to_owned),
            ns: info.namespace.clone(),
            prefix: info.prefix.clone(),
            filepath: filepath.display().to_string(),
            implemented,
            has_data: info.has_data,
            submodules,
            enabled_features: Vec::new(),
            dependencies,
        })
    }

    // Locates the schema file of a module already present in the schema
    // directory, preferring an exact revision match.
    fn find_installed_schema(
        &self,
        module: &str,
        revision: Option<&str>,
    ) -> Option<PathBuf> {
        use sysrepo_utils::paths::SchemaFormat;
        if let Some(revision) = revision {
            for format in [SchemaFormat::Yang, SchemaFormat::Yin] {
                let path =
                    self.repo.schema_file(module, Some(revision), format);
                if path.exists() {
                    return Some(path);
                }
            }
        }
        store::find_schema_source(
            std::slice::from_ref(&self.repo.schema_dir),
            module,
        )
    }
}

// ===== helper functions =====

fn vertex_descriptor(vertex: &ModuleVertex) -> SchemaDescriptor {
    let mut revision = RevisionInfo {
        revision: vertex.revision.clone(),
        ..Default::default()
    };
    if vertex.filepath.ends_with(".yin") {
        revision.file_path_yin = Some(vertex.filepath.clone());
    } else {
        revision.file_path_yang = Some(vertex.filepath.clone());
    }

    SchemaDescriptor {
        module_name: vertex.name.clone(),
        ns: vertex.ns.clone().unwrap_or_default(),
        prefix: vertex.prefix.clone().unwrap_or_default(),
        revision,
        submodules: vertex
            .submodules
            .iter()
            .map(|submodule| SubmoduleInfo {
                name: submodule.name.clone(),
                revision: RevisionInfo {
                    revision: submodule.revision.clone(),
                    file_path_yang: Some(submodule.filepath.clone()),
                    ..Default::default()
                },
            })
            .collect(),
        enabled_features: vertex.enabled_features.clone(),
        state: if vertex.implemented {
            ModuleState::Implemented
        } else {
            ModuleState::Imported
        },
    }
}

fn remove_schema_path(filepath: &str) {
    if let Err(error) = std::fs::remove_file(filepath)
        && error.kind() != std::io::ErrorKind::NotFound
    {
        warn!(path = %filepath, %error, "failed to remove schema file");
    }
}
