//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

//! Schema and data file management.

use std::fs::OpenOptions;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use nix::sys::stat::stat;
use nix::unistd::{Gid, Group, Uid, User, chown};
use sysrepo_utils::paths::{Repository, SchemaFormat};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Outcome of a schema file installation.
#[derive(Clone, Debug)]
pub struct InstalledSchema {
    pub dst: PathBuf,
    // False when source and target were already the same file.
    pub copied: bool,
}

/// Resolved `user[:group]` owner specification.
#[derive(Clone, Copy, Debug, Default)]
pub struct OwnerSpec {
    pub uid: Option<Uid>,
    pub gid: Option<Gid>,
}

// ===== impl OwnerSpec =====

impl OwnerSpec {
    /// Parses `user`, `user:group` or `:group`.
    pub fn parse(owner: &str) -> Result<OwnerSpec> {
        let mut spec = OwnerSpec::default();
        let (user, group) = match owner.split_once(':') {
            Some((user, group)) => (user, Some(group)),
            None => (owner, None),
        };
        if !user.is_empty() {
            let user = User::from_name(user)
                .ok()
                .flatten()
                .ok_or_else(|| Error::UnknownUser(user.to_owned()))?;
            spec.uid = Some(user.uid);
        }
        if let Some(group) = group
            && !group.is_empty()
        {
            let group = Group::from_name(group)
                .ok()
                .flatten()
                .ok_or_else(|| Error::UnknownGroup(group.to_owned()))?;
            spec.gid = Some(group.gid);
        }
        Ok(spec)
    }
}

// ===== global functions =====

/// Whether two paths refer to the same file (same device and inode).
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (stat(a), stat(b)) {
        (Ok(a), Ok(b)) => a.st_dev == b.st_dev && a.st_ino == b.st_ino,
        _ => false,
    }
}

/// Copies a schema file into the schema directory under its canonical name,
/// skipping the copy when source and target are already the same file.
pub fn install_schema_file(
    repo: &Repository,
    src: &Path,
    module: &str,
    revision: Option<&str>,
) -> Result<InstalledSchema> {
    let format = SchemaFormat::from_path(src).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "'{}' is neither a YANG nor a YIN file",
            src.display()
        ))
    })?;
    std::fs::create_dir_all(&repo.schema_dir)
        .map_err(|error| Error::Io(repo.schema_dir.clone(), error))?;

    let dst = repo.schema_file(module, revision, format);
    if same_file(src, &dst) {
        debug!(module, "schema already installed, skipping");
        return Ok(InstalledSchema { dst, copied: false });
    }
    debug!(src = %src.display(), dst = %dst.display(), "installing schema");
    std::fs::copy(src, &dst)
        .map_err(|error| Error::Io(dst.clone(), error))?;
    Ok(InstalledSchema { dst, copied: true })
}

/// Locates the source file of a module in the given search directories:
/// `{name}.yang`, `{name}@{rev}.yang` or the `.yin` equivalents. The
/// highest-revision candidate wins.
pub fn find_schema_source(
    search_dirs: &[PathBuf],
    module: &str,
) -> Option<PathBuf> {
    let mut candidates = Vec::new();
    for dir in search_dirs {
        let Ok(entries) = std::fs::read_dir(dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if SchemaFormat::from_path(&path).is_none() {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
            else {
                continue;
            };
            if stem == module
                || stem
                    .strip_prefix(module)
                    .is_some_and(|rest| rest.starts_with('@'))
            {
                candidates.push(path);
            }
        }
    }
    candidates.into_iter().max()
}

/// Creates the startup/running/candidate/persist and lock files of a module
/// with mode 0666, leaving existing files untouched.
pub fn create_data_files(repo: &Repository, module: &str) -> Result<()> {
    std::fs::create_dir_all(&repo.data_dir)
        .map_err(|error| Error::Io(repo.data_dir.clone(), error))?;
    for path in repo.data_files(module) {
        create_file(&path)?;
    }
    Ok(())
}

/// Creates only the persist file, for modules that carry features but no
/// data nodes.
pub fn create_persist_file(repo: &Repository, module: &str) -> Result<()> {
    std::fs::create_dir_all(&repo.data_dir)
        .map_err(|error| Error::Io(repo.data_dir.clone(), error))?;
    create_file(&repo.persist_file(module))
}

/// Best-effort removal of every data file and the socket directory of a
/// module.
pub fn remove_data_files(repo: &Repository, module: &str) {
    for path in repo.data_files(module) {
        remove_file(&path);
    }
    remove_file(&repo.persist_file(module));
    let socket_dir = repo.socket_dir(module);
    if socket_dir.exists()
        && let Err(error) = std::fs::remove_dir_all(&socket_dir)
    {
        warn!(path = %socket_dir.display(), %error,
            "failed to remove socket directory");
    }
}

/// Removes both schema files of a module, tolerating absent ones.
pub fn remove_schema_files(
    repo: &Repository,
    module: &str,
    revision: Option<&str>,
) {
    for format in [SchemaFormat::Yang, SchemaFormat::Yin] {
        remove_file(&repo.schema_file(module, revision, format));
        // Revision-less name variant.
        if revision.is_some() {
            remove_file(&repo.schema_file(module, None, format));
        }
    }
}

/// Applies owner and/or permission changes to every data file of a module
/// and refreshes the socket directory accordingly.
pub fn change_permissions(
    repo: &Repository,
    module: &str,
    owner: Option<&str>,
    permissions: Option<&str>,
) -> Result<()> {
    if let Some(owner) = owner {
        let spec = OwnerSpec::parse(owner)?;
        for path in repo.data_files(module) {
            if !path.exists() {
                continue;
            }
            chown(&path, spec.uid, spec.gid)
                .map_err(|errno| io_error(&path, errno))?;
        }
    }

    if let Some(permissions) = permissions {
        let mode = parse_permissions(permissions)?;
        for path in repo.data_files(module) {
            if !path.exists() {
                continue;
            }
            std::fs::set_permissions(
                &path,
                std::fs::Permissions::from_mode(mode),
            )
            .map_err(|error| Error::Io(path.clone(), error))?;
        }
    }

    // The subscription socket directory mirrors the data file permissions.
    if !repo.custom {
        update_socket_dir_permissions(repo, module)?;
    }
    Ok(())
}

/// Creates the per-module socket directory and aligns its owner and mode
/// with the startup data file. Write permission on the data implies execute
/// (search) permission on the directory.
pub fn update_socket_dir_permissions(
    repo: &Repository,
    module: &str,
) -> Result<()> {
    let socket_dir = repo.socket_dir(module);
    std::fs::create_dir_all(&socket_dir)
        .map_err(|error| Error::Io(socket_dir.clone(), error))?;

    let startup = repo.data_file(module, Default::default());
    let info = stat(&startup).map_err(|errno| io_error(&startup, errno))?;

    let mut mode = info.st_mode as u32 & 0o777;
    if mode & 0o200 != 0 {
        mode |= 0o100;
    }
    if mode & 0o020 != 0 {
        mode |= 0o010;
    }
    if mode & 0o002 != 0 {
        mode |= 0o001;
    }
    std::fs::set_permissions(&socket_dir, std::fs::Permissions::from_mode(mode))
        .map_err(|error| Error::Io(socket_dir.clone(), error))?;
    chown(
        &socket_dir,
        Some(Uid::from_raw(info.st_uid)),
        Some(Gid::from_raw(info.st_gid)),
    )
    .map_err(|errno| io_error(&socket_dir, errno))?;
    Ok(())
}

/// `owner:group` of the module's startup file, numeric ids when the names
/// cannot be resolved, a blank when the file is absent.
pub fn module_owner_string(repo: &Repository, module: &str) -> String {
    let startup = repo.data_file(module, Default::default());
    let Ok(info) = stat(&startup) else {
        return String::new();
    };
    let user = User::from_uid(Uid::from_raw(info.st_uid))
        .ok()
        .flatten()
        .map(|user| user.name);
    let group = Group::from_gid(Gid::from_raw(info.st_gid))
        .ok()
        .flatten()
        .map(|group| group.name);
    match (user, group) {
        (Some(user), Some(group)) => format!("{}:{}", user, group),
        _ => format!("{}:{}", info.st_uid, info.st_gid),
    }
}

/// Octal permissions of the module's startup file, a blank when absent.
pub fn module_permissions_string(repo: &Repository, module: &str) -> String {
    let startup = repo.data_file(module, Default::default());
    match stat(&startup) {
        Ok(info) => format!("{:o}", info.st_mode as u32 & 0o777),
        Err(_) => String::new(),
    }
}

// ===== helper functions =====

fn parse_permissions(permissions: &str) -> Result<u32> {
    let mode = u32::from_str_radix(permissions, 8)
        .map_err(|_| Error::InvalidPermissions(permissions.to_owned()))?;
    if mode > 0o777 {
        return Err(Error::InvalidPermissions(permissions.to_owned()));
    }
    Ok(mode)
}

fn create_file(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)
        .map_err(|error| Error::Io(path.to_path_buf(), error))?;
    // Force 0666 regardless of the process umask; actual access control is
    // applied per module afterwards.
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o666))
        .map_err(|error| Error::Io(path.to_path_buf(), error))
}

fn remove_file(path: &Path) {
    if let Err(error) = std::fs::remove_file(path)
        && error.kind() != std::io::ErrorKind::NotFound
    {
        warn!(path = %path.display(), %error, "failed to remove file");
    }
}

fn io_error(path: &Path, errno: nix::errno::Errno) -> Error {
    Error::Io(path.to_path_buf(), std::io::Error::from(errno))
}
