//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use nix::unistd::{Gid, Group, Uid, User, getgid, getuid};
use sysrepo_modules::{Error, ModuleMgr, store};
use sysrepo_proto::catalog::ModuleState;
use sysrepo_utils::SrError;
use sysrepo_utils::paths::{Datastore, Repository};
use tempfile::TempDir;

const ALPHA: &str = r#"module test-alpha {
  yang-version 1.1;
  namespace "urn:test:alpha";
  prefix al;

  revision 2024-01-10 {
    description "Initial revision.";
  }

  container system {
    leaf hostname {
      type string;
    }
  }
}
"#;

const BETA: &str = r#"module test-beta {
  yang-version 1.1;
  namespace "urn:test:beta";
  prefix bt;

  import test-alpha {
    prefix al;
  }

  revision 2024-02-20 {
    description "Initial revision.";
  }

  augment "/al:system" {
    leaf location {
      type string;
    }
  }
}
"#;

struct TestRepo {
    _dir: TempDir,
    src_dir: PathBuf,
    mgr: ModuleMgr,
}

fn test_repo() -> TestRepo {
    let dir = TempDir::new().unwrap();
    let src_dir = dir.path().join("src");
    std::fs::create_dir_all(&src_dir).unwrap();
    std::fs::write(src_dir.join("test-alpha.yang"), ALPHA).unwrap();
    std::fs::write(src_dir.join("test-beta.yang"), BETA).unwrap();

    let mgr = ModuleMgr::new(Repository::with_root(dir.path()));
    TestRepo {
        _dir: dir,
        src_dir,
        mgr,
    }
}

fn file_mode(path: &Path) -> u32 {
    std::fs::metadata(path).unwrap().permissions().mode() & 0o777
}

fn current_owner_spec() -> String {
    let user = User::from_uid(getuid()).unwrap().unwrap();
    let group = Group::from_gid(getgid()).unwrap().unwrap();
    format!("{}:{}", user.name, group.name)
}

#[test]
fn test_install_and_list() {
    let repo = test_repo();
    repo.mgr
        .install(
            Some(&repo.src_dir.join("test-alpha.yang")),
            None,
            None,
            None,
            None,
        )
        .unwrap();

    // Schema file landed under its canonical name, data files exist.
    let paths = repo.mgr.repository();
    assert!(
        paths
            .schema_dir
            .join("test-alpha@2024-01-10.yang")
            .exists()
    );
    assert!(paths.data_file("test-alpha", Datastore::Startup).exists());
    assert!(paths.data_file("test-alpha", Datastore::Running).exists());
    assert!(paths.persist_file("test-alpha").exists());

    let schemas = repo.mgr.list().unwrap();
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas[0].module_name, "test-alpha");
    assert_eq!(schemas[0].ns, "urn:test:alpha");
    assert_eq!(schemas[0].prefix, "al");
    assert_eq!(schemas[0].revision.revision.as_deref(), Some("2024-01-10"));
    assert_eq!(schemas[0].state, ModuleState::Implemented);
    assert!(schemas[0].submodules.is_empty());
}

#[test]
fn test_install_idempotent() {
    let repo = test_repo();
    let yang = repo.src_dir.join("test-alpha.yang");
    repo.mgr.install(Some(&yang), None, None, None, None).unwrap();

    let graph_file = repo.mgr.repository().graph_file();
    let graph_before = std::fs::read_to_string(&graph_file).unwrap();

    // Re-installing the same module succeeds without side effects.
    repo.mgr.install(Some(&yang), None, None, None, None).unwrap();
    let graph_after = std::fs::read_to_string(&graph_file).unwrap();
    assert_eq!(graph_before, graph_after);
    assert!(
        repo.mgr
            .repository()
            .data_file("test-alpha", Datastore::Startup)
            .exists()
    );
}

#[test]
fn test_uninstall_dependency_ordering() {
    let repo = test_repo();
    repo.mgr
        .install(
            Some(&repo.src_dir.join("test-alpha.yang")),
            None,
            None,
            None,
            None,
        )
        .unwrap();
    repo.mgr
        .install(
            Some(&repo.src_dir.join("test-beta.yang")),
            None,
            None,
            None,
            None,
        )
        .unwrap();

    let schemas = repo.mgr.list().unwrap();
    assert_eq!(schemas.len(), 2);

    // test-beta imports test-alpha: removing the dependency first is
    // rejected and nothing is deleted.
    let error = repo.mgr.uninstall("test-alpha", None).unwrap_err();
    assert_eq!(error.sr_error(), SrError::InvalArg);
    assert!(
        repo.mgr
            .repository()
            .schema_dir
            .join("test-alpha@2024-01-10.yang")
            .exists()
    );
    assert_eq!(repo.mgr.list().unwrap().len(), 2);

    // Removing in dependency order cleans everything up.
    repo.mgr.uninstall("test-beta", None).unwrap();
    let schemas = repo.mgr.list().unwrap();
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas[0].module_name, "test-alpha");

    repo.mgr.uninstall("test-alpha", None).unwrap();
    assert!(repo.mgr.list().unwrap().is_empty());
    let paths = repo.mgr.repository();
    assert!(
        !paths.schema_dir.join("test-alpha@2024-01-10.yang").exists()
    );
    assert!(!paths.data_file("test-alpha", Datastore::Startup).exists());
}

#[test]
fn test_uninstall_cascades_implicit_dependencies() {
    let repo = test_repo();
    // Installing only test-beta pulls test-alpha in as an implicit
    // dependency.
    repo.mgr
        .install(
            Some(&repo.src_dir.join("test-beta.yang")),
            None,
            None,
            None,
            None,
        )
        .unwrap();

    let schemas = repo.mgr.list().unwrap();
    assert_eq!(schemas.len(), 2);
    let alpha = schemas
        .iter()
        .find(|schema| schema.module_name == "test-alpha")
        .unwrap();
    assert_eq!(alpha.state, ModuleState::Imported);

    // Removing the only dependent rides the dependency out as well.
    repo.mgr.uninstall("test-beta", None).unwrap();
    assert!(repo.mgr.list().unwrap().is_empty());
    assert!(
        !repo
            .mgr
            .repository()
            .schema_dir
            .join("test-alpha@2024-01-10.yang")
            .exists()
    );
}

#[test]
fn test_uninstall_unknown_module() {
    let repo = test_repo();
    let error = repo.mgr.uninstall("no-such-module", None).unwrap_err();
    assert!(matches!(error, Error::ModuleNotFound(..)));
}

#[test]
fn test_init_tracks_present_schema() {
    let repo = test_repo();
    // Drop the schema file into the schema directory without tracking it.
    let paths = repo.mgr.repository();
    std::fs::create_dir_all(&paths.schema_dir).unwrap();
    std::fs::write(
        paths.schema_dir.join("test-alpha@2024-01-10.yang"),
        ALPHA,
    )
    .unwrap();
    assert!(repo.mgr.list().unwrap().is_empty());

    repo.mgr.init("test-alpha", None, None, None).unwrap();
    let schemas = repo.mgr.list().unwrap();
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas[0].module_name, "test-alpha");
    assert!(
        repo.mgr
            .repository()
            .data_file("test-alpha", Datastore::Startup)
            .exists()
    );
}

#[test]
fn test_change_permissions_and_owner() {
    let repo = test_repo();
    repo.mgr
        .install(
            Some(&repo.src_dir.join("test-alpha.yang")),
            None,
            None,
            None,
            None,
        )
        .unwrap();

    let owner = current_owner_spec();
    repo.mgr
        .change("test-alpha", Some(&owner), Some("600"))
        .unwrap();

    let paths = repo.mgr.repository();
    let uid = getuid().as_raw();
    let gid = getgid().as_raw();
    for path in paths.data_files("test-alpha") {
        assert_eq!(file_mode(&path), 0o600, "{}", path.display());
        let info = nix::sys::stat::stat(&path).unwrap();
        assert_eq!(info.st_uid, uid);
        assert_eq!(info.st_gid, gid);
    }
}

#[test]
fn test_change_requires_installed_module() {
    let repo = test_repo();
    let error = repo
        .mgr
        .change("test-alpha", None, Some("600"))
        .unwrap_err();
    assert!(matches!(error, Error::ModuleNotFound(..)));

    repo.mgr
        .install(
            Some(&repo.src_dir.join("test-alpha.yang")),
            None,
            None,
            None,
            None,
        )
        .unwrap();
    let error = repo.mgr.change("test-alpha", None, None).unwrap_err();
    assert_eq!(error.sr_error(), SrError::InvalArg);
}

#[test]
fn test_socket_dir_mirrors_data_permissions() {
    // Socket directory handling is skipped for custom repositories, so
    // exercise the store primitive directly.
    let dir = TempDir::new().unwrap();
    let repo = Repository {
        schema_dir: dir.path().join("yang"),
        data_dir: dir.path().join("data"),
        internal_dir: dir.path().join("data").join("internal"),
        sockets_dir: dir.path().join("sockets"),
        daemon_socket: dir.path().join("sysrepod.sock"),
        custom: false,
    };
    store::create_data_files(&repo, "test-alpha").unwrap();
    store::change_permissions(&repo, "test-alpha", None, Some("600")).unwrap();

    // Write permission on the data file implies execute permission on the
    // socket directory.
    let socket_dir = repo.socket_dir("test-alpha");
    assert!(socket_dir.is_dir());
    assert_eq!(file_mode(&socket_dir), 0o700);

    store::change_permissions(&repo, "test-alpha", None, Some("664")).unwrap();
    assert_eq!(file_mode(&socket_dir), 0o774);

    let info = nix::sys::stat::stat(&socket_dir).unwrap();
    let startup = nix::sys::stat::stat(
        &repo.data_file("test-alpha", Datastore::Startup),
    )
    .unwrap();
    assert_eq!(info.st_uid, startup.st_uid);
    assert_eq!(info.st_gid, startup.st_gid);
}

#[test]
fn test_feature_toggle_persists() {
    let repo = test_repo();
    repo.mgr
        .install(
            Some(&repo.src_dir.join("test-alpha.yang")),
            None,
            None,
            None,
            None,
        )
        .unwrap();

    repo.mgr
        .feature_change("test-alpha", "extra-leaves", true)
        .unwrap();
    let schemas = repo.mgr.list().unwrap();
    assert_eq!(schemas[0].enabled_features, vec!["extra-leaves"]);

    // Enabling twice keeps a single record.
    repo.mgr
        .feature_change("test-alpha", "extra-leaves", true)
        .unwrap();
    assert_eq!(repo.mgr.list().unwrap()[0].enabled_features.len(), 1);

    repo.mgr
        .feature_change("test-alpha", "extra-leaves", false)
        .unwrap();
    assert!(repo.mgr.list().unwrap()[0].enabled_features.is_empty());
}

#[test]
fn test_owner_spec_parsing() {
    let user = User::from_uid(getuid()).unwrap().unwrap();
    let group = Group::from_gid(getgid()).unwrap().unwrap();

    let spec = store::OwnerSpec::parse(&user.name).unwrap();
    assert_eq!(spec.uid, Some(Uid::from_raw(user.uid.as_raw())));
    assert_eq!(spec.gid, None);

    let spec =
        store::OwnerSpec::parse(&format!("{}:{}", user.name, group.name))
            .unwrap();
    assert_eq!(spec.uid, Some(user.uid));
    assert_eq!(spec.gid, Some(Gid::from_raw(group.gid.as_raw())));

    let spec = store::OwnerSpec::parse(&format!(":{}", group.name)).unwrap();
    assert_eq!(spec.uid, None);
    assert_eq!(spec.gid, Some(group.gid));

    assert!(store::OwnerSpec::parse("no-such-user-hopefully").is_err());
}
