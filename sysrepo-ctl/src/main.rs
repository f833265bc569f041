//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

use std::path::Path;

use clap::{App, Arg, ArgMatches};
use itertools::Itertools;
use sysrepo_modules::ModuleMgr;
use sysrepo_utils::paths::Repository;
use tracing::level_filters::LevelFilter;

fn init_tracing(level: Option<&str>) {
    // Levels follow the historical 0..4 scale; the default reports errors
    // only.
    let level = match level {
        Some("0") => LevelFilter::OFF,
        Some("2") => LevelFilter::WARN,
        Some("3") => LevelFilter::INFO,
        Some("4") => LevelFilter::DEBUG,
        _ => LevelFilter::ERROR,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_list(mgr: &ModuleMgr) -> Result<(), sysrepo_modules::Error> {
    let repo = mgr.repository();
    println!("Sysrepo schema directory: {}", repo.schema_dir.display());
    println!("Sysrepo data directory:   {}", repo.data_dir.display());
    println!("(Do not alter contents of these directories manually)");

    let schemas = mgr.list()?;

    println!();
    println!(
        "{:<30}| {:<11}| {:<20}| {:<12}| {:<30}| {}",
        "Module Name",
        "Revision",
        "Data Owner",
        "Permissions",
        "Submodules",
        "Enabled Features"
    );
    println!("{}", "-".repeat(129));
    for schema in &schemas {
        println!(
            "{:<30}| {:<11}| {:<20}| {:<12}| {:<30}| {}",
            schema.module_name,
            schema.revision.revision.as_deref().unwrap_or(""),
            sysrepo_modules::store::module_owner_string(
                repo,
                &schema.module_name
            ),
            sysrepo_modules::store::module_permissions_string(
                repo,
                &schema.module_name
            ),
            schema
                .submodules
                .iter()
                .map(|submodule| submodule.name.as_str())
                .join(" "),
            schema.enabled_features.iter().join(" "),
        );
    }
    println!();
    Ok(())
}

fn run(matches: &ArgMatches<'_>) -> Result<(), sysrepo_modules::Error> {
    let repo = match matches.value_of("0") {
        Some(root) => Repository::with_root(root),
        None => Repository::default(),
    };
    let mgr = ModuleMgr::new(repo);

    let module = matches.value_of("module");
    let revision = matches.value_of("revision");
    let owner = matches.value_of("owner");
    let permissions = matches.value_of("permissions");
    let search_dir = match matches.is_present("search-installed") {
        true => Some(mgr.repository().schema_dir.clone()),
        false => matches.value_of("search-dir").map(Into::into),
    };

    if matches.is_present("list") {
        cmd_list(&mgr)
    } else if matches.is_present("install") {
        mgr.install(
            matches.value_of("yang").map(Path::new),
            matches.value_of("yin").map(Path::new),
            owner,
            permissions,
            search_dir.as_deref(),
        )
    } else if matches.is_present("init") {
        let module = require_module(module)?;
        mgr.init(module, revision, owner, permissions)
    } else if matches.is_present("uninstall") {
        let module = require_module(module)?;
        mgr.uninstall(module, revision)
    } else if matches.is_present("change") {
        let module = require_module(module)?;
        mgr.change(module, owner, permissions)
    } else if let Some(feature) = matches.value_of("feature-enable") {
        let module = require_module(module)?;
        mgr.feature_change(module, feature, true)
    } else if let Some(feature) = matches.value_of("feature-disable") {
        let module = require_module(module)?;
        mgr.feature_change(module, feature, false)
    } else {
        Err(sysrepo_modules::Error::InvalidArgument(
            "no operation specified (see --help)".to_owned(),
        ))
    }
}

fn require_module(
    module: Option<&str>,
) -> Result<&str, sysrepo_modules::Error> {
    module.ok_or_else(|| {
        sysrepo_modules::Error::InvalidArgument(
            "a module must be specified (--module)".to_owned(),
        )
    })
}

fn main() {
    let matches = App::new("sysrepoctl")
        .version(clap::crate_version!())
        .about("Sysrepo control tool")
        .arg(
            Arg::with_name("list")
                .short("l")
                .long("list")
                .help("List installed modules"),
        )
        .arg(
            Arg::with_name("install")
                .short("i")
                .long("install")
                .help("Install a new module (--yang or --yin required)"),
        )
        .arg(
            Arg::with_name("init")
                .short("t")
                .long("init")
                .help("Initialize a module already present in the repository"),
        )
        .arg(
            Arg::with_name("uninstall")
                .short("u")
                .long("uninstall")
                .help("Uninstall a module (--module required)"),
        )
        .arg(
            Arg::with_name("change")
                .short("c")
                .long("change")
                .help("Change access rights of a module (--module required)"),
        )
        .arg(
            Arg::with_name("feature-enable")
                .short("e")
                .long("feature-enable")
                .value_name("feature")
                .help("Enable a feature within a module (--module required)"),
        )
        .arg(
            Arg::with_name("feature-disable")
                .short("d")
                .long("feature-disable")
                .value_name("feature")
                .help("Disable a feature within a module (--module required)"),
        )
        .arg(
            Arg::with_name("level")
                .short("L")
                .long("level")
                .value_name("0..4")
                .help("Set the verbosity of logging to stderr"),
        )
        .arg(
            Arg::with_name("yang")
                .short("g")
                .long("yang")
                .value_name("file")
                .help("Path to the YANG file of the module"),
        )
        .arg(
            Arg::with_name("yin")
                .short("n")
                .long("yin")
                .value_name("file")
                .help("Path to the YIN file of the module"),
        )
        .arg(
            Arg::with_name("module")
                .short("m")
                .long("module")
                .value_name("name")
                .help("Name of the module to operate on"),
        )
        .arg(
            Arg::with_name("revision")
                .short("r")
                .long("revision")
                .value_name("date")
                .help("Revision of the module to operate on"),
        )
        .arg(
            Arg::with_name("owner")
                .short("o")
                .long("owner")
                .value_name("user[:group]")
                .help("Owner of the module's data"),
        )
        .arg(
            Arg::with_name("permissions")
                .short("p")
                .long("permissions")
                .value_name("mode")
                .help("Octal access permissions of the module's data"),
        )
        .arg(
            Arg::with_name("search-dir")
                .short("s")
                .long("search-dir")
                .value_name("dir")
                .help("Directory to search for included/imported modules"),
        )
        .arg(
            Arg::with_name("search-installed")
                .short("S")
                .long("search-installed")
                .help("Resolve dependencies against installed schemas"),
        )
        .arg(
            // Retargets every directory under a single prefix; used by the
            // test suites.
            Arg::with_name("0")
                .long("0")
                .value_name("root")
                .hidden(true),
        )
        .get_matches();

    init_tracing(matches.value_of("level"));

    let listing = matches.is_present("list");
    match run(&matches) {
        Ok(()) => {
            if !listing {
                println!("Operation completed successfully.");
            }
        }
        Err(error) => {
            eprintln!("Error: {}.", error);
            println!("Operation failed.");
            std::process::exit(1);
        }
    }
}
