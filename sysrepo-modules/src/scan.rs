//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

//! Statement-level scanner for YANG schema text.
//!
//! The YANG library validates modules semantically; the dependency graph
//! only needs statement-level facts (module identity, declared revisions,
//! import/include targets, feature names, whether the module carries data
//! nodes). Those are recovered directly from the schema text here.

use std::path::Path;
use std::sync::LazyLock as Lazy;

use regex::Regex;

use crate::error::{Error, Result};

// Modules provided by the YANG library itself; never copied or tracked.
pub const BUILTIN_MODULES: [&str; 4] =
    ["yang", "ietf-yang-metadata", "ietf-yang-library", "ietf-datastores"];

// Top-level statements that instantiate data nodes.
const DATA_STMTS: [&str; 8] = [
    "container",
    "list",
    "leaf",
    "leaf-list",
    "choice",
    "anydata",
    "anyxml",
    "uses",
];

static RE_MODULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(module|submodule)\s+([A-Za-z0-9_.-]+)").unwrap()
});
static RE_BELONGS_TO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"belongs-to\s+"?([A-Za-z0-9_.-]+)"?"#).unwrap()
});
static RE_NAMESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"namespace\s+"?([^"\s;]+)"?\s*;"#).unwrap()
});
static RE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"prefix\s+"?([A-Za-z0-9_.-]+)"?\s*;"#).unwrap()
});
static RE_REVISION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"revision\s+"?(\d{4}-\d{2}-\d{2})"?"#).unwrap()
});
static RE_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*import\s+"?([A-Za-z0-9_.-]+)"?"#).unwrap()
});
static RE_INCLUDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*include\s+"?([A-Za-z0-9_.-]+)"?"#).unwrap()
});
static RE_FEATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*feature\s+"?([A-Za-z0-9_.-]+)"?"#).unwrap()
});
static RE_STMT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+)\b").unwrap()
});

/// Statement-level facts of one schema file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ModuleInfo {
    pub name: String,
    pub is_submodule: bool,
    pub belongs_to: Option<String>,
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    // Declared revision dates, in declaration order.
    pub revisions: Vec<String>,
    pub imports: Vec<String>,
    pub includes: Vec<String>,
    pub features: Vec<String>,
    // Whether the module declares top-level data-bearing statements.
    pub has_data: bool,
}

// ===== impl ModuleInfo =====

impl ModuleInfo {
    /// Primary revision: the most recent declared revision date.
    pub fn latest_revision(&self) -> Option<&str> {
        self.revisions.iter().max().map(String::as_str)
    }
}

// ===== global functions =====

pub fn scan_module_file<P: AsRef<Path>>(path: P) -> Result<ModuleInfo> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|error| Error::Io(path.to_path_buf(), error))?;
    scan_module_text(&text)
}

pub fn scan_module_text(text: &str) -> Result<ModuleInfo> {
    let (kind, name) = RE_MODULE
        .captures(text)
        .map(|caps| (caps[1].to_owned(), caps[2].to_owned()))
        .ok_or_else(|| {
            Error::SchemaScan("no module or submodule statement".to_owned())
        })?;

    let capture =
        |re: &Regex| re.captures(text).map(|caps| caps[1].to_owned());
    let capture_all = |re: &Regex| {
        re.captures_iter(text).map(|caps| caps[1].to_owned()).collect()
    };

    Ok(ModuleInfo {
        name,
        is_submodule: kind == "submodule",
        belongs_to: capture(&RE_BELONGS_TO),
        namespace: capture(&RE_NAMESPACE),
        prefix: capture(&RE_PREFIX),
        revisions: capture_all(&RE_REVISION),
        imports: capture_all(&RE_IMPORT),
        includes: capture_all(&RE_INCLUDE),
        features: capture_all(&RE_FEATURE),
        has_data: has_toplevel_data(text),
    })
}

pub fn is_builtin_module(name: &str) -> bool {
    BUILTIN_MODULES.contains(&name)
}

// ===== helper functions =====

// Tracks brace depth to find statements at the module's top level. Only
// depth-1 statements matter, so string literals with braces inside leaf
// descriptions are rare enough to ignore after stripping quoted text.
fn has_toplevel_data(text: &str) -> bool {
    let mut depth = 0usize;
    for line in text.lines() {
        let line = strip_quoted(line);
        let trimmed = line.trim_start();
        if depth == 1
            && let Some(caps) = RE_STMT.captures(trimmed)
            && DATA_STMTS.contains(&&caps[1])
        {
            return true;
        }
        for ch in line.chars() {
            match ch {
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                _ => (),
            }
        }
    }
    false
}

// Removes double-quoted spans so braces inside strings don't skew the
// depth counter.
fn strip_quoted(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ch if !in_quotes => out.push(ch),
            _ => (),
        }
    }
    out
}
