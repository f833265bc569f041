//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

//! Schema catalog descriptors and their wire mapping.

use crate::wire;

/// One schema revision: the revision date plus the schema file locations.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RevisionInfo {
    pub revision: Option<String>,
    pub file_path_yang: Option<String>,
    pub file_path_yin: Option<String>,
}

/// Submodule installed along with its parent module.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SubmoduleInfo {
    pub name: String,
    pub revision: RevisionInfo,
}

/// Lifecycle state of a module within the repository.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ModuleState {
    Uninstalled,
    Imported,
    #[default]
    Implemented,
}

/// Per-module schema descriptor, as listed by the catalog.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SchemaDescriptor {
    pub module_name: String,
    pub ns: String,
    pub prefix: String,
    pub revision: RevisionInfo,
    pub submodules: Vec<SubmoduleInfo>,
    pub enabled_features: Vec<String>,
    pub state: ModuleState,
}

// ===== impl ModuleState =====

impl ModuleState {
    pub fn name(&self) -> &'static str {
        match self {
            ModuleState::Uninstalled => "uninstalled",
            ModuleState::Imported => "imported",
            ModuleState::Implemented => "implemented",
        }
    }

    pub fn to_wire(self) -> wire::ModuleState {
        match self {
            ModuleState::Uninstalled => wire::ModuleState::Uninstalled,
            ModuleState::Imported => wire::ModuleState::Imported,
            ModuleState::Implemented => wire::ModuleState::Implemented,
        }
    }

    pub fn from_wire(code: i32) -> ModuleState {
        match wire::ModuleState::try_from(code) {
            Ok(wire::ModuleState::Uninstalled) => ModuleState::Uninstalled,
            Ok(wire::ModuleState::Imported) => ModuleState::Imported,
            _ => ModuleState::Implemented,
        }
    }
}

// ===== impl SchemaDescriptor =====

impl SchemaDescriptor {
    pub fn to_wire(&self) -> wire::Schema {
        wire::Schema {
            module_name: self.module_name.clone(),
            ns: self.ns.clone(),
            prefix: self.prefix.clone(),
            revision: Some(revision_to_wire(&self.revision)),
            submodules: self
                .submodules
                .iter()
                .map(|submodule| wire::SchemaSubmodule {
                    submodule_name: submodule.name.clone(),
                    revision: Some(revision_to_wire(&submodule.revision)),
                })
                .collect(),
            enabled_features: self.enabled_features.clone(),
            state: self.state.to_wire() as i32,
        }
    }

    pub fn from_wire(w: &wire::Schema) -> SchemaDescriptor {
        SchemaDescriptor {
            module_name: w.module_name.clone(),
            ns: w.ns.clone(),
            prefix: w.prefix.clone(),
            revision: w
                .revision
                .as_ref()
                .map(revision_from_wire)
                .unwrap_or_default(),
            submodules: w
                .submodules
                .iter()
                .map(|submodule| SubmoduleInfo {
                    name: submodule.submodule_name.clone(),
                    revision: submodule
                        .revision
                        .as_ref()
                        .map(revision_from_wire)
                        .unwrap_or_default(),
                })
                .collect(),
            enabled_features: w.enabled_features.clone(),
            state: ModuleState::from_wire(w.state),
        }
    }
}

// ===== global functions =====

/// Linear mapping of the installed-module list into its wire form.
pub fn schemas_to_wire(schemas: &[SchemaDescriptor]) -> Vec<wire::Schema> {
    schemas.iter().map(SchemaDescriptor::to_wire).collect()
}

pub fn schemas_from_wire(schemas: &[wire::Schema]) -> Vec<SchemaDescriptor> {
    schemas.iter().map(SchemaDescriptor::from_wire).collect()
}

// ===== helper functions =====

fn revision_to_wire(revision: &RevisionInfo) -> wire::SchemaRevision {
    wire::SchemaRevision {
        revision: revision.revision.clone(),
        file_path_yang: revision.file_path_yang.clone(),
        file_path_yin: revision.file_path_yin.clone(),
    }
}

fn revision_from_wire(w: &wire::SchemaRevision) -> RevisionInfo {
    RevisionInfo {
        revision: w.revision.clone(),
        file_path_yang: w.file_path_yang.clone(),
        file_path_yin: w.file_path_yin.clone(),
    }
}
