//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

//! Typed values aligned with the YANG base-type set.

use std::rc::Rc;

use enum_as_inner::EnumAsInner;
use sysrepo_mem::{Mem, MemRef};
use tracing::warn;

use crate::error::{Result, SrError};

/// Value type tags, mirroring the wire enumeration.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueType {
    List,
    Container,
    ContainerPresence,
    LeafEmpty,
    Binary,
    Bits,
    Enum,
    Identityref,
    InstanceId,
    String,
    AnyXml,
    AnyData,
    Bool,
    Decimal64,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Unknown,
}

/// Value payload. The payload variant determines the type tag, so a tag can
/// never disagree with the data it carries.
///
/// Text-like payloads hold `Rc<str>` buffers so that region-backed values can
/// share them without copying. `BITS` holds the space-separated set bit names
/// in schema order; `IDENTITYREF` holds the `module:name` form whenever the
/// identity's module differs from the node's module.
#[derive(Clone, Debug, EnumAsInner, PartialEq)]
pub enum ValueData {
    List,
    Container,
    ContainerPresence,
    LeafEmpty,
    Binary(Rc<str>),
    Bits(Rc<str>),
    Enum(Rc<str>),
    Identityref(Rc<str>),
    InstanceId(Rc<str>),
    String(Rc<str>),
    AnyXml(Rc<str>),
    AnyData(Rc<str>),
    Bool(bool),
    Decimal64 { value: f64, fraction_digits: u8 },
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Unknown,
}

/// Typed value, optionally anchored at an instance path and optionally backed
/// by a memory region that owns its byte buffers.
#[derive(Clone, Debug, Default)]
pub struct Value {
    pub xpath: Option<Rc<str>>,
    pub data: ValueData,
    // Value equals the schema default.
    pub dflt: bool,
    // Region owning the byte buffers, if any. A region-backed value must not
    // outlive its region.
    pub origin: Option<MemRef>,
}

/// Resolved leaf type as prescribed by the schema.
#[derive(Clone, Debug, PartialEq)]
pub enum LeafType {
    Binary,
    Bits,
    Bool,
    Decimal64 { fraction_digits: u8 },
    Empty,
    Enum,
    Identityref,
    InstanceId,
    String,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Leafref(Box<LeafType>),
    Union(Vec<LeafType>),
    Unknown,
}

/// Schema node classification used by the conformance check.
#[derive(Clone, Debug, PartialEq)]
pub enum SchemaNodeType {
    Container { presence: bool },
    List,
    Leaf(LeafType),
    LeafList(LeafType),
    AnyXml,
    AnyData,
}

// ===== impl ValueData =====

impl ValueData {
    pub fn value_type(&self) -> ValueType {
        match self {
            ValueData::List => ValueType::List,
            ValueData::Container => ValueType::Container,
            ValueData::ContainerPresence => ValueType::ContainerPresence,
            ValueData::LeafEmpty => ValueType::LeafEmpty,
            ValueData::Binary(_) => ValueType::Binary,
            ValueData::Bits(_) => ValueType::Bits,
            ValueData::Enum(_) => ValueType::Enum,
            ValueData::Identityref(_) => ValueType::Identityref,
            ValueData::InstanceId(_) => ValueType::InstanceId,
            ValueData::String(_) => ValueType::String,
            ValueData::AnyXml(_) => ValueType::AnyXml,
            ValueData::AnyData(_) => ValueType::AnyData,
            ValueData::Bool(_) => ValueType::Bool,
            ValueData::Decimal64 { .. } => ValueType::Decimal64,
            ValueData::Int8(_) => ValueType::Int8,
            ValueData::Int16(_) => ValueType::Int16,
            ValueData::Int32(_) => ValueType::Int32,
            ValueData::Int64(_) => ValueType::Int64,
            ValueData::Uint8(_) => ValueType::Uint8,
            ValueData::Uint16(_) => ValueType::Uint16,
            ValueData::Uint32(_) => ValueType::Uint32,
            ValueData::Uint64(_) => ValueType::Uint64,
            ValueData::Unknown => ValueType::Unknown,
        }
    }

    /// Shared text payload, for the tags that carry one.
    pub fn text(&self) -> Option<&Rc<str>> {
        match self {
            ValueData::Binary(s)
            | ValueData::Bits(s)
            | ValueData::Enum(s)
            | ValueData::Identityref(s)
            | ValueData::InstanceId(s)
            | ValueData::String(s)
            | ValueData::AnyXml(s)
            | ValueData::AnyData(s) => Some(s),
            _ => None,
        }
    }

    /// Parses a canonical string into the payload for the given tag.
    ///
    /// `fraction_digits` is consulted for `Decimal64` only; it comes from the
    /// schema, not from the lexical form.
    pub fn from_canonical(
        vtype: ValueType,
        s: &str,
        fraction_digits: u8,
    ) -> Result<ValueData> {
        let data = match vtype {
            ValueType::List => ValueData::List,
            ValueType::Container => ValueData::Container,
            ValueType::ContainerPresence => ValueData::ContainerPresence,
            ValueType::LeafEmpty => ValueData::LeafEmpty,
            ValueType::Binary => ValueData::Binary(Rc::from(s)),
            ValueType::Bits => ValueData::Bits(Rc::from(s)),
            ValueType::Enum => ValueData::Enum(Rc::from(s)),
            ValueType::Identityref => ValueData::Identityref(Rc::from(s)),
            ValueType::InstanceId => ValueData::InstanceId(Rc::from(s)),
            ValueType::String => ValueData::String(Rc::from(s)),
            ValueType::AnyXml => ValueData::AnyXml(Rc::from(s)),
            ValueType::AnyData => ValueData::AnyData(Rc::from(s)),
            ValueType::Bool => ValueData::Bool(s == "true"),
            ValueType::Decimal64 => ValueData::Decimal64 {
                value: s.parse().map_err(|_| SrError::InvalArg)?,
                fraction_digits,
            },
            ValueType::Int8 => {
                ValueData::Int8(s.parse().map_err(|_| SrError::InvalArg)?)
            }
            ValueType::Int16 => {
                ValueData::Int16(s.parse().map_err(|_| SrError::InvalArg)?)
            }
            ValueType::Int32 => {
                ValueData::Int32(s.parse().map_err(|_| SrError::InvalArg)?)
            }
            ValueType::Int64 => {
                ValueData::Int64(s.parse().map_err(|_| SrError::InvalArg)?)
            }
            ValueType::Uint8 => {
                ValueData::Uint8(s.parse().map_err(|_| SrError::InvalArg)?)
            }
            ValueType::Uint16 => {
                ValueData::Uint16(s.parse().map_err(|_| SrError::InvalArg)?)
            }
            ValueType::Uint32 => {
                ValueData::Uint32(s.parse().map_err(|_| SrError::InvalArg)?)
            }
            ValueType::Uint64 => {
                ValueData::Uint64(s.parse().map_err(|_| SrError::InvalArg)?)
            }
            ValueType::Unknown => return Err(SrError::InvalArg),
        };
        Ok(data)
    }
}

impl Default for ValueData {
    fn default() -> ValueData {
        ValueData::Unknown
    }
}

// ===== impl Value =====

impl Value {
    pub fn new(xpath: Option<&str>, data: ValueData) -> Value {
        Value {
            xpath: xpath.map(Rc::from),
            data,
            dflt: false,
            origin: None,
        }
    }

    pub fn value_type(&self) -> ValueType {
        self.data.value_type()
    }

    /// Canonical string form of the value.
    ///
    /// `DECIMAL64` is printed with exactly the schema-declared number of
    /// fraction digits. Structural tags and `LEAF_EMPTY` print as the empty
    /// string. `UNKNOWN` is not printable.
    pub fn canonical_string(&self) -> Result<String> {
        let s = match &self.data {
            ValueData::List
            | ValueData::Container
            | ValueData::ContainerPresence
            | ValueData::LeafEmpty => String::new(),
            ValueData::Bool(v) => {
                if *v { "true".to_owned() } else { "false".to_owned() }
            }
            ValueData::Decimal64 {
                value,
                fraction_digits,
            } => format!("{:.*}", *fraction_digits as usize, value),
            ValueData::Int8(v) => v.to_string(),
            ValueData::Int16(v) => v.to_string(),
            ValueData::Int32(v) => v.to_string(),
            ValueData::Int64(v) => v.to_string(),
            ValueData::Uint8(v) => v.to_string(),
            ValueData::Uint16(v) => v.to_string(),
            ValueData::Uint32(v) => v.to_string(),
            ValueData::Uint64(v) => v.to_string(),
            ValueData::Unknown => return Err(SrError::Unsupported),
            data => data.text().unwrap().to_string(),
        };
        Ok(s)
    }

    /// Duplicates the value into the given region.
    ///
    /// When the value already originates from `mem`, byte buffers are shared;
    /// otherwise they are interned anew. Without a target region the
    /// duplicate owns its buffers exclusively.
    pub fn duplicate(&self, mem: Option<&Mem>) -> Value {
        let mut dup = self.clone();
        match mem {
            Some(mem) => {
                let shared = self
                    .origin
                    .as_ref()
                    .is_some_and(|origin| origin.is_region(mem));
                if !shared {
                    if let Some(xpath) = &self.xpath {
                        dup.xpath = Some(mem.alloc_str(xpath));
                    }
                    dup.data = intern_data(&self.data, mem);
                }
                dup.origin = Some(mem.downgrade());
            }
            None => {
                dup.origin = None;
            }
        }
        dup
    }

    /// Checks that the value's tag matches the type prescribed by the schema
    /// node, resolving leafrefs transitively and unions by first match.
    pub fn check_type(&self, snode: &SchemaNodeType) -> Result<()> {
        let conforms = match snode {
            SchemaNodeType::Container { presence } => {
                self.value_type()
                    == if *presence {
                        ValueType::ContainerPresence
                    } else {
                        ValueType::Container
                    }
            }
            SchemaNodeType::List => self.value_type() == ValueType::List,
            SchemaNodeType::Leaf(ltype) | SchemaNodeType::LeafList(ltype) => {
                leaf_type_matches(ltype, self.value_type())
            }
            SchemaNodeType::AnyXml => self.value_type() == ValueType::AnyXml,
            SchemaNodeType::AnyData => self.value_type() == ValueType::AnyData,
        };
        if !conforms {
            warn!(
                xpath = self.xpath.as_deref().unwrap_or(""),
                value_type = ?self.value_type(),
                "value doesn't conform to schema"
            );
            return Err(SrError::InvalArg);
        }
        Ok(())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        // Region origin is intentionally not part of value identity.
        self.xpath == other.xpath
            && self.data == other.data
            && self.dflt == other.dflt
    }
}

// ===== impl LeafType =====

impl LeafType {
    /// The value tag of this type, with leafrefs resolved to their targets.
    /// Unions have no single tag.
    pub fn base_value_type(&self) -> Option<ValueType> {
        match self {
            LeafType::Binary => Some(ValueType::Binary),
            LeafType::Bits => Some(ValueType::Bits),
            LeafType::Bool => Some(ValueType::Bool),
            LeafType::Decimal64 { .. } => Some(ValueType::Decimal64),
            LeafType::Empty => Some(ValueType::LeafEmpty),
            LeafType::Enum => Some(ValueType::Enum),
            LeafType::Identityref => Some(ValueType::Identityref),
            LeafType::InstanceId => Some(ValueType::InstanceId),
            LeafType::String => Some(ValueType::String),
            LeafType::Int8 => Some(ValueType::Int8),
            LeafType::Int16 => Some(ValueType::Int16),
            LeafType::Int32 => Some(ValueType::Int32),
            LeafType::Int64 => Some(ValueType::Int64),
            LeafType::Uint8 => Some(ValueType::Uint8),
            LeafType::Uint16 => Some(ValueType::Uint16),
            LeafType::Uint32 => Some(ValueType::Uint32),
            LeafType::Uint64 => Some(ValueType::Uint64),
            LeafType::Leafref(target) => target.base_value_type(),
            LeafType::Union(_) => None,
            LeafType::Unknown => Some(ValueType::Unknown),
        }
    }
}

// ===== helper functions =====

fn leaf_type_matches(ltype: &LeafType, vtype: ValueType) -> bool {
    match ltype {
        // Union members are tried depth-first, first match wins. Nested
        // unions and leafref members resolve recursively.
        LeafType::Union(members) => members
            .iter()
            .any(|member| leaf_type_matches(member, vtype)),
        LeafType::Leafref(target) => leaf_type_matches(target, vtype),
        _ => ltype.base_value_type() == Some(vtype),
    }
}

fn intern_data(data: &ValueData, mem: &Mem) -> ValueData {
    match data {
        ValueData::Binary(s) => ValueData::Binary(mem.alloc_str(s)),
        ValueData::Bits(s) => ValueData::Bits(mem.alloc_str(s)),
        ValueData::Enum(s) => ValueData::Enum(mem.alloc_str(s)),
        ValueData::Identityref(s) => ValueData::Identityref(mem.alloc_str(s)),
        ValueData::InstanceId(s) => ValueData::InstanceId(mem.alloc_str(s)),
        ValueData::String(s) => ValueData::String(mem.alloc_str(s)),
        ValueData::AnyXml(s) => ValueData::AnyXml(mem.alloc_str(s)),
        ValueData::AnyData(s) => ValueData::AnyData(mem.alloc_str(s)),
        data => data.clone(),
    }
}
