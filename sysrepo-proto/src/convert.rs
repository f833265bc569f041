//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

//! Conversions between the in-memory instance data model and its wire form.
//!
//! The value conversion is a tag-preserving bijection: for every tag exactly
//! one wire field set is touched, and scalar fields keep their presence flag
//! so defaults survive the round trip. Decoding against a memory region
//! interns every byte buffer there; without a region the decoded value owns
//! its buffers.

use sysrepo_mem::Mem;
use sysrepo_utils::paths::Datastore;
use sysrepo_utils::tree::Node;
use sysrepo_utils::value::{Value, ValueData};
use sysrepo_utils::{Result, SrError};
use tracing::warn;

use crate::wire;

/// Configuration change operations.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ChangeOp {
    Created,
    #[default]
    Modified,
    Deleted,
    Moved,
}

/// Positions for list-entry moves.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MovePosition {
    Before,
    After,
    First,
    #[default]
    Last,
}

/// Verification phases delivered to change subscribers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NotifEvent {
    Verify,
    Apply,
    Abort,
    Enabled,
}

/// Event notification delivery classes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EventNotifKind {
    Realtime,
    Replay,
    ReplayComplete,
    ReplayStop,
}

/// Instance-data API flavors.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ApiVariant {
    #[default]
    Values,
    Trees,
}

// ===== global functions =====

/// Converts a typed value into its wire form.
pub fn value_to_wire(value: &Value) -> Result<wire::Value> {
    let mut w = wire::Value {
        xpath: value.xpath.as_ref().map(|xpath| xpath.to_string()),
        dflt: value.dflt,
        ..Default::default()
    };
    let vtype = match &value.data {
        ValueData::List => wire::ValueType::List,
        ValueData::Container => wire::ValueType::Container,
        ValueData::ContainerPresence => wire::ValueType::ContainerPresence,
        ValueData::LeafEmpty => wire::ValueType::LeafEmpty,
        ValueData::Binary(s) => {
            w.binary_val = Some(s.to_string());
            wire::ValueType::Binary
        }
        ValueData::Bits(s) => {
            w.bits_val = Some(s.to_string());
            wire::ValueType::Bits
        }
        ValueData::Enum(s) => {
            w.enum_val = Some(s.to_string());
            wire::ValueType::Enum
        }
        ValueData::Identityref(s) => {
            w.identityref_val = Some(s.to_string());
            wire::ValueType::Identityref
        }
        ValueData::InstanceId(s) => {
            w.instanceid_val = Some(s.to_string());
            wire::ValueType::Instanceid
        }
        ValueData::String(s) => {
            w.string_val = Some(s.to_string());
            wire::ValueType::String
        }
        ValueData::AnyXml(s) => {
            w.anyxml_val = Some(s.to_string());
            wire::ValueType::Anyxml
        }
        ValueData::AnyData(s) => {
            w.anydata_val = Some(s.to_string());
            wire::ValueType::Anydata
        }
        ValueData::Bool(v) => {
            w.bool_val = Some(*v);
            wire::ValueType::Bool
        }
        ValueData::Decimal64 {
            value,
            fraction_digits,
        } => {
            w.decimal64_val = Some(*value);
            w.decimal64_digits = Some(*fraction_digits as u32);
            wire::ValueType::Decimal64
        }
        ValueData::Int8(v) => {
            w.int8_val = Some(*v as i32);
            wire::ValueType::Int8
        }
        ValueData::Int16(v) => {
            w.int16_val = Some(*v as i32);
            wire::ValueType::Int16
        }
        ValueData::Int32(v) => {
            w.int32_val = Some(*v);
            wire::ValueType::Int32
        }
        ValueData::Int64(v) => {
            w.int64_val = Some(*v);
            wire::ValueType::Int64
        }
        ValueData::Uint8(v) => {
            w.uint8_val = Some(*v as u32);
            wire::ValueType::Uint8
        }
        ValueData::Uint16(v) => {
            w.uint16_val = Some(*v as u32);
            wire::ValueType::Uint16
        }
        ValueData::Uint32(v) => {
            w.uint32_val = Some(*v);
            wire::ValueType::Uint32
        }
        ValueData::Uint64(v) => {
            w.uint64_val = Some(*v);
            wire::ValueType::Uint64
        }
        ValueData::Unknown => return Err(SrError::Unsupported),
    };
    w.value_type = vtype as i32;
    Ok(w)
}

/// Converts a wire value into the typed value model.
pub fn value_from_wire(mem: Option<&Mem>, w: &wire::Value) -> Result<Value> {
    let text = |s: &Option<String>| {
        let s = s.as_deref().unwrap_or("");
        match mem {
            Some(mem) => mem.alloc_str(s),
            None => s.into(),
        }
    };
    let vtype = wire::ValueType::try_from(w.value_type)
        .map_err(|_| SrError::Unsupported)?;
    let data = match vtype {
        wire::ValueType::List => ValueData::List,
        wire::ValueType::Container => ValueData::Container,
        wire::ValueType::ContainerPresence => ValueData::ContainerPresence,
        wire::ValueType::LeafEmpty => ValueData::LeafEmpty,
        wire::ValueType::Binary => ValueData::Binary(text(&w.binary_val)),
        wire::ValueType::Bits => ValueData::Bits(text(&w.bits_val)),
        wire::ValueType::Enum => ValueData::Enum(text(&w.enum_val)),
        wire::ValueType::Identityref => {
            ValueData::Identityref(text(&w.identityref_val))
        }
        wire::ValueType::Instanceid => {
            ValueData::InstanceId(text(&w.instanceid_val))
        }
        wire::ValueType::String => ValueData::String(text(&w.string_val)),
        wire::ValueType::Anyxml => ValueData::AnyXml(text(&w.anyxml_val)),
        wire::ValueType::Anydata => ValueData::AnyData(text(&w.anydata_val)),
        wire::ValueType::Bool => {
            ValueData::Bool(w.bool_val.unwrap_or_default())
        }
        wire::ValueType::Decimal64 => ValueData::Decimal64 {
            value: w.decimal64_val.unwrap_or_default(),
            fraction_digits: w.decimal64_digits.unwrap_or_default() as u8,
        },
        wire::ValueType::Int8 => {
            ValueData::Int8(w.int8_val.unwrap_or_default() as i8)
        }
        wire::ValueType::Int16 => {
            ValueData::Int16(w.int16_val.unwrap_or_default() as i16)
        }
        wire::ValueType::Int32 => {
            ValueData::Int32(w.int32_val.unwrap_or_default())
        }
        wire::ValueType::Int64 => {
            ValueData::Int64(w.int64_val.unwrap_or_default())
        }
        wire::ValueType::Uint8 => {
            ValueData::Uint8(w.uint8_val.unwrap_or_default() as u8)
        }
        wire::ValueType::Uint16 => {
            ValueData::Uint16(w.uint16_val.unwrap_or_default() as u16)
        }
        wire::ValueType::Uint32 => {
            ValueData::Uint32(w.uint32_val.unwrap_or_default())
        }
        wire::ValueType::Uint64 => {
            ValueData::Uint64(w.uint64_val.unwrap_or_default())
        }
        wire::ValueType::Unknown => return Err(SrError::Unsupported),
    };
    Ok(Value {
        xpath: w.xpath.as_deref().map(|xpath| match mem {
            Some(mem) => mem.alloc_str(xpath),
            None => xpath.into(),
        }),
        data,
        dflt: w.dflt,
        origin: mem.map(Mem::downgrade),
    })
}

pub fn values_to_wire(values: &[Value]) -> Result<Vec<wire::Value>> {
    values.iter().map(value_to_wire).collect()
}

pub fn values_from_wire(
    mem: Option<&Mem>,
    values: &[wire::Value],
) -> Result<Vec<Value>> {
    values.iter().map(|w| value_from_wire(mem, w)).collect()
}

/// Converts an instance tree into its wire form.
pub fn node_to_wire(node: &Node) -> Result<wire::Node> {
    Ok(wire::Node {
        value: Some(value_to_wire(&node.value)?),
        module_name: node.module.clone(),
        children: node
            .children
            .iter()
            .map(node_to_wire)
            .collect::<Result<_>>()?,
    })
}

/// Converts a wire tree into the instance tree model.
pub fn node_from_wire(mem: Option<&Mem>, w: &wire::Node) -> Result<Node> {
    let value = w.value.as_ref().ok_or(SrError::MalformedMsg)?;
    Ok(Node {
        value: value_from_wire(mem, value)?,
        module: w.module_name.clone(),
        children: w
            .children
            .iter()
            .map(|child| node_from_wire(mem, child))
            .collect::<Result<_>>()?,
    })
}

pub fn nodes_to_wire(nodes: &[Node]) -> Result<Vec<wire::Node>> {
    nodes.iter().map(node_to_wire).collect()
}

pub fn nodes_from_wire(
    mem: Option<&Mem>,
    nodes: &[wire::Node],
) -> Result<Vec<Node>> {
    nodes.iter().map(|w| node_from_wire(mem, w)).collect()
}

//
// Enumeration code mappings. Unknown incoming codes decode to the documented
// defaults rather than failing.
//

pub fn datastore_to_wire(ds: Datastore) -> wire::DataStore {
    match ds {
        Datastore::Startup => wire::DataStore::Startup,
        Datastore::Running => wire::DataStore::Running,
        Datastore::Candidate => wire::DataStore::Candidate,
    }
}

pub fn datastore_from_wire(code: i32) -> Datastore {
    match wire::DataStore::try_from(code) {
        Ok(wire::DataStore::Running) => Datastore::Running,
        Ok(wire::DataStore::Candidate) => Datastore::Candidate,
        _ => Datastore::Startup,
    }
}

pub fn change_op_to_wire(op: ChangeOp) -> wire::ChangeOperation {
    match op {
        ChangeOp::Created => wire::ChangeOperation::Created,
        ChangeOp::Modified => wire::ChangeOperation::Modified,
        ChangeOp::Deleted => wire::ChangeOperation::Deleted,
        ChangeOp::Moved => wire::ChangeOperation::Moved,
    }
}

pub fn change_op_from_wire(code: i32) -> ChangeOp {
    match wire::ChangeOperation::try_from(code) {
        Ok(wire::ChangeOperation::Created) => ChangeOp::Created,
        Ok(wire::ChangeOperation::Deleted) => ChangeOp::Deleted,
        Ok(wire::ChangeOperation::Moved) => ChangeOp::Moved,
        _ => ChangeOp::Modified,
    }
}

pub fn move_position_to_wire(position: MovePosition) -> wire::MovePosition {
    match position {
        MovePosition::Before => wire::MovePosition::Before,
        MovePosition::After => wire::MovePosition::After,
        MovePosition::First => wire::MovePosition::First,
        MovePosition::Last => wire::MovePosition::Last,
    }
}

pub fn move_position_from_wire(code: i32) -> MovePosition {
    match wire::MovePosition::try_from(code) {
        Ok(wire::MovePosition::Before) => MovePosition::Before,
        Ok(wire::MovePosition::After) => MovePosition::After,
        Ok(wire::MovePosition::First) => MovePosition::First,
        _ => MovePosition::Last,
    }
}

pub fn notif_event_to_wire(event: NotifEvent) -> wire::NotificationEvent {
    match event {
        NotifEvent::Verify => wire::NotificationEvent::Verify,
        NotifEvent::Apply => wire::NotificationEvent::Apply,
        NotifEvent::Abort => wire::NotificationEvent::Abort,
        NotifEvent::Enabled => wire::NotificationEvent::Enabled,
    }
}

pub fn notif_event_from_wire(code: i32) -> NotifEvent {
    match wire::NotificationEvent::try_from(code) {
        Ok(wire::NotificationEvent::Verify) => NotifEvent::Verify,
        Ok(wire::NotificationEvent::Abort) => NotifEvent::Abort,
        Ok(wire::NotificationEvent::Enabled) => NotifEvent::Enabled,
        _ => NotifEvent::Apply,
    }
}

pub fn event_notif_kind_from_wire(code: i32) -> EventNotifKind {
    match wire::EventNotifType::try_from(code) {
        Ok(wire::EventNotifType::Replay) => EventNotifKind::Replay,
        Ok(wire::EventNotifType::ReplayComplete) => {
            EventNotifKind::ReplayComplete
        }
        Ok(wire::EventNotifType::ReplayStop) => EventNotifKind::ReplayStop,
        _ => EventNotifKind::Realtime,
    }
}

pub fn api_variant_to_wire(variant: ApiVariant) -> wire::ApiVariant {
    match variant {
        ApiVariant::Values => wire::ApiVariant::Values,
        ApiVariant::Trees => wire::ApiVariant::Trees,
    }
}

/// Unknown codes coerce to `Values`, with a diagnostic since the coercion
/// changes the response shape.
pub fn api_variant_from_wire(code: i32) -> ApiVariant {
    match wire::ApiVariant::try_from(code) {
        Ok(wire::ApiVariant::Trees) => ApiVariant::Trees,
        Ok(wire::ApiVariant::Values) => ApiVariant::Values,
        Err(_) => {
            warn!(%code, "unknown API variant code, assuming 'values'");
            ApiVariant::Values
        }
    }
}

// ===== impl NotifEvent =====

impl NotifEvent {
    pub fn name(&self) -> &'static str {
        match self {
            NotifEvent::Verify => "verify",
            NotifEvent::Apply => "apply",
            NotifEvent::Abort => "abort",
            NotifEvent::Enabled => "enabled",
        }
    }
}
