//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

use prost::Message;
use sysrepo_mem::Mem;
use sysrepo_proto::convert::{
    self, ApiVariant, ChangeOp, MovePosition,
};
use sysrepo_proto::wire;
use sysrepo_utils::SrError;
use sysrepo_utils::paths::Datastore;
use sysrepo_utils::tree::Node;
use sysrepo_utils::value::{Value, ValueData};

fn sample_values() -> Vec<Value> {
    vec![
        Value::new(Some("/m:list-entry"), ValueData::List),
        Value::new(Some("/m:cont"), ValueData::Container),
        Value::new(Some("/m:pcont"), ValueData::ContainerPresence),
        Value::new(Some("/m:empty"), ValueData::LeafEmpty),
        Value::new(Some("/m:bin"), ValueData::Binary("aGVsbG8=".into())),
        Value::new(Some("/m:bits"), ValueData::Bits("flag-a flag-b".into())),
        Value::new(Some("/m:enum"), ValueData::Enum("up".into())),
        Value::new(
            Some("/m:idref"),
            ValueData::Identityref("other-module:some-identity".into()),
        ),
        Value::new(
            Some("/m:instid"),
            ValueData::InstanceId("/other:cont/leaf".into()),
        ),
        Value::new(Some("/m:str"), ValueData::String("text".into())),
        Value::new(Some("/m:axml"), ValueData::AnyXml("<x/>".into())),
        Value::new(Some("/m:adata"), ValueData::AnyData("{}".into())),
        Value::new(Some("/m:bool"), ValueData::Bool(false)),
        Value::new(
            Some("/m:dec"),
            ValueData::Decimal64 {
                value: 3.14159,
                fraction_digits: 2,
            },
        ),
        Value::new(Some("/m:i8"), ValueData::Int8(-8)),
        Value::new(Some("/m:i16"), ValueData::Int16(-16)),
        Value::new(Some("/m:i32"), ValueData::Int32(-32)),
        Value::new(Some("/m:i64"), ValueData::Int64(-64)),
        Value::new(Some("/m:u8"), ValueData::Uint8(8)),
        Value::new(Some("/m:u16"), ValueData::Uint16(16)),
        Value::new(Some("/m:u32"), ValueData::Uint32(32)),
        Value::new(Some("/m:u64"), ValueData::Uint64(64)),
    ]
}

#[test]
fn test_value_wire_bijection() {
    for value in sample_values() {
        let w = convert::value_to_wire(&value).unwrap();
        let decoded = convert::value_from_wire(None, &w).unwrap();
        assert_eq!(decoded, value, "tag {:?}", value.value_type());

        // The wire record itself survives a protobuf round trip.
        let bytes = w.encode_to_vec();
        assert_eq!(wire::Value::decode(bytes.as_slice()).unwrap(), w);
    }
}

#[test]
fn test_value_wire_single_field_set() {
    let w = convert::value_to_wire(&Value::new(
        None,
        ValueData::String("text".into()),
    ))
    .unwrap();
    assert_eq!(w.string_val.as_deref(), Some("text"));
    assert_eq!(w.binary_val, None);
    assert_eq!(w.bool_val, None);
    assert_eq!(w.decimal64_val, None);
    assert_eq!(w.uint8_val, None);

    // Structural tags touch no payload field at all.
    let w = convert::value_to_wire(&Value::new(None, ValueData::List)).unwrap();
    assert_eq!(w, wire::Value {
        value_type: wire::ValueType::List as i32,
        ..Default::default()
    });
}

#[test]
fn test_value_wire_scalar_presence_flags() {
    // A false bool at the schema default still round-trips with its
    // presence flag set, so defaults stay distinguishable from absence.
    let mut value = Value::new(Some("/m:bool"), ValueData::Bool(false));
    value.dflt = true;
    let w = convert::value_to_wire(&value).unwrap();
    assert_eq!(w.bool_val, Some(false));
    assert!(w.dflt);

    let decoded = convert::value_from_wire(None, &w).unwrap();
    assert!(decoded.dflt);
    assert_eq!(decoded.data, ValueData::Bool(false));
}

#[test]
fn test_value_wire_decimal64() {
    let value = Value::new(
        Some("/m:dec"),
        ValueData::Decimal64 {
            value: 3.14159,
            fraction_digits: 2,
        },
    );
    assert_eq!(value.canonical_string().unwrap(), "3.14");

    let w = convert::value_to_wire(&value).unwrap();
    assert_eq!(w.decimal64_val, Some(3.14159));
    assert_eq!(w.decimal64_digits, Some(2));

    let decoded = convert::value_from_wire(None, &w).unwrap();
    assert_eq!(decoded.canonical_string().unwrap(), "3.14");
}

#[test]
fn test_value_wire_unknown_unsupported() {
    let value = Value::new(None, ValueData::Unknown);
    assert_eq!(convert::value_to_wire(&value), Err(SrError::Unsupported));

    let w = wire::Value {
        value_type: wire::ValueType::Unknown as i32,
        ..Default::default()
    };
    assert_eq!(convert::value_from_wire(None, &w), Err(SrError::Unsupported));
}

#[test]
fn test_value_from_wire_interns_into_region() {
    let mem = Mem::new();
    let w = convert::value_to_wire(&Value::new(
        Some("/m:str"),
        ValueData::String("payload".into()),
    ))
    .unwrap();

    let before = mem.buffer_count();
    let value = convert::value_from_wire(Some(&mem), &w).unwrap();
    assert!(mem.buffer_count() > before);
    assert!(value.origin.as_ref().unwrap().is_region(&mem));
}

#[test]
fn test_tree_wire_roundtrip() {
    let mut root = Node::new("interfaces", ValueData::Container);
    root.set_module("ietf-interfaces");
    let entry = root.add_child("interface", ValueData::List);
    entry.add_child("name", ValueData::String("eth0".into()));
    let augmented = entry.add_child("vlan", ValueData::Uint16(100));
    // Qualifier present only where it differs from the parent's.
    augmented.set_module("example-vlan");

    let w = convert::node_to_wire(&root).unwrap();
    assert_eq!(w.module_name.as_deref(), Some("ietf-interfaces"));
    assert_eq!(w.children[0].module_name, None);
    assert_eq!(
        w.children[0].children[1].module_name.as_deref(),
        Some("example-vlan")
    );

    let decoded = convert::node_from_wire(None, &w).unwrap();
    assert_eq!(decoded, root);

    let bytes = w.encode_to_vec();
    assert_eq!(wire::Node::decode(bytes.as_slice()).unwrap(), w);
}

#[test]
fn test_tree_from_wire_missing_value() {
    let w = wire::Node::default();
    assert_eq!(convert::node_from_wire(None, &w), Err(SrError::MalformedMsg));
}

#[test]
fn test_enum_code_defaults() {
    // Unknown incoming codes decode to the documented defaults.
    assert_eq!(convert::datastore_from_wire(0), Datastore::Startup);
    assert_eq!(convert::datastore_from_wire(1), Datastore::Running);
    assert_eq!(convert::datastore_from_wire(2), Datastore::Candidate);
    assert_eq!(convert::datastore_from_wire(99), Datastore::Startup);

    assert_eq!(convert::change_op_from_wire(99), ChangeOp::Modified);
    assert_eq!(convert::move_position_from_wire(99), MovePosition::Last);
    assert_eq!(convert::api_variant_from_wire(99), ApiVariant::Values);
}
