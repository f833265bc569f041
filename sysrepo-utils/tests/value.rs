//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

use sysrepo_mem::Mem;
use sysrepo_utils::SrError;
use sysrepo_utils::value::{
    LeafType, SchemaNodeType, Value, ValueData, ValueType,
};

//
// Canonical printing.
//

#[test]
fn test_print_bool() {
    let value = Value::new(None, ValueData::Bool(true));
    assert_eq!(value.canonical_string().unwrap(), "true");
    let value = Value::new(None, ValueData::Bool(false));
    assert_eq!(value.canonical_string().unwrap(), "false");
}

#[test]
fn test_print_decimal64_fraction_digits() {
    let value = Value::new(
        None,
        ValueData::Decimal64 {
            value: 3.14159,
            fraction_digits: 2,
        },
    );
    assert_eq!(value.canonical_string().unwrap(), "3.14");

    let value = Value::new(
        None,
        ValueData::Decimal64 {
            value: 1.5,
            fraction_digits: 4,
        },
    );
    assert_eq!(value.canonical_string().unwrap(), "1.5000");
}

#[test]
fn test_print_bits_space_separated() {
    let value =
        Value::new(None, ValueData::Bits("flag-a flag-b flag-c".into()));
    assert_eq!(value.canonical_string().unwrap(), "flag-a flag-b flag-c");
}

#[test]
fn test_print_structural_empty() {
    for data in [
        ValueData::List,
        ValueData::Container,
        ValueData::ContainerPresence,
        ValueData::LeafEmpty,
    ] {
        let value = Value::new(None, data);
        assert_eq!(value.canonical_string().unwrap(), "");
    }
}

#[test]
fn test_print_integers() {
    let value = Value::new(None, ValueData::Int8(-12));
    assert_eq!(value.canonical_string().unwrap(), "-12");
    let value = Value::new(None, ValueData::Uint64(18446744073709551615));
    assert_eq!(value.canonical_string().unwrap(), "18446744073709551615");
}

#[test]
fn test_print_unknown_unsupported() {
    let value = Value::new(None, ValueData::Unknown);
    assert_eq!(value.canonical_string(), Err(SrError::Unsupported));
}

//
// Canonical parsing.
//

#[test]
fn test_parse_roundtrip() {
    for (vtype, s) in [
        (ValueType::Bool, "true"),
        (ValueType::Int32, "-42"),
        (ValueType::Uint16, "65535"),
        (ValueType::String, "hello"),
        (ValueType::Enum, "up"),
    ] {
        let data = ValueData::from_canonical(vtype, s, 0).unwrap();
        let value = Value::new(None, data);
        assert_eq!(value.value_type(), vtype);
        assert_eq!(value.canonical_string().unwrap(), s);
    }
}

#[test]
fn test_parse_invalid() {
    assert_eq!(
        ValueData::from_canonical(ValueType::Uint8, "256", 0),
        Err(SrError::InvalArg)
    );
    assert_eq!(
        ValueData::from_canonical(ValueType::Unknown, "x", 0),
        Err(SrError::InvalArg)
    );
}

//
// Schema conformance.
//

#[test]
fn test_conformance_base_types() {
    let value = Value::new(None, ValueData::Uint32(7));
    assert!(value.check_type(&SchemaNodeType::Leaf(LeafType::Uint32)).is_ok());
    assert_eq!(
        value.check_type(&SchemaNodeType::Leaf(LeafType::String)),
        Err(SrError::InvalArg)
    );
}

#[test]
fn test_conformance_containers() {
    let value = Value::new(None, ValueData::ContainerPresence);
    assert!(
        value
            .check_type(&SchemaNodeType::Container { presence: true })
            .is_ok()
    );
    assert_eq!(
        value.check_type(&SchemaNodeType::Container { presence: false }),
        Err(SrError::InvalArg)
    );
}

#[test]
fn test_conformance_leafref_transitive() {
    // leafref -> leafref -> uint8
    let ltype = LeafType::Leafref(Box::new(LeafType::Leafref(Box::new(
        LeafType::Uint8,
    ))));
    let value = Value::new(None, ValueData::Uint8(1));
    assert!(value.check_type(&SchemaNodeType::Leaf(ltype)).is_ok());
}

#[test]
fn test_conformance_union_first_match() {
    let ltype = LeafType::Union(vec![
        LeafType::Uint32,
        LeafType::Enum,
        // Nested union, resolved depth-first.
        LeafType::Union(vec![
            LeafType::Leafref(Box::new(LeafType::Bool)),
            LeafType::String,
        ]),
    ]);
    let snode = SchemaNodeType::Leaf(ltype);

    for data in [
        ValueData::Uint32(10),
        ValueData::Enum("up".into()),
        ValueData::Bool(true),
        ValueData::String("fallback".into()),
    ] {
        let value = Value::new(None, data);
        assert!(value.check_type(&snode).is_ok());
    }

    let value = Value::new(None, ValueData::Int8(-1));
    assert_eq!(value.check_type(&snode), Err(SrError::InvalArg));
}

//
// Region-backed duplication.
//

#[test]
fn test_duplicate_shares_within_region() {
    let mem = Mem::new();
    let mut value =
        Value::new(Some("/test-module:cont/leaf"), ValueData::String("v".into()));
    value = value.duplicate(Some(&mem));
    let buffers = mem.buffer_count();

    // Same region: buffers are shared, nothing new is interned.
    let dup = value.duplicate(Some(&mem));
    assert_eq!(dup, value);
    assert_eq!(mem.buffer_count(), buffers);

    // Different region: buffers are copied.
    let other = Mem::new();
    let copied = value.duplicate(Some(&other));
    assert_eq!(copied, value);
    assert!(other.buffer_count() > 0);
    assert!(copied.origin.as_ref().unwrap().is_region(&other));
}

#[test]
fn test_duplicate_detached_owns_buffers() {
    let mem = Mem::new();
    let value = Value::new(Some("/m:leaf"), ValueData::String("v".into()))
        .duplicate(Some(&mem));
    let detached = value.duplicate(None);
    assert!(detached.origin.is_none());
    assert_eq!(detached, value);
}
