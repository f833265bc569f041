//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

//! Wire form of the client/daemon envelope protocol.
//!
//! The messages are written out by hand rather than generated: the envelope
//! is a plain protobuf-c style record where every operation owns one optional
//! payload slot, and the validator checks slot presence explicitly. Scalar
//! leaf payloads are `optional` so that schema defaults survive a round trip
//! distinguishably.

use prost::Enumeration;

//
// Enumerations.
//

/// Envelope kinds.
#[derive(Clone, Copy, Debug, Enumeration, Eq, Hash, PartialEq)]
#[repr(i32)]
pub enum MsgType {
    Request = 1,
    Response = 2,
    Notification = 3,
    NotificationAck = 4,
    InternalRequest = 5,
}

/// Closed set of operation codes.
#[derive(Clone, Copy, Debug, Enumeration, Eq, Hash, PartialEq)]
#[repr(i32)]
pub enum Operation {
    SessionStart = 0,
    SessionStop = 1,
    SessionRefresh = 2,
    SessionCheck = 3,
    SessionSwitchDs = 4,
    SessionSetOpts = 5,
    ListSchemas = 6,
    GetSchema = 7,
    ModuleInstall = 8,
    FeatureEnable = 9,
    GetItem = 10,
    GetItems = 11,
    GetSubtree = 12,
    GetSubtrees = 13,
    GetSubtreeChunk = 14,
    SetItem = 15,
    SetItemStr = 16,
    DeleteItem = 17,
    MoveItem = 18,
    Validate = 19,
    Commit = 20,
    DiscardChanges = 21,
    CopyConfig = 22,
    Lock = 23,
    Unlock = 24,
    Subscribe = 25,
    Unsubscribe = 26,
    CheckEnabledRunning = 27,
    GetChanges = 28,
    DataProvide = 29,
    CheckExecPermission = 30,
    Rpc = 31,
    Action = 32,
    EventNotif = 33,
    EventNotifReplay = 34,
    UnsubscribeDestination = 35,
    CommitTimeout = 36,
    OperDataTimeout = 37,
    InternalStateData = 38,
    NotifStoreCleanup = 39,
    DelayedMsg = 40,
}

/// Subscription types carried by notifications.
#[derive(Clone, Copy, Debug, Enumeration, Eq, Hash, PartialEq)]
#[repr(i32)]
pub enum SubscriptionType {
    ModuleInstallSubs = 0,
    FeatureEnableSubs = 1,
    ModuleChangeSubs = 2,
    SubtreeChangeSubs = 3,
    DpGetItemsSubs = 4,
    RpcSubs = 5,
    ActionSubs = 6,
    EventNotifSubs = 7,
    HelloSubs = 8,
    CommitEndSubs = 9,
}

/// Typed value tags.
#[derive(Clone, Copy, Debug, Enumeration, Eq, Hash, PartialEq)]
#[repr(i32)]
pub enum ValueType {
    List = 0,
    Container = 1,
    ContainerPresence = 2,
    LeafEmpty = 3,
    Binary = 4,
    Bits = 5,
    Enum = 6,
    Identityref = 7,
    Instanceid = 8,
    String = 9,
    Anyxml = 10,
    Anydata = 11,
    Bool = 12,
    Decimal64 = 13,
    Int8 = 14,
    Int16 = 15,
    Int32 = 16,
    Int64 = 17,
    Uint8 = 18,
    Uint16 = 19,
    Uint32 = 20,
    Uint64 = 21,
    Unknown = 22,
}

#[derive(Clone, Copy, Debug, Enumeration, Eq, Hash, PartialEq)]
#[repr(i32)]
pub enum DataStore {
    Startup = 0,
    Running = 1,
    Candidate = 2,
}

#[derive(Clone, Copy, Debug, Enumeration, Eq, Hash, PartialEq)]
#[repr(i32)]
pub enum ChangeOperation {
    Created = 0,
    Modified = 1,
    Deleted = 2,
    Moved = 3,
}

#[derive(Clone, Copy, Debug, Enumeration, Eq, Hash, PartialEq)]
#[repr(i32)]
pub enum MovePosition {
    Before = 0,
    After = 1,
    First = 2,
    Last = 3,
}

#[derive(Clone, Copy, Debug, Enumeration, Eq, Hash, PartialEq)]
#[repr(i32)]
pub enum NotificationEvent {
    Verify = 0,
    Apply = 1,
    Abort = 2,
    Enabled = 3,
}

#[derive(Clone, Copy, Debug, Enumeration, Eq, Hash, PartialEq)]
#[repr(i32)]
pub enum EventNotifType {
    Realtime = 0,
    Replay = 1,
    ReplayComplete = 2,
    ReplayStop = 3,
}

#[derive(Clone, Copy, Debug, Enumeration, Eq, Hash, PartialEq)]
#[repr(i32)]
pub enum ApiVariant {
    Values = 0,
    Trees = 1,
}

#[derive(Clone, Copy, Debug, Enumeration, Eq, Hash, PartialEq)]
#[repr(i32)]
pub enum ModuleState {
    Uninstalled = 0,
    Imported = 1,
    Implemented = 2,
}

//
// Instance data.
//

/// Typed value. Exactly one payload field group is populated, determined by
/// `value_type`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Value {
    #[prost(string, optional, tag = "1")]
    pub xpath: Option<String>,
    #[prost(enumeration = "ValueType", tag = "2")]
    pub value_type: i32,
    #[prost(bool, tag = "3")]
    pub dflt: bool,
    #[prost(string, optional, tag = "4")]
    pub binary_val: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub bits_val: Option<String>,
    #[prost(string, optional, tag = "6")]
    pub enum_val: Option<String>,
    #[prost(string, optional, tag = "7")]
    pub identityref_val: Option<String>,
    #[prost(string, optional, tag = "8")]
    pub instanceid_val: Option<String>,
    #[prost(string, optional, tag = "9")]
    pub string_val: Option<String>,
    #[prost(string, optional, tag = "10")]
    pub anyxml_val: Option<String>,
    #[prost(string, optional, tag = "11")]
    pub anydata_val: Option<String>,
    #[prost(bool, optional, tag = "12")]
    pub bool_val: Option<bool>,
    #[prost(double, optional, tag = "13")]
    pub decimal64_val: Option<f64>,
    // Schema-declared fraction digits of the decimal64 leaf.
    #[prost(uint32, optional, tag = "14")]
    pub decimal64_digits: Option<u32>,
    #[prost(int32, optional, tag = "15")]
    pub int8_val: Option<i32>,
    #[prost(int32, optional, tag = "16")]
    pub int16_val: Option<i32>,
    #[prost(int32, optional, tag = "17")]
    pub int32_val: Option<i32>,
    #[prost(int64, optional, tag = "18")]
    pub int64_val: Option<i64>,
    #[prost(uint32, optional, tag = "19")]
    pub uint8_val: Option<u32>,
    #[prost(uint32, optional, tag = "20")]
    pub uint16_val: Option<u32>,
    #[prost(uint32, optional, tag = "21")]
    pub uint32_val: Option<u32>,
    #[prost(uint64, optional, tag = "22")]
    pub uint64_val: Option<u64>,
}

/// Instance tree node: a value, an optional module qualifier and an ordered
/// child sequence.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Node {
    #[prost(message, optional, tag = "1")]
    pub value: Option<Value>,
    // Present only where the qualifier differs from the parent's.
    #[prost(string, optional, tag = "2")]
    pub module_name: Option<String>,
    #[prost(message, repeated, tag = "3")]
    pub children: Vec<Node>,
}

/// Error record attached to failed responses.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Error {
    #[prost(string, optional, tag = "1")]
    pub message: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub xpath: Option<String>,
}

//
// Schema catalog.
//

#[derive(Clone, PartialEq, prost::Message)]
pub struct SchemaRevision {
    #[prost(string, optional, tag = "1")]
    pub revision: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub file_path_yang: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub file_path_yin: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SchemaSubmodule {
    #[prost(string, tag = "1")]
    pub submodule_name: String,
    #[prost(message, optional, tag = "2")]
    pub revision: Option<SchemaRevision>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Schema {
    #[prost(string, tag = "1")]
    pub module_name: String,
    #[prost(string, tag = "2")]
    pub ns: String,
    #[prost(string, tag = "3")]
    pub prefix: String,
    #[prost(message, optional, tag = "4")]
    pub revision: Option<SchemaRevision>,
    #[prost(message, repeated, tag = "5")]
    pub submodules: Vec<SchemaSubmodule>,
    #[prost(string, repeated, tag = "6")]
    pub enabled_features: Vec<String>,
    #[prost(enumeration = "ModuleState", tag = "7")]
    pub state: i32,
}

/// One configuration change, as reported to change subscribers.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Change {
    #[prost(enumeration = "ChangeOperation", tag = "1")]
    pub operation: i32,
    #[prost(message, optional, tag = "2")]
    pub new_value: Option<Value>,
    #[prost(message, optional, tag = "3")]
    pub old_value: Option<Value>,
}

//
// Session lifecycle payloads.
//

#[derive(Clone, PartialEq, prost::Message)]
pub struct SessionStartReq {
    #[prost(string, optional, tag = "1")]
    pub user_name: Option<String>,
    #[prost(enumeration = "DataStore", tag = "2")]
    pub datastore: i32,
    // Session option flags (see `builder::SessionFlags`).
    #[prost(uint32, tag = "3")]
    pub options: u32,
    #[prost(uint32, optional, tag = "4")]
    pub commit_id: Option<u32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SessionStartResp {
    #[prost(uint32, tag = "1")]
    pub session_id: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SessionStopReq {
    #[prost(uint32, tag = "1")]
    pub session_id: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SessionStopResp {
    #[prost(uint32, tag = "1")]
    pub session_id: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SessionRefreshReq {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SessionRefreshResp {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SessionCheckReq {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SessionCheckResp {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SessionSwitchDsReq {
    #[prost(enumeration = "DataStore", tag = "1")]
    pub datastore: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SessionSwitchDsResp {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SessionSetOptsReq {
    #[prost(uint32, tag = "1")]
    pub options: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SessionSetOptsResp {}

//
// Schema catalog payloads.
//

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListSchemasReq {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListSchemasResp {
    #[prost(message, repeated, tag = "1")]
    pub schemas: Vec<Schema>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetSchemaReq {
    #[prost(string, tag = "1")]
    pub module_name: String,
    #[prost(string, optional, tag = "2")]
    pub revision: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub submodule_name: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub submodule_revision: Option<String>,
    #[prost(bool, tag = "5")]
    pub yang_format: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetSchemaResp {
    #[prost(string, tag = "1")]
    pub schema_content: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ModuleInstallReq {
    #[prost(string, tag = "1")]
    pub module_name: String,
    #[prost(string, optional, tag = "2")]
    pub revision: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub file_path: Option<String>,
    #[prost(bool, tag = "4")]
    pub installed: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ModuleInstallResp {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct FeatureEnableReq {
    #[prost(string, tag = "1")]
    pub module_name: String,
    #[prost(string, tag = "2")]
    pub feature_name: String,
    #[prost(bool, tag = "3")]
    pub enabled: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct FeatureEnableResp {}

//
// Data access payloads.
//

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetItemReq {
    #[prost(string, tag = "1")]
    pub xpath: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetItemResp {
    #[prost(message, optional, tag = "1")]
    pub value: Option<Value>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetItemsReq {
    #[prost(string, tag = "1")]
    pub xpath: String,
    #[prost(uint32, optional, tag = "2")]
    pub limit: Option<u32>,
    #[prost(uint32, optional, tag = "3")]
    pub offset: Option<u32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetItemsResp {
    #[prost(message, repeated, tag = "1")]
    pub values: Vec<Value>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetSubtreeReq {
    #[prost(string, tag = "1")]
    pub xpath: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetSubtreeResp {
    #[prost(message, optional, tag = "1")]
    pub tree: Option<Node>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetSubtreesReq {
    #[prost(string, tag = "1")]
    pub xpath: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetSubtreesResp {
    #[prost(message, repeated, tag = "1")]
    pub trees: Vec<Node>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetSubtreeChunkReq {
    #[prost(string, tag = "1")]
    pub xpath: String,
    #[prost(bool, tag = "2")]
    pub single: bool,
    #[prost(uint32, tag = "3")]
    pub slice_offset: u32,
    #[prost(uint32, tag = "4")]
    pub slice_width: u32,
    #[prost(uint32, tag = "5")]
    pub child_limit: u32,
    #[prost(uint32, tag = "6")]
    pub depth_limit: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetSubtreeChunkResp {
    // Chunk roots carry their instance path so the next chunk can be
    // requested.
    #[prost(message, repeated, tag = "1")]
    pub chunks: Vec<Node>,
}

//
// Mutation payloads.
//

#[derive(Clone, PartialEq, prost::Message)]
pub struct SetItemReq {
    #[prost(string, tag = "1")]
    pub xpath: String,
    #[prost(message, optional, tag = "2")]
    pub value: Option<Value>,
    #[prost(uint32, tag = "3")]
    pub options: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SetItemResp {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SetItemStrReq {
    #[prost(string, tag = "1")]
    pub xpath: String,
    #[prost(string, optional, tag = "2")]
    pub value: Option<String>,
    #[prost(uint32, tag = "3")]
    pub options: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SetItemStrResp {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteItemReq {
    #[prost(string, tag = "1")]
    pub xpath: String,
    #[prost(uint32, tag = "2")]
    pub options: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteItemResp {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MoveItemReq {
    #[prost(string, tag = "1")]
    pub xpath: String,
    #[prost(enumeration = "MovePosition", tag = "2")]
    pub position: i32,
    #[prost(string, optional, tag = "3")]
    pub relative_item: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MoveItemResp {}

//
// Transaction payloads.
//

#[derive(Clone, PartialEq, prost::Message)]
pub struct ValidateReq {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ValidateResp {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CommitReq {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CommitResp {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DiscardChangesReq {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DiscardChangesResp {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CopyConfigReq {
    #[prost(enumeration = "DataStore", tag = "1")]
    pub src_datastore: i32,
    #[prost(enumeration = "DataStore", tag = "2")]
    pub dst_datastore: i32,
    // Absent means the whole datastore.
    #[prost(string, optional, tag = "3")]
    pub module_name: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CopyConfigResp {}

//
// Locking payloads.
//

#[derive(Clone, PartialEq, prost::Message)]
pub struct LockReq {
    #[prost(string, optional, tag = "1")]
    pub module_name: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct LockResp {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UnlockReq {
    #[prost(string, optional, tag = "1")]
    pub module_name: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UnlockResp {}

//
// Subscription payloads.
//

#[derive(Clone, PartialEq, prost::Message)]
pub struct SubscribeReq {
    #[prost(enumeration = "SubscriptionType", tag = "1")]
    pub subscription_type: i32,
    #[prost(string, tag = "2")]
    pub destination: String,
    #[prost(uint32, tag = "3")]
    pub subscription_id: u32,
    #[prost(string, optional, tag = "4")]
    pub module_name: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub xpath: Option<String>,
    #[prost(enumeration = "NotificationEvent", optional, tag = "6")]
    pub notif_event: Option<i32>,
    #[prost(uint32, tag = "7")]
    pub priority: u32,
    #[prost(bool, tag = "8")]
    pub enable_running: bool,
    #[prost(enumeration = "ApiVariant", tag = "9")]
    pub api_variant: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SubscribeResp {
    #[prost(uint32, tag = "1")]
    pub subscription_id: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UnsubscribeReq {
    #[prost(enumeration = "SubscriptionType", tag = "1")]
    pub subscription_type: i32,
    #[prost(string, tag = "2")]
    pub destination: String,
    #[prost(uint32, tag = "3")]
    pub subscription_id: u32,
    #[prost(string, optional, tag = "4")]
    pub module_name: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UnsubscribeResp {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CheckEnabledRunningReq {
    #[prost(string, tag = "1")]
    pub module_name: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CheckEnabledRunningResp {
    #[prost(bool, tag = "1")]
    pub enabled: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetChangesReq {
    #[prost(string, tag = "1")]
    pub xpath: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetChangesResp {
    #[prost(message, repeated, tag = "1")]
    pub changes: Vec<Change>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DataProvideReq {
    #[prost(string, tag = "1")]
    pub xpath: String,
    #[prost(uint32, tag = "2")]
    pub subscription_id: u32,
    #[prost(uint64, tag = "3")]
    pub request_id: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DataProvideResp {
    #[prost(message, repeated, tag = "1")]
    pub values: Vec<Value>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CheckExecPermReq {
    #[prost(string, tag = "1")]
    pub xpath: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CheckExecPermResp {
    #[prost(bool, tag = "1")]
    pub permitted: bool,
}

/// Shared by the `RPC` and `ACTION` operations.
#[derive(Clone, PartialEq, prost::Message)]
pub struct RpcReq {
    #[prost(bool, tag = "1")]
    pub action: bool,
    #[prost(string, tag = "2")]
    pub xpath: String,
    #[prost(enumeration = "ApiVariant", tag = "3")]
    pub api_variant: i32,
    #[prost(message, repeated, tag = "4")]
    pub input: Vec<Value>,
    #[prost(message, repeated, tag = "5")]
    pub input_tree: Vec<Node>,
    #[prost(uint64, tag = "6")]
    pub subscription_id: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RpcResp {
    #[prost(bool, tag = "1")]
    pub action: bool,
    #[prost(string, tag = "2")]
    pub xpath: String,
    #[prost(enumeration = "ApiVariant", tag = "3")]
    pub api_variant: i32,
    #[prost(message, repeated, tag = "4")]
    pub output: Vec<Value>,
    #[prost(message, repeated, tag = "5")]
    pub output_tree: Vec<Node>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct EventNotifReq {
    #[prost(enumeration = "EventNotifType", tag = "1")]
    pub notif_type: i32,
    #[prost(string, tag = "2")]
    pub xpath: String,
    #[prost(message, repeated, tag = "3")]
    pub values: Vec<Value>,
    #[prost(message, repeated, tag = "4")]
    pub trees: Vec<Node>,
    #[prost(uint64, tag = "5")]
    pub timestamp: u64,
    #[prost(uint32, tag = "6")]
    pub options: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct EventNotifResp {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct EventNotifReplayReq {
    #[prost(string, tag = "1")]
    pub xpath: String,
    #[prost(uint64, tag = "2")]
    pub start_time: u64,
    #[prost(uint64, tag = "3")]
    pub stop_time: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct EventNotifReplayResp {}

//
// Internal request payloads.
//

#[derive(Clone, PartialEq, prost::Message)]
pub struct UnsubscribeDestinationReq {
    #[prost(string, tag = "1")]
    pub destination: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CommitTimeoutReq {
    #[prost(uint32, tag = "1")]
    pub commit_id: u32,
    #[prost(bool, tag = "2")]
    pub expired: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct OperDataTimeoutReq {
    #[prost(uint64, tag = "1")]
    pub request_id: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct InternalStateDataReq {
    #[prost(uint64, tag = "1")]
    pub request_id: u64,
    #[prost(string, tag = "2")]
    pub xpath: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct NotifStoreCleanupReq {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DelayedMsgReq {
    #[prost(message, optional, boxed, tag = "1")]
    pub message: Option<Box<Msg>>,
}

//
// Notification payloads.
//

#[derive(Clone, PartialEq, prost::Message)]
pub struct ModuleInstallNotification {
    #[prost(string, tag = "1")]
    pub module_name: String,
    #[prost(string, optional, tag = "2")]
    pub revision: Option<String>,
    #[prost(bool, tag = "3")]
    pub installed: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct FeatureEnableNotification {
    #[prost(string, tag = "1")]
    pub module_name: String,
    #[prost(string, tag = "2")]
    pub feature_name: String,
    #[prost(bool, tag = "3")]
    pub enabled: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ModuleChangeNotification {
    #[prost(enumeration = "NotificationEvent", tag = "1")]
    pub event: i32,
    #[prost(string, tag = "2")]
    pub module_name: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SubtreeChangeNotification {
    #[prost(enumeration = "NotificationEvent", tag = "1")]
    pub event: i32,
    #[prost(string, tag = "2")]
    pub xpath: String,
}

//
// Envelope bodies.
//

/// Client request. Exactly one payload slot is populated, matching
/// `operation`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Request {
    #[prost(enumeration = "Operation", tag = "1")]
    pub operation: i32,
    #[prost(message, optional, tag = "2")]
    pub session_start_req: Option<SessionStartReq>,
    #[prost(message, optional, tag = "3")]
    pub session_stop_req: Option<SessionStopReq>,
    #[prost(message, optional, tag = "4")]
    pub session_refresh_req: Option<SessionRefreshReq>,
    #[prost(message, optional, tag = "5")]
    pub session_check_req: Option<SessionCheckReq>,
    #[prost(message, optional, tag = "6")]
    pub session_switch_ds_req: Option<SessionSwitchDsReq>,
    #[prost(message, optional, tag = "7")]
    pub session_set_opts_req: Option<SessionSetOptsReq>,
    #[prost(message, optional, tag = "8")]
    pub list_schemas_req: Option<ListSchemasReq>,
    #[prost(message, optional, tag = "9")]
    pub get_schema_req: Option<GetSchemaReq>,
    #[prost(message, optional, tag = "10")]
    pub module_install_req: Option<ModuleInstallReq>,
    #[prost(message, optional, tag = "11")]
    pub feature_enable_req: Option<FeatureEnableReq>,
    #[prost(message, optional, tag = "12")]
    pub get_item_req: Option<GetItemReq>,
    #[prost(message, optional, tag = "13")]
    pub get_items_req: Option<GetItemsReq>,
    #[prost(message, optional, tag = "14")]
    pub get_subtree_req: Option<GetSubtreeReq>,
    #[prost(message, optional, tag = "15")]
    pub get_subtrees_req: Option<GetSubtreesReq>,
    #[prost(message, optional, tag = "16")]
    pub get_subtree_chunk_req: Option<GetSubtreeChunkReq>,
    #[prost(message, optional, tag = "17")]
    pub set_item_req: Option<SetItemReq>,
    #[prost(message, optional, tag = "18")]
    pub set_item_str_req: Option<SetItemStrReq>,
    #[prost(message, optional, tag = "19")]
    pub delete_item_req: Option<DeleteItemReq>,
    #[prost(message, optional, tag = "20")]
    pub move_item_req: Option<MoveItemReq>,
    #[prost(message, optional, tag = "21")]
    pub validate_req: Option<ValidateReq>,
    #[prost(message, optional, tag = "22")]
    pub commit_req: Option<CommitReq>,
    #[prost(message, optional, tag = "23")]
    pub discard_changes_req: Option<DiscardChangesReq>,
    #[prost(message, optional, tag = "24")]
    pub copy_config_req: Option<CopyConfigReq>,
    #[prost(message, optional, tag = "25")]
    pub lock_req: Option<LockReq>,
    #[prost(message, optional, tag = "26")]
    pub unlock_req: Option<UnlockReq>,
    #[prost(message, optional, tag = "27")]
    pub subscribe_req: Option<SubscribeReq>,
    #[prost(message, optional, tag = "28")]
    pub unsubscribe_req: Option<UnsubscribeReq>,
    #[prost(message, optional, tag = "29")]
    pub check_enabled_running_req: Option<CheckEnabledRunningReq>,
    #[prost(message, optional, tag = "30")]
    pub get_changes_req: Option<GetChangesReq>,
    #[prost(message, optional, tag = "31")]
    pub data_provide_req: Option<DataProvideReq>,
    #[prost(message, optional, tag = "32")]
    pub check_exec_perm_req: Option<CheckExecPermReq>,
    #[prost(message, optional, tag = "33")]
    pub rpc_req: Option<RpcReq>,
    #[prost(message, optional, tag = "34")]
    pub event_notif_req: Option<EventNotifReq>,
    #[prost(message, optional, tag = "35")]
    pub event_notif_replay_req: Option<EventNotifReplayReq>,
}

/// Daemon response. Carries the result code, optional error records and the
/// payload slot matching `operation`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Response {
    #[prost(enumeration = "Operation", tag = "1")]
    pub operation: i32,
    // Result code; 0 is success.
    #[prost(uint32, tag = "2")]
    pub result: u32,
    #[prost(message, repeated, tag = "3")]
    pub errors: Vec<Error>,
    #[prost(message, optional, tag = "4")]
    pub session_start_resp: Option<SessionStartResp>,
    #[prost(message, optional, tag = "5")]
    pub session_stop_resp: Option<SessionStopResp>,
    #[prost(message, optional, tag = "6")]
    pub session_refresh_resp: Option<SessionRefreshResp>,
    #[prost(message, optional, tag = "7")]
    pub session_check_resp: Option<SessionCheckResp>,
    #[prost(message, optional, tag = "8")]
    pub session_switch_ds_resp: Option<SessionSwitchDsResp>,
    #[prost(message, optional, tag = "9")]
    pub session_set_opts_resp: Option<SessionSetOptsResp>,
    #[prost(message, optional, tag = "10")]
    pub list_schemas_resp: Option<ListSchemasResp>,
    #[prost(message, optional, tag = "11")]
    pub get_schema_resp: Option<GetSchemaResp>,
    #[prost(message, optional, tag = "12")]
    pub module_install_resp: Option<ModuleInstallResp>,
    #[prost(message, optional, tag = "13")]
    pub feature_enable_resp: Option<FeatureEnableResp>,
    #[prost(message, optional, tag = "14")]
    pub get_item_resp: Option<GetItemResp>,
    #[prost(message, optional, tag = "15")]
    pub get_items_resp: Option<GetItemsResp>,
    #[prost(message, optional, tag = "16")]
    pub get_subtree_resp: Option<GetSubtreeResp>,
    #[prost(message, optional, tag = "17")]
    pub get_subtrees_resp: Option<GetSubtreesResp>,
    #[prost(message, optional, tag = "18")]
    pub get_subtree_chunk_resp: Option<GetSubtreeChunkResp>,
    #[prost(message, optional, tag = "19")]
    pub set_item_resp: Option<SetItemResp>,
    #[prost(message, optional, tag = "20")]
    pub set_item_str_resp: Option<SetItemStrResp>,
    #[prost(message, optional, tag = "21")]
    pub delete_item_resp: Option<DeleteItemResp>,
    #[prost(message, optional, tag = "22")]
    pub move_item_resp: Option<MoveItemResp>,
    #[prost(message, optional, tag = "23")]
    pub validate_resp: Option<ValidateResp>,
    #[prost(message, optional, tag = "24")]
    pub commit_resp: Option<CommitResp>,
    #[prost(message, optional, tag = "25")]
    pub discard_changes_resp: Option<DiscardChangesResp>,
    #[prost(message, optional, tag = "26")]
    pub copy_config_resp: Option<CopyConfigResp>,
    #[prost(message, optional, tag = "27")]
    pub lock_resp: Option<LockResp>,
    #[prost(message, optional, tag = "28")]
    pub unlock_resp: Option<UnlockResp>,
    #[prost(message, optional, tag = "29")]
    pub subscribe_resp: Option<SubscribeResp>,
    #[prost(message, optional, tag = "30")]
    pub unsubscribe_resp: Option<UnsubscribeResp>,
    #[prost(message, optional, tag = "31")]
    pub check_enabled_running_resp: Option<CheckEnabledRunningResp>,
    #[prost(message, optional, tag = "32")]
    pub get_changes_resp: Option<GetChangesResp>,
    #[prost(message, optional, tag = "33")]
    pub data_provide_resp: Option<DataProvideResp>,
    #[prost(message, optional, tag = "34")]
    pub check_exec_perm_resp: Option<CheckExecPermResp>,
    #[prost(message, optional, tag = "35")]
    pub rpc_resp: Option<RpcResp>,
    #[prost(message, optional, tag = "36")]
    pub event_notif_resp: Option<EventNotifResp>,
    #[prost(message, optional, tag = "37")]
    pub event_notif_replay_resp: Option<EventNotifReplayResp>,
}

/// Subscriber notification.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Notification {
    #[prost(enumeration = "SubscriptionType", tag = "1")]
    pub subscription_type: i32,
    #[prost(string, tag = "2")]
    pub destination_address: String,
    #[prost(uint32, tag = "3")]
    pub subscription_id: u32,
    #[prost(message, optional, tag = "4")]
    pub module_install_notif: Option<ModuleInstallNotification>,
    #[prost(message, optional, tag = "5")]
    pub feature_enable_notif: Option<FeatureEnableNotification>,
    #[prost(message, optional, tag = "6")]
    pub module_change_notif: Option<ModuleChangeNotification>,
    #[prost(message, optional, tag = "7")]
    pub subtree_change_notif: Option<SubtreeChangeNotification>,
}

/// Acknowledgment of a delivered notification; embeds the notification it
/// acknowledges.
#[derive(Clone, PartialEq, prost::Message)]
pub struct NotificationAck {
    #[prost(message, optional, tag = "1")]
    pub notif: Option<Notification>,
    #[prost(uint32, tag = "2")]
    pub result: u32,
    #[prost(message, repeated, tag = "3")]
    pub errors: Vec<Error>,
}

/// Daemon-internal request, not tied to any session.
#[derive(Clone, PartialEq, prost::Message)]
pub struct InternalRequest {
    #[prost(enumeration = "Operation", tag = "1")]
    pub operation: i32,
    #[prost(message, optional, tag = "2")]
    pub unsubscribe_dst_req: Option<UnsubscribeDestinationReq>,
    #[prost(message, optional, tag = "3")]
    pub commit_timeout_req: Option<CommitTimeoutReq>,
    #[prost(message, optional, tag = "4")]
    pub oper_data_timeout_req: Option<OperDataTimeoutReq>,
    #[prost(message, optional, tag = "5")]
    pub internal_state_data_req: Option<InternalStateDataReq>,
    #[prost(message, optional, tag = "6")]
    pub notif_store_cleanup_req: Option<NotifStoreCleanupReq>,
    #[prost(message, optional, boxed, tag = "7")]
    pub delayed_msg_req: Option<Box<DelayedMsgReq>>,
}

/// Top-level envelope: exactly one of the five bodies is populated,
/// matching `msg_type`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Msg {
    #[prost(enumeration = "MsgType", tag = "1")]
    pub msg_type: i32,
    #[prost(uint32, tag = "2")]
    pub session_id: u32,
    #[prost(message, optional, tag = "3")]
    pub request: Option<Request>,
    #[prost(message, optional, tag = "4")]
    pub response: Option<Response>,
    #[prost(message, optional, tag = "5")]
    pub notification: Option<Notification>,
    #[prost(message, optional, tag = "6")]
    pub notification_ack: Option<NotificationAck>,
    #[prost(message, optional, tag = "7")]
    pub internal_request: Option<InternalRequest>,
}

// ===== impl Operation =====

impl Operation {
    /// Operation name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::SessionStart => "session-start",
            Operation::SessionStop => "session-stop",
            Operation::SessionRefresh => "session-refresh",
            Operation::SessionCheck => "session-check",
            Operation::SessionSwitchDs => "session-switch-ds",
            Operation::SessionSetOpts => "session-set-opts",
            Operation::ListSchemas => "list-schemas",
            Operation::GetSchema => "get-schema",
            Operation::ModuleInstall => "module-install",
            Operation::FeatureEnable => "feature-enable",
            Operation::GetItem => "get-item",
            Operation::GetItems => "get-items",
            Operation::GetSubtree => "get-subtree",
            Operation::GetSubtrees => "get-subtrees",
            Operation::GetSubtreeChunk => "get-subtree-chunk",
            Operation::SetItem => "set-item",
            Operation::SetItemStr => "set-item-str",
            Operation::DeleteItem => "delete-item",
            Operation::MoveItem => "move-item",
            Operation::Validate => "validate",
            Operation::Commit => "commit",
            Operation::DiscardChanges => "discard-changes",
            Operation::CopyConfig => "copy-config",
            Operation::Lock => "lock",
            Operation::Unlock => "unlock",
            Operation::Subscribe => "subscribe",
            Operation::Unsubscribe => "unsubscribe",
            Operation::CheckEnabledRunning => "check-enabled-running",
            Operation::GetChanges => "get-changes",
            Operation::DataProvide => "data-provide",
            Operation::CheckExecPermission => "check-exec-permission",
            Operation::Rpc => "rpc",
            Operation::Action => "action",
            Operation::EventNotif => "event-notification",
            Operation::EventNotifReplay => "event-notification-replay",
            Operation::UnsubscribeDestination => "unsubscribe-destination",
            Operation::CommitTimeout => "commit-timeout",
            Operation::OperDataTimeout => "oper-data-timeout",
            Operation::InternalStateData => "internal-state-data",
            Operation::NotifStoreCleanup => "notification-store-cleanup",
            Operation::DelayedMsg => "delayed-msg",
        }
    }
}

// ===== impl SubscriptionType =====

impl SubscriptionType {
    /// Subscription type name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            SubscriptionType::ModuleInstallSubs => "module-install",
            SubscriptionType::FeatureEnableSubs => "feature-enable",
            SubscriptionType::ModuleChangeSubs => "module-change",
            SubscriptionType::SubtreeChangeSubs => "subtree-change",
            SubscriptionType::DpGetItemsSubs => "dp-get-items",
            SubscriptionType::RpcSubs => "rpc",
            SubscriptionType::ActionSubs => "action",
            SubscriptionType::EventNotifSubs => "event-notification",
            SubscriptionType::HelloSubs => "hello",
            SubscriptionType::CommitEndSubs => "commit-end",
        }
    }

    pub fn from_name(name: &str) -> Option<SubscriptionType> {
        match name {
            "module-install" => Some(SubscriptionType::ModuleInstallSubs),
            "feature-enable" => Some(SubscriptionType::FeatureEnableSubs),
            "module-change" => Some(SubscriptionType::ModuleChangeSubs),
            "subtree-change" => Some(SubscriptionType::SubtreeChangeSubs),
            "dp-get-items" => Some(SubscriptionType::DpGetItemsSubs),
            "rpc" => Some(SubscriptionType::RpcSubs),
            "action" => Some(SubscriptionType::ActionSubs),
            "event-notification" => Some(SubscriptionType::EventNotifSubs),
            "hello" => Some(SubscriptionType::HelloSubs),
            "commit-end" => Some(SubscriptionType::CommitEndSubs),
            _ => None,
        }
    }
}
