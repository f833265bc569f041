//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

use prost::Message;
use sysrepo_mem::Mem;
use sysrepo_proto::wire::{Msg, MsgType, Operation, SubscriptionType};
use sysrepo_proto::{builder, validate};
use sysrepo_utils::SrError;

// Every operation code valid in Request/Response envelopes.
const REQUEST_OPS: &[Operation] = &[
    Operation::SessionStart,
    Operation::SessionStop,
    Operation::SessionRefresh,
    Operation::SessionCheck,
    Operation::SessionSwitchDs,
    Operation::SessionSetOpts,
    Operation::ListSchemas,
    Operation::GetSchema,
    Operation::ModuleInstall,
    Operation::FeatureEnable,
    Operation::GetItem,
    Operation::GetItems,
    Operation::GetSubtree,
    Operation::GetSubtrees,
    Operation::GetSubtreeChunk,
    Operation::SetItem,
    Operation::SetItemStr,
    Operation::DeleteItem,
    Operation::MoveItem,
    Operation::Validate,
    Operation::Commit,
    Operation::DiscardChanges,
    Operation::CopyConfig,
    Operation::Lock,
    Operation::Unlock,
    Operation::Subscribe,
    Operation::Unsubscribe,
    Operation::CheckEnabledRunning,
    Operation::GetChanges,
    Operation::DataProvide,
    Operation::CheckExecPermission,
    Operation::Rpc,
    Operation::Action,
    Operation::EventNotif,
    Operation::EventNotifReplay,
];

const INTERNAL_OPS: &[Operation] = &[
    Operation::UnsubscribeDestination,
    Operation::CommitTimeout,
    Operation::OperDataTimeout,
    Operation::InternalStateData,
    Operation::NotifStoreCleanup,
    Operation::DelayedMsg,
];

const NOTIF_TYPES: &[SubscriptionType] = &[
    SubscriptionType::ModuleInstallSubs,
    SubscriptionType::FeatureEnableSubs,
    SubscriptionType::ModuleChangeSubs,
    SubscriptionType::SubtreeChangeSubs,
    SubscriptionType::HelloSubs,
    SubscriptionType::CommitEndSubs,
];

fn roundtrip(msg: &Msg) -> Msg {
    Msg::decode(msg.encode_to_vec().as_slice()).unwrap()
}

#[test]
fn test_request_build_validate_roundtrip() {
    for &op in REQUEST_OPS {
        let msg = builder::request(None, op, 7).unwrap();
        assert_eq!(validate::validate(&msg, MsgType::Request, op), Ok(()));
        assert_eq!(roundtrip(&msg), msg, "operation {}", op.name());
    }
}

#[test]
fn test_response_build_validate_roundtrip() {
    for &op in REQUEST_OPS {
        let msg = builder::response(None, op, 7).unwrap();
        assert_eq!(validate::validate(&msg, MsgType::Response, op), Ok(()));
        assert_eq!(roundtrip(&msg), msg, "operation {}", op.name());
    }
}

#[test]
fn test_internal_request_build_roundtrip() {
    for &op in INTERNAL_OPS {
        let msg = builder::internal_request(None, op).unwrap();
        assert_eq!(msg.msg_type, MsgType::InternalRequest as i32);
        assert_eq!(roundtrip(&msg), msg, "operation {}", op.name());
    }
}

#[test]
fn test_builder_rejects_mismatched_codes() {
    // Internal codes are not valid in client requests, and vice versa.
    for &op in INTERNAL_OPS {
        assert_eq!(builder::request(None, op, 1), Err(SrError::Unsupported));
        assert_eq!(builder::response(None, op, 1), Err(SrError::Unsupported));
    }
    for &op in REQUEST_OPS {
        assert_eq!(
            builder::internal_request(None, op),
            Err(SrError::Unsupported)
        );
    }
}

#[test]
fn test_rpc_action_share_payload() {
    let rpc = builder::request(None, Operation::Rpc, 1).unwrap();
    assert!(!rpc.request.as_ref().unwrap().rpc_req.as_ref().unwrap().action);
    let action = builder::request(None, Operation::Action, 1).unwrap();
    assert!(
        action.request.as_ref().unwrap().rpc_req.as_ref().unwrap().action
    );
}

#[test]
fn test_validator_rejects_wrong_operation() {
    // A GET_ITEMS request validated as such is fine; re-labeling its
    // operation code makes it malformed since the payload slot no longer
    // matches.
    let mut msg = builder::request(None, Operation::GetItems, 42).unwrap();
    assert_eq!(
        validate::validate(&msg, MsgType::Request, Operation::GetItems),
        Ok(())
    );
    msg.request.as_mut().unwrap().operation = Operation::GetItem as i32;
    assert_eq!(
        validate::validate(&msg, MsgType::Request, Operation::GetItem),
        Err(SrError::MalformedMsg)
    );
}

#[test]
fn test_validator_rejects_absent_payload() {
    let mut msg = builder::request(None, Operation::Commit, 1).unwrap();
    msg.request.as_mut().unwrap().commit_req = None;
    assert_eq!(
        validate::validate(&msg, MsgType::Request, Operation::Commit),
        Err(SrError::MalformedMsg)
    );
}

#[test]
fn test_validator_rejects_wrong_kind() {
    let msg = builder::request(None, Operation::Lock, 1).unwrap();
    assert_eq!(
        validate::validate(&msg, MsgType::Response, Operation::Lock),
        Err(SrError::MalformedMsg)
    );
    assert_eq!(
        validate::validate_notification(&msg, SubscriptionType::HelloSubs),
        Err(SrError::MalformedMsg)
    );
}

#[test]
fn test_validator_rejects_absent_body() {
    let msg = Msg {
        msg_type: MsgType::Request as i32,
        session_id: 1,
        ..Default::default()
    };
    assert_eq!(
        validate::validate(&msg, MsgType::Request, Operation::Lock),
        Err(SrError::MalformedMsg)
    );
}

#[test]
fn test_notification_build_validate_roundtrip() {
    for &stype in NOTIF_TYPES {
        let msg =
            builder::notification(None, stype, "/tmp/subscriber.sock", 13)
                .unwrap();
        assert_eq!(validate::validate_notification(&msg, stype), Ok(()));
        assert_eq!(roundtrip(&msg), msg, "type {}", stype.name());
    }

    // Types without a notification payload slot are not buildable.
    assert_eq!(
        builder::notification(None, SubscriptionType::RpcSubs, "dst", 1),
        Err(SrError::Unsupported)
    );
}

#[test]
fn test_notification_hello_carveout() {
    // HELLO and COMMIT_END pass validation regardless of the expected
    // subscription type.
    for stype in [SubscriptionType::HelloSubs, SubscriptionType::CommitEndSubs]
    {
        let msg = builder::notification(None, stype, "dst", 1).unwrap();
        assert_eq!(
            validate::validate_notification(
                &msg,
                SubscriptionType::ModuleChangeSubs
            ),
            Ok(())
        );
    }

    // Other mismatches stay rejected.
    let msg = builder::notification(
        None,
        SubscriptionType::ModuleInstallSubs,
        "dst",
        1,
    )
    .unwrap();
    assert_eq!(
        validate::validate_notification(
            &msg,
            SubscriptionType::FeatureEnableSubs
        ),
        Err(SrError::MalformedMsg)
    );
}

#[test]
fn test_notification_ack_embeds_notification() {
    let notif = builder::notification(
        None,
        SubscriptionType::ModuleChangeSubs,
        "dst",
        5,
    )
    .unwrap();
    let ack = builder::notification_ack(None, &notif).unwrap();
    assert_eq!(ack.msg_type, MsgType::NotificationAck as i32);
    assert_eq!(
        ack.notification_ack.as_ref().unwrap().notif,
        notif.notification
    );
    assert_eq!(roundtrip(&ack), ack);

    // Acknowledging a non-notification envelope is an error.
    let req = builder::request(None, Operation::Commit, 1).unwrap();
    assert_eq!(builder::notification_ack(None, &req), Err(SrError::InvalArg));
}

#[test]
fn test_builder_retains_region() {
    let mem = Mem::new();
    let _msg = builder::request(Some(&mem), Operation::GetItems, 1).unwrap();
    assert_eq!(mem.obj_count(), 1);

    // A failed build leaves the region untouched.
    let result =
        builder::request(Some(&mem), Operation::DelayedMsg, 1).unwrap_err();
    assert_eq!(result, SrError::Unsupported);
    assert_eq!(mem.obj_count(), 1);

    assert!(mem.release());
}

#[test]
fn test_error_records() {
    let mut msg = builder::response(None, Operation::Commit, 9).unwrap();
    let response = msg.response.as_mut().unwrap();
    response.result = SrError::OperationFailed.code();
    builder::fill_errors(
        response,
        &[
            builder::ErrorInfo {
                message: Some("validation failed".to_owned()),
                xpath: Some("/test-module:cont/leaf".to_owned()),
            },
            builder::ErrorInfo {
                message: Some("another error".to_owned()),
                xpath: None,
            },
        ],
    );
    let decoded = roundtrip(&msg);
    let response = decoded.response.as_ref().unwrap();
    assert_eq!(SrError::from_code(response.result),
        Err(SrError::OperationFailed));
    assert_eq!(response.errors.len(), 2);
    assert_eq!(
        response.errors[0].xpath.as_deref(),
        Some("/test-module:cont/leaf")
    );
    assert_eq!(response.errors[1].xpath, None);
}
