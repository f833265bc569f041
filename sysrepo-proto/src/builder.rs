//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

//! Envelope construction.
//!
//! Every builder allocates the envelope, sets its kind and operation or
//! subscription code, and populates exactly the payload slot belonging to
//! that code, empty but present, so that the payload-presence invariant
//! holds by construction. Messages built against a memory region retain it
//! once; the region may be torn down only after every retained message
//! released it.

use bitflags::bitflags;
use sysrepo_mem::Mem;
use sysrepo_utils::{Result, SrError};

use crate::wire::{
    CheckEnabledRunningReq, CheckEnabledRunningResp, CheckExecPermReq,
    CheckExecPermResp, CommitReq, CommitResp, CommitTimeoutReq, CopyConfigReq,
    CopyConfigResp, DataProvideReq, DataProvideResp, DelayedMsgReq,
    DeleteItemReq, DeleteItemResp, DiscardChangesReq, DiscardChangesResp,
    Error, EventNotifReplayReq, EventNotifReplayResp, EventNotifReq,
    EventNotifResp, FeatureEnableNotification, FeatureEnableReq,
    FeatureEnableResp, GetChangesReq, GetChangesResp, GetItemReq, GetItemResp,
    GetItemsReq, GetItemsResp, GetSchemaReq, GetSchemaResp,
    GetSubtreeChunkReq, GetSubtreeChunkResp, GetSubtreeReq, GetSubtreeResp,
    GetSubtreesReq, GetSubtreesResp, InternalRequest, InternalStateDataReq,
    ListSchemasReq, ListSchemasResp, LockReq, LockResp, ModuleChangeNotification,
    ModuleInstallNotification, ModuleInstallReq, ModuleInstallResp,
    MoveItemReq, MoveItemResp, Msg, MsgType, NotifStoreCleanupReq,
    Notification, NotificationAck, OperDataTimeoutReq, Operation, Request,
    Response, RpcReq,
    RpcResp, SessionCheckReq, SessionCheckResp, SessionRefreshReq,
    SessionRefreshResp, SessionSetOptsReq, SessionSetOptsResp,
    SessionStartReq, SessionStartResp, SessionStopReq, SessionStopResp,
    SessionSwitchDsReq, SessionSwitchDsResp, SetItemReq, SetItemResp,
    SetItemStrReq, SetItemStrResp, SubscribeReq, SubscribeResp,
    SubscriptionType, SubtreeChangeNotification, UnlockReq, UnlockResp,
    UnsubscribeDestinationReq, UnsubscribeReq, UnsubscribeResp, ValidateReq,
    ValidateResp,
};

bitflags! {
    /// Session option flags carried by `SESSION_START` / `SESSION_SET_OPTS`.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct SessionFlags: u32 {
        const CONFIG_ONLY = 0x01;
        const ENABLE_NACM = 0x02;
    }
}

/// Error record used to fill a Response error list.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorInfo {
    pub message: Option<String>,
    pub xpath: Option<String>,
}

// ===== global functions =====

/// Builds a Request envelope for the given operation.
pub fn request(
    mem: Option<&Mem>,
    operation: Operation,
    session_id: u32,
) -> Result<Msg> {
    let snapshot = mem.map(|mem| mem.snapshot());

    let mut req = Request {
        operation: operation as i32,
        ..Default::default()
    };
    match operation {
        Operation::SessionStart => {
            req.session_start_req = Some(SessionStartReq::default());
        }
        Operation::SessionStop => {
            req.session_stop_req = Some(SessionStopReq::default());
        }
        Operation::SessionRefresh => {
            req.session_refresh_req = Some(SessionRefreshReq::default());
        }
        Operation::SessionCheck => {
            req.session_check_req = Some(SessionCheckReq::default());
        }
        Operation::SessionSwitchDs => {
            req.session_switch_ds_req = Some(SessionSwitchDsReq::default());
        }
        Operation::SessionSetOpts => {
            req.session_set_opts_req = Some(SessionSetOptsReq::default());
        }
        Operation::ListSchemas => {
            req.list_schemas_req = Some(ListSchemasReq::default());
        }
        Operation::GetSchema => {
            req.get_schema_req = Some(GetSchemaReq::default());
        }
        Operation::ModuleInstall => {
            req.module_install_req = Some(ModuleInstallReq::default());
        }
        Operation::FeatureEnable => {
            req.feature_enable_req = Some(FeatureEnableReq::default());
        }
        Operation::GetItem => {
            req.get_item_req = Some(GetItemReq::default());
        }
        Operation::GetItems => {
            req.get_items_req = Some(GetItemsReq::default());
        }
        Operation::GetSubtree => {
            req.get_subtree_req = Some(GetSubtreeReq::default());
        }
        Operation::GetSubtrees => {
            req.get_subtrees_req = Some(GetSubtreesReq::default());
        }
        Operation::GetSubtreeChunk => {
            req.get_subtree_chunk_req = Some(GetSubtreeChunkReq::default());
        }
        Operation::SetItem => {
            req.set_item_req = Some(SetItemReq::default());
        }
        Operation::SetItemStr => {
            req.set_item_str_req = Some(SetItemStrReq::default());
        }
        Operation::DeleteItem => {
            req.delete_item_req = Some(DeleteItemReq::default());
        }
        Operation::MoveItem => {
            req.move_item_req = Some(MoveItemReq::default());
        }
        Operation::Validate => {
            req.validate_req = Some(ValidateReq::default());
        }
        Operation::Commit => {
            req.commit_req = Some(CommitReq::default());
        }
        Operation::DiscardChanges => {
            req.discard_changes_req = Some(DiscardChangesReq::default());
        }
        Operation::CopyConfig => {
            req.copy_config_req = Some(CopyConfigReq::default());
        }
        Operation::Lock => {
            req.lock_req = Some(LockReq::default());
        }
        Operation::Unlock => {
            req.unlock_req = Some(UnlockReq::default());
        }
        Operation::Subscribe => {
            req.subscribe_req = Some(SubscribeReq::default());
        }
        Operation::Unsubscribe => {
            req.unsubscribe_req = Some(UnsubscribeReq::default());
        }
        Operation::CheckEnabledRunning => {
            req.check_enabled_running_req =
                Some(CheckEnabledRunningReq::default());
        }
        Operation::GetChanges => {
            req.get_changes_req = Some(GetChangesReq::default());
        }
        Operation::DataProvide => {
            req.data_provide_req = Some(DataProvideReq::default());
        }
        Operation::CheckExecPermission => {
            req.check_exec_perm_req = Some(CheckExecPermReq::default());
        }
        // RPC and ACTION share one payload type.
        Operation::Rpc => {
            req.rpc_req = Some(RpcReq::default());
        }
        Operation::Action => {
            req.rpc_req = Some(RpcReq {
                action: true,
                ..Default::default()
            });
        }
        Operation::EventNotif => {
            req.event_notif_req = Some(EventNotifReq::default());
        }
        Operation::EventNotifReplay => {
            req.event_notif_replay_req = Some(EventNotifReplayReq::default());
        }
        _ => {
            if let (Some(mem), Some(snapshot)) = (mem, &snapshot) {
                mem.restore(snapshot);
            }
            return Err(SrError::Unsupported);
        }
    }

    let msg = Msg {
        msg_type: MsgType::Request as i32,
        session_id,
        request: Some(req),
        ..Default::default()
    };
    if let Some(mem) = mem {
        mem.retain();
    }
    Ok(msg)
}

/// Builds a Response envelope for the given operation.
pub fn response(
    mem: Option<&Mem>,
    operation: Operation,
    session_id: u32,
) -> Result<Msg> {
    let snapshot = mem.map(|mem| mem.snapshot());

    let mut resp = Response {
        operation: operation as i32,
        ..Default::default()
    };
    match operation {
        Operation::SessionStart => {
            resp.session_start_resp = Some(SessionStartResp::default());
        }
        Operation::SessionStop => {
            resp.session_stop_resp = Some(SessionStopResp::default());
        }
        Operation::SessionRefresh => {
            resp.session_refresh_resp = Some(SessionRefreshResp::default());
        }
        Operation::SessionCheck => {
            resp.session_check_resp = Some(SessionCheckResp::default());
        }
        Operation::SessionSwitchDs => {
            resp.session_switch_ds_resp = Some(SessionSwitchDsResp::default());
        }
        Operation::SessionSetOpts => {
            resp.session_set_opts_resp = Some(SessionSetOptsResp::default());
        }
        Operation::ListSchemas => {
            resp.list_schemas_resp = Some(ListSchemasResp::default());
        }
        Operation::GetSchema => {
            resp.get_schema_resp = Some(GetSchemaResp::default());
        }
        Operation::ModuleInstall => {
            resp.module_install_resp = Some(ModuleInstallResp::default());
        }
        Operation::FeatureEnable => {
            resp.feature_enable_resp = Some(FeatureEnableResp::default());
        }
        Operation::GetItem => {
            resp.get_item_resp = Some(GetItemResp::default());
        }
        Operation::GetItems => {
            resp.get_items_resp = Some(GetItemsResp::default());
        }
        Operation::GetSubtree => {
            resp.get_subtree_resp = Some(GetSubtreeResp::default());
        }
        Operation::GetSubtrees => {
            resp.get_subtrees_resp = Some(GetSubtreesResp::default());
        }
        Operation::GetSubtreeChunk => {
            resp.get_subtree_chunk_resp = Some(GetSubtreeChunkResp::default());
        }
        Operation::SetItem => {
            resp.set_item_resp = Some(SetItemResp::default());
        }
        Operation::SetItemStr => {
            resp.set_item_str_resp = Some(SetItemStrResp::default());
        }
        Operation::DeleteItem => {
            resp.delete_item_resp = Some(DeleteItemResp::default());
        }
        Operation::MoveItem => {
            resp.move_item_resp = Some(MoveItemResp::default());
        }
        Operation::Validate => {
            resp.validate_resp = Some(ValidateResp::default());
        }
        Operation::Commit => {
            resp.commit_resp = Some(CommitResp::default());
        }
        Operation::DiscardChanges => {
            resp.discard_changes_resp = Some(DiscardChangesResp::default());
        }
        Operation::CopyConfig => {
            resp.copy_config_resp = Some(CopyConfigResp::default());
        }
        Operation::Lock => {
            resp.lock_resp = Some(LockResp::default());
        }
        Operation::Unlock => {
            resp.unlock_resp = Some(UnlockResp::default());
        }
        Operation::Subscribe => {
            resp.subscribe_resp = Some(SubscribeResp::default());
        }
        Operation::Unsubscribe => {
            resp.unsubscribe_resp = Some(UnsubscribeResp::default());
        }
        Operation::CheckEnabledRunning => {
            resp.check_enabled_running_resp =
                Some(CheckEnabledRunningResp::default());
        }
        Operation::GetChanges => {
            resp.get_changes_resp = Some(GetChangesResp::default());
        }
        Operation::DataProvide => {
            resp.data_provide_resp = Some(DataProvideResp::default());
        }
        Operation::CheckExecPermission => {
            resp.check_exec_perm_resp = Some(CheckExecPermResp::default());
        }
        Operation::Rpc => {
            resp.rpc_resp = Some(RpcResp::default());
        }
        Operation::Action => {
            resp.rpc_resp = Some(RpcResp {
                action: true,
                ..Default::default()
            });
        }
        Operation::EventNotif => {
            resp.event_notif_resp = Some(EventNotifResp::default());
        }
        Operation::EventNotifReplay => {
            resp.event_notif_replay_resp =
                Some(EventNotifReplayResp::default());
        }
        _ => {
            if let (Some(mem), Some(snapshot)) = (mem, &snapshot) {
                mem.restore(snapshot);
            }
            return Err(SrError::Unsupported);
        }
    }

    let msg = Msg {
        msg_type: MsgType::Response as i32,
        session_id,
        response: Some(resp),
        ..Default::default()
    };
    if let Some(mem) = mem {
        mem.retain();
    }
    Ok(msg)
}

/// Builds a Notification envelope of the given subscription type.
pub fn notification(
    mem: Option<&Mem>,
    subscription_type: SubscriptionType,
    destination: &str,
    subscription_id: u32,
) -> Result<Msg> {
    let snapshot = mem.map(|mem| mem.snapshot());

    let mut notif = Notification {
        subscription_type: subscription_type as i32,
        destination_address: destination.to_owned(),
        subscription_id,
        ..Default::default()
    };
    match subscription_type {
        SubscriptionType::ModuleInstallSubs => {
            notif.module_install_notif =
                Some(ModuleInstallNotification::default());
        }
        SubscriptionType::FeatureEnableSubs => {
            notif.feature_enable_notif =
                Some(FeatureEnableNotification::default());
        }
        SubscriptionType::ModuleChangeSubs => {
            notif.module_change_notif =
                Some(ModuleChangeNotification::default());
        }
        SubscriptionType::SubtreeChangeSubs => {
            notif.subtree_change_notif =
                Some(SubtreeChangeNotification::default());
        }
        // Heartbeat types carry no payload.
        SubscriptionType::HelloSubs | SubscriptionType::CommitEndSubs => (),
        _ => {
            if let (Some(mem), Some(snapshot)) = (mem, &snapshot) {
                mem.restore(snapshot);
            }
            return Err(SrError::Unsupported);
        }
    }

    let msg = Msg {
        msg_type: MsgType::Notification as i32,
        session_id: 0,
        notification: Some(notif),
        ..Default::default()
    };
    if let Some(mem) = mem {
        mem.retain();
    }
    Ok(msg)
}

/// Builds a NotificationAck envelope embedding the acknowledged
/// notification.
pub fn notification_ack(mem: Option<&Mem>, notification: &Msg) -> Result<Msg> {
    let notif = notification
        .notification
        .as_ref()
        .ok_or(SrError::InvalArg)?;

    let msg = Msg {
        msg_type: MsgType::NotificationAck as i32,
        session_id: 0,
        notification_ack: Some(NotificationAck {
            notif: Some(notif.clone()),
            ..Default::default()
        }),
        ..Default::default()
    };
    if let Some(mem) = mem {
        mem.retain();
    }
    Ok(msg)
}

/// Builds an InternalRequest envelope for the given internal operation.
pub fn internal_request(mem: Option<&Mem>, operation: Operation) -> Result<Msg> {
    let mut req = InternalRequest {
        operation: operation as i32,
        ..Default::default()
    };
    match operation {
        Operation::UnsubscribeDestination => {
            req.unsubscribe_dst_req =
                Some(UnsubscribeDestinationReq::default());
        }
        Operation::CommitTimeout => {
            req.commit_timeout_req = Some(CommitTimeoutReq::default());
        }
        Operation::OperDataTimeout => {
            req.oper_data_timeout_req = Some(OperDataTimeoutReq::default());
        }
        Operation::InternalStateData => {
            req.internal_state_data_req =
                Some(InternalStateDataReq::default());
        }
        Operation::NotifStoreCleanup => {
            req.notif_store_cleanup_req =
                Some(NotifStoreCleanupReq::default());
        }
        Operation::DelayedMsg => {
            req.delayed_msg_req = Some(Box::new(DelayedMsgReq::default()));
        }
        _ => return Err(SrError::Unsupported),
    }

    let msg = Msg {
        msg_type: MsgType::InternalRequest as i32,
        session_id: 0,
        internal_request: Some(req),
        ..Default::default()
    };
    if let Some(mem) = mem {
        mem.retain();
    }
    Ok(msg)
}

/// Fills a Response error list from the given error records.
pub fn fill_errors(response: &mut Response, errors: &[ErrorInfo]) {
    response.errors = errors
        .iter()
        .map(|error| Error {
            message: error.message.clone(),
            xpath: error.xpath.clone(),
        })
        .collect();
}
