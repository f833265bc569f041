//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

//! Structural validation of decoded envelopes.
//!
//! Locally built envelopes are well-formed by construction; this check
//! guards everything that arrives from the wire before any business logic
//! runs. All failures surface as `MalformedMsg` with no per-field detail.

use sysrepo_utils::{Result, SrError};

use crate::wire::{Msg, MsgType, Operation, Request, Response, SubscriptionType};

// ===== global functions =====

/// Verifies that the envelope has the expected kind, carries the expected
/// operation code, and that the payload slot required by that code is
/// present.
pub fn validate(msg: &Msg, kind: MsgType, operation: Operation) -> Result<()> {
    if msg.msg_type != kind as i32 {
        return Err(SrError::MalformedMsg);
    }
    match kind {
        MsgType::Request => {
            let request = msg.request.as_ref().ok_or(SrError::MalformedMsg)?;
            if request.operation != operation as i32 {
                return Err(SrError::MalformedMsg);
            }
            validate_request_payload(request, operation)
        }
        MsgType::Response => {
            let response =
                msg.response.as_ref().ok_or(SrError::MalformedMsg)?;
            if response.operation != operation as i32 {
                return Err(SrError::MalformedMsg);
            }
            validate_response_payload(response, operation)
        }
        _ => Err(SrError::MalformedMsg),
    }
}

/// Verifies a notification envelope against the expected subscription type.
///
/// `HELLO` and `COMMIT_END` notifications are accepted regardless of the
/// expected type; subscribers use them as out-of-band heartbeats.
pub fn validate_notification(
    msg: &Msg,
    subscription_type: SubscriptionType,
) -> Result<()> {
    if msg.msg_type != MsgType::Notification as i32 {
        return Err(SrError::MalformedMsg);
    }
    let notif = msg.notification.as_ref().ok_or(SrError::MalformedMsg)?;
    if notif.subscription_type != SubscriptionType::HelloSubs as i32
        && notif.subscription_type != SubscriptionType::CommitEndSubs as i32
        && notif.subscription_type != subscription_type as i32
    {
        return Err(SrError::MalformedMsg);
    }

    let present = match SubscriptionType::try_from(notif.subscription_type) {
        Ok(SubscriptionType::ModuleInstallSubs) => {
            notif.module_install_notif.is_some()
        }
        Ok(SubscriptionType::FeatureEnableSubs) => {
            notif.feature_enable_notif.is_some()
        }
        Ok(SubscriptionType::ModuleChangeSubs) => {
            notif.module_change_notif.is_some()
        }
        Ok(SubscriptionType::SubtreeChangeSubs) => {
            notif.subtree_change_notif.is_some()
        }
        Ok(SubscriptionType::HelloSubs)
        | Ok(SubscriptionType::CommitEndSubs) => true,
        _ => false,
    };
    if !present {
        return Err(SrError::MalformedMsg);
    }
    Ok(())
}

// ===== helper functions =====

fn validate_request_payload(
    request: &Request,
    operation: Operation,
) -> Result<()> {
    let present = match operation {
        Operation::SessionStart => request.session_start_req.is_some(),
        Operation::SessionStop => request.session_stop_req.is_some(),
        Operation::SessionRefresh => request.session_refresh_req.is_some(),
        Operation::SessionCheck => request.session_check_req.is_some(),
        Operation::SessionSwitchDs => request.session_switch_ds_req.is_some(),
        Operation::SessionSetOpts => request.session_set_opts_req.is_some(),
        Operation::ListSchemas => request.list_schemas_req.is_some(),
        Operation::GetSchema => request.get_schema_req.is_some(),
        Operation::ModuleInstall => request.module_install_req.is_some(),
        Operation::FeatureEnable => request.feature_enable_req.is_some(),
        Operation::GetItem => request.get_item_req.is_some(),
        Operation::GetItems => request.get_items_req.is_some(),
        Operation::GetSubtree => request.get_subtree_req.is_some(),
        Operation::GetSubtrees => request.get_subtrees_req.is_some(),
        Operation::GetSubtreeChunk => {
            request.get_subtree_chunk_req.is_some()
        }
        Operation::SetItem => request.set_item_req.is_some(),
        Operation::SetItemStr => request.set_item_str_req.is_some(),
        Operation::DeleteItem => request.delete_item_req.is_some(),
        Operation::MoveItem => request.move_item_req.is_some(),
        Operation::Validate => request.validate_req.is_some(),
        Operation::Commit => request.commit_req.is_some(),
        Operation::DiscardChanges => request.discard_changes_req.is_some(),
        Operation::CopyConfig => request.copy_config_req.is_some(),
        Operation::Lock => request.lock_req.is_some(),
        Operation::Unlock => request.unlock_req.is_some(),
        Operation::Subscribe => request.subscribe_req.is_some(),
        Operation::Unsubscribe => request.unsubscribe_req.is_some(),
        Operation::CheckEnabledRunning => {
            request.check_enabled_running_req.is_some()
        }
        Operation::GetChanges => request.get_changes_req.is_some(),
        Operation::DataProvide => request.data_provide_req.is_some(),
        Operation::CheckExecPermission => {
            request.check_exec_perm_req.is_some()
        }
        Operation::Rpc | Operation::Action => request.rpc_req.is_some(),
        Operation::EventNotif => request.event_notif_req.is_some(),
        Operation::EventNotifReplay => {
            request.event_notif_replay_req.is_some()
        }
        _ => false,
    };
    if !present {
        return Err(SrError::MalformedMsg);
    }
    Ok(())
}

fn validate_response_payload(
    response: &Response,
    operation: Operation,
) -> Result<()> {
    let present = match operation {
        Operation::SessionStart => response.session_start_resp.is_some(),
        Operation::SessionStop => response.session_stop_resp.is_some(),
        Operation::SessionRefresh => response.session_refresh_resp.is_some(),
        Operation::SessionCheck => response.session_check_resp.is_some(),
        Operation::SessionSwitchDs => {
            response.session_switch_ds_resp.is_some()
        }
        Operation::SessionSetOpts => {
            response.session_set_opts_resp.is_some()
        }
        Operation::ListSchemas => response.list_schemas_resp.is_some(),
        Operation::GetSchema => response.get_schema_resp.is_some(),
        Operation::ModuleInstall => response.module_install_resp.is_some(),
        Operation::FeatureEnable => response.feature_enable_resp.is_some(),
        Operation::GetItem => response.get_item_resp.is_some(),
        Operation::GetItems => response.get_items_resp.is_some(),
        Operation::GetSubtree => response.get_subtree_resp.is_some(),
        Operation::GetSubtrees => response.get_subtrees_resp.is_some(),
        Operation::GetSubtreeChunk => {
            response.get_subtree_chunk_resp.is_some()
        }
        Operation::SetItem => response.set_item_resp.is_some(),
        Operation::SetItemStr => response.set_item_str_resp.is_some(),
        Operation::DeleteItem => response.delete_item_resp.is_some(),
        Operation::MoveItem => response.move_item_resp.is_some(),
        Operation::Validate => response.validate_resp.is_some(),
        Operation::Commit => response.commit_resp.is_some(),
        Operation::DiscardChanges => response.discard_changes_resp.is_some(),
        Operation::CopyConfig => response.copy_config_resp.is_some(),
        Operation::Lock => response.lock_resp.is_some(),
        Operation::Unlock => response.unlock_resp.is_some(),
        Operation::Subscribe => response.subscribe_resp.is_some(),
        Operation::Unsubscribe => response.unsubscribe_resp.is_some(),
        Operation::CheckEnabledRunning => {
            response.check_enabled_running_resp.is_some()
        }
        Operation::GetChanges => response.get_changes_resp.is_some(),
        Operation::DataProvide => response.data_provide_resp.is_some(),
        Operation::CheckExecPermission => {
            response.check_exec_perm_resp.is_some()
        }
        Operation::Rpc | Operation::Action => response.rpc_resp.is_some(),
        Operation::EventNotif => response.event_notif_resp.is_some(),
        Operation::EventNotifReplay => {
            response.event_notif_replay_resp.is_some()
        }
        _ => false,
    };
    if !present {
        return Err(SrError::MalformedMsg);
    }
    Ok(())
}
