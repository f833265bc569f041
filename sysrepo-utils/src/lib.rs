//
// Copyright (c) The Sysrepo Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod error;
pub mod paths;
pub mod tree;
pub mod value;

pub use error::{Result, SrError};
