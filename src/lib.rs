// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod ledger;
pub mod models;
pub mod money;
pub mod storage;
pub mod todo;
pub mod utils;
pub mod commands;

pub use error::{Error, Result};
pub use ledger::{Ledger, TransactionFilter};
pub use storage::{Storage, TaskStorage};
pub use todo::{TaskFilter, TaskList};
