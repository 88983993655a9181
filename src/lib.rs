// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Loglet is a process-wide logging facade: one global logger, configured once, usable from
//! anywhere in a process.
//!
//! # Overview
//!
//! Every log line is compact, space-separated text:
//!
//! ```text
//! I 20240811 22:44:57.172 server/main.rs:20 listening port=8080
//! ```
//!
//! The columns are the level letter, the local time, the call site, the message, and then every
//! structured field as `key=value`. Output goes to stdout, to a size-rotated file with
//! compressed backups, or both, written either directly or through a background buffer.
//!
//! Logging works before any setup: the first call installs a default logger that writes
//! everything from `debug` up to stdout. A later [`setup`] replaces it.
//!
//! # Examples
//!
//! Log without any setup:
//!
//! ```
//! loglet::info("service started", &[("port", 8080.into())]);
//! loglet::debugf!("loaded {} routes", 12);
//! ```
//!
//! Log to a rotated file and stdout, through a background buffer:
//!
//! ```
//! use loglet::LogConfig;
//!
//! let dir = std::env::temp_dir().join("loglet-doc");
//! let config = LogConfig::new(dir.join("app.log").to_string_lossy())
//!     .with_level("info")
//!     .with_console(true)
//!     .with_async(true);
//! loglet::setup(Some(&config)).unwrap();
//!
//! loglet::warn("disk almost full", &[("free_mb", 512.into())]);
//! loglet::unsetup().unwrap();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

use std::fmt;

pub mod append;
pub mod bridge;
pub mod encoder;
pub mod kv;
pub mod layout;
pub mod record;
pub mod trap;

mod config;
mod error;
mod global;
mod logger;
mod macros;
mod setup;

pub use self::append::Append;
pub use self::config::Config;
pub use self::config::LogConfig;
pub use self::error::Error;
pub use self::global::LoggerProvider;
pub use self::global::provider;
pub use self::kv::Value;
pub use self::layout::Layout;
pub use self::logger::Logger;
pub use self::logger::LoggerBuilder;
pub use self::setup::BUFFER_SIZE;
pub use self::setup::FLUSH_INTERVAL;
pub use self::setup::MAX_AGE;
pub use self::setup::MAX_BACKUPS;
pub use self::setup::MAX_FILE_SIZE;
pub use self::setup::build_logger;
pub use self::setup::default_logger;
pub use self::setup::setup;
pub use self::setup::threshold;
pub use self::setup::unsetup;
pub use self::trap::Trap;

/// Log a message with structured fields at the debug level.
#[track_caller]
pub fn debug(message: impl fmt::Display, kvs: &[(&str, Value<'_>)]) {
    provider().logger().debug(message, kvs)
}

/// Log a message with structured fields at the info level.
#[track_caller]
pub fn info(message: impl fmt::Display, kvs: &[(&str, Value<'_>)]) {
    provider().logger().info(message, kvs)
}

/// Log a message with structured fields at the warn level.
#[track_caller]
pub fn warn(message: impl fmt::Display, kvs: &[(&str, Value<'_>)]) {
    provider().logger().warn(message, kvs)
}

/// Log a message with structured fields at the error level.
#[track_caller]
pub fn error(message: impl fmt::Display, kvs: &[(&str, Value<'_>)]) {
    provider().logger().error(message, kvs)
}

/// Log a message with structured fields at the fatal level, flush, then exit the process with
/// status 1.
#[track_caller]
pub fn fatal(message: impl fmt::Display, kvs: &[(&str, Value<'_>)]) -> ! {
    provider().logger().fatal(message, kvs)
}

/// Log a message with structured fields at the panic level, flush, then panic with the message.
#[track_caller]
pub fn panic(message: impl fmt::Display, kvs: &[(&str, Value<'_>)]) -> ! {
    provider().logger().panic(message, kvs)
}

/// Log a formatted message at the debug level. See also [`debugf!`].
#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    provider().logger().debugf(args)
}

/// Log a formatted message at the info level. See also [`infof!`].
#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    provider().logger().infof(args)
}

/// Log a formatted message at the warn level. See also [`warnf!`].
#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    provider().logger().warnf(args)
}

/// Log a formatted message at the error level. See also [`errorf!`].
#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    provider().logger().errorf(args)
}

/// Log a formatted message at the fatal level, flush, then exit the process with status 1.
/// See also [`fatalf!`].
#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    provider().logger().fatalf(args)
}

/// Log a formatted message at the panic level, flush, then panic with the message. See also
/// [`panicf!`].
#[track_caller]
pub fn panicf(args: fmt::Arguments<'_>) -> ! {
    provider().logger().panicf(args)
}
