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

//! The configuration consumed by [`setup`](crate::setup).

/// The capability [`setup`](crate::setup) needs from an application's configuration.
///
/// Implement it on your own config type, or use [`LogConfig`].
pub trait Config {
    /// The threshold name, e.g. `"info"`. Empty or unrecognized means `debug`.
    fn level(&self) -> &str;

    /// The log file path. Empty means a file in the temporary directory.
    fn path(&self) -> &str;

    /// Whether to also write to stdout.
    fn console(&self) -> bool;

    /// Whether to write through a background buffer.
    fn is_async(&self) -> bool;
}

/// A plain [`Config`].
///
/// With the `serde` feature it can be deserialized from application config files; every field
/// is optional and `async` is spelled without the `is_` prefix.
///
/// # Examples
///
/// ```
/// use loglet::Config;
/// use loglet::LogConfig;
///
/// let config = LogConfig::new("/var/log/my_app/app.log")
///     .with_level("info")
///     .with_console(true);
/// assert_eq!(config.level(), "info");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// See [`Config::level`].
    pub level: String,
    /// See [`Config::path`].
    pub path: String,
    /// See [`Config::console`].
    pub console: bool,
    /// See [`Config::is_async`].
    #[cfg_attr(feature = "serde", serde(rename = "async"))]
    pub is_async: bool,
}

impl LogConfig {
    /// Create a config writing to `path` at the `debug` threshold.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the threshold name.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Also write to stdout.
    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Write through a background buffer.
    pub fn with_async(mut self, is_async: bool) -> Self {
        self.is_async = is_async;
        self
    }
}

impl Config for LogConfig {
    fn level(&self) -> &str {
        &self.level
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn console(&self) -> bool {
        self.console
    }

    fn is_async(&self) -> bool {
        self.is_async
    }
}
