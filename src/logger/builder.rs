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

use crate::Append;
use crate::Logger;
use crate::Trap;
use crate::record::Level;
use crate::record::LevelFilter;
use crate::trap::DefaultTrap;

/// A builder for configuring a [`Logger`].
///
/// # Examples
///
/// ```
/// use loglet::Logger;
/// use loglet::append;
/// use loglet::record::Level;
///
/// let logger = Logger::builder()
///     .threshold(Level::Info)
///     .append(append::Stdout::default())
///     .build();
/// logger.info("ready", &[]);
/// ```
#[must_use = "call `build` to construct a logger instance"]
#[derive(Debug)]
pub struct LoggerBuilder {
    filter: LevelFilter,
    appends: Vec<Box<dyn Append>>,
    trap: Box<dyn Trap>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Create a builder with a `Debug` threshold, no appenders and the [`DefaultTrap`].
    pub fn new() -> Self {
        LoggerBuilder {
            filter: LevelFilter::MoreSevereEqual(Level::Debug),
            appends: vec![],
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Set the level filter.
    pub fn filter(mut self, filter: LevelFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Emit `level` and everything more severe than it.
    pub fn threshold(mut self, level: Level) -> Self {
        self.filter = LevelFilter::MoreSevereEqual(level);
        self
    }

    /// Add an appender. Records passing the filter go to every appender in insertion order.
    pub fn append(mut self, append: impl Into<Box<dyn Append>>) -> Self {
        self.appends.push(append.into());
        self
    }

    /// Set the trap for errors raised by appenders.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Build the [`Logger`].
    pub fn build(self) -> Logger {
        let Self {
            filter,
            appends,
            trap,
        } = self;
        Logger::new(filter, appends, trap)
    }
}
