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

use std::fmt;
use std::panic::Location;

use crate::Append;
use crate::Error;
use crate::Trap;
use crate::kv::Value;
use crate::logger::LoggerBuilder;
use crate::record::Level;
use crate::record::LevelFilter;
use crate::record::Record;

/// A logger that checks records against a threshold and dispatches them to its appenders.
///
/// Write failures never reach the caller; they go to the logger's [`Trap`].
///
/// Every leveled method attributes the record to its own call site.
#[derive(Debug)]
pub struct Logger {
    filter: LevelFilter,
    appends: Vec<Box<dyn Append>>,
    trap: Box<dyn Trap>,
}

impl Logger {
    pub(super) fn new(
        filter: LevelFilter,
        appends: Vec<Box<dyn Append>>,
        trap: Box<dyn Trap>,
    ) -> Self {
        Self {
            filter,
            appends,
            trap,
        }
    }

    /// Create a new [`LoggerBuilder`].
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// The level filter of this logger.
    pub fn filter(&self) -> LevelFilter {
        self.filter
    }

    /// Whether a record of `level` would be emitted.
    pub fn enabled(&self, level: Level) -> bool {
        self.filter.test(level)
    }

    /// Dispatch a record to all appenders, if its level passes the filter.
    pub fn log(&self, record: &Record) {
        if !self.enabled(record.level()) {
            return;
        }

        for append in &self.appends {
            if let Err(err) = append.append(record) {
                let err = Error::new("failed to append record").with_source(err);
                self.trap.trap(&err);
            }
        }
    }

    /// Flush all appenders.
    pub fn flush(&self) {
        for append in &self.appends {
            if let Err(err) = append.flush() {
                let err = Error::new("failed to flush").with_source(err);
                self.trap.trap(&err);
            }
        }
    }

    fn emit(
        &self,
        level: Level,
        args: fmt::Arguments<'_>,
        kvs: &[(&str, Value<'_>)],
        caller: &Location<'_>,
    ) {
        if !self.enabled(level) {
            return;
        }

        let record = Record::builder()
            .level(level)
            .file(Some(caller.file()))
            .line(Some(caller.line()))
            .args(args)
            .key_values(kvs)
            .build();
        self.log(&record);
    }

    /// Log a message with structured fields at the debug level.
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display, kvs: &[(&str, Value<'_>)]) {
        self.emit(Level::Debug, format_args!("{message}"), kvs, Location::caller());
    }

    /// Log a message with structured fields at the info level.
    #[track_caller]
    pub fn info(&self, message: impl fmt::Display, kvs: &[(&str, Value<'_>)]) {
        self.emit(Level::Info, format_args!("{message}"), kvs, Location::caller());
    }

    /// Log a message with structured fields at the warn level.
    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display, kvs: &[(&str, Value<'_>)]) {
        self.emit(Level::Warn, format_args!("{message}"), kvs, Location::caller());
    }

    /// Log a message with structured fields at the error level.
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display, kvs: &[(&str, Value<'_>)]) {
        self.emit(Level::Error, format_args!("{message}"), kvs, Location::caller());
    }

    /// Log a message with structured fields at the fatal level, flush, then exit the process
    /// with status 1.
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display, kvs: &[(&str, Value<'_>)]) -> ! {
        self.emit(Level::Fatal, format_args!("{message}"), kvs, Location::caller());
        self.flush();
        std::process::exit(1)
    }

    /// Log a message with structured fields at the panic level, flush, then panic with the
    /// message.
    #[track_caller]
    pub fn panic(&self, message: impl fmt::Display, kvs: &[(&str, Value<'_>)]) -> ! {
        self.emit(Level::Panic, format_args!("{message}"), kvs, Location::caller());
        self.flush();
        panic!("{message}")
    }

    /// Log a formatted message at the debug level.
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args, &[], Location::caller());
    }

    /// Log a formatted message at the info level.
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args, &[], Location::caller());
    }

    /// Log a formatted message at the warn level.
    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args, &[], Location::caller());
    }

    /// Log a formatted message at the error level.
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, args, &[], Location::caller());
    }

    /// Log a formatted message at the fatal level, flush, then exit the process with status 1.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit(Level::Fatal, args, &[], Location::caller());
        self.flush();
        std::process::exit(1)
    }

    /// Log a formatted message at the panic level, flush, then panic with the message.
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit(Level::Panic, args, &[], Location::caller());
        self.flush();
        panic!("{args}")
    }
}
