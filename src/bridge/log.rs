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

use crate::global::provider;
use crate::kv::Value;
use crate::record::Level;
use crate::record::Record;

struct LogCrateLogger(());

impl log::Log for LogCrateLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        provider().logger().enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        let logger = provider().logger();
        let level = record.level().into();
        if !logger.enabled(level) {
            return;
        }

        let mut kvs = Vec::new();
        struct KeyValueVisitor<'a, 'b> {
            kvs: &'b mut Vec<(log::kv::Key<'a>, log::kv::Value<'a>)>,
        }

        impl<'a, 'b> log::kv::VisitSource<'a> for KeyValueVisitor<'a, 'b> {
            fn visit_pair(
                &mut self,
                key: log::kv::Key<'a>,
                value: log::kv::Value<'a>,
            ) -> Result<(), log::kv::Error> {
                self.kvs.push((key, value));
                Ok(())
            }
        }

        let mut visitor = KeyValueVisitor { kvs: &mut kvs };
        // a source that fails halfway still yields the pairs visited so far
        let _ = record.key_values().visit(&mut visitor);

        let new_kvs = kvs
            .iter()
            .map(|(k, v)| (k.as_str(), Value::from_dyn_display(v)))
            .collect::<Vec<_>>();

        let record = Record::builder()
            .level(level)
            .target(record.target())
            .file(record.file())
            .line(record.line())
            .args(*record.args())
            .key_values(new_kvs.as_slice())
            .build();
        logger.log(&record);
    }

    fn flush(&self) {
        if let Some(logger) = provider().current() {
            logger.flush();
        }
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Debug,
            log::Level::Trace => Level::Trace,
        }
    }
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_logger`] so that records of the `log` crate are forwarded to
/// the process-wide logger of this crate, including their key-values.
///
/// This function will set the global maximum log level to `Trace`; the threshold of the
/// process-wide logger still applies. To override this, call [`log::set_max_level`] after this
/// function.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// if let Err(err) = loglet::bridge::try_setup_log_crate() {
///     eprintln!("failed to setup log crate: {err}");
/// }
/// ```
pub fn try_setup_log_crate() -> Result<(), log::SetLoggerError> {
    static LOGGER: LogCrateLogger = LogCrateLogger(());
    log::set_logger(&LOGGER)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Set up the log crate global logger.
///
/// See [`try_setup_log_crate`].
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// loglet::bridge::setup_log_crate();
/// log::info!(port = 8080; "listening");
/// ```
pub fn setup_log_crate() {
    try_setup_log_crate().expect(
        "loglet::bridge::setup_log_crate must be called before the log crate global logger initialized",
    )
}
