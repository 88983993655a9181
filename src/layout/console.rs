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

use std::fmt::Write;

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::Error;
use crate::encoder::encode_caller;
use crate::encoder::encode_level;
use crate::encoder::encode_time;
use crate::encoder::trim_caller_path;
use crate::layout::Layout;
use crate::record::Record;

/// A layout that formats log records as compact, space-separated text.
///
/// Output format:
///
/// ```text
/// E 20240811 22:44:57.172 net/conn.rs:51 connection reset peer=10.0.0.7
/// W 20240811 22:44:57.172 net/conn.rs:52 slow handshake elapsed_ms=812
/// I 20240811 22:44:57.172 server/main.rs:20 listening port=8080
/// D 20240811 22:44:57.172 server/main.rs:21 config loaded
/// ```
///
/// The columns are the level letter, the local time with millisecond precision, the call site
/// without its leading path segment, the message, and then every structured field as `key=value`.
///
/// # Examples
///
/// ```
/// use jiff::tz::TimeZone;
/// use loglet::layout::ConsoleLayout;
///
/// let layout = ConsoleLayout::default().timezone(TimeZone::UTC);
/// ```
#[derive(Debug, Clone)]
pub struct ConsoleLayout {
    timezone: TimeZone,
}

impl Default for ConsoleLayout {
    fn default() -> Self {
        Self {
            timezone: TimeZone::system(),
        }
    }
}

impl ConsoleLayout {
    /// Set the timezone for timestamps.
    ///
    /// Defaults to the system timezone.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }
}

impl Layout for ConsoleLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let ts = Timestamp::try_from(record.time())
            .map_err(|err| Error::new("record time out of range").with_source(err))?;
        let time = encode_time(ts.to_zoned(self.timezone.clone()).datetime());
        let level = encode_level(record.level());

        let mut text = String::new();
        write!(&mut text, "{level} {time}").map_err(Error::from_fmt_error)?;

        match record.file() {
            Some(file) => {
                let trimmed = trim_caller_path(file, record.line().unwrap_or_default());
                write!(&mut text, " {}", encode_caller(&trimmed)).map_err(Error::from_fmt_error)?;
            }
            None if !record.target().is_empty() => {
                write!(&mut text, " {}", record.target()).map_err(Error::from_fmt_error)?;
            }
            None => {}
        }

        write!(&mut text, " {}", record.args()).map_err(Error::from_fmt_error)?;
        for (key, value) in record.key_values().iter() {
            write!(&mut text, " {key}={value}").map_err(Error::from_fmt_error)?;
        }

        Ok(text.into_bytes())
    }
}
