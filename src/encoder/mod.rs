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

//! Field encoders that render the fixed columns of a console line.
//!
//! All functions here are pure: they turn a timestamp, a level or a call site into the short text
//! written at the head of each line.

use jiff::civil::DateTime;

use crate::record::Level;

/// Render a civil timestamp as `YYYYMMDD HH:MM:SS.mmm`.
///
/// # Examples
///
/// ```
/// use jiff::civil::date;
///
/// let time = date(2024, 3, 5).at(7, 8, 9, 123_000_000);
/// assert_eq!(loglet::encoder::encode_time(time), "20240305 07:08:09.123");
/// ```
pub fn encode_time(time: DateTime) -> String {
    format!(
        "{:04}{:02}{:02} {:02}:{:02}:{:02}.{:03}",
        time.year(),
        time.month(),
        time.day(),
        time.hour(),
        time.minute(),
        time.second(),
        time.millisecond(),
    )
}

/// Render a level as a single letter.
///
/// Levels without a letter fall back to their upper-case name.
pub fn encode_level(level: Level) -> &'static str {
    match level {
        Level::Debug => "D",
        Level::Info => "I",
        Level::Warn => "W",
        Level::Error => "E",
        Level::Fatal => "F",
        Level::Panic => "P",
        other => other.as_str(),
    }
}

/// Drop the leading path segment of a trimmed call site.
///
/// `"net/conn.rs:42"` becomes `"conn.rs:42"`. A path without any `/` is returned as is.
pub fn encode_caller(trimmed: &str) -> &str {
    match trimmed.find('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Shorten a source path to `<last-dir>/<file>:<line>`.
///
/// Both `/` and `\` are treated as separators; the result always uses `/`.
pub fn trim_caller_path(file: &str, line: u32) -> String {
    let mut segments = file.rsplit(&['/', '\\'][..]).filter(|s| !s.is_empty());
    match (segments.next(), segments.next()) {
        (Some(name), Some(dir)) => format!("{dir}/{name}:{line}"),
        (Some(name), None) => format!("{name}:{line}"),
        (None, _) => format!("{file}:{line}"),
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_encode_time() {
        let time = date(2024, 3, 5).at(7, 8, 9, 123_456_789);
        assert_eq!(encode_time(time), "20240305 07:08:09.123");

        let time = date(1999, 12, 31).at(23, 59, 59, 0);
        assert_eq!(encode_time(time), "19991231 23:59:59.000");
    }

    #[test]
    fn test_encode_level() {
        assert_eq!(encode_level(Level::Debug), "D");
        assert_eq!(encode_level(Level::Info), "I");
        assert_eq!(encode_level(Level::Warn), "W");
        assert_eq!(encode_level(Level::Error), "E");
        assert_eq!(encode_level(Level::Fatal), "F");
        assert_eq!(encode_level(Level::Panic), "P");
        assert_eq!(encode_level(Level::Trace), "TRACE");
    }

    #[test]
    fn test_encode_caller() {
        assert_eq!(encode_caller("pkgname/sub/file.go:42"), "sub/file.go:42");
        assert_eq!(encode_caller("net/conn.rs:42"), "conn.rs:42");
        assert_eq!(encode_caller("file.go:42"), "file.go:42");
        assert_eq!(encode_caller(""), "");
    }

    #[test]
    fn test_trim_caller_path() {
        assert_eq!(trim_caller_path("src/net/conn.rs", 42), "net/conn.rs:42");
        assert_eq!(trim_caller_path("/home/me/app/src/main.rs", 7), "src/main.rs:7");
        assert_eq!(trim_caller_path("src\\net\\conn.rs", 3), "net/conn.rs:3");
        assert_eq!(trim_caller_path("lib.rs", 1), "lib.rs:1");
        assert_eq!(trim_caller_path("", 1), ":1");
    }
}
