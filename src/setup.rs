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

//! Build the process-wide logger from a [`Config`].

use std::io;
use std::num::NonZeroUsize;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::Config;
use crate::Error;
use crate::Logger;
use crate::append::BufferedBuilder;
use crate::append::Fanout;
use crate::append::FileBuilder;
use crate::append::Stdout;
use crate::append::file::RollingFileWriterBuilder;
use crate::global::provider;
use crate::record::Level;

/// Size at which the log file is rotated: 10 MiB.
pub const MAX_FILE_SIZE: NonZeroUsize = NonZeroUsize::new(10 * 1024 * 1024).unwrap();

/// Number of rotated backups kept next to the log file.
pub const MAX_BACKUPS: NonZeroUsize = NonZeroUsize::new(30).unwrap();

/// Age after which rotated backups are removed.
pub const MAX_AGE: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Size of the write buffer used when writing asynchronously.
pub const BUFFER_SIZE: usize = 4096;

/// Longest time buffered bytes wait before being written out.
pub const FLUSH_INTERVAL: Duration = Duration::from_secs(30);

const DEFAULT_LEVEL: Level = Level::Debug;
const WRITER_THREAD_NAME: &str = "loglet-writer";

/// Configure the process-wide logger.
///
/// * Without a config, logs go to stdout.
/// * With a config, logs go to a size-rotated file at [`Config::path`], and also to stdout if
///   [`Config::console`] is set. When [`Config::is_async`] is set, writes go through a
///   [`BUFFER_SIZE`] buffer owned by a background thread.
/// * The threshold is [`Config::level`]; empty or unrecognized names fall back to `debug`.
///
/// The new logger replaces the active one, including a default logger installed by an earlier
/// logging call.
///
/// # Errors
///
/// Return an error if the log directory or file cannot be created. The active logger is left
/// unchanged in that case. A bad level name is never an error.
///
/// # Examples
///
/// ```
/// loglet::setup(None).unwrap();
/// loglet::info("service started", &[("port", 8080.into())]);
/// loglet::unsetup().unwrap();
/// ```
pub fn setup(config: Option<&dyn Config>) -> Result<(), Error> {
    provider().setup(config)
}

/// Flush the process-wide logger. Call it before the process exits.
///
/// Never fails and never installs a logger; the `Result` is kept for symmetry with [`setup`].
pub fn unsetup() -> Result<(), Error> {
    provider().unsetup()
}

/// The logger used when nothing was set up: stdout at the `debug` threshold.
pub fn default_logger() -> Logger {
    Logger::builder()
        .threshold(DEFAULT_LEVEL)
        .append(Stdout::default())
        .build()
}

/// The threshold a config asks for.
pub fn threshold(config: Option<&dyn Config>) -> Level {
    config
        .map(|config| config.level())
        .filter(|level| !level.is_empty())
        .and_then(|level| level.parse().ok())
        .unwrap_or(DEFAULT_LEVEL)
}

/// Build, but do not install, the logger described by `config`.
///
/// # Errors
///
/// Return an error if the log directory or file cannot be created, or if the background writer
/// cannot be started.
pub fn build_logger(config: Option<&dyn Config>) -> Result<Logger, Error> {
    let builder = Logger::builder().threshold(threshold(config));
    let Some(config) = config else {
        return Ok(builder.append(Stdout::default()).build());
    };

    let path = log_path(config.path());
    let (dir, filename) = split_log_path(&path)?;

    if config.is_async() {
        let writer = RollingFileWriterBuilder::new(dir, filename)
            .max_file_size(MAX_FILE_SIZE)
            .max_backups(MAX_BACKUPS)
            .max_age(MAX_AGE)
            .compress(true)
            .build()?;
        let fanout = if config.console() {
            Fanout::new().add(io::stdout()).add(writer)
        } else {
            Fanout::new().add(writer)
        };
        let buffered = BufferedBuilder::new(WRITER_THREAD_NAME)
            .buffer_size(BUFFER_SIZE)
            .flush_interval(FLUSH_INTERVAL)
            .build(fanout)?;
        return Ok(builder.append(buffered).build());
    }

    let file = FileBuilder::new(dir, filename)
        .rollover_size(MAX_FILE_SIZE)
        .max_backups(MAX_BACKUPS)
        .max_age(MAX_AGE)
        .compress(true)
        .build()?;
    let builder = if config.console() {
        builder.append(Stdout::default())
    } else {
        builder
    };
    Ok(builder.append(file).build())
}

fn log_path(path: &str) -> PathBuf {
    if path.is_empty() {
        std::env::temp_dir().join(format!("{}-loglet.log", program_name()))
    } else {
        PathBuf::from(path)
    }
}

fn program_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "loglet".to_string())
}

fn split_log_path(path: &Path) -> Result<(PathBuf, String), Error> {
    let filename = path
        .file_name()
        .and_then(|filename| filename.to_str())
        .ok_or_else(|| {
            Error::new("log path has no valid file name").with_context("path", path.display())
        })?;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((dir, filename.to_string()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::LogConfig;
    use crate::global::LoggerProvider;

    fn config_in(dir: &TempDir) -> LogConfig {
        LogConfig::new(dir.path().join("logs/app.log").to_string_lossy())
    }

    #[test]
    fn test_threshold_resolution() {
        assert_eq!(threshold(None), Level::Debug);

        let cases = [
            ("", Level::Debug),
            ("verbose", Level::Debug),
            ("trace", Level::Debug),
            ("debug", Level::Debug),
            ("INFO", Level::Info),
            ("Warning", Level::Warn),
            ("error", Level::Error),
            ("fatal", Level::Fatal),
            ("panic", Level::Panic),
        ];
        for (name, expected) in cases {
            let config = LogConfig::new("app.log").with_level(name);
            assert_eq!(threshold(Some(&config)), expected, "level {name:?}");
        }
    }

    #[test]
    fn test_file_logger_writes_lines_above_threshold() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir).with_level("info");
        let logger = build_logger(Some(&config)).unwrap();

        logger.debug("dropped", &[]);
        let line = line!() + 1;
        logger.info("hello file", &[("k", 1.into())]);
        logger.flush();

        let content = fs::read_to_string(temp_dir.path().join("logs/app.log")).unwrap();
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("I "));
        assert!(lines[0].ends_with(&format!(" setup.rs:{line} hello file k=1")));
    }

    #[test]
    fn test_async_logger_drains_on_drop() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir).with_async(true);
        let logger = build_logger(Some(&config)).unwrap();

        for n in 0..10 {
            logger.warnf(format_args!("slow request {n}"));
        }
        drop(logger);

        let content = fs::read_to_string(temp_dir.path().join("logs/app.log")).unwrap();
        assert_eq!(content.lines().count(), 10);
        assert!(content.lines().all(|line| line.starts_with("W ")));
    }

    #[test]
    fn test_failed_setup_keeps_active_logger() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let config = LogConfig::new(blocker.join("app.log").to_string_lossy());

        let provider = LoggerProvider::with_default(|| Logger::builder().build());
        provider.install(Logger::builder().threshold(Level::Error).build());

        assert!(provider.setup(Some(&config)).is_err());
        assert!(!provider.logger().enabled(Level::Warn));
    }

    #[test]
    fn test_bad_level_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir).with_level("loud");

        let provider = LoggerProvider::with_default(|| Logger::builder().build());
        provider.setup(Some(&config)).unwrap();
        assert!(provider.logger().enabled(Level::Debug));
        assert!(!provider.logger().enabled(Level::Trace));
    }

    #[test]
    fn test_log_path_fallback_and_split() {
        let path = log_path("");
        assert_eq!(path.parent().unwrap(), std::env::temp_dir());
        assert!(path.to_string_lossy().ends_with("-loglet.log"));

        let (dir, filename) = split_log_path(Path::new("app.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(filename, "app.log");

        let (dir, filename) = split_log_path(Path::new("/var/log/my_app/app.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log/my_app"));
        assert_eq!(filename, "app.log");

        assert!(split_log_path(Path::new("/")).is_err());
    }
}
