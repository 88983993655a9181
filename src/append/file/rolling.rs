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

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use flate2::Compression;
use flate2::write::GzEncoder;
use jiff::SignedDuration;
use jiff::Zoned;
use jiff::civil::DateTime;

use crate::Error;
use crate::append::file::clock::Clock;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

const BACKUP_DATE_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";
const COMPRESSED_SUFFIX: &str = ".gz";

/// A writer for size-rotated log files.
///
/// The current file is always `<basedir>/<filename>`. When a write would push it past the
/// configured size, it is renamed to `<filename>.<YYYY-MM-DDTHH-MM-SS>.<n>` and a fresh file is
/// opened in its place. Backups beyond the configured count or age are removed afterwards, and the
/// remaining ones are gzip-compressed when compression is on.
///
/// Compression runs on a background thread, so rotating holds up the writing thread only for the
/// rename and the cleanup. At most one compression runs at a time; dropping the writer waits for
/// it to finish.
#[derive(Debug)]
pub struct RollingFileWriter {
    state: State,
    writer: File,
}

impl Drop for RollingFileWriter {
    fn drop(&mut self) {
        if let Err(err) = self.writer.flush() {
            let err = Error::new("failed to flush file writer on dropped").with_source(err);
            self.state.trap.trap(&err);
        }
        self.state.wait_for_compression();
    }
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.state.should_rollover_on_size(buf.len()) {
            let now = self.state.clock.now();
            // a failed rotation keeps the old file, and its size
            if self.state.refresh_writer(&now, &mut self.writer) {
                self.state.current_filesize = 0;
            }
        }

        self.writer
            .write(buf)
            .inspect(|&n| self.state.current_filesize += n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// A builder for configuring [`RollingFileWriter`].
#[derive(Debug)]
pub struct RollingFileWriterBuilder {
    // required
    basedir: PathBuf,
    filename: String,

    // has default
    max_size: Option<NonZeroUsize>,
    max_backups: Option<NonZeroUsize>,
    max_age: Option<Duration>,
    compress: bool,
    clock: Clock,
    trap: Box<dyn Trap>,
}

impl RollingFileWriterBuilder {
    /// Creates a new [`RollingFileWriterBuilder`].
    ///
    /// Without further configuration the file grows forever.
    #[must_use]
    pub fn new(basedir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            basedir: basedir.into(),
            filename: filename.into(),
            max_size: None,
            max_backups: None,
            max_age: None,
            compress: false,
            clock: Clock::DefaultClock,
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Set the trap for errors raised while rotating.
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Set the maximum size of a log file in bytes.
    #[must_use]
    pub fn max_file_size(mut self, n: NonZeroUsize) -> Self {
        self.max_size = Some(n);
        self
    }

    /// Set the maximum number of rotated backups to keep, not counting the current file.
    #[must_use]
    pub fn max_backups(mut self, n: NonZeroUsize) -> Self {
        self.max_backups = Some(n);
        self
    }

    /// Remove backups whose rotation time is older than `max_age`.
    #[must_use]
    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Gzip rotated backups.
    #[must_use]
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    #[cfg(test)]
    fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the [`RollingFileWriter`].
    ///
    /// # Errors
    ///
    /// Return an error if the filename is empty, or if the log directory or the log file cannot
    /// be created.
    pub fn build(self) -> Result<RollingFileWriter, Error> {
        let Self {
            basedir,
            filename,
            max_size,
            max_backups,
            max_age,
            compress,
            clock,
            trap,
        } = self;

        if filename.is_empty() {
            return Err(Error::new("filename must not be empty"));
        }

        let max_age = match max_age {
            None => None,
            Some(max_age) => Some(SignedDuration::try_from(max_age).map_err(|err| {
                Error::new("max age is out of range")
                    .with_context("max_age", format!("{max_age:?}"))
                    .with_source(err)
            })?),
        };

        let (state, writer) = State::new(
            basedir,
            filename,
            max_size,
            max_backups,
            max_age,
            compress,
            clock,
            Arc::from(trap),
        )?;

        Ok(RollingFileWriter { state, writer })
    }
}

#[derive(Debug)]
struct Backup {
    filepath: PathBuf,
    datetime: DateTime,
    count: usize,
    compressed: bool,
}

// oldest is the least
fn compare_backup(a: &Backup, b: &Backup) -> std::cmp::Ordering {
    a.datetime
        .cmp(&b.datetime)
        .then_with(|| a.count.cmp(&b.count))
}

#[derive(Debug)]
struct State {
    log_dir: PathBuf,
    log_filename: String,
    current_filesize: usize,
    max_size: Option<NonZeroUsize>,
    max_backups: Option<NonZeroUsize>,
    max_age: Option<SignedDuration>,
    compress: bool,
    clock: Clock,
    trap: Arc<dyn Trap>,
    compressor: Option<JoinHandle<()>>,
}

impl State {
    #[allow(clippy::too_many_arguments)]
    fn new(
        dir: impl AsRef<Path>,
        log_filename: String,
        max_size: Option<NonZeroUsize>,
        max_backups: Option<NonZeroUsize>,
        max_age: Option<SignedDuration>,
        compress: bool,
        clock: Clock,
        trap: Arc<dyn Trap>,
    ) -> Result<(Self, File), Error> {
        let log_dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&log_dir).map_err(|err| {
            Error::new("failed to create log directory")
                .with_context("dir", log_dir.display())
                .with_source(err)
        })?;

        let mut state = State {
            log_dir,
            log_filename,
            current_filesize: 0,
            max_size,
            max_backups,
            max_age,
            compress,
            clock,
            trap,
            compressor: None,
        };

        let filename = state.current_filename();
        let file = match fs::metadata(&filename) {
            Ok(metadata) if metadata.is_file() => {
                // continue to use the existing current log file
                state.current_filesize = metadata.len() as usize;
                OpenOptions::new()
                    .append(true)
                    .open(&filename)
                    .map_err(|err| {
                        Error::new("failed to open current log")
                            .with_context("path", filename.display())
                            .with_source(err)
                    })?
            }
            _ => state.create_log_writer()?,
        };

        Ok((state, file))
    }

    fn current_filename(&self) -> PathBuf {
        self.log_dir.join(&self.log_filename)
    }

    fn create_log_writer(&self) -> Result<File, Error> {
        let filename = self.current_filename();
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&filename)
            .map_err(|err| {
                Error::new("failed to create log file")
                    .with_context("path", filename.display())
                    .with_source(err)
            })
    }

    fn backup_filename(&self, date: &str, cnt: usize) -> PathBuf {
        self.log_dir
            .join(format!("{}.{date}.{cnt}", self.log_filename))
    }

    // backups rotated within the same second are told apart by an increasing counter
    fn next_backup_filename(&self, now: &Zoned) -> PathBuf {
        let date = now.strftime(BACKUP_DATE_FORMAT).to_string();
        let last = self
            .list_backups()
            .unwrap_or_default()
            .into_iter()
            .filter(|backup| backup.datetime.strftime(BACKUP_DATE_FORMAT).to_string() == date)
            .map(|backup| backup.count)
            .max()
            .unwrap_or(0);

        let mut cnt = last + 1;
        loop {
            let filepath = self.backup_filename(&date, cnt);
            if !filepath.exists() && !compressed_filename(&filepath).exists() {
                return filepath;
            }
            cnt += 1;
        }
    }

    fn list_backups(&self) -> Result<Vec<Backup>, Error> {
        let read_dir = fs::read_dir(&self.log_dir).map_err(|err| {
            Error::new(format!(
                "failed to read log dir: {}",
                self.log_dir.display()
            ))
            .with_source(err)
        })?;

        let files = read_dir
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let filepath = entry.path();

                let metadata = entry.metadata().ok()?;
                // the writer only creates files, not directories or symlinks
                if !metadata.is_file() {
                    return None;
                }

                let filename = entry.file_name();
                // if the filename is not a UTF-8 string, skip it.
                let filename = filename.to_str()?;
                let (filename, compressed) = match filename.strip_suffix(COMPRESSED_SUFFIX) {
                    Some(filename) => (filename, true),
                    None => (filename, false),
                };

                let filename = filename
                    .strip_prefix(self.log_filename.as_str())?
                    .strip_prefix('.')?;
                let (date, count) = filename.split_once('.')?;
                let datetime = DateTime::strptime(BACKUP_DATE_FORMAT, date).ok()?;
                let count = usize::from_str(count).ok()?;

                Some(Backup {
                    filepath,
                    datetime,
                    count,
                    compressed,
                })
            })
            .collect::<Vec<_>>();

        Ok(files)
    }

    fn mill_backups(&mut self, now: &Zoned) -> Result<(), Error> {
        // a previous compression may still be turning backups into archives
        self.wait_for_compression();

        let mut backups = self.list_backups()?;
        backups.sort_by(compare_backup);

        let mut expired = vec![];
        if let Some(max_backups) = self.max_backups {
            let excess = backups.len().saturating_sub(max_backups.get());
            expired.extend(backups.drain(..excess));
        }

        if let Some(max_age) = self.max_age {
            let cutoff = now.datetime().checked_sub(max_age).map_err(|err| {
                Error::new("failed to compute backup cutoff time").with_source(err)
            })?;
            let (old, young): (Vec<_>, Vec<_>) = backups
                .into_iter()
                .partition(|backup| backup.datetime < cutoff);
            expired.extend(old);
            backups = young;
        }

        for backup in expired {
            let filepath = &backup.filepath;
            if let Err(err) = fs::remove_file(filepath) {
                let err = Error::new(format!("failed to remove old log: {}", filepath.display()))
                    .with_source(err);
                self.trap.trap(&err);
            }
        }

        if self.compress {
            let pending = backups
                .into_iter()
                .filter(|backup| !backup.compressed)
                .map(|backup| backup.filepath)
                .collect::<Vec<_>>();
            if !pending.is_empty() {
                let trap = self.trap.clone();
                let handle = std::thread::Builder::new()
                    .name("loglet-compress".to_string())
                    .spawn(move || {
                        for filepath in pending {
                            if let Err(err) = compress_file(&filepath) {
                                trap.trap(&err);
                            }
                        }
                    })
                    .map_err(|err| {
                        Error::new("failed to spawn log compression thread").with_source(err)
                    })?;
                self.compressor = Some(handle);
            }
        }

        Ok(())
    }

    fn wait_for_compression(&mut self) {
        if let Some(handle) = self.compressor.take() {
            if handle.join().is_err() {
                self.trap.trap(&Error::new("log compression thread panicked"));
            }
        }
    }

    fn rotate_log_writer(&mut self, now: &Zoned) -> Result<File, Error> {
        let archive_filepath = self.next_backup_filename(now);
        let current_filepath = self.current_filename();
        fs::rename(&current_filepath, &archive_filepath).map_err(|err| {
            Error::new(format!(
                "failed to archive log: {}",
                current_filepath.display()
            ))
            .with_source(err)
        })?;

        let file = self.create_log_writer()?;

        if let Err(err) = self.mill_backups(now) {
            let err = Error::new("failed to clean up old logs").with_source(err);
            self.trap.trap(&err);
        }

        Ok(file)
    }

    // returns whether a fresh file replaced the current one
    fn refresh_writer(&mut self, now: &Zoned, file: &mut File) -> bool {
        if let Err(err) = file.flush() {
            let err = Error::new("failed to flush previous writer").with_source(err);
            self.trap.trap(&err);
        }

        match self.rotate_log_writer(now) {
            Ok(new_file) => {
                *file = new_file;
                true
            }
            Err(err) => {
                let err = Error::new("failed to rotate log writer").with_source(err);
                self.trap.trap(&err);
                false
            }
        }
    }

    // an empty file is never rotated, so a single oversized write still lands somewhere
    fn should_rollover_on_size(&self, incoming: usize) -> bool {
        self.max_size.is_some_and(|n| {
            self.current_filesize > 0 && self.current_filesize + incoming > n.get()
        })
    }
}

fn compressed_filename(filepath: &Path) -> PathBuf {
    let mut filename = filepath.as_os_str().to_owned();
    filename.push(COMPRESSED_SUFFIX);
    PathBuf::from(filename)
}

fn compress_file(src: &Path) -> Result<(), Error> {
    let dst = compressed_filename(src);

    fn gzip(src: &Path, dst: &Path) -> io::Result<()> {
        let mut input = File::open(src)?;
        let output = File::create(dst)?;
        let mut encoder = GzEncoder::new(output, Compression::default());
        io::copy(&mut input, &mut encoder)?;
        encoder.finish()?.sync_all()
    }

    if let Err(err) = gzip(src, &dst) {
        let _ = fs::remove_file(&dst);
        return Err(Error::new(format!("failed to compress log: {}", src.display())).with_source(err));
    }

    fs::remove_file(src).map_err(|err| {
        Error::new(format!("failed to remove compressed log: {}", src.display()))
            .with_source(err)
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io::Read;
    use std::io::Write;
    use std::num::NonZeroUsize;
    use std::str::FromStr;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use flate2::read::GzDecoder;
    use jiff::Span;
    use jiff::Zoned;
    use rand::Rng;
    use rand::distr::Alphanumeric;
    use tempfile::TempDir;

    use super::*;
    use crate::append::file::clock::ManualClock;

    const LINE_LEN: usize = 100;

    fn filenames(dir: &Path) -> BTreeSet<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect()
    }

    #[test]
    fn test_file_rolling_via_file_size() {
        test_file_rolling_for_specific_file_size(1, 1000);
        test_file_rolling_for_specific_file_size(3, 1000);
        test_file_rolling_for_specific_file_size(10, 2500);
    }

    fn test_file_rolling_for_specific_file_size(max_backups: usize, max_size: usize) {
        let max_backups = NonZeroUsize::new(max_backups).unwrap();
        let lines_per_file = max_size / LINE_LEN;
        let max_size = NonZeroUsize::new(lines_per_file * LINE_LEN).unwrap();
        let temp_dir = TempDir::new().unwrap();

        let start_time = Zoned::from_str("2024-08-10T00:00:00[UTC]").unwrap();
        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "test_file.log")
            .max_backups(max_backups)
            .max_file_size(max_size)
            .clock(Clock::ManualClock(ManualClock::new(start_time.clone())))
            .build()
            .unwrap();

        let mut cur_time = start_time;
        for i in 1..=(max_backups.get() * 2 + 2) {
            let mut expected_file_size = 0;
            for _ in 0..lines_per_file {
                writer.state.clock.set_now(cur_time.clone());
                let line = generate_line(LINE_LEN);
                expected_file_size += line.len();
                assert_eq!(writer.write(line.as_bytes()).unwrap(), line.len());
                assert_eq!(writer.state.current_filesize, expected_file_size);
                cur_time = &cur_time + Span::new().seconds(1);
            }

            writer.flush().unwrap();
            assert_eq!(
                fs::read_dir(&writer.state.log_dir).unwrap().count(),
                i.min(max_backups.get() + 1)
            );
        }
    }

    #[test]
    fn test_backups_within_one_second_get_distinct_names() {
        let temp_dir = TempDir::new().unwrap();
        let start_time = Zoned::from_str("2024-03-05T07:08:09[UTC]").unwrap();
        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "app.log")
            .max_backups(NonZeroUsize::new(3).unwrap())
            .max_file_size(NonZeroUsize::new(LINE_LEN).unwrap())
            .clock(Clock::ManualClock(ManualClock::new(start_time)))
            .build()
            .unwrap();

        // every write after the first one rotates
        for _ in 0..6 {
            writer.write_all(generate_line(LINE_LEN).as_bytes()).unwrap();
        }
        writer.flush().unwrap();

        let expected = [
            "app.log",
            "app.log.2024-03-05T07-08-09.3",
            "app.log.2024-03-05T07-08-09.4",
            "app.log.2024-03-05T07-08-09.5",
        ];
        let expected = expected.iter().map(|s| s.to_string()).collect();
        assert_eq!(filenames(temp_dir.path()), expected);
    }

    #[test]
    fn test_rotated_backups_are_compressed() {
        let temp_dir = TempDir::new().unwrap();
        let start_time = Zoned::from_str("2024-03-05T07:08:09[UTC]").unwrap();
        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "app.log")
            .max_file_size(NonZeroUsize::new(LINE_LEN * 2).unwrap())
            .compress(true)
            .clock(Clock::ManualClock(ManualClock::new(start_time)))
            .build()
            .unwrap();

        let first = format!("{}{}", generate_line(LINE_LEN), generate_line(LINE_LEN));
        writer.write_all(first.as_bytes()).unwrap();
        let second = generate_line(LINE_LEN);
        writer.write_all(second.as_bytes()).unwrap();
        writer.flush().unwrap();
        writer.state.wait_for_compression();

        let expected = ["app.log", "app.log.2024-03-05T07-08-09.1.gz"];
        let expected = expected.iter().map(|s| s.to_string()).collect();
        assert_eq!(filenames(temp_dir.path()), expected);

        let archived = fs::File::open(temp_dir.path().join("app.log.2024-03-05T07-08-09.1.gz"))
            .unwrap();
        let mut decoded = String::new();
        GzDecoder::new(archived)
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, first);

        let current = fs::read_to_string(temp_dir.path().join("app.log")).unwrap();
        assert_eq!(current, second);
    }

    #[test]
    fn test_expired_backups_are_removed() {
        let temp_dir = TempDir::new().unwrap();
        let start_time = Zoned::from_str("2024-03-01T00:00:00[UTC]").unwrap();
        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "app.log")
            .max_file_size(NonZeroUsize::new(LINE_LEN).unwrap())
            .max_age(Duration::from_secs(7 * 24 * 60 * 60))
            .clock(Clock::ManualClock(ManualClock::new(start_time.clone())))
            .build()
            .unwrap();

        writer.write_all(generate_line(LINE_LEN).as_bytes()).unwrap();
        writer.write_all(generate_line(LINE_LEN).as_bytes()).unwrap();
        assert_eq!(filenames(temp_dir.path()).len(), 2);

        writer
            .state
            .clock
            .set_now(&start_time + Span::new().days(8));
        writer.write_all(generate_line(LINE_LEN).as_bytes()).unwrap();
        writer.flush().unwrap();

        let expected = ["app.log", "app.log.2024-03-09T00-00-00.1"];
        let expected = expected.iter().map(|s| s.to_string()).collect();
        assert_eq!(filenames(temp_dir.path()), expected);
    }

    #[test]
    fn test_reopen_continues_current_file() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "app.log")
                .build()
                .unwrap();
            writer.write_all(generate_line(LINE_LEN).as_bytes()).unwrap();
        }

        let writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "app.log")
            .max_file_size(NonZeroUsize::new(LINE_LEN * 10).unwrap())
            .build()
            .unwrap();
        assert_eq!(writer.state.current_filesize, LINE_LEN);
    }

    #[test]
    fn test_unrelated_files_are_left_alone() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("app.log.bak"), "keep me").unwrap();
        fs::write(temp_dir.path().join("other.log.2024-03-05T07-08-09.1"), "keep me").unwrap();

        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "app.log")
            .max_backups(NonZeroUsize::new(1).unwrap())
            .max_file_size(NonZeroUsize::new(LINE_LEN).unwrap())
            .build()
            .unwrap();
        for _ in 0..4 {
            writer.write_all(generate_line(LINE_LEN).as_bytes()).unwrap();
        }

        let names = filenames(temp_dir.path());
        assert!(names.contains("app.log.bak"));
        assert!(names.contains("other.log.2024-03-05T07-08-09.1"));
        assert_eq!(names.len(), 4);
    }

    #[derive(Debug, Clone, Default)]
    struct CountingTrap(Arc<AtomicUsize>);

    impl CountingTrap {
        fn count(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl Trap for CountingTrap {
        fn trap(&self, _: &Error) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_failed_rotation_is_retried_on_next_write() {
        let temp_dir = TempDir::new().unwrap();
        let trap = CountingTrap::default();
        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "app.log")
            .max_file_size(NonZeroUsize::new(LINE_LEN * 2).unwrap())
            .trap(trap.clone())
            .build()
            .unwrap();

        writer.write_all(generate_line(LINE_LEN).as_bytes()).unwrap();
        // archiving fails while the current file is missing
        fs::remove_file(temp_dir.path().join("app.log")).unwrap();
        writer.write_all(generate_line(150).as_bytes()).unwrap();
        assert_eq!(trap.count(), 1);
        assert_eq!(writer.state.current_filesize, LINE_LEN + 150);

        // the old file is still oversized, so a small write tries again
        writer.write_all(generate_line(10).as_bytes()).unwrap();
        assert_eq!(trap.count(), 2);
        assert_eq!(writer.state.current_filesize, LINE_LEN + 160);
    }

    #[test]
    fn test_compression_runs_off_the_writing_thread() {
        let temp_dir = TempDir::new().unwrap();
        let start_time = Zoned::from_str("2024-03-05T07:08:09[UTC]").unwrap();
        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "app.log")
            .max_file_size(NonZeroUsize::new(LINE_LEN).unwrap())
            .compress(true)
            .clock(Clock::ManualClock(ManualClock::new(start_time)))
            .build()
            .unwrap();

        for _ in 0..3 {
            writer.write_all(generate_line(LINE_LEN).as_bytes()).unwrap();
        }
        assert!(writer.state.compressor.is_some());
        drop(writer);

        let expected = [
            "app.log",
            "app.log.2024-03-05T07-08-09.1.gz",
            "app.log.2024-03-05T07-08-09.2.gz",
        ];
        let expected = expected.iter().map(|s| s.to_string()).collect();
        assert_eq!(filenames(temp_dir.path()), expected);
    }

    #[test]
    fn test_empty_filename_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let err = RollingFileWriterBuilder::new(temp_dir.as_ref(), "")
            .build()
            .unwrap_err();
        assert_eq!(err.message(), "filename must not be empty");
    }

    fn generate_line(len: usize) -> String {
        let mut rng = rand::rng();
        let mut line: String = std::iter::repeat(())
            .map(|()| rng.sample(Alphanumeric))
            .map(char::from)
            .take(len - 1)
            .collect();
        line.push('\n');
        line
    }
}
