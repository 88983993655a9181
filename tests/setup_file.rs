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

//! Setup with a config routes records to a rotated file, optionally through a buffer.

use std::fs;

use loglet::LogConfig;
use loglet::provider;
use loglet::record::Level;
use tempfile::TempDir;

fn read_lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_setup_with_config() {
    let temp_dir = TempDir::new().unwrap();

    // console and file
    let sync_path = temp_dir.path().join("sync/app.log");
    let config = LogConfig::new(sync_path.to_string_lossy())
        .with_level("info")
        .with_console(true);
    loglet::setup(Some(&config)).unwrap();

    loglet::debug("not written", &[]);
    let line = line!() + 1;
    loglet::info("user logged in", &[("user", "alice".into()), ("attempt", 2.into())]);
    loglet::unsetup().unwrap();

    let lines = read_lines(&sync_path);
    assert_eq!(lines.len(), 1);
    let fields = lines[0].splitn(5, ' ').collect::<Vec<_>>();
    assert_eq!(fields[0], "I");
    assert_eq!(fields[1].len(), 8);
    assert_eq!(fields[2].len(), 12);
    assert_eq!(fields[3], format!("setup_file.rs:{line}"));
    assert_eq!(fields[4], "user logged in user=alice attempt=2");

    // buffered, file only
    let async_path = temp_dir.path().join("async/app.log");
    let config = LogConfig::new(async_path.to_string_lossy())
        .with_level("WARNING")
        .with_async(true);
    loglet::setup(Some(&config)).unwrap();

    loglet::infof!("not written");
    for n in 0..3 {
        loglet::warnf!("queue depth {}", n * 100);
    }
    loglet::errorf!("queue stalled");
    loglet::unsetup().unwrap();

    let lines = read_lines(&async_path);
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("W ") && lines[0].ends_with(" queue depth 0"));
    assert!(lines[2].ends_with(" queue depth 200"));
    assert!(lines[3].starts_with("E ") && lines[3].ends_with(" queue stalled"));

    // the file was not touched by the second setup
    assert_eq!(read_lines(&sync_path).len(), 1);

    // a path that cannot be created fails and keeps the active logger
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let config = LogConfig::new(blocker.join("app.log").to_string_lossy());
    assert!(loglet::setup(Some(&config)).is_err());
    assert!(!provider().logger().enabled(Level::Info));
    assert!(provider().logger().enabled(Level::Warn));

    // an unrecognized level falls back to debug
    let config = LogConfig::new(temp_dir.path().join("fallback.log").to_string_lossy())
        .with_level("chatty");
    loglet::setup(Some(&config)).unwrap();
    assert!(provider().logger().enabled(Level::Debug));
    loglet::unsetup().unwrap();
}
