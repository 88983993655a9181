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
use std::io;
use std::io::Write;

/// A writer that duplicates every write to several underlying writers.
///
/// All writers see every buffer even if one of them fails; the first failure is reported.
#[derive(Default)]
pub struct Fanout {
    writers: Vec<Box<dyn Write + Send>>,
}

impl fmt::Debug for Fanout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fanout")
            .field("writers", &self.writers.len())
            .finish()
    }
}

impl Fanout {
    /// Create a fan-out writer without any targets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target writer.
    pub fn add(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writers.push(Box::new(writer));
        self
    }
}

impl Write for Fanout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut result = Ok(buf.len());
        for writer in self.writers.iter_mut() {
            if let Err(err) = writer.write_all(buf) {
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        result
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut result = Ok(());
        for writer in self.writers.iter_mut() {
            if let Err(err) = writer.flush() {
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        result
    }
}
