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

use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::Receiver;
use crossbeam_channel::Sender;

use crate::Error;
use crate::append::Append;
use crate::layout::ConsoleLayout;
use crate::layout::Layout;
use crate::record::Record;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

/// An appender that formats records on the calling thread and hands the bytes to a background
/// worker, which writes them through a fixed-size buffer.
///
/// The buffer is written out when it is full, on every tick of the flush interval, on
/// [`Append::flush`], and when the appender is dropped. The interval ticks regardless of
/// traffic, so a steady trickle of records never waits longer than one interval. Dropping the
/// appender blocks until the worker has drained every pending record.
#[derive(Debug)]
pub struct Buffered {
    layout: Box<dyn Layout>,
    state: BufferedState,
}

impl Append for Buffered {
    fn append(&self, record: &Record) -> Result<(), Error> {
        let mut bytes = self.layout.format(record)?;
        bytes.push(b'\n');
        self.state.send(Message::Record(bytes))
    }

    fn flush(&self) -> Result<(), Error> {
        let (done, wait) = crossbeam_channel::bounded(1);
        self.state.send(Message::Flush(done))?;
        match wait.recv() {
            Ok(result) => result.map_err(Error::from_io_error),
            Err(_) => Err(Error::new("buffered writer exited before flushing")),
        }
    }
}

/// A builder for configuring a [`Buffered`] appender.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use loglet::append::BufferedBuilder;
///
/// let buffered = BufferedBuilder::new("app-log-writer")
///     .buffer_size(8 * 1024)
///     .flush_interval(Duration::from_secs(5))
///     .build(std::io::sink())
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct BufferedBuilder {
    thread_name: String,
    buffer_size: usize,
    flush_interval: Duration,
    buffered_lines_limit: Option<usize>,
    layout: Box<dyn Layout>,
    trap: Box<dyn Trap>,
}

impl BufferedBuilder {
    /// Create a new builder whose worker thread carries the given name.
    ///
    /// Default to a 4 KiB buffer flushed at least every 30 seconds.
    pub fn new(thread_name: impl Into<String>) -> Self {
        Self {
            thread_name: thread_name.into(),
            buffer_size: 4096,
            flush_interval: Duration::from_secs(30),
            buffered_lines_limit: None,
            layout: Box::new(ConsoleLayout::default()),
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Set the size of the write buffer in bytes.
    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Set the longest time buffered bytes may wait before being written out.
    pub fn flush_interval(mut self, flush_interval: Duration) -> Self {
        self.flush_interval = flush_interval;
        self
    }

    /// Set the number of formatted records that may wait for the worker.
    ///
    /// `None` means unbounded; when bounded, logging blocks while the queue is full.
    pub fn buffered_lines_limit(mut self, buffered_lines_limit: Option<usize>) -> Self {
        self.buffered_lines_limit = buffered_lines_limit;
        self
    }

    /// Set the layout for the logs.
    ///
    /// Default to [`ConsoleLayout`].
    pub fn layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Set the trap for write failures on the worker thread.
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Build the [`Buffered`] appender writing into `writer`.
    ///
    /// # Errors
    ///
    /// Return an error if the worker thread cannot be spawned.
    pub fn build(self, writer: impl Write + Send + 'static) -> Result<Buffered, Error> {
        let Self {
            thread_name,
            buffer_size,
            flush_interval,
            buffered_lines_limit,
            layout,
            trap,
        } = self;

        let (sender, receiver) = match buffered_lines_limit {
            Some(limit) => crossbeam_channel::bounded(limit),
            None => crossbeam_channel::unbounded(),
        };

        let trap: Arc<dyn Trap> = Arc::from(trap);
        let worker = Worker {
            writer: BufWriter::with_capacity(buffer_size, writer),
            receiver,
            flush_interval,
            trap: trap.clone(),
        };
        let handle = std::thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || worker.run())
            .map_err(|err| {
                Error::new("failed to spawn buffered writer thread")
                    .with_context("thread", thread_name)
                    .with_source(err)
            })?;

        let state = BufferedState(Some(State {
            sender,
            handle,
            trap,
        }));
        Ok(Buffered { layout, state })
    }
}

#[derive(Debug)]
enum Message {
    Record(Vec<u8>),
    Flush(Sender<io::Result<()>>),
}

#[derive(Debug)]
struct BufferedState(Option<State>);

#[derive(Debug)]
struct State {
    sender: Sender<Message>,
    handle: JoinHandle<()>,
    trap: Arc<dyn Trap>,
}

impl BufferedState {
    fn send(&self, message: Message) -> Result<(), Error> {
        let State { sender, .. } = self.0.as_ref().expect("state is present until dropped");
        sender.send(message).map_err(|err| {
            Error::new(match err.0 {
                Message::Record(_) => "failed to send record to buffered writer",
                Message::Flush(_) => "failed to send flush to buffered writer",
            })
        })
    }
}

impl Drop for BufferedState {
    fn drop(&mut self) {
        let State {
            sender,
            handle,
            trap,
        } = self.0.take().expect("state is present until dropped");

        // drop our sender, the worker drains the queue, flushes and exits
        drop(sender);

        if handle.join().is_err() {
            trap.trap(&Error::new("buffered writer thread panicked"));
        }
    }
}

struct Worker<W: Write> {
    writer: BufWriter<W>,
    receiver: Receiver<Message>,
    flush_interval: Duration,
    trap: Arc<dyn Trap>,
}

impl<W: Write> Worker<W> {
    fn run(self) {
        let Worker {
            mut writer,
            receiver,
            flush_interval,
            trap,
        } = self;
        let ticker = crossbeam_channel::tick(flush_interval);

        loop {
            crossbeam_channel::select! {
                recv(receiver) -> message => match message {
                    Ok(Message::Record(bytes)) => {
                        if let Err(err) = writer.write_all(&bytes) {
                            let err = Error::new("failed to write buffered record").with_source(err);
                            trap.trap(&err);
                        }
                    }
                    Ok(Message::Flush(done)) => {
                        let _ = done.send(writer.flush());
                    }
                    Err(_) => break,
                },
                recv(ticker) -> _ => {
                    if !writer.buffer().is_empty() {
                        flush_writer(&mut writer, trap.as_ref());
                    }
                }
            }
        }

        flush_writer(&mut writer, trap.as_ref());
    }
}

fn flush_writer<W: Write>(writer: &mut BufWriter<W>, trap: &dyn Trap) {
    if let Err(err) = writer.flush() {
        let err = Error::new("failed to flush buffered writer").with_source(err);
        trap.trap(&err);
    }
}
