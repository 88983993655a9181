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

//! The process-wide logger.
//!
//! The active [`Logger`] lives in an atomically swappable slot. Logging calls take a lock-free
//! snapshot of it and finish against that snapshot even if the slot is replaced meanwhile. The
//! first logging call that finds the slot empty installs a default logger, unless an explicit
//! setup got there first.

use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::Once;

use arc_swap::ArcSwapOption;

use crate::Config;
use crate::Error;
use crate::Logger;

static PROVIDER: LazyLock<LoggerProvider> = LazyLock::new(LoggerProvider::new);

/// The provider behind the crate-level logging functions.
pub fn provider() -> &'static LoggerProvider {
    &PROVIDER
}

/// Owns the active logger and its lazy default.
///
/// The crate-level functions use the process-wide [`provider()`]; a separate provider is useful
/// for tests and for embedding.
#[derive(Debug)]
pub struct LoggerProvider {
    current: ArcSwapOption<Logger>,
    init: Once,
    make_default: fn() -> Logger,
}

impl Default for LoggerProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerProvider {
    /// Create a provider whose default logger writes to stdout at the `Debug` threshold.
    pub fn new() -> Self {
        Self::with_default(crate::setup::default_logger)
    }

    /// Create a provider that builds its default logger with `make_default`.
    pub fn with_default(make_default: fn() -> Logger) -> Self {
        Self {
            current: ArcSwapOption::empty(),
            init: Once::new(),
            make_default,
        }
    }

    /// The active logger, installing the default logger if none is active yet.
    ///
    /// The default logger is built at most once per provider, and never replaces a logger
    /// installed by [`install`](Self::install) or [`setup`](Self::setup).
    pub fn logger(&self) -> Arc<Logger> {
        if let Some(logger) = self.current.load_full() {
            return logger;
        }

        self.init.call_once(|| {
            if self.current.load().is_some() {
                return;
            }
            let logger = Arc::new((self.make_default)());
            // an explicit install that raced us keeps its place
            self.current
                .compare_and_swap(&None::<Arc<Logger>>, Some(logger));
        });

        // filled by the `call_once` above or by a concurrent install, and never emptied
        self.current
            .load_full()
            .expect("global logger is installed after initialization")
    }

    /// The active logger, without installing the default.
    pub fn current(&self) -> Option<Arc<Logger>> {
        self.current.load_full()
    }

    /// Whether a logger is active.
    pub fn is_initialized(&self) -> bool {
        self.current.load().is_some()
    }

    /// Make `logger` the active logger. Calls already in flight finish on the logger they
    /// loaded; the replaced logger is dropped once the last of them is done.
    pub fn install(&self, logger: Logger) {
        self.current.store(Some(Arc::new(logger)));
    }

    /// Build a logger from `config` and install it.
    ///
    /// See [`setup`](crate::setup) for how the config is interpreted.
    ///
    /// # Errors
    ///
    /// Return an error if the log directory or file cannot be created. The active logger is
    /// left unchanged in that case.
    pub fn setup(&self, config: Option<&dyn Config>) -> Result<(), Error> {
        let logger = crate::setup::build_logger(config)?;
        self.install(logger);
        Ok(())
    }

    /// Flush the active logger, if any. Never installs the default logger.
    pub fn unsetup(&self) -> Result<(), Error> {
        if let Some(logger) = self.current() {
            logger.flush();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::record::Level;

    const THREADS: usize = 16;

    #[test]
    fn test_default_is_built_once_under_contention() {
        static BUILT: AtomicUsize = AtomicUsize::new(0);
        fn counting_default() -> Logger {
            BUILT.fetch_add(1, Ordering::SeqCst);
            Logger::builder().build()
        }

        let provider = LoggerProvider::with_default(counting_default);
        let barrier = Barrier::new(THREADS);
        let loggers = std::thread::scope(|s| {
            let handles = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        provider.logger()
                    })
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect::<Vec<_>>()
        });

        assert_eq!(BUILT.load(Ordering::SeqCst), 1);
        assert!(loggers.iter().all(|l| Arc::ptr_eq(l, &loggers[0])));
        assert!(Arc::ptr_eq(&provider.logger(), &loggers[0]));
        assert_eq!(BUILT.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_install_wins_over_racing_default() {
        fn debug_default() -> Logger {
            Logger::builder().threshold(Level::Debug).build()
        }

        for _ in 0..50 {
            let provider = LoggerProvider::with_default(debug_default);
            let barrier = Barrier::new(THREADS);
            std::thread::scope(|s| {
                for i in 0..THREADS {
                    let provider = &provider;
                    let barrier = &barrier;
                    s.spawn(move || {
                        barrier.wait();
                        if i == THREADS / 2 {
                            provider.install(Logger::builder().threshold(Level::Error).build());
                        } else {
                            provider.logger().info("racing", &[]);
                        }
                    });
                }
            });

            let logger = provider.logger();
            assert!(logger.enabled(Level::Error));
            assert!(!logger.enabled(Level::Info));
        }
    }

    #[test]
    fn test_later_install_replaces_default() {
        let provider = LoggerProvider::with_default(|| Logger::builder().build());
        assert!(provider.logger().enabled(Level::Debug));

        provider.install(Logger::builder().threshold(Level::Warn).build());
        assert!(!provider.logger().enabled(Level::Info));

        provider.install(Logger::builder().threshold(Level::Info).build());
        assert!(provider.logger().enabled(Level::Info));
    }

    #[test]
    fn test_current_and_unsetup_never_build_default() {
        static BUILT: AtomicUsize = AtomicUsize::new(0);
        fn counting_default() -> Logger {
            BUILT.fetch_add(1, Ordering::SeqCst);
            Logger::builder().build()
        }

        let provider = LoggerProvider::with_default(counting_default);
        assert!(provider.current().is_none());
        assert!(!provider.is_initialized());
        provider.unsetup().unwrap();
        provider.unsetup().unwrap();
        assert_eq!(BUILT.load(Ordering::SeqCst), 0);

        provider.logger();
        assert!(provider.is_initialized());
        provider.unsetup().unwrap();
        assert_eq!(BUILT.load(Ordering::SeqCst), 1);
    }
}
