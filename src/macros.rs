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

/// Log a formatted message at the debug level.
///
/// # Examples
///
/// ```
/// loglet::debugf!("cache warmed in {} ms", 12);
/// ```
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::debugf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at the info level.
///
/// # Examples
///
/// ```
/// let port = 8080;
/// loglet::infof!("listening on {port}");
/// ```
#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::infof(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at the warn level.
#[macro_export]
macro_rules! warnf {
    ($($arg:tt)+) => {
        $crate::warnf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at the error level.
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::errorf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at the fatal level, flush, then exit the process with status 1.
#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::fatalf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at the panic level, flush, then panic with the message.
///
/// # Examples
///
/// ```should_panic
/// loglet::panicf!("unreachable state {}", 3);
/// ```
#[macro_export]
macro_rules! panicf {
    ($($arg:tt)+) => {
        $crate::panicf(::std::format_args!($($arg)+))
    };
}
