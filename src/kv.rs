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

//! Structured key-value pairs attached to a log record.

use std::fmt;

/// A value in a key-value pair.
///
/// Primitives and string slices convert into a `Value` with `From`; anything that implements
/// [`fmt::Display`] can be captured with [`Value::from_display`].
pub type Value<'a> = value_bag::ValueBag<'a>;

/// The structured fields of a record, in call order.
#[derive(Clone, Copy, Default)]
pub struct KeyValues<'a>(&'a [(&'a str, Value<'a>)]);

impl fmt::Debug for KeyValues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<'a> KeyValues<'a> {
    /// Iterate over the key-value pairs.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&'a str, &'a Value<'a>)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    /// The number of key-value pairs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no key-value pairs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> From<&'a [(&'a str, Value<'a>)]> for KeyValues<'a> {
    fn from(kvs: &'a [(&'a str, Value<'a>)]) -> Self {
        KeyValues(kvs)
    }
}
