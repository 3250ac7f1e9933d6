// Copyright 2025 Fernando Borretti
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
use std::io::Cursor;

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use vocab_core::clock::Clock;
use vocab_core::error::Fallible;
use vocab_core::store::WordStore;
use vocab_core::types::date::Date;
use vocab_core::types::entry::WordFields;
use vocab_core::types::entry::WordId;
use vocab_core::types::timestamp::Timestamp;

use crate::db::Database;
use crate::prompt::TerminalPrompter;

pub fn create_db() -> Fallible<Database> {
    Database::open_in_memory()
}

pub fn date(s: &str) -> Date {
    Date::new(NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap())
}

/// Insert a word created on `created`, with no example or level.
pub fn insert(db: &Database, word: &str, translation: &str, created: &str) -> Fallible<WordId> {
    let fields = WordFields::new(word, Some(translation), None, None)?;
    db.add_word(&fields, date(created))
}

pub fn text(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}

/// A clock stuck at one instant.
pub struct FixedClock(pub Timestamp);

impl FixedClock {
    pub fn at(s: &str) -> Self {
        Self(Timestamp::new(
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap(),
        ))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// A terminal prompter fed from a string, writing to a buffer.
pub fn scripted(input: &str) -> TerminalPrompter<Cursor<&[u8]>, Vec<u8>> {
    TerminalPrompter::new(Cursor::new(input.as_bytes()), Vec::new())
}
