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

//! A store that lives in process memory. Stands in for the database in tests.

use std::cell::Cell;
use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::store::ProgressStore;
use crate::store::WordStore;
use crate::types::date::Date;
use crate::types::entry::ReviewState;
use crate::types::entry::VocabularyEntry;
use crate::types::entry::WordFields;
use crate::types::entry::WordId;
use crate::types::progress::DailyProgress;

#[derive(Default)]
pub struct MemoryStore {
    words: RefCell<BTreeMap<WordId, VocabularyEntry>>,
    progress: RefCell<BTreeMap<Date, DailyProgress>>,
    next_id: Cell<WordId>,
    read_only: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every write fails with a persistence error.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    fn check_writable(&self) -> Fallible<()> {
        if self.read_only.get() {
            Err(ErrorReport::persistence("store is read-only"))
        } else {
            Ok(())
        }
    }
}

impl WordStore for MemoryStore {
    fn add_word(&self, fields: &WordFields, created: Date) -> Fallible<WordId> {
        self.check_writable()?;
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let entry = VocabularyEntry {
            id,
            word: fields.word().to_string(),
            translation: fields.translation().map(str::to_string),
            example: fields.example().map(str::to_string),
            level: fields.level(),
            review: ReviewState::new(created),
        };
        self.words.borrow_mut().insert(id, entry);
        Ok(id)
    }

    fn all_words(&self) -> Fallible<Vec<VocabularyEntry>> {
        let mut words: Vec<VocabularyEntry> = self.words.borrow().values().cloned().collect();
        words.sort_by(|a, b| a.word.cmp(&b.word).then(a.id.cmp(&b.id)));
        Ok(words)
    }

    fn get_word(&self, id: WordId) -> Fallible<Option<VocabularyEntry>> {
        Ok(self.words.borrow().get(&id).cloned())
    }

    fn update_word(&self, id: WordId, fields: &WordFields) -> Fallible<bool> {
        self.check_writable()?;
        let mut words = self.words.borrow_mut();
        match words.get_mut(&id) {
            Some(entry) => {
                entry.word = fields.word().to_string();
                entry.translation = fields.translation().map(str::to_string);
                entry.example = fields.example().map(str::to_string);
                entry.level = fields.level();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_word(&self, id: WordId) -> Fallible<bool> {
        self.check_writable()?;
        Ok(self.words.borrow_mut().remove(&id).is_some())
    }

    fn due_words(&self, today: Date, limit: usize) -> Fallible<Vec<VocabularyEntry>> {
        let mut due: Vec<VocabularyEntry> = self
            .words
            .borrow()
            .values()
            .filter(|entry| entry.review.is_due(today))
            .cloned()
            .collect();
        due.sort_by(|a, b| {
            a.review
                .next_review
                .cmp(&b.review.next_review)
                .then(a.id.cmp(&b.id))
        });
        due.truncate(limit);
        Ok(due)
    }

    fn save_review_state(&self, id: WordId, state: &ReviewState) -> Fallible<bool> {
        self.check_writable()?;
        let mut words = self.words.borrow_mut();
        match words.get_mut(&id) {
            Some(entry) => {
                entry.review = *state;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl ProgressStore for MemoryStore {
    fn get_progress(&self, date: Date) -> Fallible<Option<DailyProgress>> {
        Ok(self.progress.borrow().get(&date).copied())
    }

    fn put_progress(&self, progress: &DailyProgress) -> Fallible<()> {
        self.check_writable()?;
        self.progress.borrow_mut().insert(progress.date, *progress);
        Ok(())
    }
}
