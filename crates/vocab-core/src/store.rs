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

//! Persistence interfaces. Every mutating call is durable by the time it
//! returns; nothing is buffered across calls.

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::rng::TinyRng;
use crate::types::date::Date;
use crate::types::entry::ReviewState;
use crate::types::entry::VocabularyEntry;
use crate::types::entry::WordFields;
use crate::types::entry::WordId;
use crate::types::progress::DailyProgress;

pub trait WordStore {
    /// Insert a word, due on `created`. Returns the new id.
    fn add_word(&self, fields: &WordFields, created: Date) -> Fallible<WordId>;

    /// Every word, ordered by word text.
    fn all_words(&self) -> Fallible<Vec<VocabularyEntry>>;

    fn get_word(&self, id: WordId) -> Fallible<Option<VocabularyEntry>>;

    /// Replace the editable fields of a word. Returns `false` if absent.
    fn update_word(&self, id: WordId, fields: &WordFields) -> Fallible<bool>;

    /// Remove a word. Returns `false` if it was already absent.
    fn delete_word(&self, id: WordId) -> Fallible<bool>;

    /// Words whose next review is unset or on or before `today`, most
    /// overdue first, at most `limit` of them.
    fn due_words(&self, today: Date, limit: usize) -> Fallible<Vec<VocabularyEntry>>;

    /// Overwrite the review state of a word. Returns `false` if absent.
    fn save_review_state(&self, id: WordId, state: &ReviewState) -> Fallible<bool>;

    fn count_words(&self) -> Fallible<usize> {
        Ok(self.all_words()?.len())
    }

    fn get_word_or_fail(&self, id: WordId) -> Fallible<VocabularyEntry> {
        self.get_word(id)?
            .ok_or_else(|| ErrorReport::not_found(format!("no word with id {id}")))
    }

    /// A uniformly random word among those due today, if any.
    fn random_due_word(&self, today: Date, rng: &mut TinyRng) -> Fallible<Option<VocabularyEntry>> {
        let due = self.due_words(today, usize::MAX)?;
        Ok(rng.choose(&due).cloned())
    }
}

pub trait ProgressStore {
    fn get_progress(&self, date: Date) -> Fallible<Option<DailyProgress>>;

    /// Insert or replace the record for `progress.date`.
    fn put_progress(&self, progress: &DailyProgress) -> Fallible<()>;
}
