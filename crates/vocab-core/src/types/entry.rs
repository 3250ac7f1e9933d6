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

use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::date::Date;
use crate::types::level::Level;

/// Row id of a vocabulary entry.
pub type WordId = i64;

/// The ease factor every new word starts with.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Spaced-repetition bookkeeping for a single word.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ReviewState {
    /// Consecutive correct answers since the last lapse.
    pub repetitions: u32,
    /// Days until the next review. Zero only before the first review.
    pub interval: u32,
    /// Multiplier for interval growth after the second correct answer.
    pub ease_factor: f64,
    /// When the word is next due. Unset means due now.
    pub next_review: Option<Date>,
}

impl ReviewState {
    /// The state of a word that was just created: never reviewed, and due on
    /// the day it was added.
    pub fn new(created: Date) -> Self {
        Self {
            repetitions: 0,
            interval: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            next_review: Some(created),
        }
    }

    pub fn is_due(&self, today: Date) -> bool {
        match self.next_review {
            None => true,
            Some(date) => date <= today,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VocabularyEntry {
    pub id: WordId,
    pub word: String,
    pub translation: Option<String>,
    pub example: Option<String>,
    pub level: Option<Level>,
    pub review: ReviewState,
}

/// The user-editable fields of an entry, validated.
#[derive(Clone, Debug, PartialEq)]
pub struct WordFields {
    word: String,
    translation: Option<String>,
    example: Option<String>,
    level: Option<Level>,
}

impl WordFields {
    /// Validate and normalize user input. Surrounding whitespace is trimmed
    /// and blank optional fields become absent.
    pub fn new(
        word: &str,
        translation: Option<&str>,
        example: Option<&str>,
        level: Option<Level>,
    ) -> Fallible<Self> {
        let word = word.trim();
        if word.is_empty() {
            return Err(ErrorReport::validation("word must not be empty"));
        }
        Ok(Self {
            word: word.to_string(),
            translation: normalize(translation),
            example: normalize(example),
            level,
        })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }

    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    pub fn level(&self) -> Option<Level> {
        self.level
    }
}

/// A partial update: `None` leaves the field as it is.
#[derive(Clone, Debug, Default)]
pub struct WordPatch {
    pub word: Option<String>,
    pub translation: Option<String>,
    pub example: Option<String>,
    pub level: Option<Level>,
}

impl WordPatch {
    pub fn is_empty(&self) -> bool {
        self.word.is_none()
            && self.translation.is_none()
            && self.example.is_none()
            && self.level.is_none()
    }

    /// Apply the patch on top of an existing entry, revalidating the result.
    pub fn apply(&self, entry: &VocabularyEntry) -> Fallible<WordFields> {
        let word = self.word.as_deref().unwrap_or(&entry.word);
        let translation = self
            .translation
            .as_deref()
            .or(entry.translation.as_deref());
        let example = self.example.as_deref().or(entry.example.as_deref());
        let level = self.level.or(entry.level);
        WordFields::new(word, translation, example, level)
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
