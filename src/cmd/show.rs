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
use std::io::Write;

use vocab_core::error::Fallible;
use vocab_core::store::WordStore;
use vocab_core::types::entry::WordId;

pub fn show_word(words: &dyn WordStore, id: WordId, out: &mut dyn Write) -> Fallible<()> {
    let entry = words.get_word_or_fail(id)?;
    let review = &entry.review;
    writeln!(out, "Word: {}", entry.word)?;
    writeln!(out, "Translation: {}", entry.translation.as_deref().unwrap_or("-"))?;
    writeln!(out, "Example: {}", entry.example.as_deref().unwrap_or("-"))?;
    match entry.level {
        Some(level) => writeln!(out, "Level: {level}")?,
        None => writeln!(out, "Level: -")?,
    }
    writeln!(out, "Repetitions: {}", review.repetitions)?;
    writeln!(out, "Interval: {} days", review.interval)?;
    writeln!(out, "Ease factor: {:.2}", review.ease_factor)?;
    match review.next_review {
        Some(date) => writeln!(out, "Next review: {date}")?,
        None => writeln!(out, "Next review: now")?,
    }
    Ok(())
}
