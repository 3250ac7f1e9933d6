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
use vocab_core::types::date::Date;
use vocab_core::types::entry::WordFields;
use vocab_core::types::entry::WordId;
use vocab_core::types::level::Level;

pub struct NewWord {
    pub word: String,
    pub translation: Option<String>,
    pub example: Option<String>,
    pub level: Option<Level>,
}

/// Add a word that is due on `today`. Nothing is written if the input is
/// invalid.
pub fn add_word(
    words: &dyn WordStore,
    today: Date,
    new: &NewWord,
    out: &mut dyn Write,
) -> Fallible<WordId> {
    let fields = WordFields::new(
        &new.word,
        new.translation.as_deref(),
        new.example.as_deref(),
        new.level,
    )?;
    let id = words.add_word(&fields, today)?;
    log::info!("Added word {id} ({})", fields.word());
    writeln!(out, "Word added with id {id}.")?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use vocab_core::error::ErrorKind;

    use super::*;
    use crate::helper::create_db;
    use crate::helper::date;
    use crate::helper::text;

    fn new_word(word: &str) -> NewWord {
        NewWord {
            word: word.to_string(),
            translation: Some(" hello ".to_string()),
            example: Some(String::new()),
            level: Some(Level::Beginner),
        }
    }

    #[test]
    fn test_add_word() -> Fallible<()> {
        let db = create_db()?;
        let mut out = Vec::new();
        let id = add_word(&db, date("2024-03-01"), &new_word("hola"), &mut out)?;
        assert_eq!(text(out), format!("Word added with id {id}.\n"));

        let entry = db.get_word_or_fail(id)?;
        assert_eq!(entry.word, "hola");
        assert_eq!(entry.translation.as_deref(), Some("hello"));
        assert_eq!(entry.example, None);
        assert_eq!(entry.level, Some(Level::Beginner));
        assert!(entry.review.is_due(date("2024-03-01")));
        Ok(())
    }

    #[test]
    fn test_blank_word_writes_nothing() -> Fallible<()> {
        let db = create_db()?;
        let mut out = Vec::new();
        let err = add_word(&db, date("2024-03-01"), &new_word("   "), &mut out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(out.is_empty());
        assert_eq!(db.count_words()?, 0);
        Ok(())
    }
}
