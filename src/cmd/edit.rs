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

use vocab_core::error::ErrorReport;
use vocab_core::error::Fallible;
use vocab_core::store::WordStore;
use vocab_core::types::entry::WordId;
use vocab_core::types::entry::WordPatch;

/// Change the given fields of a word. The review state is left alone.
pub fn edit_word(
    words: &dyn WordStore,
    id: WordId,
    patch: &WordPatch,
    out: &mut dyn Write,
) -> Fallible<()> {
    if patch.is_empty() {
        return Err(ErrorReport::validation(
            "nothing to change; pass at least one of --word, --translation, --example, --level",
        ));
    }
    let entry = words.get_word_or_fail(id)?;
    let fields = patch.apply(&entry)?;
    if !words.update_word(id, &fields)? {
        return Err(ErrorReport::not_found(format!("no word with id {id}")));
    }
    log::info!("Updated word {id}");
    writeln!(out, "Word {id} updated.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use vocab_core::error::ErrorKind;
    use vocab_core::types::level::Level;

    use super::*;
    use crate::helper::create_db;
    use crate::helper::insert;
    use crate::helper::text;

    #[test]
    fn test_edit_changes_only_given_fields() -> Fallible<()> {
        let db = create_db()?;
        let id = insert(&db, "hola", "hello", "2024-03-01")?;
        let before = db.get_word_or_fail(id)?;
        let patch = WordPatch {
            example: Some("¡Hola, amigo!".to_string()),
            level: Some(Level::Beginner),
            ..WordPatch::default()
        };
        let mut out = Vec::new();
        edit_word(&db, id, &patch, &mut out)?;
        assert_eq!(text(out), format!("Word {id} updated.\n"));

        let after = db.get_word_or_fail(id)?;
        assert_eq!(after.word, "hola");
        assert_eq!(after.translation.as_deref(), Some("hello"));
        assert_eq!(after.example.as_deref(), Some("¡Hola, amigo!"));
        assert_eq!(after.level, Some(Level::Beginner));
        assert_eq!(after.review, before.review);
        Ok(())
    }

    #[test]
    fn test_empty_patch_is_rejected() -> Fallible<()> {
        let db = create_db()?;
        let id = insert(&db, "hola", "hello", "2024-03-01")?;
        let err = edit_word(&db, id, &WordPatch::default(), &mut Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        Ok(())
    }

    #[test]
    fn test_blank_word_is_rejected() -> Fallible<()> {
        let db = create_db()?;
        let id = insert(&db, "hola", "hello", "2024-03-01")?;
        let patch = WordPatch {
            word: Some("  ".to_string()),
            ..WordPatch::default()
        };
        let err = edit_word(&db, id, &patch, &mut Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(db.get_word_or_fail(id)?.word, "hola");
        Ok(())
    }

    #[test]
    fn test_missing_word() -> Fallible<()> {
        let db = create_db()?;
        let patch = WordPatch {
            translation: Some("bye".to_string()),
            ..WordPatch::default()
        };
        let err = edit_word(&db, 7, &patch, &mut Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        Ok(())
    }
}
