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

use std::collections::HashSet;
use std::fs::create_dir_all;
use std::path::Path;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::params;
use vocab_core::error::Fallible;
use vocab_core::store::ProgressStore;
use vocab_core::store::WordStore;
use vocab_core::types::date::Date;
use vocab_core::types::entry::ReviewState;
use vocab_core::types::entry::VocabularyEntry;
use vocab_core::types::entry::WordFields;
use vocab_core::types::entry::WordId;
use vocab_core::types::level::Level;
use vocab_core::types::progress::DailyProgress;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS vocabulary (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word TEXT NOT NULL,
    translation TEXT,
    example_sentence TEXT,
    level TEXT,
    next_review TEXT,
    interval INTEGER NOT NULL DEFAULT 0,
    ease_factor REAL NOT NULL DEFAULT 2.5,
    repetitions INTEGER NOT NULL DEFAULT 0,
    created_at TEXT
);

CREATE TABLE IF NOT EXISTS daily_progress (
    date TEXT PRIMARY KEY,
    words_reviewed INTEGER NOT NULL DEFAULT 0,
    words_correct INTEGER NOT NULL DEFAULT 0,
    accuracy REAL NOT NULL DEFAULT 0,
    session_duration INTEGER NOT NULL DEFAULT 0
);
";

/// Columns added to tables created by older versions of the schema.
const VOCABULARY_COLUMNS: &[(&str, &str)] = &[
    ("translation", "TEXT"),
    ("example_sentence", "TEXT"),
    ("level", "TEXT"),
    ("next_review", "TEXT"),
    ("interval", "INTEGER NOT NULL DEFAULT 0"),
    ("ease_factor", "REAL NOT NULL DEFAULT 2.5"),
    ("repetitions", "INTEGER NOT NULL DEFAULT 0"),
    ("created_at", "TEXT"),
];

const PROGRESS_COLUMNS: &[(&str, &str)] = &[
    ("words_reviewed", "INTEGER NOT NULL DEFAULT 0"),
    ("words_correct", "INTEGER NOT NULL DEFAULT 0"),
    ("accuracy", "REAL NOT NULL DEFAULT 0"),
    ("session_duration", "INTEGER NOT NULL DEFAULT 0"),
];

const ENTRY_COLUMNS: &str = "id, word, translation, example_sentence, level, next_review, interval, ease_factor, repetitions";

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `path`, creating the file, its parent directory
    /// and the schema as needed.
    pub fn open(path: &Path) -> Fallible<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        log::debug!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Fallible<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Fallible<Self> {
        let db = Self { conn };
        db.conn.execute_batch(SCHEMA)?;
        db.ensure_columns("vocabulary", VOCABULARY_COLUMNS)?;
        db.ensure_columns("daily_progress", PROGRESS_COLUMNS)?;
        db.conn.execute_batch(
            "CREATE INDEX IF NOT EXISTS idx_vocabulary_next_review ON vocabulary(next_review);",
        )?;
        Ok(db)
    }

    fn column_names(&self, table: &str) -> Fallible<HashSet<String>> {
        let mut stmt = self.conn.prepare(&format!("PRAGMA table_info({table})"))?;
        let rows = stmt.query_map([], |row| row.get::<_, String>("name"))?;
        let mut names = HashSet::new();
        for name in rows {
            names.insert(name?);
        }
        Ok(names)
    }

    /// Add any of `columns` that `table` lacks. Columns already present are
    /// left alone; every other failure is reported.
    fn ensure_columns(&self, table: &str, columns: &[(&str, &str)]) -> Fallible<()> {
        let existing = self.column_names(table)?;
        for (name, declaration) in columns {
            if existing.contains(*name) {
                continue;
            }
            log::info!("Adding missing column {table}.{name}");
            self.conn.execute(
                &format!("ALTER TABLE {table} ADD COLUMN {name} {declaration}"),
                [],
            )?;
        }
        Ok(())
    }
}

fn entry_from_row(row: &Row) -> rusqlite::Result<VocabularyEntry> {
    let level: Option<String> = row.get("level")?;
    let level = level.and_then(|text| match text.parse::<Level>() {
        Ok(level) => Some(level),
        Err(_) => {
            log::warn!("Ignoring unrecognized level '{text}'");
            None
        }
    });
    Ok(VocabularyEntry {
        id: row.get("id")?,
        word: row.get("word")?,
        translation: row.get("translation")?,
        example: row.get("example_sentence")?,
        level,
        review: ReviewState {
            repetitions: row.get("repetitions")?,
            interval: row.get("interval")?,
            ease_factor: row.get("ease_factor")?,
            next_review: row.get("next_review")?,
        },
    })
}

fn progress_from_row(row: &Row) -> rusqlite::Result<DailyProgress> {
    let duration: i64 = row.get("session_duration")?;
    Ok(DailyProgress {
        date: row.get("date")?,
        words_reviewed: row.get("words_reviewed")?,
        words_correct: row.get("words_correct")?,
        accuracy: row.get("accuracy")?,
        session_duration: u64::try_from(duration).unwrap_or(0),
    })
}

impl WordStore for Database {
    fn add_word(&self, fields: &WordFields, created: Date) -> Fallible<WordId> {
        let state = ReviewState::new(created);
        self.conn.execute(
            "INSERT INTO vocabulary (word, translation, example_sentence, level, next_review, interval, ease_factor, repetitions, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                fields.word(),
                fields.translation(),
                fields.example(),
                fields.level(),
                state.next_review,
                state.interval,
                state.ease_factor,
                state.repetitions,
                created,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        log::debug!("Inserted word {id}");
        Ok(id)
    }

    fn all_words(&self) -> Fallible<Vec<VocabularyEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM vocabulary ORDER BY word, id"
        ))?;
        let rows = stmt.query_map([], entry_from_row)?;
        let mut words = Vec::new();
        for word in rows {
            words.push(word?);
        }
        Ok(words)
    }

    fn get_word(&self, id: WordId) -> Fallible<Option<VocabularyEntry>> {
        let entry = self
            .conn
            .query_row(
                &format!("SELECT {ENTRY_COLUMNS} FROM vocabulary WHERE id = ?1"),
                params![id],
                entry_from_row,
            )
            .optional()?;
        Ok(entry)
    }

    fn update_word(&self, id: WordId, fields: &WordFields) -> Fallible<bool> {
        let changed = self.conn.execute(
            "UPDATE vocabulary SET word = ?1, translation = ?2, example_sentence = ?3, level = ?4 WHERE id = ?5",
            params![
                fields.word(),
                fields.translation(),
                fields.example(),
                fields.level(),
                id
            ],
        )?;
        Ok(changed > 0)
    }

    fn delete_word(&self, id: WordId) -> Fallible<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM vocabulary WHERE id = ?1", params![id])?;
        log::debug!("Deleted {changed} row(s) for word {id}");
        Ok(changed > 0)
    }

    fn due_words(&self, today: Date, limit: usize) -> Fallible<Vec<VocabularyEntry>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        // NULLs sort first in ascending order.
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM vocabulary
             WHERE next_review IS NULL OR next_review <= ?1
             ORDER BY next_review ASC, id ASC
             LIMIT ?2"
        ))?;
        let rows = stmt.query_map(params![today, limit], entry_from_row)?;
        let mut words = Vec::new();
        for word in rows {
            words.push(word?);
        }
        Ok(words)
    }

    fn save_review_state(&self, id: WordId, state: &ReviewState) -> Fallible<bool> {
        let changed = self.conn.execute(
            "UPDATE vocabulary SET repetitions = ?1, interval = ?2, ease_factor = ?3, next_review = ?4 WHERE id = ?5",
            params![
                state.repetitions,
                state.interval,
                state.ease_factor,
                state.next_review,
                id
            ],
        )?;
        Ok(changed > 0)
    }

    fn count_words(&self) -> Fallible<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM vocabulary", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

impl ProgressStore for Database {
    fn get_progress(&self, date: Date) -> Fallible<Option<DailyProgress>> {
        let progress = self
            .conn
            .query_row(
                "SELECT date, words_reviewed, words_correct, accuracy, session_duration
                 FROM daily_progress WHERE date = ?1 LIMIT 1",
                params![date],
                progress_from_row,
            )
            .optional()?;
        Ok(progress)
    }

    fn put_progress(&self, progress: &DailyProgress) -> Fallible<()> {
        let duration = i64::try_from(progress.session_duration).unwrap_or(i64::MAX);
        // Older tables have no unique key on `date`, so no upsert clause.
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE daily_progress SET words_reviewed = ?2, words_correct = ?3, accuracy = ?4, session_duration = ?5
             WHERE date = ?1",
            params![
                progress.date,
                progress.words_reviewed,
                progress.words_correct,
                progress.accuracy,
                duration
            ],
        )?;
        if changed == 0 {
            tx.execute(
                "INSERT INTO daily_progress (date, words_reviewed, words_correct, accuracy, session_duration)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    progress.date,
                    progress.words_reviewed,
                    progress.words_correct,
                    progress.accuracy,
                    duration
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}
