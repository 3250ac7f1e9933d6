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

//! The practice session: fetch due words, quiz them one at a time, schedule
//! each answer and record the day's totals at the end.
//!
//! Each answer is persisted as soon as it is graded. A session that is
//! cancelled halfway keeps those updates but writes no progress record.

use crate::clock::Clock;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::grading::grade;
use crate::ledger::ProgressLedger;
use crate::scheduler::Outcome;
use crate::scheduler::schedule;
use crate::store::ProgressStore;
use crate::store::WordStore;
use crate::types::date::Date;
use crate::types::entry::ReviewState;
use crate::types::entry::VocabularyEntry;
use crate::types::progress::DailyProgress;
use crate::types::progress::SessionSummary;
use crate::types::progress::accuracy;
use crate::types::timestamp::Timestamp;

/// How many words a session drills when the caller does not say.
pub const DEFAULT_SESSION_SIZE: usize = 10;

/// What the word being asked is part of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// A one-off quiz outside of a session.
    Single,
    /// Word `index` of `total` in a session, 1-based.
    InSession { index: usize, total: usize },
}

/// The terminal side of a session.
pub trait Prompter {
    /// Present a word and block until the user answers. `None` means the
    /// input ended and the session should be abandoned.
    fn ask(&mut self, position: Position, entry: &VocabularyEntry) -> Fallible<Option<String>>;

    /// Tell the user how their answer was graded.
    fn reveal(&mut self, entry: &VocabularyEntry, outcome: Outcome) -> Fallible<()>;

    fn summarize(&mut self, summary: &SessionSummary) -> Fallible<()>;

    /// Show a one-line status message.
    fn notify(&mut self, message: &str) -> Fallible<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fetching,
    PresentingWord,
    Scoring,
    Finishing,
    Done,
}

#[derive(Debug, PartialEq)]
pub enum SessionOutcome {
    /// No words were due. Nothing was written.
    NothingDue,
    Completed {
        summary: SessionSummary,
        progress: DailyProgress,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Counters {
    reviewed: u32,
    correct: u32,
    incorrect: u32,
}

impl Counters {
    fn count(&mut self, outcome: Outcome) {
        self.reviewed += 1;
        match outcome {
            Outcome::Correct => self.correct += 1,
            Outcome::Incorrect => self.incorrect += 1,
        }
    }
}

/// Grade `answer`, schedule the word and persist its new review state.
pub fn review_word(
    words: &dyn WordStore,
    entry: &VocabularyEntry,
    answer: &str,
    today: Date,
) -> Fallible<(Outcome, ReviewState)> {
    let outcome = grade(answer, entry.translation.as_deref());
    let state = schedule(&entry.review, outcome, today);
    if !words.save_review_state(entry.id, &state)? {
        return Err(ErrorReport::not_found(format!(
            "word {} disappeared during review",
            entry.id
        )));
    }
    Ok((outcome, state))
}

pub struct PracticeSession<'a> {
    words: &'a dyn WordStore,
    ledger: ProgressLedger<'a>,
    clock: &'a dyn Clock,
    limit: usize,
    phase: Phase,
    counters: Counters,
}

impl<'a> PracticeSession<'a> {
    pub fn new(
        words: &'a dyn WordStore,
        progress: &'a dyn ProgressStore,
        clock: &'a dyn Clock,
        limit: usize,
    ) -> Self {
        Self {
            words,
            ledger: ProgressLedger::new(progress),
            clock,
            limit,
            phase: Phase::Idle,
            counters: Counters::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of words graded so far.
    pub fn reviewed(&self) -> u32 {
        self.counters.reviewed
    }

    pub fn run(&mut self, prompter: &mut dyn Prompter) -> Fallible<SessionOutcome> {
        let started_at: Timestamp = self.clock.now();

        self.enter(Phase::Fetching);
        let due: Vec<VocabularyEntry> = self.words.due_words(started_at.date(), self.limit)?;
        if due.is_empty() {
            prompter.notify("No words due for review.")?;
            self.enter(Phase::Done);
            return Ok(SessionOutcome::NothingDue);
        }
        log::info!("Starting session with {} due words", due.len());
        let noun = if due.len() == 1 { "word" } else { "words" };
        prompter.notify(&format!("Starting session ({} {noun})", due.len()))?;

        let total = due.len();
        for (i, entry) in due.iter().enumerate() {
            self.enter(Phase::PresentingWord);
            let position = Position::InSession {
                index: i + 1,
                total,
            };
            let answer = match prompter.ask(position, entry)? {
                Some(answer) => answer,
                None => {
                    log::info!(
                        "Session cancelled after {} of {total} words",
                        self.counters.reviewed
                    );
                    self.enter(Phase::Done);
                    return Err(ErrorReport::cancelled());
                }
            };

            self.enter(Phase::Scoring);
            // The answer may come in after midnight.
            let answered_on: Date = self.clock.today();
            let (outcome, _) = review_word(self.words, entry, &answer, answered_on)?;
            self.counters.count(outcome);
            prompter.reveal(entry, outcome)?;
        }

        self.enter(Phase::Finishing);
        let finished_at: Timestamp = self.clock.now();
        let Counters {
            reviewed,
            correct,
            incorrect,
        } = self.counters;
        let summary = SessionSummary {
            date: finished_at.date(),
            reviewed,
            correct,
            incorrect,
            accuracy: accuracy(correct, reviewed),
            duration_seconds: finished_at.seconds_since(started_at),
        };
        prompter.summarize(&summary)?;
        let progress = self.ledger.record_session(&summary)?;

        self.enter(Phase::Done);
        Ok(SessionOutcome::Completed { summary, progress })
    }

    fn enter(&mut self, phase: Phase) {
        log::debug!("Session phase: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::VecDeque;

    use chrono::NaiveDate;
    use chrono::NaiveDateTime;

    use super::*;
    use crate::error::ErrorKind;
    use crate::memory::MemoryStore;
    use crate::types::entry::WordFields;
    use crate::types::entry::WordId;

    /// A clock that advances by a fixed step on every reading.
    struct SteppingClock {
        current: Cell<NaiveDateTime>,
        step_seconds: i64,
    }

    impl SteppingClock {
        fn new(start: &str, step_seconds: i64) -> Self {
            let start = NaiveDateTime::parse_from_str(start, "%Y-%m-%dT%H:%M:%S").unwrap();
            Self {
                current: Cell::new(start),
                step_seconds,
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> Timestamp {
            let now = self.current.get();
            self.current
                .set(now + chrono::Duration::seconds(self.step_seconds));
            Timestamp::new(now)
        }
    }

    /// Answers from a script; `None` entries simulate end of input.
    struct ScriptedPrompter {
        answers: VecDeque<Option<String>>,
        asked: Vec<(Position, String)>,
        revealed: Vec<Outcome>,
        summaries: Vec<SessionSummary>,
        notices: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[Option<&str>]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.map(str::to_string)).collect(),
                asked: Vec::new(),
                revealed: Vec::new(),
                summaries: Vec::new(),
                notices: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&mut self, position: Position, entry: &VocabularyEntry) -> Fallible<Option<String>> {
            self.asked.push((position, entry.word.clone()));
            Ok(self.answers.pop_front().flatten())
        }

        fn reveal(&mut self, _entry: &VocabularyEntry, outcome: Outcome) -> Fallible<()> {
            self.revealed.push(outcome);
            Ok(())
        }

        fn summarize(&mut self, summary: &SessionSummary) -> Fallible<()> {
            self.summaries.push(*summary);
            Ok(())
        }

        fn notify(&mut self, message: &str) -> Fallible<()> {
            self.notices.push(message.to_string());
            Ok(())
        }
    }

    fn day() -> Date {
        Date::new(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
    }

    fn add(store: &MemoryStore, word: &str, translation: &str) -> WordId {
        let fields = WordFields::new(word, Some(translation), None, None).unwrap();
        store.add_word(&fields, day()).unwrap()
    }

    #[test]
    fn test_nothing_due_writes_nothing() -> Fallible<()> {
        let store = MemoryStore::new();
        let clock = SteppingClock::new("2024-04-01T09:00:00", 1);
        let mut prompter = ScriptedPrompter::new(&[]);
        let mut session = PracticeSession::new(&store, &store, &clock, DEFAULT_SESSION_SIZE);
        assert_eq!(session.run(&mut prompter)?, SessionOutcome::NothingDue);
        assert_eq!(session.phase(), Phase::Done);
        assert!(prompter.asked.is_empty());
        assert!(prompter.summaries.is_empty());
        assert_eq!(prompter.notices, vec!["No words due for review."]);
        assert_eq!(store.get_progress(day())?, None);
        Ok(())
    }

    #[test]
    fn test_full_session() -> Fallible<()> {
        let store = MemoryStore::new();
        let hola = add(&store, "hola", "hello");
        let gato = add(&store, "gato", "cat");
        let perro = add(&store, "perro", "dog");
        let clock = SteppingClock::new("2024-04-01T09:00:00", 20);
        let mut prompter =
            ScriptedPrompter::new(&[Some(" Hello "), Some("dog"), Some("dog")]);
        let mut session = PracticeSession::new(&store, &store, &clock, DEFAULT_SESSION_SIZE);

        let outcome = session.run(&mut prompter)?;
        let SessionOutcome::Completed { summary, progress } = outcome else {
            panic!("expected a completed session");
        };

        assert_eq!(summary.reviewed, 3);
        assert_eq!(summary.correct, 2);
        assert_eq!(summary.incorrect, 1);
        assert!((summary.accuracy - 200.0 / 3.0).abs() < 1e-9);
        // Clock readings: start, one per answer, finish.
        assert_eq!(summary.duration_seconds, 80);
        assert_eq!(progress.words_reviewed, 3);
        assert_eq!(prompter.notices, vec!["Starting session (3 words)"]);
        assert_eq!(prompter.summaries, vec![summary]);
        assert_eq!(
            prompter.revealed,
            vec![Outcome::Correct, Outcome::Incorrect, Outcome::Correct]
        );
        assert_eq!(
            prompter.asked.iter().map(|(p, _)| *p).collect::<Vec<_>>(),
            vec![
                Position::InSession { index: 1, total: 3 },
                Position::InSession { index: 2, total: 3 },
                Position::InSession { index: 3, total: 3 },
            ]
        );

        let hola = store.get_word_or_fail(hola)?;
        assert_eq!(hola.review.repetitions, 1);
        assert_eq!(hola.review.next_review, Some(day().add_days(1)));
        let gato = store.get_word_or_fail(gato)?;
        assert_eq!(gato.review.repetitions, 0);
        assert_eq!(gato.review.interval, 1);
        let perro = store.get_word_or_fail(perro)?;
        assert_eq!(perro.review.repetitions, 1);

        // Nothing left due today.
        assert!(store.due_words(day(), 10)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_limit_caps_the_batch() -> Fallible<()> {
        let store = MemoryStore::new();
        for i in 0..5 {
            add(&store, &format!("w{i}"), "x");
        }
        let clock = SteppingClock::new("2024-04-01T09:00:00", 0);
        let mut prompter = ScriptedPrompter::new(&[Some("x"), Some("x")]);
        let mut session = PracticeSession::new(&store, &store, &clock, 2);
        session.run(&mut prompter)?;
        assert_eq!(prompter.asked.len(), 2);
        assert_eq!(store.due_words(day(), 10)?.len(), 3);
        Ok(())
    }

    #[test]
    fn test_cancellation_keeps_scored_words_and_skips_ledger() -> Fallible<()> {
        let store = MemoryStore::new();
        let first = add(&store, "hola", "hello");
        let second = add(&store, "gato", "cat");
        let clock = SteppingClock::new("2024-04-01T09:00:00", 5);
        let mut prompter = ScriptedPrompter::new(&[Some("hello"), None]);
        let mut session = PracticeSession::new(&store, &store, &clock, DEFAULT_SESSION_SIZE);

        let err = session.run(&mut prompter).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert_eq!(session.reviewed(), 1);
        assert_eq!(session.phase(), Phase::Done);

        assert_eq!(store.get_word_or_fail(first)?.review.repetitions, 1);
        assert_eq!(
            store.get_word_or_fail(second)?.review.next_review,
            Some(day())
        );
        assert_eq!(store.get_progress(day())?, None);
        assert!(prompter.summaries.is_empty());
        Ok(())
    }

    #[test]
    fn test_two_sessions_same_day_merge() -> Fallible<()> {
        let store = MemoryStore::new();
        add(&store, "uno", "one");
        add(&store, "dos", "two");
        let clock = SteppingClock::new("2024-04-01T09:00:00", 10);
        let mut prompter = ScriptedPrompter::new(&[Some("one"), Some("three")]);
        PracticeSession::new(&store, &store, &clock, DEFAULT_SESSION_SIZE).run(&mut prompter)?;

        add(&store, "tres", "three");
        let mut prompter = ScriptedPrompter::new(&[Some("three")]);
        PracticeSession::new(&store, &store, &clock, DEFAULT_SESSION_SIZE).run(&mut prompter)?;

        let progress = store.get_progress(day())?.unwrap();
        assert_eq!(progress.words_reviewed, 3);
        assert_eq!(progress.words_correct, 2);
        assert_eq!(progress.accuracy, 100.0);
        assert_eq!(progress.session_duration, 50);
        Ok(())
    }

    #[test]
    fn test_answers_after_midnight_schedule_from_the_new_day() -> Fallible<()> {
        let store = MemoryStore::new();
        let hola = add(&store, "hola", "hello");
        // Starts at 23:59 on April 1st; the answer is scored at 00:01.
        let clock = SteppingClock::new("2024-04-01T23:59:00", 120);
        let mut prompter = ScriptedPrompter::new(&[Some("hello")]);
        let mut session = PracticeSession::new(&store, &store, &clock, DEFAULT_SESSION_SIZE);

        let SessionOutcome::Completed { summary, .. } = session.run(&mut prompter)? else {
            panic!("expected a completed session");
        };
        let april_2 = day().add_days(1);
        let review = store.get_word_or_fail(hola)?.review;
        assert_eq!(review.next_review, Some(april_2.add_days(1)));
        assert!(!review.is_due(april_2));

        assert_eq!(summary.date, april_2);
        assert_eq!(store.get_progress(day())?, None);
        assert_eq!(store.get_progress(april_2)?.map(|p| p.words_reviewed), Some(1));
        Ok(())
    }

    #[test]
    fn test_persistence_failure_aborts() {
        let store = MemoryStore::new();
        add(&store, "hola", "hello");
        add(&store, "gato", "cat");
        store.set_read_only(true);
        let clock = SteppingClock::new("2024-04-01T09:00:00", 1);
        let mut prompter = ScriptedPrompter::new(&[Some("hello"), Some("cat")]);
        let mut session = PracticeSession::new(&store, &store, &clock, DEFAULT_SESSION_SIZE);
        let err = session.run(&mut prompter).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Persistence);
        assert_eq!(prompter.asked.len(), 1);
        assert_eq!(session.phase(), Phase::Scoring);
    }

    #[test]
    fn test_review_word_without_translation() -> Fallible<()> {
        let store = MemoryStore::new();
        let fields = WordFields::new("sobremesa", None, None, None)?;
        let id = store.add_word(&fields, day())?;
        let entry = store.get_word_or_fail(id)?;
        let (outcome, state) = review_word(&store, &entry, "sobremesa", day())?;
        assert_eq!(outcome, Outcome::Incorrect);
        assert_eq!(state.interval, 1);
        Ok(())
    }
}
