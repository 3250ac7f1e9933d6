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
use vocab_core::clock::Clock;
use vocab_core::error::ErrorReport;
use vocab_core::error::Fallible;
use vocab_core::session::PracticeSession;
use vocab_core::session::Prompter;
use vocab_core::session::SessionOutcome;
use vocab_core::store::ProgressStore;
use vocab_core::store::WordStore;

pub fn run_session(
    words: &dyn WordStore,
    progress: &dyn ProgressStore,
    clock: &dyn Clock,
    count: usize,
    prompter: &mut dyn Prompter,
) -> Fallible<SessionOutcome> {
    if count == 0 {
        return Err(ErrorReport::validation("session size must be at least 1"));
    }
    let mut session = PracticeSession::new(words, progress, clock, count);
    session.run(prompter)
}

#[cfg(test)]
mod tests {
    use vocab_core::error::ErrorKind;

    use super::*;
    use crate::helper::FixedClock;
    use crate::helper::create_db;
    use crate::helper::date;
    use crate::helper::insert;
    use crate::helper::scripted;
    use crate::helper::text;

    #[test]
    fn test_session_records_progress() -> Fallible<()> {
        let db = create_db()?;
        let hola = insert(&db, "hola", "hello", "2024-03-01")?;
        let adios = insert(&db, "adiós", "goodbye", "2024-03-01")?;
        insert(&db, "mañana", "tomorrow", "2024-03-05")?;
        let clock = FixedClock::at("2024-03-01T09:00:00");
        let mut prompter = scripted("hello\nsee you\n");

        let outcome = run_session(&db, &db, &clock, 10, &mut prompter)?;
        let SessionOutcome::Completed { summary, progress } = outcome else {
            panic!("expected a completed session");
        };
        assert_eq!(summary.reviewed, 2);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.incorrect, 1);
        assert_eq!(progress.words_reviewed, 2);
        assert_eq!(progress.accuracy, 50.0);
        assert_eq!(db.get_progress(date("2024-03-01"))?, Some(progress));

        assert_eq!(db.get_word_or_fail(hola)?.review.next_review, Some(date("2024-03-02")));
        assert_eq!(db.get_word_or_fail(adios)?.review.repetitions, 0);

        let text = text(prompter.into_output());
        assert!(text.contains("Starting session (2 words)"));
        assert!(text.contains("Word 1/2: hola"));
        assert!(text.contains("Word 2/2: adiós"));
        assert!(text.contains("✗ Incorrect (correct: goodbye)"));
        assert!(text.contains("Accuracy: 50.00%"));
        Ok(())
    }

    #[test]
    fn test_count_limits_session() -> Fallible<()> {
        let db = create_db()?;
        insert(&db, "uno", "one", "2024-03-01")?;
        insert(&db, "dos", "two", "2024-03-01")?;
        insert(&db, "tres", "three", "2024-03-01")?;
        let clock = FixedClock::at("2024-03-01T09:00:00");
        let outcome = run_session(&db, &db, &clock, 1, &mut scripted("one\n"))?;
        let SessionOutcome::Completed { summary, .. } = outcome else {
            panic!("expected a completed session");
        };
        assert_eq!(summary.reviewed, 1);
        assert_eq!(summary.correct, 1);
        Ok(())
    }

    #[test]
    fn test_nothing_due() -> Fallible<()> {
        let db = create_db()?;
        let clock = FixedClock::at("2024-03-01T09:00:00");
        let mut prompter = scripted("");
        let outcome = run_session(&db, &db, &clock, 10, &mut prompter)?;
        assert_eq!(outcome, SessionOutcome::NothingDue);
        assert_eq!(text(prompter.into_output()), "No words due for review.\n");
        assert_eq!(db.get_progress(date("2024-03-01"))?, None);
        Ok(())
    }

    #[test]
    fn test_cancel_keeps_graded_words() -> Fallible<()> {
        let db = create_db()?;
        let hola = insert(&db, "hola", "hello", "2024-03-01")?;
        let adios = insert(&db, "adiós", "goodbye", "2024-03-01")?;
        let clock = FixedClock::at("2024-03-01T09:00:00");

        let err = run_session(&db, &db, &clock, 10, &mut scripted("hello\n")).unwrap_err();
        assert!(err.is_cancellation());
        assert_eq!(db.get_word_or_fail(hola)?.review.repetitions, 1);
        assert_eq!(db.get_word_or_fail(adios)?.review.interval, 0);
        assert_eq!(db.get_progress(date("2024-03-01"))?, None);
        Ok(())
    }

    #[test]
    fn test_zero_count_is_rejected() -> Fallible<()> {
        let db = create_db()?;
        let clock = FixedClock::at("2024-03-01T09:00:00");
        let err = run_session(&db, &db, &clock, 0, &mut scripted("")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        Ok(())
    }
}
