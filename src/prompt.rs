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

use std::io::BufRead;
use std::io::Write;

use vocab_core::error::Fallible;
use vocab_core::scheduler::Outcome;
use vocab_core::session::Position;
use vocab_core::session::Prompter;
use vocab_core::types::entry::VocabularyEntry;
use vocab_core::types::progress::SessionSummary;

/// Line-based prompts over any reader/writer pair, normally stdin/stdout.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn ask(&mut self, position: Position, entry: &VocabularyEntry) -> Fallible<Option<String>> {
        match position {
            Position::InSession { index, total } => {
                writeln!(self.output, "\nWord {index}/{total}: {}", entry.word)?
            }
            Position::Single => writeln!(self.output, "\nTranslate this word: {}", entry.word)?,
        }
        if let Some(example) = &entry.example {
            writeln!(self.output, "Example: {example}")?;
        }
        write!(self.output, "Your answer: ")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            // End of input.
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn reveal(&mut self, entry: &VocabularyEntry, outcome: Outcome) -> Fallible<()> {
        match outcome {
            Outcome::Correct => writeln!(self.output, "✓ Correct")?,
            Outcome::Incorrect => {
                let expected = entry.translation.as_deref().unwrap_or("(no translation)");
                writeln!(self.output, "✗ Incorrect (correct: {expected})")?
            }
        }
        Ok(())
    }

    fn summarize(&mut self, summary: &SessionSummary) -> Fallible<()> {
        writeln!(self.output, "\nSession complete")?;
        writeln!(self.output, "-----------------")?;
        writeln!(self.output, "Reviewed: {}", summary.reviewed)?;
        writeln!(self.output, "Correct: {}", summary.correct)?;
        writeln!(self.output, "Incorrect: {}", summary.incorrect)?;
        writeln!(self.output, "Accuracy: {:.2}%", summary.accuracy)?;
        writeln!(self.output, "Duration: {} seconds", summary.duration_seconds)?;
        Ok(())
    }

    fn notify(&mut self, message: &str) -> Fallible<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::NaiveDate;
    use vocab_core::types::date::Date;
    use vocab_core::types::entry::ReviewState;

    use super::*;

    fn entry(example: Option<&str>) -> VocabularyEntry {
        VocabularyEntry {
            id: 1,
            word: "hola".to_string(),
            translation: Some("hello".to_string()),
            example: example.map(str::to_string),
            level: None,
            review: ReviewState::new(Date::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())),
        }
    }

    fn output(prompter: TerminalPrompter<Cursor<&[u8]>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_output()).unwrap()
    }

    #[test]
    fn test_ask_reads_one_line() -> Fallible<()> {
        let mut prompter = TerminalPrompter::new(Cursor::new("hello\nsecond\n".as_bytes()), Vec::new());
        let position = Position::InSession { index: 2, total: 5 };
        let answer = prompter.ask(position, &entry(Some("¡Hola!")))?;
        assert_eq!(answer.as_deref(), Some("hello\n"));
        let text = output(prompter);
        assert!(text.contains("Word 2/5: hola"));
        assert!(text.contains("Example: ¡Hola!"));
        assert!(text.ends_with("Your answer: "));
        Ok(())
    }

    #[test]
    fn test_end_of_input_is_none() -> Fallible<()> {
        let mut prompter = TerminalPrompter::new(Cursor::new("".as_bytes()), Vec::new());
        assert_eq!(prompter.ask(Position::Single, &entry(None))?, None);
        assert!(output(prompter).contains("Translate this word: hola"));
        Ok(())
    }

    #[test]
    fn test_one_word_session_shows_position() -> Fallible<()> {
        let mut prompter = TerminalPrompter::new(Cursor::new("hello\n".as_bytes()), Vec::new());
        let position = Position::InSession { index: 1, total: 1 };
        prompter.ask(position, &entry(None))?;
        let text = output(prompter);
        assert!(text.contains("Word 1/1: hola"));
        assert!(!text.contains("Translate this word"));
        Ok(())
    }

    #[test]
    fn test_reveal_and_summary() -> Fallible<()> {
        let mut prompter = TerminalPrompter::new(Cursor::new("".as_bytes()), Vec::new());
        prompter.reveal(&entry(None), Outcome::Correct)?;
        prompter.reveal(&entry(None), Outcome::Incorrect)?;
        prompter.summarize(&SessionSummary {
            date: Date::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            reviewed: 3,
            correct: 2,
            incorrect: 1,
            accuracy: 200.0 / 3.0,
            duration_seconds: 42,
        })?;
        let text = output(prompter);
        assert!(text.contains("✓ Correct"));
        assert!(text.contains("✗ Incorrect (correct: hello)"));
        assert!(text.contains("Accuracy: 66.67%"));
        assert!(text.contains("Duration: 42 seconds"));
        Ok(())
    }
}
