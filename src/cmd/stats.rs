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

use serde::Serialize;
use vocab_core::error::Fallible;
use vocab_core::ledger::ProgressLedger;
use vocab_core::store::ProgressStore;
use vocab_core::store::WordStore;
use vocab_core::types::date::Date;
use vocab_core::types::progress::DailyProgress;

use crate::cmd::OutputFormat;

#[derive(Serialize)]
struct Stats {
    date: Date,
    total_words: usize,
    due_today: usize,
    today: Option<DailyProgress>,
}

pub fn print_stats(
    words: &dyn WordStore,
    progress: &dyn ProgressStore,
    today: Date,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Fallible<()> {
    let stats = Stats {
        date: today,
        total_words: words.count_words()?,
        due_today: words.due_words(today, usize::MAX)?.len(),
        today: ProgressLedger::new(progress).progress_for(today)?,
    };
    match format {
        OutputFormat::Text => {
            writeln!(out, "Total words: {}", stats.total_words)?;
            writeln!(out, "Due today: {}", stats.due_today)?;
            match stats.today {
                Some(p) => {
                    writeln!(out, "Today ({today}):")?;
                    writeln!(out, "  Reviewed: {}", p.words_reviewed)?;
                    writeln!(out, "  Correct: {}", p.words_correct)?;
                    writeln!(out, "  Accuracy: {:.2}%", p.accuracy)?;
                    writeln!(out, "  Time spent: {} seconds", p.session_duration)?;
                }
                None => writeln!(out, "No practice recorded today.")?,
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &stats)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
