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
use vocab_core::types::entry::VocabularyEntry;

use crate::cmd::OutputFormat;

pub fn list_words(words: &dyn WordStore, format: OutputFormat, out: &mut dyn Write) -> Fallible<()> {
    let entries: Vec<VocabularyEntry> = words.all_words()?;
    match format {
        OutputFormat::Text => {
            if entries.is_empty() {
                writeln!(out, "No words yet.")?;
            }
            for entry in &entries {
                writeln!(out, "{}", render_line(entry))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &entries)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn render_line(entry: &VocabularyEntry) -> String {
    let mut line = format!("{:>4}  {}", entry.id, entry.word);
    if let Some(translation) = &entry.translation {
        line.push_str(&format!(" = {translation}"));
    }
    if let Some(level) = entry.level {
        line.push_str(&format!(" [{level}]"));
    }
    match entry.review.next_review {
        Some(date) => line.push_str(&format!("  (next review {date})")),
        None => line.push_str("  (due)"),
    }
    line
}
