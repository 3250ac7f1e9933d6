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
use vocab_core::rng::TinyRng;
use vocab_core::scheduler::Outcome;
use vocab_core::session::Position;
use vocab_core::session::Prompter;
use vocab_core::session::review_word;
use vocab_core::store::WordStore;

/// Quiz a single random due word. Only that word's review state is updated;
/// no daily progress is recorded.
pub fn practice(
    words: &dyn WordStore,
    clock: &dyn Clock,
    rng: &mut TinyRng,
    prompter: &mut dyn Prompter,
) -> Fallible<Option<Outcome>> {
    let Some(entry) = words.random_due_word(clock.today(), rng)? else {
        prompter.notify("No words due for practice.")?;
        return Ok(None);
    };
    log::debug!("Practicing word {}", entry.id);

    let Some(answer) = prompter.ask(Position::Single, &entry)? else {
        return Err(ErrorReport::cancelled());
    };
    let (outcome, state) = review_word(words, &entry, &answer, clock.today())?;
    prompter.reveal(&entry, outcome)?;
    if let Some(next) = state.next_review {
        prompter.notify(&format!("Next review: {next}"))?;
    }
    Ok(Some(outcome))
}
