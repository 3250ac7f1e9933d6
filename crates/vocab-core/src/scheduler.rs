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

//! A simplified SM-2 review schedule: one day after the first correct
//! answer, three days after the second, then geometric growth by the ease
//! factor. Any lapse resets to one day.

use crate::types::date::Date;
use crate::types::entry::ReviewState;

/// Interval after the first consecutive correct answer.
const FIRST_INTERVAL: u32 = 1;

/// Interval after the second consecutive correct answer.
const SECOND_INTERVAL: u32 = 3;

/// Interval after a lapse.
const LAPSE_INTERVAL: u32 = 1;

/// The shortest interval a review can ever produce.
const MIN_INTERVAL: u32 = 1;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Outcome::Correct => "correct",
            Outcome::Incorrect => "incorrect",
        }
    }
}

/// Compute the review state that follows answering a word on `today`.
///
/// The ease factor passes through untouched.
pub fn schedule(state: &ReviewState, outcome: Outcome, today: Date) -> ReviewState {
    let (repetitions, interval) = match outcome {
        Outcome::Correct => {
            let repetitions = state.repetitions + 1;
            // The geometric branch is only reachable once one of the fixed
            // branches has set a positive interval.
            let interval = match repetitions {
                1 => FIRST_INTERVAL,
                2 => SECOND_INTERVAL,
                _ => grow(state.interval, state.ease_factor),
            };
            (repetitions, interval)
        }
        Outcome::Incorrect => (0, LAPSE_INTERVAL),
    };
    log::debug!(
        "Scheduled {} answer: repetitions {} -> {}, interval {} -> {}",
        outcome.as_str(),
        state.repetitions,
        repetitions,
        state.interval,
        interval
    );
    ReviewState {
        repetitions,
        interval,
        ease_factor: state.ease_factor,
        next_review: Some(today.add_days(interval)),
    }
}

/// `floor(interval * ease)`, never below [`MIN_INTERVAL`].
fn grow(interval: u32, ease_factor: f64) -> u32 {
    let grown = (f64::from(interval) * ease_factor).floor();
    // `as` saturates on overflow.
    (grown as u32).max(MIN_INTERVAL)
}
