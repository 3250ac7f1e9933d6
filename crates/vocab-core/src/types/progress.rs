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

use serde::Serialize;

use crate::types::date::Date;

/// Totals for one calendar day, across every session run that day.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DailyProgress {
    pub date: Date,
    pub words_reviewed: u32,
    pub words_correct: u32,
    /// Percentage in `[0, 100]`. Holds the accuracy of the most recent
    /// session, not an average over the day.
    pub accuracy: f64,
    /// Seconds spent practicing.
    pub session_duration: u64,
}

/// The outcome of one finished session, as handed to the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SessionSummary {
    pub date: Date,
    pub reviewed: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub accuracy: f64,
    pub duration_seconds: u64,
}

/// `correct / reviewed` as a percentage; zero when nothing was reviewed.
pub fn accuracy(correct: u32, reviewed: u32) -> f64 {
    if reviewed == 0 {
        0.0
    } else {
        f64::from(correct) / f64::from(reviewed) * 100.0
    }
}

impl DailyProgress {
    pub fn from_session(session: &SessionSummary) -> Self {
        Self {
            date: session.date,
            words_reviewed: session.reviewed,
            words_correct: session.correct,
            accuracy: session.accuracy,
            session_duration: session.duration_seconds,
        }
    }

    /// Fold another session from the same day into this record. Counts and
    /// duration add up; accuracy is replaced by the session's own.
    pub fn absorb(self, session: &SessionSummary) -> Self {
        Self {
            date: self.date,
            words_reviewed: self.words_reviewed + session.reviewed,
            words_correct: self.words_correct + session.correct,
            accuracy: session.accuracy,
            session_duration: self.session_duration + session.duration_seconds,
        }
    }
}
