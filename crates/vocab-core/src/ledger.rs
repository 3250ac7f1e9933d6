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

use crate::error::Fallible;
use crate::store::ProgressStore;
use crate::types::date::Date;
use crate::types::progress::DailyProgress;
use crate::types::progress::SessionSummary;

/// Daily practice totals. At most one record per date; later sessions on
/// the same date are merged into it.
pub struct ProgressLedger<'a> {
    store: &'a dyn ProgressStore,
}

impl<'a> ProgressLedger<'a> {
    pub fn new(store: &'a dyn ProgressStore) -> Self {
        Self { store }
    }

    /// Persist a finished session and return the day's updated totals.
    pub fn record_session(&self, session: &SessionSummary) -> Fallible<DailyProgress> {
        let progress = match self.store.get_progress(session.date)? {
            Some(existing) => {
                log::debug!("Merging session into progress for {}", session.date);
                existing.absorb(session)
            }
            None => {
                log::debug!("Starting progress record for {}", session.date);
                DailyProgress::from_session(session)
            }
        };
        self.store.put_progress(&progress)?;
        Ok(progress)
    }

    pub fn progress_for(&self, date: Date) -> Fallible<Option<DailyProgress>> {
        self.store.get_progress(date)
    }
}
