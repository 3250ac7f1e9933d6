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

//! vocab-core: Core library for the vocab spaced repetition trainer.
//!
//! This library provides storage-agnostic types and algorithms for:
//! - The review schedule (a simplified SM-2)
//! - Answer grading
//! - Practice sessions and daily progress aggregation
//! - Store interfaces, with an in-memory implementation

pub mod clock;
pub mod error;
pub mod grading;
pub mod ledger;
pub mod memory;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorKind, ErrorReport, Fallible, fail};
pub use ledger::ProgressLedger;
pub use scheduler::{Outcome, schedule};
pub use session::{PracticeSession, Prompter, SessionOutcome};
pub use store::{ProgressStore, WordStore};
pub use types::date::Date;
pub use types::entry::{ReviewState, VocabularyEntry, WordFields, WordId, WordPatch};
pub use types::level::Level;
pub use types::progress::{DailyProgress, SessionSummary};
pub use types::timestamp::Timestamp;
