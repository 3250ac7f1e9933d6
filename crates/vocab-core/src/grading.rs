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

use crate::scheduler::Outcome;

/// Grade a typed answer against the stored translation.
///
/// Exact match after trimming, ignoring case. No partial credit. A word
/// without a translation can never be answered correctly.
pub fn grade(answer: &str, translation: Option<&str>) -> Outcome {
    let correct = match translation {
        Some(expected) => answer.trim().to_lowercase() == expected.trim().to_lowercase(),
        None => false,
    };
    Outcome::from_correct(correct)
}
