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
use vocab_core::types::entry::WordId;

/// Delete a word. A missing id is reported but is not an error.
pub fn delete_word(words: &dyn WordStore, id: WordId, out: &mut dyn Write) -> Fallible<()> {
    if words.delete_word(id)? {
        log::info!("Deleted word {id}");
        writeln!(out, "Word {id} deleted.")?;
    } else {
        writeln!(out, "No word with id {id}.")?;
    }
    Ok(())
}
