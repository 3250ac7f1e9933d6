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

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::Duration;
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ErrorReport;

const FORMAT: &str = "%Y-%m-%d";

/// A calendar date. Persisted as `YYYY-MM-DD` so that lexical order is
/// chronological order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
#[serde(into = "String")]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(naive_date: NaiveDate) -> Self {
        Self(naive_date)
    }

    /// The date `days` days after this one.
    pub fn add_days(self, days: u32) -> Self {
        Self(self.0 + Duration::days(i64::from(days)))
    }

    pub fn parse(value: &str) -> Result<Self, ErrorReport> {
        NaiveDate::parse_from_str(value, FORMAT)
            .map(Date)
            .map_err(|_| ErrorReport::new(format!("invalid date: {value}")))
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl From<Date> for String {
    fn from(date: Date) -> String {
        date.to_string()
    }
}

#[cfg(feature = "sqlite")]
mod sql {
    use rusqlite::types::FromSql;
    use rusqlite::types::FromSqlError;
    use rusqlite::types::FromSqlResult;
    use rusqlite::types::ToSql;
    use rusqlite::types::ToSqlOutput;
    use rusqlite::types::ValueRef;

    use super::Date;

    impl ToSql for Date {
        fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
            Ok(ToSqlOutput::from(self.to_string()))
        }
    }

    impl FromSql for Date {
        fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
            let text = value.as_str()?;
            Date::parse(text).map_err(|e| FromSqlError::Other(Box::new(e)))
        }
    }
}
