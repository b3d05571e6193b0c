//! Arguments shared by several commands, and the issue collector used to
//! validate them before anything else runs.

use std::fmt;

use chrono::NaiveDate;
use clap::Args;

use crate::error::{ActualError, ActualResult};
use crate::models::window::parse_iso_date;
use crate::models::{DateWindow, Money};
use crate::services::WindowSpec;

/// Collects every problem with the command line so they can be reported together
#[derive(Debug, Default)]
pub struct Issues(Vec<String>);

impl Issues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: impl Into<String>) {
        self.0.push(issue.into());
    }

    /// Keep the value, or record the error as an issue prefixed with `field`
    pub fn check<T, E: fmt::Display>(&mut self, field: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(format!("{}: {}", field, e));
                None
            }
        }
    }

    /// Keep the value, or record every line of the error
    pub fn absorb<T>(&mut self, result: ActualResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.extend(e.report_lines());
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok` with `value` when nothing was recorded
    pub fn finish<T>(self, value: Option<T>) -> ActualResult<T> {
        match value {
            Some(value) if self.0.is_empty() => Ok(value),
            _ if self.0.is_empty() => Err(ActualError::validation("invalid arguments")),
            _ => Err(ActualError::Validation(self.0)),
        }
    }
}

/// `-a/--account`
#[derive(Args, Debug, Clone)]
pub struct AccountArg {
    /// Account name or ID
    #[arg(short = 'a', long)]
    pub account: String,
}

impl AccountArg {
    pub fn validate(&self, issues: &mut Issues) -> Option<String> {
        let account = self.account.trim();
        if account.is_empty() {
            issues.push("account: must not be empty");
            return None;
        }
        Some(account.to_string())
    }
}

/// `-s/--start` and `-e/--end`, or `-l/--last`
#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// First day of the window (YYYY-MM-DD)
    #[arg(short = 's', long)]
    pub start: Option<String>,

    /// Last day of the window (YYYY-MM-DD)
    #[arg(short = 'e', long)]
    pub end: Option<String>,

    /// The last N days up to today
    #[arg(short = 'l', long, value_name = "DAYS")]
    pub last: Option<u32>,
}

impl WindowArgs {
    /// Check the flags and build the inclusive window, `today` anchoring `--last`
    pub fn validate(&self, today: NaiveDate, issues: &mut Issues) -> Option<DateWindow> {
        let spec = match (&self.start, &self.end, self.last) {
            (None, None, Some(days)) => WindowSpec::LastDays(days),
            (Some(start), Some(end), None) => {
                let start_ok = issues.check("start", parse_iso_date(start)).is_some();
                let end_ok = issues.check("end", parse_iso_date(end)).is_some();
                if !(start_ok && end_ok) {
                    return None;
                }
                WindowSpec::Explicit {
                    start: start.clone(),
                    end: end.clone(),
                }
            }
            (None, None, None) => {
                issues.push("window: provide --start and --end, or --last");
                return None;
            }
            (_, _, Some(_)) => {
                issues.push("window: --last cannot be combined with --start/--end");
                return None;
            }
            (Some(_), None, None) => {
                issues.push("end: required with --start");
                return None;
            }
            (None, Some(_), None) => {
                issues.push("start: required with --end");
                return None;
            }
        };

        issues.absorb(spec.resolve(today))
    }
}

/// Parse a money flag, recording a problem under `field`
pub fn parse_money(field: &str, value: &str, issues: &mut Issues) -> Option<Money> {
    issues.check(field, Money::parse(value))
}
