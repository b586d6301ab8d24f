//! Season range filters used to scope reporting queries.
//!
//! A filter token is one of:
//!
//! - the wildcard [`WILDCARD`]: no filtering, every season matches
//! - a single signed integer `s`:
//!   - `s >= 1` selects the season `s`
//!   - `s == 0` selects the current season
//!   - `s < 0` selects the last `|s| - 1` seasons up to and including the
//!     current one (`-1` and `-2` both end at the current season; `-2`
//!     starts one year earlier)
//! - two unsigned integers `a-b`: the inclusive span between them, in
//!   either order

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;
use serde::Serialize;

/// Token meaning "no filter".
pub const WILDCARD: &str = "all";

static SINGLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+$").expect("valid regex"));
static SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-(\d+)$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeFilterError {
    #[error("Invalid range filter '{0}': expected a year, a negative offset, or 'start-end'")]
    InvalidSyntax(String),
}

/// An inclusive `[start_year, end_year]` interval with `start_year <= end_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeInterval {
    pub start_year: i32,
    pub end_year: i32,
}

impl RangeInterval {
    /// Build an interval from two bounds given in either order.
    pub fn spanning(a: i32, b: i32) -> Self {
        Self {
            start_year: a.min(b),
            end_year: a.max(b),
        }
    }

    pub fn single(year: i32) -> Self {
        Self {
            start_year: year,
            end_year: year,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start_year..=self.end_year).contains(&year)
    }
}

impl Default for RangeInterval {
    /// The current season for both bounds.
    fn default() -> Self {
        Self::single(current_year())
    }
}

/// A parsed range filter. `None` means the wildcard (inactive) filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeFilter {
    interval: Option<RangeInterval>,
}

impl RangeFilter {
    /// The inactive filter, matching every season.
    pub fn inactive() -> Self {
        Self { interval: None }
    }

    /// Parse an optional token relative to the real current year.
    pub fn parse(token: Option<&str>) -> Result<Self, RangeFilterError> {
        Self::parse_relative_to(token, current_year())
    }

    /// Parse an optional token, resolving relative forms against `current_year`.
    pub fn parse_relative_to(
        token: Option<&str>,
        current_year: i32,
    ) -> Result<Self, RangeFilterError> {
        let token = match token {
            None => return Ok(Self::inactive()),
            Some(t) if t == WILDCARD => return Ok(Self::inactive()),
            Some(t) => t,
        };

        let invalid = || RangeFilterError::InvalidSyntax(token.to_string());

        if SINGLE_RE.is_match(token) {
            let value: i32 = token.parse().map_err(|_| invalid())?;
            let interval = match value {
                v if v >= 1 => RangeInterval::single(v),
                0 => RangeInterval::single(current_year),
                v => {
                    let back = v.checked_neg().ok_or_else(invalid)? - 1;
                    RangeInterval {
                        start_year: current_year - back,
                        end_year: current_year,
                    }
                }
            };
            return Ok(Self {
                interval: Some(interval),
            });
        }

        if let Some(caps) = SPAN_RE.captures(token) {
            let a: i32 = caps[1].parse().map_err(|_| invalid())?;
            let b: i32 = caps[2].parse().map_err(|_| invalid())?;
            return Ok(Self {
                interval: Some(RangeInterval::spanning(a, b)),
            });
        }

        Err(invalid())
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    pub fn interval(&self) -> Option<RangeInterval> {
        self.interval
    }

    /// Whether a season falls inside the filter. Always `true` when inactive.
    pub fn matches(&self, year: i32) -> bool {
        self.interval.map_or(true, |i| i.contains(year))
    }
}

impl FromStr for RangeFilter {
    type Err = RangeFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(Some(s))
    }
}

impl fmt::Display for RangeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.interval {
            Some(i) => write!(f, "{}-{}", i.start_year, i.end_year),
            None => f.write_str(WILDCARD),
        }
    }
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const NOW: i32 = 2024;

    fn parse(token: &str) -> RangeFilter {
        RangeFilter::parse_relative_to(Some(token), NOW).unwrap()
    }

    #[test]
    fn absent_token_is_inactive() {
        let filter = RangeFilter::parse_relative_to(None, NOW).unwrap();
        assert!(!filter.is_active());
        assert!(filter.matches(1900));
        assert!(filter.matches(3000));
        assert_eq!(filter.to_string(), WILDCARD);
    }

    #[test]
    fn wildcard_is_inactive() {
        assert!(!parse(WILDCARD).is_active());
    }

    #[test]
    fn positive_year_selects_itself() {
        assert_eq!(parse("2017").interval(), Some(RangeInterval::single(2017)));
    }

    #[test]
    fn zero_selects_current_year() {
        assert_eq!(parse("0").interval(), Some(RangeInterval::single(NOW)));
    }

    #[test]
    fn minus_one_selects_current_year_only() {
        assert_eq!(parse("-1").interval(), Some(RangeInterval::single(NOW)));
    }

    #[test]
    fn minus_two_includes_last_year() {
        assert_eq!(
            parse("-2").interval(),
            Some(RangeInterval {
                start_year: NOW - 1,
                end_year: NOW,
            })
        );
    }

    #[test]
    fn span_is_normalized() {
        let expected = Some(RangeInterval {
            start_year: 2016,
            end_year: 2018,
        });
        assert_eq!(parse("2016-2018").interval(), expected);
        assert_eq!(parse("2018-2016").interval(), expected);
    }

    #[test]
    fn active_filter_renders_bounds() {
        assert_eq!(parse("2018-2016").to_string(), "2016-2018");
        assert_eq!(parse("0").to_string(), "2024-2024");
    }

    #[test]
    fn predicate_is_inclusive() {
        let filter = parse("2016-2018");
        assert!(filter.matches(2016));
        assert!(filter.matches(2018));
        assert!(!filter.matches(2015));
        assert!(!filter.matches(2019));
    }

    #[test]
    fn rejects_garbage() {
        for token in ["abc", "", "2016-", "-2016-2018", "2016 - 2018", "1.5"] {
            assert_matches!(
                RangeFilter::parse_relative_to(Some(token), NOW),
                Err(RangeFilterError::InvalidSyntax(t)) if t == token
            );
        }
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        assert!(RangeFilter::parse_relative_to(Some("99999999999"), NOW).is_err());
    }

    #[test]
    fn default_interval_is_current_year() {
        let interval = RangeInterval::default();
        assert_eq!(interval.start_year, interval.end_year);
    }
}
