//! Per-kind token lifetime policy.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use atrium_core::DomainError;

/// The two kinds of token this backend issues.
///
/// Access tokens authorize requests; refresh tokens only mint new access
/// tokens. Every issued token carries exactly one kind in its `token_type`
/// claim, and the kind selects the expiry policy below.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }

    /// Expiry instant for a token issued at `issued_at`.
    ///
    /// Access tokens live a fixed 15 days. Refresh tokens live one *calendar*
    /// month: the day-of-month is preserved where possible and clamped to the
    /// last valid day otherwise (Jan 31 → Feb 28/29).
    ///
    /// Returns `None` only when the result would leave chrono's representable
    /// range.
    pub fn expires_at(&self, issued_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TokenKind::Access => issued_at.checked_add_signed(Duration::days(15)),
            TokenKind::Refresh => issued_at.checked_add_months(Months::new(1)),
        }
    }
}

impl core::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for TokenKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access" => Ok(TokenKind::Access),
            "refresh" => Ok(TokenKind::Refresh),
            other => Err(DomainError::validation(format!(
                "unknown token type '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 30, 0).unwrap()
    }

    #[test]
    fn access_expiry_is_fifteen_days_exactly() {
        let issued = at(2024, 3, 1);
        let expires = TokenKind::Access.expires_at(issued).unwrap();
        assert_eq!(expires, at(2024, 3, 16));
        assert_eq!((expires - issued).num_days(), 15);
    }

    #[test]
    fn refresh_expiry_is_one_calendar_month() {
        let issued = at(2024, 3, 14);
        let expires = TokenKind::Refresh.expires_at(issued).unwrap();
        assert_eq!(expires, at(2024, 4, 14));
    }

    #[test]
    fn refresh_expiry_clamps_to_month_end() {
        // Leap year: Jan 31 → Feb 29.
        let expires = TokenKind::Refresh.expires_at(at(2024, 1, 31)).unwrap();
        assert_eq!(expires, at(2024, 2, 29));

        // Non-leap year: Jan 31 → Feb 28.
        let expires = TokenKind::Refresh.expires_at(at(2023, 1, 31)).unwrap();
        assert_eq!(expires, at(2023, 2, 28));

        // May 31 → Jun 30.
        let expires = TokenKind::Refresh.expires_at(at(2024, 5, 31)).unwrap();
        assert_eq!(expires, at(2024, 6, 30));
    }

    #[test]
    fn refresh_expiry_rolls_over_the_year() {
        let expires = TokenKind::Refresh.expires_at(at(2023, 12, 15)).unwrap();
        assert_eq!(expires, at(2024, 1, 15));
    }

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [TokenKind::Access, TokenKind::Refresh] {
            assert_eq!(kind.as_str().parse::<TokenKind>().unwrap(), kind);
        }
        assert!("session".parse::<TokenKind>().is_err());
    }
}
