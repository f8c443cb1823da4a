use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// seconds in one service day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Enumerates alternative ways to report a trip whose end time
/// is earlier in the day than its start time, which happens when
/// a trip runs across midnight.
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MidnightRolloverPolicy {
    /// wrap negative differences into the same day, `(end - start) mod 86400`
    #[default]
    Wrap,
    /// report the raw signed difference, which may be negative
    Signed,
}

impl MidnightRolloverPolicy {
    /// applies this policy to the signed difference `end - start` in seconds.
    pub fn apply(&self, elapsed_seconds: i64) -> i64 {
        match self {
            MidnightRolloverPolicy::Wrap => elapsed_seconds.rem_euclid(SECONDS_PER_DAY),
            MidnightRolloverPolicy::Signed => elapsed_seconds,
        }
    }
}

impl Display for MidnightRolloverPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MidnightRolloverPolicy::Wrap => write!(f, "wrap"),
            MidnightRolloverPolicy::Signed => write!(f, "signed"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::MidnightRolloverPolicy;

    #[test]
    fn test_wrap_leaves_same_day_difference_unchanged() {
        assert_eq!(MidnightRolloverPolicy::Wrap.apply(300), 300);
        assert_eq!(MidnightRolloverPolicy::Wrap.apply(0), 0);
    }

    #[test]
    fn test_wrap_negative_difference() {
        // 23:50:00 -> 00:10:00
        assert_eq!(MidnightRolloverPolicy::Wrap.apply(-85_200), 1_200);
        assert_eq!(MidnightRolloverPolicy::Wrap.apply(-60), 86_340);
    }

    #[test]
    fn test_signed_keeps_negative_difference() {
        assert_eq!(MidnightRolloverPolicy::Signed.apply(-85_200), -85_200);
    }

    #[test]
    fn test_display_matches_serde_name() {
        let policy = MidnightRolloverPolicy::Signed;
        let json = serde_json::to_string(&policy).expect("should serialize");
        assert_eq!(json, format!("\"{policy}\""));
    }
}
