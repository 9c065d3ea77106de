//! Date-range normalization / 日期范围归一化
//!
//! Compiles a created-date filter into epoch-millisecond bound strings.
//! A point timestamp expands to its whole UTC calendar day, lower bound
//! inclusive and upper bound exclusive; an explicit range passes through
//! with both bounds inclusive.
//! 单个时间戳会扩展为整个 UTC 日历日（下界闭、上界开），显式范围原样透传。

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::query::{CreatedDateFilter, RangeOptions};

/// Normalized date constraint: decimal epoch-millisecond bound strings / 归一化后的日期约束
///
/// At most one of `lte` / `lt` is set. The string encoding matches the
/// storage convention: documents persist `createdDate` as a decimal
/// epoch-millisecond string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Inclusive lower bound / 闭下界
    pub gte: Option<String>,
    /// Inclusive upper bound (range input) / 闭上界
    pub lte: Option<String>,
    /// Exclusive upper bound (whole-day expansion) / 开上界
    pub lt: Option<String>,
}

/// Normalize a created-date filter / 归一化创建日期过滤条件
pub fn created_date_range(filter: &CreatedDateFilter) -> DateRange {
    match *filter {
        CreatedDateFilter::Range(RangeOptions { min, max }) => DateRange {
            gte: min.map(|ms| ms.to_string()),
            lte: max.map(|ms| ms.to_string()),
            lt: None,
        },
        CreatedDateFilter::Day(ms) => whole_day_range(ms),
    }
}

/// Expand a timestamp to its UTC calendar day, `[midnight, next midnight)`
/// 将时间戳扩展为所在 UTC 日历日的半开区间
fn whole_day_range(ms: i64) -> DateRange {
    let Some(moment) = DateTime::<Utc>::from_timestamp_millis(ms) else {
        // Outside chrono's representable range; degrade to an exact bound
        // 超出 chrono 可表示范围，退化为精确匹配
        return DateRange {
            gte: Some(ms.to_string()),
            lte: Some(ms.to_string()),
            lt: None,
        };
    };

    let day = moment.date_naive();
    DateRange {
        gte: Some(day_start_millis(day).to_string()),
        lte: None,
        // succ_opt only fails at NaiveDate::MAX, far beyond any valid i64 millis
        lt: day.succ_opt().map(|next| day_start_millis(next).to_string()),
    }
}

/// UTC midnight of a calendar day, in epoch milliseconds / 日历日零点的毫秒时间戳
fn day_start_millis(day: NaiveDate) -> i64 {
    day.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    fn day(ms: i64) -> DateRange {
        created_date_range(&CreatedDateFilter::Day(ms))
    }

    #[test]
    fn test_range_passes_bounds_through_inclusive() {
        let range = created_date_range(&CreatedDateFilter::Range(RangeOptions {
            min: Some(1000),
            max: Some(2000),
        }));
        assert_eq!(
            range,
            DateRange {
                gte: Some("1000".to_string()),
                lte: Some("2000".to_string()),
                lt: None,
            }
        );
    }

    #[test]
    fn test_range_keeps_absent_bounds_absent() {
        let min_only = created_date_range(&CreatedDateFilter::Range(RangeOptions {
            min: Some(1000),
            max: None,
        }));
        assert_eq!(min_only.gte.as_deref(), Some("1000"));
        assert_eq!(min_only.lte, None);
        assert_eq!(min_only.lt, None);

        let max_only = created_date_range(&CreatedDateFilter::Range(RangeOptions {
            min: None,
            max: Some(2000),
        }));
        assert_eq!(max_only.gte, None);
        assert_eq!(max_only.lte.as_deref(), Some("2000"));
        assert_eq!(max_only.lt, None);
    }

    #[test]
    fn test_day_expands_to_half_open_interval() {
        // 2023-01-31T23:00:00Z -> [2023-01-31T00:00:00Z, 2023-02-01T00:00:00Z)
        // 月末翻转到下月一日
        let range = day(1_675_206_000_000);
        assert_eq!(range.gte.as_deref(), Some("1675123200000"));
        assert_eq!(range.lt.as_deref(), Some("1675209600000"));
        assert_eq!(range.lte, None);
    }

    #[test]
    fn test_same_day_timestamps_normalize_identically() {
        let midnight = 1_675_123_200_000; // 2023-01-31T00:00:00Z
        let morning = midnight + 9 * 60 * 60 * 1000;
        let last_milli = midnight + DAY_MS - 1;
        assert_eq!(day(midnight), day(morning));
        assert_eq!(day(midnight), day(last_milli));
        assert_ne!(day(midnight), day(midnight + DAY_MS));
    }

    #[test]
    fn test_year_rollover() {
        // 2023-12-31T18:30:00Z -> lt = 2024-01-01T00:00:00Z
        let range = day(1_703_980_800_000 + 18 * 60 * 60 * 1000 + 30 * 60 * 1000);
        assert_eq!(range.gte.as_deref(), Some("1703980800000"));
        assert_eq!(range.lt.as_deref(), Some("1704067200000"));
    }

    #[test]
    fn test_leap_day_rollover() {
        // 2024-02-29T12:00:00Z -> lt = 2024-03-01T00:00:00Z
        let range = day(1_709_208_000_000);
        assert_eq!(range.gte.as_deref(), Some("1709164800000"));
        assert_eq!(range.lt.as_deref(), Some("1709251200000"));
    }

    #[test]
    fn test_pre_epoch_timestamp_uses_its_own_day() {
        // 1969-12-31T12:00:00Z -> [-86400000, 0)
        let range = day(-DAY_MS / 2);
        assert_eq!(range.gte.as_deref(), Some("-86400000"));
        assert_eq!(range.lt.as_deref(), Some("0"));
    }
}
