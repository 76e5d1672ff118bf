//! Canonical day-of-year → calendar month partition.
//!
//! A single partition serves every domain: cumulative true calendar month
//! lengths over days 1..=365, with day 366 folding into December so a leap
//! year never falls through.

use crate::error::PipelineError;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Non-overlapping, gap-free day ranges covering the year, one per month.
#[derive(Debug, Clone)]
pub struct DayPartition {
    /// Inclusive `(first_day, last_day)` per month, in calendar order.
    ranges: [(u32, u32); 12],
}

impl DayPartition {
    /// The canonical partition: January 1–31, February 32–59, ...,
    /// December 335–366.
    pub fn calendar() -> Self {
        let mut ranges = [(0u32, 0u32); 12];
        let mut start = 1;
        for (i, len) in MONTH_LENGTHS.iter().enumerate() {
            ranges[i] = (start, start + len - 1);
            start += len;
        }
        ranges[11].1 += 1; // day 366
        DayPartition { ranges }
    }

    /// Builds a partition from explicit ranges, rejecting tables that
    /// overlap, leave gaps, or fail to cover the year.
    pub fn from_ranges(ranges: [(u32, u32); 12]) -> Result<Self, PipelineError> {
        if ranges[0].0 != 1 {
            return Err(PipelineError::InvalidPartition(format!(
                "first range starts at day {}, expected 1",
                ranges[0].0
            )));
        }
        for (i, (start, end)) in ranges.iter().enumerate() {
            if start > end {
                return Err(PipelineError::InvalidPartition(format!(
                    "{} range {start}..={end} is reversed",
                    MONTH_NAMES[i]
                )));
            }
            if i > 0 && *start != ranges[i - 1].1 + 1 {
                return Err(PipelineError::InvalidPartition(format!(
                    "{} starts at day {start}, expected day {}",
                    MONTH_NAMES[i],
                    ranges[i - 1].1 + 1
                )));
            }
        }
        if ranges[11].1 < 365 {
            return Err(PipelineError::InvalidPartition(format!(
                "last range ends at day {}, year not covered",
                ranges[11].1
            )));
        }
        Ok(DayPartition { ranges })
    }

    /// Resolves a day index to its month (0-based, January = 0).
    /// Returns `None` for indices outside every range.
    pub fn month_of(&self, day: u32) -> Option<usize> {
        self.ranges
            .iter()
            .position(|(start, end)| (*start..=*end).contains(&day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_day_of_year_resolves_to_exactly_one_month() {
        let partition = DayPartition::calendar();
        for day in 1..=366u32 {
            let hits = partition
                .ranges
                .iter()
                .filter(|(start, end)| (*start..=*end).contains(&day))
                .count();
            assert_eq!(hits, 1, "day {day} resolved to {hits} months");
        }
    }

    #[test]
    fn test_calendar_boundaries() {
        let partition = DayPartition::calendar();
        assert_eq!(partition.month_of(1), Some(0));
        assert_eq!(partition.month_of(31), Some(0));
        assert_eq!(partition.month_of(32), Some(1));
        assert_eq!(partition.month_of(59), Some(1));
        assert_eq!(partition.month_of(60), Some(2));
        assert_eq!(partition.month_of(335), Some(11));
        assert_eq!(partition.month_of(365), Some(11));
    }

    #[test]
    fn test_day_366_folds_into_december() {
        assert_eq!(DayPartition::calendar().month_of(366), Some(11));
    }

    #[test]
    fn test_out_of_range_days_resolve_to_none() {
        let partition = DayPartition::calendar();
        assert_eq!(partition.month_of(0), None);
        assert_eq!(partition.month_of(367), None);
    }

    #[test]
    fn test_gapped_table_is_rejected() {
        let mut ranges = DayPartition::calendar().ranges;
        ranges[5].0 += 1; // June no longer starts where May ended
        assert!(DayPartition::from_ranges(ranges).is_err());
    }

    #[test]
    fn test_overlapping_table_is_rejected() {
        let mut ranges = DayPartition::calendar().ranges;
        ranges[3].0 -= 1; // April overlaps March
        assert!(DayPartition::from_ranges(ranges).is_err());
    }

    #[test]
    fn test_table_not_covering_the_year_is_rejected() {
        let mut ranges = DayPartition::calendar().ranges;
        ranges[11].1 = 364;
        assert!(DayPartition::from_ranges(ranges).is_err());
    }

    #[test]
    fn test_canonical_table_passes_validation() {
        let ranges = DayPartition::calendar().ranges;
        assert!(DayPartition::from_ranges(ranges).is_ok());
    }
}
