use crate::models::{ActivityBar, CalendarCell, DateBuckets, Deal, Intensity};
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

pub const GRID_CELLS: usize = 42;

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

const MONTH_NAMES: [&str; 12] = [
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

/// A calendar month with a zero-based month index (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Rolls out-of-range months into the neighbouring years, so month 12 of
    /// 2024 is January 2025 and month -1 is December 2023. The result stays
    /// within January 0001 ..= December 9999.
    pub fn new(year: i32, month: i64) -> Self {
        let first = i64::from(MIN_YEAR) * 12;
        let last = i64::from(MAX_YEAR) * 12 + 11;
        let total = (i64::from(year) * 12).saturating_add(month).clamp(first, last);
        Self {
            year: total.div_euclid(12) as i32,
            month: total.rem_euclid(12) as u32,
        }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), i64::from(date.month0()))
    }

    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn previous(self) -> Self {
        Self::new(self.year, i64::from(self.month) - 1)
    }

    pub fn next(self) -> Self {
        Self::new(self.year, i64::from(self.month) + 1)
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(self) -> u32 {
        let first_of_next = Self::new(self.year, i64::from(self.month) + 1).first_day();
        if first_of_next <= self.first_day() {
            // December of the last supported year
            return 31;
        }
        (first_of_next - self.first_day()).num_days() as u32
    }

    /// Date of `day` counted from the 1st; values outside the month spill
    /// into the adjacent months.
    pub fn date_of(self, day: i32) -> NaiveDate {
        self.first_day() + Duration::days(i64::from(day) - 1)
    }

    pub fn label(self) -> String {
        format!("{} {}", MONTH_NAMES[self.month as usize], self.year)
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn bucket_by_date(deals: &[Deal]) -> DateBuckets {
    let mut buckets = DateBuckets::default();
    for deal in deals {
        match deal.updated_on() {
            Some(date) => buckets
                .days
                .entry(date_key(date))
                .or_default()
                .push(deal.clone()),
            None => buckets.undated.push(deal.clone()),
        }
    }
    buckets
}

pub fn counts_for_month(buckets: &DateBuckets, month: YearMonth) -> BTreeMap<u32, usize> {
    (1..=month.days_in_month())
        .map(|day| {
            let key = date_key(month.date_of(day as i32));
            (day, buckets.count_on(&key))
        })
        .collect()
}

pub fn build_calendar_grid(buckets: &DateBuckets, month: YearMonth) -> Vec<CalendarCell> {
    build_calendar_grid_at(buckets, month, Local::now().date_naive())
}

pub fn build_calendar_grid_at(
    buckets: &DateBuckets,
    month: YearMonth,
    today: NaiveDate,
) -> Vec<CalendarCell> {
    let offset = month.first_day().weekday().num_days_from_sunday() as i32;
    let days_in_month = month.days_in_month() as i32;

    (0..GRID_CELLS as i32)
        .map(|index| {
            let day_of_month = index - offset + 1;
            let date = month.date_of(day_of_month);
            let key = date_key(date);
            let deals = buckets.get(&key).to_vec();
            let in_month = (1..=days_in_month).contains(&day_of_month);

            CalendarCell {
                day_of_month,
                is_valid_and_past: in_month && date <= today,
                intensity_bucket: Intensity::from_count(deals.len()),
                date_key: key,
                deals,
            }
        })
        .collect()
}

/// Largest daily count of the month, never below 1 so it can divide.
pub fn max_daily(counts: &BTreeMap<u32, usize>) -> usize {
    counts.values().copied().max().unwrap_or(0).max(1)
}

pub fn activity_bars(counts: &BTreeMap<u32, usize>) -> Vec<ActivityBar> {
    let max = max_daily(counts) as f64;
    counts
        .iter()
        .map(|(&day, &count)| {
            let height_percent = count as f64 / max * 100.0;
            let level = if height_percent >= 70.0 {
                Intensity::High
            } else if height_percent >= 40.0 {
                Intensity::Medium
            } else if height_percent > 0.0 {
                Intensity::Low
            } else {
                Intensity::None
            };
            ActivityBar {
                day,
                count,
                height_percent,
                level,
            }
        })
        .collect()
}
