// srs.rs
use chrono::{Days, NaiveDate};
use thiserror::Error;

pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
const EASY_BONUS: f64 = 1.3;
/// Longest interval the scheduler hands out, roughly a century.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Recall quality reported for a single review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Rating must be 0-3, got {0}")]
pub struct InvalidGrade(pub i64);

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];

    /// Wire encoding: 0=Again, 1=Hard, 2=Good, 3=Easy.
    pub fn ordinal(self) -> i32 {
        match self {
            Grade::Again => 0,
            Grade::Hard => 1,
            Grade::Good => 2,
            Grade::Easy => 3,
        }
    }

    /// SM-2 quality on the classic 0-5 scale.
    pub fn quality(self) -> f64 {
        match self {
            Grade::Again => 2.0,
            Grade::Hard => 3.0,
            Grade::Good => 4.0,
            Grade::Easy => 5.0,
        }
    }

    /// Whether this grade resets the repetition streak.
    pub fn is_lapse(self) -> bool {
        matches!(self, Grade::Again | Grade::Hard)
    }
}

impl TryFrom<i64> for Grade {
    type Error = InvalidGrade;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Grade::Again),
            1 => Ok(Grade::Hard),
            2 => Ok(Grade::Good),
            3 => Ok(Grade::Easy),
            other => Err(InvalidGrade(other)),
        }
    }
}

/// Scheduling fields of a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardReviewState {
    pub repetitions: u32,
    pub ease_factor: f64,
    pub interval_days: u32,
    pub next_review_date: NaiveDate,
}

impl CardReviewState {
    /// State of a card that has never been reviewed.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            repetitions: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            interval_days: 0,
            next_review_date: today,
        }
    }
}

/// Computes the state that follows a review graded `grade` on `today`.
///
/// Interval and ease factor are independent: a lapse resets the interval but
/// still lowers the ease factor, and both read the pre-review values.
/// The interval never exceeds [`MAX_INTERVAL_DAYS`].
pub fn compute_next_review(
    current: CardReviewState,
    grade: Grade,
    today: NaiveDate,
) -> CardReviewState {
    let (repetitions, mut interval_days) = if grade.is_lapse() {
        (0, 1)
    } else {
        let interval = match current.repetitions {
            0 => 1,
            1 => 6,
            _ => round_days(f64::from(current.interval_days) * current.ease_factor),
        };
        (current.repetitions.saturating_add(1), interval)
    };

    let penalty = 5.0 - grade.quality();
    let ease_factor = (current.ease_factor + (0.1 - penalty * (0.08 + penalty * 0.02)))
        .max(MIN_EASE_FACTOR);

    if grade == Grade::Easy {
        interval_days = round_days(f64::from(interval_days) * EASY_BONUS);
    }
    // A stored interval of 0 with repetitions >= 2 would otherwise schedule today.
    let interval_days = interval_days.clamp(1, MAX_INTERVAL_DAYS);

    CardReviewState {
        repetitions,
        ease_factor: round_ease(ease_factor),
        interval_days,
        next_review_date: today
            .checked_add_days(Days::new(u64::from(interval_days)))
            .unwrap_or(NaiveDate::MAX),
    }
}

fn round_days(days: f64) -> u32 {
    days.round() as u32
}

fn round_ease(ease_factor: f64) -> f64 {
    (ease_factor * 100.0).round() / 100.0
}
