use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use herdbook_core::ValueObject;

use crate::status::ReproductiveStatus;
use crate::timeline::shift_days;

/// Coarse reliability label of a prediction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Next expected heat of a female.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatPrediction {
    /// Always strictly after the reference day.
    pub next_heat_date: NaiveDate,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub confidence: Confidence,
    /// Number of heat records the estimate rests on.
    pub based_on_cycles: usize,
    pub average_cycle_length: u32,
    pub reproductive_status: ReproductiveStatus,
}

impl ValueObject for HeatPrediction {}

/// Expected birth of a pregnant female.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestationPrediction {
    pub expected_birth_date: NaiveDate,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    /// Negative once the expected date has passed.
    pub days_remaining: i64,
    /// Date of the mating (or confirming ultrasound) the estimate is anchored on.
    pub mating_date: NaiveDate,
    pub confidence: Confidence,
}

impl ValueObject for GestationPrediction {}

/// Symmetric surveillance window `[date - half_width, date + half_width]`.
pub(crate) fn window_around(date: NaiveDate, half_width: u32) -> Option<(NaiveDate, NaiveDate)> {
    let half_width = i64::from(half_width);
    Some((shift_days(date, -half_width)?, shift_days(date, half_width)?))
}
