//! Herd-wide reminder lists.
//!
//! Pure filter-map-sort pipelines over the caller's animals; only active
//! females are considered.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::animal::Animal;
use crate::engine::ReproductionEngine;
use crate::prediction::{GestationPrediction, HeatPrediction};
use crate::status::ReproductiveStatus;
use crate::timeline::shift_days;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingHeat<'a> {
    pub animal: &'a Animal,
    pub prediction: HeatPrediction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingBirth<'a> {
    pub animal: &'a Animal,
    pub prediction: GestationPrediction,
}

impl ReproductionEngine {
    /// Heats whose surveillance window opens within `horizon_days` of `now`,
    /// soonest first.
    pub fn upcoming_heats<'a>(
        &self,
        animals: &'a [Animal],
        now: NaiveDate,
        horizon_days: u32,
    ) -> Vec<UpcomingHeat<'a>> {
        let horizon_end = horizon_end(now, horizon_days);

        let mut upcoming: Vec<UpcomingHeat<'a>> = animals
            .iter()
            .filter(|animal| animal.is_breeding_candidate())
            .filter_map(|animal| {
                let prediction = self.predict_next_heat(animal, now)?;
                (prediction.window_start <= horizon_end && prediction.next_heat_date >= now)
                    .then_some(UpcomingHeat { animal, prediction })
            })
            .collect();

        upcoming.sort_by_key(|entry| entry.prediction.next_heat_date);

        tracing::debug!(count = upcoming.len(), horizon_days, "upcoming heats computed");
        upcoming
    }

    /// Births whose surveillance window opens within `horizon_days` of `now`,
    /// soonest first.
    pub fn upcoming_births<'a>(
        &self,
        animals: &'a [Animal],
        now: NaiveDate,
        horizon_days: u32,
    ) -> Vec<UpcomingBirth<'a>> {
        let horizon_end = horizon_end(now, horizon_days);

        let mut upcoming: Vec<UpcomingBirth<'a>> = animals
            .iter()
            .filter(|animal| animal.is_breeding_candidate())
            .filter_map(|animal| {
                let prediction = self.predict_birth_date(animal, now)?;
                (prediction.window_start <= horizon_end && prediction.expected_birth_date >= now)
                    .then_some(UpcomingBirth { animal, prediction })
            })
            .collect();

        upcoming.sort_by_key(|entry| entry.prediction.expected_birth_date);

        tracing::debug!(count = upcoming.len(), horizon_days, "upcoming births computed");
        upcoming
    }

    /// Number of active females in each reproductive status. Every status is
    /// present in the map, with zero when no animal is in it.
    pub fn status_breakdown(
        &self,
        animals: &[Animal],
        now: NaiveDate,
    ) -> BTreeMap<ReproductiveStatus, usize> {
        let mut breakdown: BTreeMap<ReproductiveStatus, usize> =
            ReproductiveStatus::ALL.iter().map(|&status| (status, 0)).collect();

        for animal in animals.iter().filter(|animal| animal.is_breeding_candidate()) {
            *breakdown.entry(self.classify(animal, now)).or_insert(0) += 1;
        }
        breakdown
    }
}

fn horizon_end(now: NaiveDate, horizon_days: u32) -> NaiveDate {
    shift_days(now, i64::from(horizon_days)).unwrap_or(NaiveDate::MAX)
}
