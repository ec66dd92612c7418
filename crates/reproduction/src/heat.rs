use chrono::NaiveDate;

use crate::animal::Animal;
use crate::engine::ReproductionEngine;
use crate::prediction::{window_around, Confidence, HeatPrediction};
use crate::record::RecordKind;
use crate::status::{Classification, ReproductiveStatus};
use crate::timeline::{shift_days, Timeline};

impl ReproductionEngine {
    /// Next expected heat of a female, strictly after `now`.
    ///
    /// Returns `None` for males, and for a pregnancy with no usable anchor.
    pub fn predict_next_heat(&self, animal: &Animal, now: NaiveDate) -> Option<HeatPrediction> {
        if !animal.is_female() {
            return None;
        }

        let timeline = Timeline::as_of(&animal.records, now);
        let classification = self.classify_timeline(&timeline, now);
        let heats = timeline.heat_dates_ascending();
        let cycle_length = self.cycle_length_from(&heats);

        let (anchor, step) = self.heat_anchor(&timeline, &classification, &heats, cycle_length, now)?;
        let next_heat_date = first_after(anchor, now, step)?;
        let (window_start, window_end) = window_around(next_heat_date, self.config().heat_window_days)?;

        let prediction = HeatPrediction {
            next_heat_date,
            window_start,
            window_end,
            confidence: self.heat_confidence(heats.len()),
            based_on_cycles: heats.len(),
            average_cycle_length: cycle_length,
            reproductive_status: classification.status,
        };

        tracing::debug!(
            animal = %animal.id,
            status = ?prediction.reproductive_status,
            next_heat = %prediction.next_heat_date,
            cycle_length,
            "heat predicted"
        );

        Some(prediction)
    }

    /// Starting point for the projection and the cycle step to advance it by.
    fn heat_anchor(
        &self,
        timeline: &Timeline<'_>,
        classification: &Classification<'_>,
        heats: &[NaiveDate],
        cycle_length: u32,
        now: NaiveDate,
    ) -> Option<(NaiveDate, u32)> {
        let config = self.config();
        let cycle = i64::from(cycle_length);
        let postpartum = i64::from(config.postpartum_delay_days);

        match classification.status {
            ReproductiveStatus::Pregnant => {
                // Heat returns after the birth plus the post-partum recovery.
                let conceived = classification.decided_by?.date;
                let anchor = shift_days(
                    conceived,
                    i64::from(config.gestation_days) + postpartum,
                )?;
                Some((anchor, cycle_length))
            }
            ReproductiveStatus::Lactating => {
                let step = stretched_cycle(cycle_length, config.lactation_cycle_factor);
                let anchor = match timeline.latest_of(RecordKind::Birth) {
                    Some(birth) => shift_days(birth.date, postpartum)?,
                    None => now,
                };
                Some((anchor, step))
            }
            ReproductiveStatus::Resting => {
                let anchor = match timeline.latest() {
                    Some(event) => {
                        let rest = match event.kind() {
                            RecordKind::Birth => config.postpartum_delay_days,
                            _ => config.post_abortion_rest_days,
                        };
                        shift_days(event.date, i64::from(rest))?
                    }
                    None => now,
                };
                Some((anchor, cycle_length))
            }
            ReproductiveStatus::InHeat => {
                let anchor = match heats.last() {
                    Some(&last) => shift_days(last, cycle)?,
                    None => shift_days(now, cycle)?,
                };
                Some((anchor, cycle_length))
            }
            ReproductiveStatus::Available => {
                let anchor = match heats.last() {
                    Some(&last) => {
                        let elapsed = now.signed_duration_since(last).num_days().max(0);
                        let cycles = elapsed / cycle + 1;
                        shift_days(last, cycles.checked_mul(cycle)?)?
                    }
                    None => shift_days(now, i64::from(config.no_history_estimate_days))?,
                };
                Some((anchor, cycle_length))
            }
        }
    }

    fn heat_confidence(&self, heat_count: usize) -> Confidence {
        let config = self.config();
        if heat_count >= config.high_confidence_heats {
            Confidence::High
        } else if heat_count >= config.medium_confidence_heats {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// Cycle length while nursing, never below one day.
fn stretched_cycle(cycle_length: u32, factor: f64) -> u32 {
    let stretched = (f64::from(cycle_length) * factor).round();
    if stretched.is_finite() && stretched >= 1.0 {
        stretched.min(f64::from(u32::MAX)) as u32
    } else {
        1
    }
}

/// Advance `anchor` by whole `step`s until it is strictly after `now`.
///
/// Computed in one jump rather than a loop; `step` is clamped to one day.
fn first_after(anchor: NaiveDate, now: NaiveDate, step: u32) -> Option<NaiveDate> {
    if anchor > now {
        return Some(anchor);
    }
    let step = i64::from(step.max(1));
    let behind = now.signed_duration_since(anchor).num_days();
    let cycles = behind / step + 1;
    shift_days(anchor, cycles.checked_mul(step)?)
}
