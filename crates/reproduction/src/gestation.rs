use chrono::NaiveDate;

use crate::animal::Animal;
use crate::engine::ReproductionEngine;
use crate::prediction::{window_around, Confidence, GestationPrediction};
use crate::timeline::{shift_days, Timeline};

impl ReproductionEngine {
    /// Expected birth date of a pregnant female.
    ///
    /// Anchored on the most recent mating or ultrasound. This does not go
    /// through the status classifier, but applies the same cutoffs so the two
    /// agree on when a pregnancy is live. `None` when:
    /// - there is no mating/ultrasound at all
    /// - a negative ultrasound rules the anchor out
    /// - a birth or abortion already resolved it
    /// - the anchor is older than the pregnancy cutoff (stale)
    pub fn predict_birth_date(&self, animal: &Animal, now: NaiveDate) -> Option<GestationPrediction> {
        if !animal.is_female() {
            return None;
        }

        let config = self.config();
        let timeline = Timeline::as_of(&animal.records, now);
        let anchor = timeline.latest_where(|event| event.kind().is_pregnancy_evidence())?;

        if timeline.ruled_out(&anchor) || timeline.resolved_after(&anchor) {
            return None;
        }

        let age = anchor.days_before(now);
        if age >= i64::from(config.pregnancy_cutoff_days()) {
            tracing::debug!(
                animal = %animal.id,
                anchor = %anchor.date,
                age,
                "unresolved mating is stale; no birth predicted"
            );
            return None;
        }

        let expected_birth_date = shift_days(anchor.date, i64::from(config.gestation_days))?;
        let (window_start, window_end) = window_around(expected_birth_date, config.birth_window_days)?;

        // The anchor is the latest evidence, so only the anchor itself can confirm.
        let confidence = if anchor.record.is_confirming_ultrasound() {
            Confidence::High
        } else if age < i64::from(config.early_gestation_days) {
            Confidence::Low
        } else {
            Confidence::Medium
        };

        let prediction = GestationPrediction {
            expected_birth_date,
            window_start,
            window_end,
            days_remaining: expected_birth_date.signed_duration_since(now).num_days(),
            mating_date: anchor.date,
            confidence,
        };

        tracing::debug!(
            animal = %animal.id,
            expected_birth = %prediction.expected_birth_date,
            days_remaining = prediction.days_remaining,
            confidence = ?prediction.confidence,
            "birth predicted"
        );

        Some(prediction)
    }
}
