use chrono::NaiveDate;

use crate::engine::ReproductionEngine;
use crate::record::{RecordKind, ReproductionRecord};
use crate::timeline::dated;

impl ReproductionEngine {
    /// Animal-specific heat-cycle length in days.
    ///
    /// Consecutive heat-to-heat intervals outside the plausible range are
    /// discarded (missed or double-recorded heats); the rest are averaged and
    /// rounded half-up. Too few usable intervals yield the configured default.
    /// Never returns less than 1.
    ///
    /// Reads the full history, with no reference day. The predictors only see
    /// records dated on or before their `now`, so a heat recorded after that
    /// day counts here but not in [`HeatPrediction::average_cycle_length`].
    ///
    /// [`HeatPrediction::average_cycle_length`]: crate::prediction::HeatPrediction::average_cycle_length
    pub fn average_cycle_length(&self, records: &[ReproductionRecord]) -> u32 {
        let mut heats: Vec<NaiveDate> = dated(records)
            .filter(|event| event.kind() == RecordKind::Heat)
            .map(|event| event.date)
            .collect();
        heats.sort_unstable();
        self.cycle_length_from(&heats)
    }

    /// Same as [`average_cycle_length`](Self::average_cycle_length) over heat
    /// dates already sorted ascending.
    pub(crate) fn cycle_length_from(&self, heats_ascending: &[NaiveDate]) -> u32 {
        let config = self.config();
        let plausible = i64::from(config.min_cycle_length_days)..=i64::from(config.max_cycle_length_days);

        let intervals: Vec<i64> = heats_ascending
            .windows(2)
            .map(|pair| pair[1].signed_duration_since(pair[0]).num_days())
            .filter(|delta| plausible.contains(delta))
            .collect();

        if intervals.is_empty() || intervals.len() < config.min_cycle_samples {
            return config.default_cycle_length_days.max(1);
        }

        let count = intervals.len() as i64;
        let sum: i64 = intervals.iter().sum();
        let rounded = (2 * sum + count) / (2 * count);

        u32::try_from(rounded).unwrap_or(config.default_cycle_length_days).max(1)
    }
}
