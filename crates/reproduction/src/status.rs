//! Reproductive status inference.
//!
//! Status is never stored. It is recomputed from the record history every time
//! it is read, so a newly added record changes the answer immediately.
//!
//! Model: walk the history newest first and return the first record that is
//! conclusive on its own. A record that later events override (a mating
//! followed by a negative ultrasound, a birth long past) does not stop the
//! scan; older records are still examined.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::animal::Animal;
use crate::engine::ReproductionEngine;
use crate::record::{RecordKind, ReproductionRecord};
use crate::timeline::{DatedRecord, Timeline};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReproductiveStatus {
    Available,
    InHeat,
    Pregnant,
    Lactating,
    Resting,
}

impl ReproductiveStatus {
    pub const ALL: [ReproductiveStatus; 5] = [
        ReproductiveStatus::Available,
        ReproductiveStatus::InHeat,
        ReproductiveStatus::Pregnant,
        ReproductiveStatus::Lactating,
        ReproductiveStatus::Resting,
    ];
}

/// Status plus the record that decided it (`None` for the default).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    pub status: ReproductiveStatus,
    pub decided_by: Option<DatedRecord<'a>>,
}

impl Classification<'_> {
    fn available() -> Self {
        Self {
            status: ReproductiveStatus::Available,
            decided_by: None,
        }
    }
}

impl ReproductionEngine {
    /// Current reproductive status of an animal as of `now`.
    ///
    /// Males and animals without usable records are `Available`.
    pub fn classify(&self, animal: &Animal, now: NaiveDate) -> ReproductiveStatus {
        if !animal.is_female() {
            return ReproductiveStatus::Available;
        }
        self.classify_records(&animal.records, now)
    }

    /// Status of a female with the given history as of `now`.
    pub fn classify_records(&self, records: &[ReproductionRecord], now: NaiveDate) -> ReproductiveStatus {
        let timeline = Timeline::as_of(records, now);
        self.classify_timeline(&timeline, now).status
    }

    pub(crate) fn classify_timeline<'a>(
        &self,
        timeline: &Timeline<'a>,
        now: NaiveDate,
    ) -> Classification<'a> {
        for event in timeline.newest_first() {
            if let Some(status) = self.conclude(timeline, event, now) {
                tracing::debug!(
                    ?status,
                    kind = ?event.kind(),
                    date = %event.date,
                    "reproductive status decided"
                );
                return Classification {
                    status,
                    decided_by: Some(*event),
                };
            }
        }
        Classification::available()
    }

    /// The status a single record establishes, or `None` to keep scanning.
    fn conclude(
        &self,
        timeline: &Timeline<'_>,
        event: &DatedRecord<'_>,
        now: NaiveDate,
    ) -> Option<ReproductiveStatus> {
        let config = self.config();
        let age = event.days_before(now);

        match event.kind() {
            RecordKind::Heat => {
                (age <= i64::from(config.heat_recency_days)).then_some(ReproductiveStatus::InHeat)
            }
            RecordKind::Mating | RecordKind::Ultrasound => {
                if timeline.ruled_out(event) {
                    return None;
                }
                self.pregnancy_ongoing(timeline, event, age)
                    .then_some(ReproductiveStatus::Pregnant)
            }
            RecordKind::Birth => {
                let nursing = age < i64::from(config.lactation_days)
                    && !timeline.any_after(event, |later| later.kind() == RecordKind::Weaning);
                if nursing {
                    Some(ReproductiveStatus::Lactating)
                } else if age < i64::from(config.postpartum_delay_days) {
                    Some(ReproductiveStatus::Resting)
                } else {
                    None
                }
            }
            RecordKind::Abortion => (age < i64::from(config.post_abortion_rest_days))
                .then_some(ReproductiveStatus::Resting),
            RecordKind::Lactation => {
                (age < i64::from(config.lactation_days)).then_some(ReproductiveStatus::Lactating)
            }
            RecordKind::Weaning => None,
        }
    }

    fn pregnancy_ongoing(&self, timeline: &Timeline<'_>, event: &DatedRecord<'_>, age: i64) -> bool {
        age < i64::from(self.config().pregnancy_cutoff_days()) && !timeline.resolved_after(event)
    }
}
