//! Dated, ordered view over an animal's records as of a reference day.

use std::cmp::Reverse;

use chrono::{Duration, NaiveDate};

use crate::record::{RecordKind, ReproductionRecord, UltrasoundResult};

/// A record whose date parsed successfully.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DatedRecord<'a> {
    pub record: &'a ReproductionRecord,
    pub date: NaiveDate,
}

impl<'a> DatedRecord<'a> {
    pub fn kind(&self) -> RecordKind {
        self.record.kind
    }

    /// Whole days between this record and `now` (non-negative inside a timeline).
    pub fn days_before(&self, now: NaiveDate) -> i64 {
        now.signed_duration_since(self.date).num_days()
    }

    /// Sort key of the timeline: smaller is more recent. Same-day records
    /// follow the breeding sequence, then kind and ultrasound result, so the
    /// order is total over the fields the rules look at.
    fn recency(&self) -> (Reverse<NaiveDate>, Reverse<u8>, RecordKind, Option<UltrasoundResult>) {
        (
            Reverse(self.date),
            Reverse(self.kind().sequence_rank()),
            self.kind(),
            self.record.ultrasound_result,
        )
    }
}

/// Records of one animal, newest first, restricted to those dated on or before
/// the reference day.
///
/// Records with unparsable dates are dropped (with a warning) instead of
/// failing the whole computation. Records dated after the reference day have
/// not happened yet from the engine's point of view and are ignored.
#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    events: Vec<DatedRecord<'a>>,
}

impl<'a> Timeline<'a> {
    pub fn as_of(records: &'a [ReproductionRecord], now: NaiveDate) -> Self {
        let mut events: Vec<DatedRecord<'a>> = dated(records)
            .filter(|event| event.date <= now)
            .collect();
        events.sort_by_key(DatedRecord::recency);

        Self { events }
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &DatedRecord<'a>> + '_ {
        self.events.iter()
    }

    pub fn latest(&self) -> Option<DatedRecord<'a>> {
        self.events.first().copied()
    }

    pub fn latest_of(&self, kind: RecordKind) -> Option<DatedRecord<'a>> {
        self.latest_where(|event| event.kind() == kind)
    }

    pub fn latest_where(&self, pred: impl Fn(&DatedRecord<'a>) -> bool) -> Option<DatedRecord<'a>> {
        self.events.iter().find(|event| pred(*event)).copied()
    }

    /// True if some record ordered after `event` in the timeline matches:
    /// a later date, or the same date and a later breeding step.
    pub fn any_after(&self, event: &DatedRecord<'_>, pred: impl Fn(&DatedRecord<'a>) -> bool) -> bool {
        let key = event.recency();
        self.events
            .iter()
            .take_while(|later| later.recency() < key)
            .any(|later| pred(later))
    }

    /// Pregnancy evidence that a negative ultrasound (itself or a later one)
    /// has ruled out.
    pub fn ruled_out(&self, event: &DatedRecord<'_>) -> bool {
        event.record.is_negative_ultrasound()
            || self.any_after(event, |later| later.record.is_negative_ultrasound())
    }

    /// A birth or abortion after `event`.
    pub fn resolved_after(&self, event: &DatedRecord<'_>) -> bool {
        self.any_after(event, |later| later.kind().ends_pregnancy())
    }

    pub fn heat_dates_ascending(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .events
            .iter()
            .filter(|event| event.kind() == RecordKind::Heat)
            .map(|event| event.date)
            .collect();
        dates.reverse();
        dates
    }
}

/// Parse every record's date, skipping the ones that do not parse.
pub(crate) fn dated(
    records: &[ReproductionRecord],
) -> impl Iterator<Item = DatedRecord<'_>> + '_ {
    records.iter().filter_map(|record| match record.date.parse() {
        Some(date) => Some(DatedRecord { record, date }),
        None => {
            tracing::warn!(
                kind = ?record.kind,
                raw_date = %record.date,
                "skipping reproduction record with unparsable date"
            );
            None
        }
    })
}

/// `date + days`, or `None` past the end of the calendar.
pub(crate) fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}
