use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use herdbook_core::{AnimalId, DomainError, DomainResult};

/// Kind of breeding-related event.
///
/// Every engine rule matches on this exhaustively, so adding a variant forces
/// the classifier and predictors to be revisited.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Heat,
    Mating,
    Ultrasound,
    Birth,
    Abortion,
    Weaning,
    Lactation,
}

impl RecordKind {
    /// Position of the event within a single breeding day.
    ///
    /// Used to order same-date records: a mating follows the heat it was
    /// triggered by, a weaning follows the lactation it ends.
    pub(crate) fn sequence_rank(self) -> u8 {
        match self {
            RecordKind::Heat => 0,
            RecordKind::Mating => 1,
            RecordKind::Ultrasound => 2,
            RecordKind::Birth | RecordKind::Abortion => 3,
            RecordKind::Lactation => 4,
            RecordKind::Weaning => 5,
        }
    }

    pub fn is_pregnancy_evidence(self) -> bool {
        matches!(self, RecordKind::Mating | RecordKind::Ultrasound)
    }

    pub fn ends_pregnancy(self) -> bool {
        matches!(self, RecordKind::Birth | RecordKind::Abortion)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UltrasoundResult {
    Positive,
    Negative,
}

/// Calendar date of a record, as persisted by the record store.
///
/// The raw text is kept so a single corrupted entry does not make a whole
/// herd export unreadable; the engine parses it leniently and skips records
/// it cannot date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordDate(String);

impl RecordDate {
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lenient parse: `YYYY-MM-DD`, RFC 3339 timestamps and naive
    /// `YYYY-MM-DDTHH:MM:SS[.f]` are accepted. Anything else yields `None`.
    pub fn parse(&self) -> Option<NaiveDate> {
        let raw = self.0.trim();

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.date_naive());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|ts| ts.date())
    }

    /// Strict variant of [`RecordDate::parse`] for callers validating input.
    pub fn parse_strict(&self) -> DomainResult<NaiveDate> {
        self.parse()
            .ok_or_else(|| DomainError::invalid_date(self.0.clone()))
    }
}

impl From<NaiveDate> for RecordDate {
    fn from(value: NaiveDate) -> Self {
        Self(value.format("%Y-%m-%d").to_string())
    }
}

impl core::fmt::Display for RecordDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One breeding-related event in an animal's history.
///
/// Records are immutable facts owned by the record store; the engine reads
/// them and never edits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReproductionRecord {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub date: RecordDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mate_id: Option<AnimalId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultrasound_result: Option<UltrasoundResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ReproductionRecord {
    pub fn new(kind: RecordKind, date: NaiveDate) -> Self {
        Self {
            kind,
            date: date.into(),
            mate_id: None,
            ultrasound_result: None,
            outcome: None,
            notes: None,
        }
    }

    pub fn heat(date: NaiveDate) -> Self {
        Self::new(RecordKind::Heat, date)
    }

    pub fn mating(date: NaiveDate, mate_id: Option<AnimalId>) -> Self {
        Self {
            mate_id,
            ..Self::new(RecordKind::Mating, date)
        }
    }

    pub fn ultrasound(date: NaiveDate, result: Option<UltrasoundResult>) -> Self {
        Self {
            ultrasound_result: result,
            ..Self::new(RecordKind::Ultrasound, date)
        }
    }

    /// An ultrasound that ruled pregnancy out. An ultrasound with no recorded
    /// result counts as non-negative.
    pub fn is_negative_ultrasound(&self) -> bool {
        self.kind == RecordKind::Ultrasound
            && self.ultrasound_result == Some(UltrasoundResult::Negative)
    }

    pub fn is_confirming_ultrasound(&self) -> bool {
        self.kind == RecordKind::Ultrasound
            && self.ultrasound_result != Some(UltrasoundResult::Negative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_supported_date_shapes() {
        assert_eq!(RecordDate::from_raw("2024-03-01").parse(), Some(d(2024, 3, 1)));
        assert_eq!(
            RecordDate::from_raw("2024-03-01T23:15:00+02:00").parse(),
            Some(d(2024, 3, 1))
        );
        assert_eq!(
            RecordDate::from_raw("2024-03-01T08:00:00.000Z").parse(),
            Some(d(2024, 3, 1))
        );
        assert_eq!(
            RecordDate::from_raw("2024-03-01T08:00:00").parse(),
            Some(d(2024, 3, 1))
        );
        assert_eq!(RecordDate::from_raw(" 2024-03-01 ").parse(), Some(d(2024, 3, 1)));
    }

    #[test]
    fn malformed_dates_are_absent_not_faults() {
        assert_eq!(RecordDate::from_raw("").parse(), None);
        assert_eq!(RecordDate::from_raw("yesterday").parse(), None);
        assert_eq!(RecordDate::from_raw("2024-02-30").parse(), None);

        let err = RecordDate::from_raw("2024-13-01").parse_strict().unwrap_err();
        assert_eq!(err, DomainError::InvalidDate("2024-13-01".to_string()));
    }

    #[test]
    fn typed_dates_render_iso() {
        let date: RecordDate = d(2024, 1, 5).into();
        assert_eq!(date.as_str(), "2024-01-05");
    }

    #[test]
    fn deserializes_store_export() {
        let json = r#"{
            "type": "ultrasound",
            "date": "2024-02-10",
            "ultrasoundResult": "negative",
            "notes": "empty uterus"
        }"#;
        let record: ReproductionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, RecordKind::Ultrasound);
        assert!(record.is_negative_ultrasound());
        assert!(!record.is_confirming_ultrasound());
        assert_eq!(record.date.parse(), Some(d(2024, 2, 10)));
        assert_eq!(record.mate_id, None);
    }

    #[test]
    fn ultrasound_without_result_confirms() {
        let record = ReproductionRecord::ultrasound(d(2024, 2, 10), None);
        assert!(record.is_confirming_ultrasound());
        assert!(!ReproductionRecord::heat(d(2024, 2, 10)).is_confirming_ultrasound());
    }
}
