use serde::{Deserialize, Serialize};

use herdbook_core::{AnimalId, Entity};

use crate::record::ReproductionRecord;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Herd membership of an animal. Only `Active` animals appear in herd-wide
/// reminder lists.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimalStatus {
    Active,
    Sold,
    Deceased,
}

/// The slice of an animal the reproduction engine needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: AnimalId,
    /// Ear tag or name shown to caretakers.
    pub tag: String,
    pub gender: Gender,
    pub status: AnimalStatus,
    /// Unordered breeding history.
    #[serde(default)]
    pub records: Vec<ReproductionRecord>,
}

impl Animal {
    pub fn new(id: AnimalId, tag: impl Into<String>, gender: Gender) -> Self {
        Self {
            id,
            tag: tag.into(),
            gender,
            status: AnimalStatus::Active,
            records: Vec::new(),
        }
    }

    pub fn female(tag: impl Into<String>) -> Self {
        Self::new(AnimalId::new(), tag, Gender::Female)
    }

    pub fn male(tag: impl Into<String>) -> Self {
        Self::new(AnimalId::new(), tag, Gender::Male)
    }

    pub fn with_status(mut self, status: AnimalStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_record(mut self, record: ReproductionRecord) -> Self {
        self.records.push(record);
        self
    }

    pub fn with_records(mut self, records: impl IntoIterator<Item = ReproductionRecord>) -> Self {
        self.records.extend(records);
        self
    }

    pub fn is_female(&self) -> bool {
        self.gender == Gender::Female
    }

    pub fn is_active(&self) -> bool {
        self.status == AnimalStatus::Active
    }

    /// Active female: the population herd reminders are computed for.
    pub fn is_breeding_candidate(&self) -> bool {
        self.is_female() && self.is_active()
    }
}

impl Entity for Animal {
    type Id = AnimalId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
