//! Reproductive-cycle inference and prediction.
//!
//! Given an animal's breeding history this crate works out its current
//! reproductive status and forecasts the next heat or the expected birth,
//! each with a confidence tier and a surveillance window. Everything here is
//! deterministic domain logic (no IO, no clock, no storage): the reference
//! day is always passed in by the caller.

pub mod animal;
pub mod config;
pub mod cycle;
pub mod engine;
pub mod gestation;
pub mod heat;
pub mod herd;
pub mod prediction;
pub mod record;
pub mod status;
pub mod timeline;

pub use animal::{Animal, AnimalStatus, Gender};
pub use config::{BreedingConfig, Species};
pub use engine::ReproductionEngine;
pub use herd::{UpcomingBirth, UpcomingHeat};
pub use prediction::{Confidence, GestationPrediction, HeatPrediction};
pub use record::{RecordDate, RecordKind, ReproductionRecord, UltrasoundResult};
pub use status::{Classification, ReproductiveStatus};
pub use timeline::{DatedRecord, Timeline};
