use herdbook_core::DomainResult;

use crate::config::{BreedingConfig, Species};

/// Reproductive-cycle inference and prediction engine.
///
/// Holds only an immutable calibration. Every operation takes the reference
/// day (`now`) explicitly and reads it once, so results are deterministic and
/// the engine can be shared freely across threads.
///
/// The operations are spread over the component modules:
/// - [`classify`](ReproductionEngine::classify) in `status`
/// - [`average_cycle_length`](ReproductionEngine::average_cycle_length) in `cycle`
/// - [`predict_next_heat`](ReproductionEngine::predict_next_heat) in `heat`
/// - [`predict_birth_date`](ReproductionEngine::predict_birth_date) in `gestation`
/// - [`upcoming_heats`](ReproductionEngine::upcoming_heats) and friends in `herd`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReproductionEngine {
    config: BreedingConfig,
}

impl ReproductionEngine {
    pub fn new(config: BreedingConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn for_species(species: Species) -> Self {
        Self {
            config: BreedingConfig::for_species(species),
        }
    }

    pub fn config(&self) -> &BreedingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herdbook_core::DomainError;

    #[test]
    fn new_validates_calibration() {
        let config = BreedingConfig {
            gestation_days: 0,
            ..BreedingConfig::default()
        };
        let err = ReproductionEngine::new(config).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn species_engine_uses_preset() {
        let engine = ReproductionEngine::for_species(Species::Cattle);
        assert_eq!(engine.config().gestation_days, 283);
        assert_eq!(ReproductionEngine::default().config().gestation_days, 150);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReproductionEngine>();
    }
}
