//! Engine calibration.
//!
//! Every tuning constant of the engine lives in [`BreedingConfig`]. The
//! defaults are the sheep calibration; they are domain heuristics rather than
//! validated veterinary figures, so callers can override any of them per breed.

use serde::{Deserialize, Serialize};

use herdbook_core::{DomainError, DomainResult, ValueObject};

/// Species with a built-in calibration preset.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    #[default]
    Sheep,
    Goat,
    Cattle,
}

impl core::str::FromStr for Species {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sheep" => Ok(Species::Sheep),
            "goat" => Ok(Species::Goat),
            "cattle" => Ok(Species::Cattle),
            other => Err(DomainError::validation(format!("unknown species: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BreedingConfig {
    /// Cycle length used when the heat history is too thin to estimate one.
    pub default_cycle_length_days: u32,
    /// Plausible biological range for a single heat-to-heat interval.
    pub min_cycle_length_days: u32,
    pub max_cycle_length_days: u32,
    /// Intervals inside the plausible range needed before the estimate
    /// replaces the default.
    pub min_cycle_samples: usize,
    /// Half-width of the heat surveillance window.
    pub heat_window_days: u32,
    /// A heat this recent (inclusive) means the animal is in heat now.
    pub heat_recency_days: u32,
    /// Placeholder lead time when an animal has no heat history at all.
    pub no_history_estimate_days: u32,
    pub gestation_days: u32,
    /// Days past the gestation period after which an unresolved mating is
    /// treated as stale.
    pub overdue_tolerance_days: u32,
    /// Half-width of the birth surveillance window.
    pub birth_window_days: u32,
    /// Recovery time after a birth before heat is expected again.
    pub postpartum_delay_days: u32,
    /// Recovery time after an abortion.
    pub post_abortion_rest_days: u32,
    pub lactation_days: u32,
    /// Heat cycles stretch while the animal is nursing.
    pub lactation_cycle_factor: f64,
    /// Before this many days a mating-only pregnancy is low confidence.
    pub early_gestation_days: u32,
    /// Heat records needed for high / medium heat prediction confidence.
    pub high_confidence_heats: usize,
    pub medium_confidence_heats: usize,
}

impl Default for BreedingConfig {
    fn default() -> Self {
        Self {
            default_cycle_length_days: 17,
            min_cycle_length_days: 12,
            max_cycle_length_days: 25,
            min_cycle_samples: 1,
            heat_window_days: 2,
            heat_recency_days: 2,
            no_history_estimate_days: 7,
            gestation_days: 150,
            overdue_tolerance_days: 15,
            birth_window_days: 5,
            postpartum_delay_days: 45,
            post_abortion_rest_days: 30,
            lactation_days: 90,
            lactation_cycle_factor: 1.2,
            early_gestation_days: 45,
            high_confidence_heats: 5,
            medium_confidence_heats: 2,
        }
    }
}

impl ValueObject for BreedingConfig {}

impl BreedingConfig {
    pub fn for_species(species: Species) -> Self {
        match species {
            Species::Sheep => Self::default(),
            Species::Goat => Self {
                default_cycle_length_days: 21,
                min_cycle_length_days: 17,
                max_cycle_length_days: 25,
                ..Self::default()
            },
            Species::Cattle => Self {
                default_cycle_length_days: 21,
                min_cycle_length_days: 17,
                max_cycle_length_days: 25,
                gestation_days: 283,
                birth_window_days: 7,
                postpartum_delay_days: 60,
                lactation_days: 305,
                ..Self::default()
            },
        }
    }

    /// Parse a calibration from JSON. Missing fields fall back to the sheep
    /// defaults; the result is validated.
    pub fn from_json_str(json: &str) -> DomainResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("breeding config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Days after a mating during which it still counts as an ongoing
    /// pregnancy (exclusive).
    pub fn pregnancy_cutoff_days(&self) -> u32 {
        self.gestation_days.saturating_add(self.overdue_tolerance_days)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.min_cycle_length_days == 0 {
            return Err(DomainError::validation("minCycleLengthDays must be >= 1"));
        }
        if self.min_cycle_length_days > self.max_cycle_length_days {
            return Err(DomainError::validation(format!(
                "cycle range is inverted ({} > {})",
                self.min_cycle_length_days, self.max_cycle_length_days
            )));
        }
        if self.default_cycle_length_days == 0 {
            return Err(DomainError::validation("defaultCycleLengthDays must be >= 1"));
        }
        if self.min_cycle_samples == 0 {
            return Err(DomainError::validation("minCycleSamples must be >= 1"));
        }
        if self.gestation_days == 0 {
            return Err(DomainError::validation("gestationDays must be >= 1"));
        }
        if !(self.lactation_cycle_factor.is_finite() && self.lactation_cycle_factor > 0.0) {
            return Err(DomainError::validation(
                "lactationCycleFactor must be a finite positive number",
            ));
        }
        if self.medium_confidence_heats > self.high_confidence_heats {
            return Err(DomainError::validation(
                "mediumConfidenceHeats cannot exceed highConfidenceHeats",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_sheep_calibration() {
        let config = BreedingConfig::default();
        assert_eq!(config, BreedingConfig::for_species(Species::Sheep));
        assert_eq!(config.pregnancy_cutoff_days(), 165);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn presets_are_valid() {
        for species in [Species::Sheep, Species::Goat, Species::Cattle] {
            assert!(BreedingConfig::for_species(species).validate().is_ok());
        }
        assert_eq!(BreedingConfig::for_species(Species::Cattle).gestation_days, 283);
    }

    #[test]
    fn partial_json_overrides_defaults() {
        let config =
            BreedingConfig::from_json_str(r#"{ "gestationDays": 147, "heatWindowDays": 3 }"#)
                .unwrap();
        assert_eq!(config.gestation_days, 147);
        assert_eq!(config.heat_window_days, 3);
        assert_eq!(config.default_cycle_length_days, 17);
    }

    #[test]
    fn rejects_inconsistent_calibration() {
        let err = BreedingConfig::from_json_str(
            r#"{ "minCycleLengthDays": 30, "maxCycleLengthDays": 20 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let config = BreedingConfig {
            lactation_cycle_factor: f64::NAN,
            ..BreedingConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BreedingConfig {
            default_cycle_length_days: 0,
            ..BreedingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = BreedingConfig::from_json_str("{ gestationDays: }").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn parses_species_names() {
        assert_eq!("Goat".parse::<Species>().unwrap(), Species::Goat);
        assert!("llama".parse::<Species>().is_err());
    }
}
