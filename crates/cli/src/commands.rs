//! Command execution: load inputs, run the engine, shape JSON output.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};

use herdbook_core::AnimalId;
use herdbook_reproduction::{
    Animal, BreedingConfig, RecordKind, ReproductionEngine, ReproductiveStatus, Species,
};

use crate::cli::Commands;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusRow<'a> {
    id: AnimalId,
    tag: &'a str,
    reproductive_status: ReproductiveStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UndatedRow<'a> {
    tag: &'a str,
    #[serde(rename = "type")]
    kind: RecordKind,
    date: &'a str,
    error: String,
}

pub fn load_herd(path: &Path) -> Result<Vec<Animal>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading herd export {}", path.display()))?;
    parse_herd(&raw).with_context(|| format!("parsing herd export {}", path.display()))
}

pub fn parse_herd(raw: &str) -> Result<Vec<Animal>> {
    Ok(serde_json::from_str(raw)?)
}

/// Engine from a calibration file if given, else from the species preset.
pub fn load_engine(config: Option<&Path>, species: Species) -> Result<ReproductionEngine> {
    let Some(path) = config else {
        return Ok(ReproductionEngine::for_species(species));
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading calibration {}", path.display()))?;
    let config = BreedingConfig::from_json_str(&raw)
        .with_context(|| format!("invalid calibration {}", path.display()))?;
    Ok(ReproductionEngine::new(config)?)
}

pub fn run(
    command: &Commands,
    engine: &ReproductionEngine,
    animals: &[Animal],
    now: NaiveDate,
) -> Result<Value> {
    let output = match command {
        Commands::Status => {
            let rows: Vec<StatusRow<'_>> = animals
                .iter()
                .map(|animal| StatusRow {
                    id: animal.id,
                    tag: &animal.tag,
                    reproductive_status: engine.classify(animal, now),
                })
                .collect();
            serde_json::to_value(rows)?
        }
        Commands::UpcomingHeats { horizon } => {
            serde_json::to_value(engine.upcoming_heats(animals, now, *horizon))?
        }
        Commands::UpcomingBirths { horizon } => {
            serde_json::to_value(engine.upcoming_births(animals, now, *horizon))?
        }
        Commands::Summary => json!({
            "now": now,
            "statuses": engine.status_breakdown(animals, now),
        }),
        Commands::Check => serde_json::to_value(undated_records(animals))?,
    };
    Ok(output)
}

fn undated_records(animals: &[Animal]) -> Vec<UndatedRow<'_>> {
    animals
        .iter()
        .flat_map(|animal| {
            animal.records.iter().filter_map(move |record| {
                let err = record.date.parse_strict().err()?;
                Some(UndatedRow {
                    tag: &animal.tag,
                    kind: record.kind,
                    date: record.date.as_str(),
                    error: err.to_string(),
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERD: &str = r#"[
      {
        "id": "0190f2a4-6c1e-7b3a-9d2e-000000000001",
        "tag": "E-101",
        "gender": "female",
        "status": "active",
        "records": [ { "type": "mating", "date": "2024-01-01" } ]
      },
      {
        "id": "0190f2a4-6c1e-7b3a-9d2e-000000000002",
        "tag": "R-1",
        "gender": "male",
        "status": "active"
      }
    ]"#;

    fn now() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn status_lists_every_animal() {
        let animals = parse_herd(HERD).unwrap();
        let out = run(&Commands::Status, &ReproductionEngine::default(), &animals, now()).unwrap();
        assert_eq!(out[0]["tag"], "E-101");
        assert_eq!(out[0]["reproductiveStatus"], "pregnant");
        assert_eq!(out[1]["reproductiveStatus"], "available");
    }

    #[test]
    fn upcoming_births_respects_horizon() {
        let animals = parse_herd(HERD).unwrap();
        let engine = ReproductionEngine::default();

        let out = run(&Commands::UpcomingBirths { horizon: 30 }, &engine, &animals, now()).unwrap();
        assert_eq!(out.as_array().unwrap().len(), 0);

        let out = run(&Commands::UpcomingBirths { horizon: 90 }, &engine, &animals, now()).unwrap();
        assert_eq!(out[0]["prediction"]["expectedBirthDate"], "2024-05-30");
        assert_eq!(out[0]["prediction"]["daysRemaining"], 90);
    }

    #[test]
    fn summary_counts_statuses() {
        let animals = parse_herd(HERD).unwrap();
        let out = run(&Commands::Summary, &ReproductionEngine::default(), &animals, now()).unwrap();
        assert_eq!(out["now"], "2024-03-01");
        assert_eq!(out["statuses"]["pregnant"], 1);
        assert_eq!(out["statuses"]["available"], 0);
    }

    #[test]
    fn check_lists_undated_records() {
        let herd = r#"[
          {
            "id": "0190f2a4-6c1e-7b3a-9d2e-000000000003",
            "tag": "E-103",
            "gender": "female",
            "status": "active",
            "records": [
              { "type": "heat", "date": "2024-01-10" },
              { "type": "birth", "date": "31/02/2024" }
            ]
          }
        ]"#;
        let animals = parse_herd(herd).unwrap();
        let out = run(&Commands::Check, &ReproductionEngine::default(), &animals, now()).unwrap();
        let rows = out.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["tag"], "E-103");
        assert_eq!(rows[0]["type"], "birth");
        assert_eq!(rows[0]["date"], "31/02/2024");

        let clean = parse_herd(HERD).unwrap();
        let out = run(&Commands::Check, &ReproductionEngine::default(), &clean, now()).unwrap();
        assert_eq!(out.as_array().unwrap().len(), 0);
    }

    #[test]
    fn malformed_herd_is_an_error() {
        assert!(parse_herd("{ not json").is_err());
        assert!(parse_herd(r#"[{ "tag": "no id" }]"#).is_err());
    }

    #[test]
    fn missing_calibration_file_reports_path() {
        let err = load_engine(Some(Path::new("/nonexistent/calibration.json")), Species::Sheep)
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/calibration.json"));
    }

    #[test]
    fn species_preset_without_file() {
        let engine = load_engine(None, Species::Cattle).unwrap();
        assert_eq!(engine.config().gestation_days, 283);
    }
}
