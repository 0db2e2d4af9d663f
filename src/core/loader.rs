use crate::domain::model::DrugReference;
use crate::domain::ports::ReferenceSource;
use crate::utils::error::{DoseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DRUG_NAME: &str = "drug_name";
pub const SPECIES: &str = "species";
pub const DOSE_RATE: &str = "dose_rate_mg_per_kg";
pub const CONCENTRATION: &str = "concentration_mg_per_ml";

/// What to do when the same (drug_name, species) pair appears more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Earliest row in file order is used for lookups; later ones are kept but unreachable.
    #[default]
    FirstWins,
    Reject,
}

/// Immutable snapshot of the reference data.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    records: Vec<DrugReference>,
    // drug_name -> species -> position of first matching record
    index: HashMap<String, HashMap<String, usize>>,
}

impl ReferenceTable {
    pub fn new(records: Vec<DrugReference>) -> Self {
        let mut index: HashMap<String, HashMap<String, usize>> = HashMap::new();
        for (position, record) in records.iter().enumerate() {
            index
                .entry(record.drug_name.clone())
                .or_default()
                .entry(record.species.clone())
                .or_insert(position);
        }
        Self { records, index }
    }

    pub fn records(&self) -> &[DrugReference] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact, case-sensitive lookup. First record in file order wins.
    pub fn find(&self, drug_name: &str, species: &str) -> Option<&DrugReference> {
        self.index
            .get(drug_name)
            .and_then(|by_species| by_species.get(species))
            .map(|&position| &self.records[position])
    }
}

struct Columns {
    width: usize,
    drug_name: usize,
    species: usize,
    dose_rate: usize,
    concentration: usize,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == name)
                .ok_or_else(|| DoseError::ConfigError {
                    message: format!("reference table header is missing column '{}'", name),
                })
        };

        Ok(Self {
            width: headers.len(),
            drug_name: position(DRUG_NAME)?,
            species: position(SPECIES)?,
            dose_rate: position(DOSE_RATE)?,
            concentration: position(CONCENTRATION)?,
        })
    }
}

fn text_field(record: &csv::StringRecord, column: usize, name: &str, row: u64) -> Result<String> {
    let value = record.get(column).unwrap_or_default();
    if value.trim().is_empty() {
        return Err(DoseError::MalformedRow {
            row,
            field: name.to_string(),
            value: value.to_string(),
            reason: "value cannot be empty".to_string(),
        });
    }
    Ok(value.to_string())
}

fn positive_field(record: &csv::StringRecord, column: usize, name: &str, row: u64) -> Result<f64> {
    let raw = record.get(column).unwrap_or_default();
    let malformed = |reason: &str| DoseError::MalformedRow {
        row,
        field: name.to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let value: f64 = raw.trim().parse().map_err(|_| malformed("not a number"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(malformed("must be a positive finite number"));
    }
    Ok(value)
}

/// Parses comma-delimited reference data with a header row into records in file order.
///
/// Any malformed row fails the whole parse; no partial table is ever produced.
pub fn parse_table(data: &[u8], policy: DuplicatePolicy) -> Result<Vec<DrugReference>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let columns = Columns::from_headers(reader.headers()?)?;
    let mut records = Vec::new();
    let mut seen: HashMap<(String, String), u64> = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let row = record.position().map(|p| p.line()).unwrap_or_default();

        if record.len() != columns.width {
            return Err(DoseError::MalformedRow {
                row,
                field: "*".to_string(),
                value: record.iter().collect::<Vec<_>>().join(","),
                reason: format!("expected {} fields, found {}", columns.width, record.len()),
            });
        }

        let reference = DrugReference {
            drug_name: text_field(&record, columns.drug_name, DRUG_NAME, row)?,
            species: text_field(&record, columns.species, SPECIES, row)?,
            dose_rate_mg_per_kg: positive_field(&record, columns.dose_rate, DOSE_RATE, row)?,
            concentration_mg_per_ml: positive_field(
                &record,
                columns.concentration,
                CONCENTRATION,
                row,
            )?,
        };

        let key = (reference.drug_name.clone(), reference.species.clone());
        if let Some(first_row) = seen.get(&key) {
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(DoseError::DuplicateEntry {
                        row,
                        drug: reference.drug_name,
                        species: reference.species,
                    });
                }
                DuplicatePolicy::FirstWins => {
                    tracing::warn!(
                        "Row {} repeats drug \"{}\" for species \"{}\"; row {} takes precedence",
                        row,
                        reference.drug_name,
                        reference.species,
                        first_row
                    );
                }
            }
        } else {
            seen.insert(key, row);
        }

        records.push(reference);
    }

    Ok(records)
}

/// Reads and parses the whole reference table. Callers should treat an error as fatal.
pub async fn load(source: &dyn ReferenceSource, policy: DuplicatePolicy) -> Result<ReferenceTable> {
    let source_name = source.describe();
    tracing::debug!("Reading reference table from {}", source_name);

    let data = source.read_table().await.map_err(|e| match e {
        DoseError::IoError(_) | DoseError::HttpError(_) => DoseError::load(&source_name, e.to_string()),
        other => other,
    })?;

    let records = parse_table(&data, policy).map_err(|e| match e {
        DoseError::CsvError(_) | DoseError::ConfigError { .. } => {
            DoseError::load(&source_name, e.to_string())
        }
        other => other,
    })?;

    if records.is_empty() {
        tracing::warn!("Reference table at {} has no data rows", source_name);
    }
    tracing::info!("Loaded {} drug records", records.len());

    Ok(ReferenceTable::new(records))
}
