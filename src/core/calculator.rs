use crate::core::loader::ReferenceTable;
use crate::domain::model::{Catalog, DoseRequest, DoseResult};
use crate::utils::error::{DoseError, Result};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Rounds half away from zero to two decimal places.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Read-only dose calculations over a loaded [`ReferenceTable`].
///
/// Cloning is cheap and every clone shares the same table.
#[derive(Debug, Clone)]
pub struct DoseCalculator {
    table: Arc<ReferenceTable>,
}

impl DoseCalculator {
    pub fn new(table: Arc<ReferenceTable>) -> Self {
        Self { table }
    }

    /// Distinct drug names and species, each sorted ascending.
    pub fn list_catalog(&self) -> Catalog {
        let mut drugs = BTreeSet::new();
        let mut species = BTreeSet::new();
        for record in self.table.records() {
            drugs.insert(record.drug_name.as_str());
            species.insert(record.species.as_str());
        }

        Catalog {
            drugs: drugs.into_iter().map(str::to_string).collect(),
            species: species.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn compute_dose(&self, request: &DoseRequest) -> Result<DoseResult> {
        let weight_kg = request.weight_kg();
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(DoseError::InvalidWeight { value: weight_kg });
        }

        let reference = self
            .table
            .find(&request.drug, &request.species)
            .ok_or_else(|| DoseError::DrugNotFound {
                drug: request.drug.clone(),
                species: request.species.clone(),
            })?;

        let total_dose_mg = reference.dose_rate_mg_per_kg * weight_kg;
        let volume_ml = total_dose_mg / reference.concentration_mg_per_ml;

        tracing::debug!(
            "{} for {} at {} kg: {} mg, {} ml",
            reference.drug_name,
            reference.species,
            weight_kg,
            total_dose_mg,
            volume_ml
        );

        let total_dose_mg = round_to_hundredths(total_dose_mg);
        let volume_to_administer_ml = round_to_hundredths(volume_ml);
        if !total_dose_mg.is_finite() || !volume_to_administer_ml.is_finite() {
            return Err(DoseError::InternalError {
                message: format!(
                    "dose for {} kg of {} ({}) is out of range",
                    weight_kg, reference.drug_name, reference.species
                ),
            });
        }

        Ok(DoseResult {
            drug_info: reference.clone(),
            animal_weight_kg: weight_kg,
            total_dose_mg,
            volume_to_administer_ml,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::DrugReference;

    fn reference(drug: &str, species: &str, rate: f64, concentration: f64) -> DrugReference {
        DrugReference {
            drug_name: drug.to_string(),
            species: species.to_string(),
            dose_rate_mg_per_kg: rate,
            concentration_mg_per_ml: concentration,
        }
    }

    fn calculator() -> DoseCalculator {
        let table = ReferenceTable::new(vec![
            reference("Amoxicillin", "Dog", 10.0, 50.0),
            reference("Meloxicam", "Cat", 0.05, 0.5),
            reference("Carprofen", "Dog", 3.333, 50.0),
            reference("Amoxicillin", "Rabbit", 15.0, 50.0),
            reference("Carprofen", "Dog", 4.4, 50.0),
        ]);
        DoseCalculator::new(Arc::new(table))
    }

    #[test]
    fn test_amoxicillin_for_dog() {
        let result = calculator()
            .compute_dose(&DoseRequest::new("Dog", "Amoxicillin", 20.0))
            .unwrap();

        assert_eq!(result.total_dose_mg, 200.0);
        assert_eq!(result.volume_to_administer_ml, 4.0);
        assert_eq!(result.animal_weight_kg, 20.0);
        assert_eq!(result.drug_info, reference("Amoxicillin", "Dog", 10.0, 50.0));
    }

    #[test]
    fn test_rounds_to_two_places() {
        let result = calculator()
            .compute_dose(&DoseRequest::new("Dog", "Carprofen", 7.0))
            .unwrap();

        // 3.333 * 7 = 23.331, first Carprofen/Dog row wins
        assert_eq!(result.total_dose_mg, 23.33);
        assert_eq!(result.volume_to_administer_ml, 0.47);
    }

    #[test]
    fn test_round_to_hundredths_half_away_from_zero() {
        assert_eq!(round_to_hundredths(2.675_000_1), 2.68);
        assert_eq!(round_to_hundredths(0.125), 0.13);
        assert_eq!(round_to_hundredths(-0.125), -0.13);
        assert_eq!(round_to_hundredths(4.0), 4.0);
    }

    #[test]
    fn test_non_positive_weight_is_invalid() {
        let calc = calculator();
        for weight in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = calc
                .compute_dose(&DoseRequest::new("Dog", "Amoxicillin", weight))
                .unwrap_err();
            assert!(matches!(err, DoseError::InvalidWeight { .. }), "weight {weight}");
            assert_eq!(err.to_string(), "Weight must be a positive number");
        }
    }

    #[test]
    fn test_overflowing_dose_is_an_error() {
        let calc = DoseCalculator::new(Arc::new(ReferenceTable::new(vec![reference(
            "Atropine", "Dog", 10.0, 0.001,
        )])));

        let err = calc
            .compute_dose(&DoseRequest::new("Dog", "Atropine", 1e307))
            .unwrap_err();
        assert!(matches!(err, DoseError::InternalError { .. }));
        assert_eq!(err.status_code(), 500);

        // total stays finite, volume does not
        let err = calc
            .compute_dose(&DoseRequest::new("Dog", "Atropine", 1e305))
            .unwrap_err();
        assert!(matches!(err, DoseError::InternalError { .. }));

        assert!(calc.compute_dose(&DoseRequest::new("Dog", "Atropine", 12.0)).is_ok());
    }

    #[test]
    fn test_weight_checked_before_lookup() {
        let err = calculator()
            .compute_dose(&DoseRequest::new("Iguana", "Unknown", 0.0))
            .unwrap_err();
        assert!(matches!(err, DoseError::InvalidWeight { .. }));
    }

    #[test]
    fn test_unknown_pair_is_not_found() {
        let err = calculator()
            .compute_dose(&DoseRequest::new("Cat", "Amoxicillin", 5.0))
            .unwrap_err();

        let message = err.to_string();
        assert!(matches!(err, DoseError::DrugNotFound { .. }));
        assert!(message.contains("Amoxicillin"));
        assert!(message.contains("Cat"));
        assert_eq!(message, "Drug \"Amoxicillin\" not found for species \"Cat\"");
    }

    #[test]
    fn test_compute_dose_is_repeatable() {
        let calc = calculator();
        let request = DoseRequest::new("Cat", "Meloxicam", 4.2);

        let first = calc.compute_dose(&request).unwrap();
        let second = calc.compute_dose(&request).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.total_dose_mg, 0.21);
        assert_eq!(first.volume_to_administer_ml, 0.42);
    }

    #[test]
    fn test_catalog_sorted_and_distinct() {
        let catalog = calculator().list_catalog();

        assert_eq!(catalog.drugs, vec!["Amoxicillin", "Carprofen", "Meloxicam"]);
        assert_eq!(catalog.species, vec!["Cat", "Dog", "Rabbit"]);
    }

    #[test]
    fn test_catalog_of_empty_table() {
        let calc = DoseCalculator::new(Arc::new(ReferenceTable::default()));
        assert_eq!(calc.list_catalog(), Catalog::default());
    }

    #[test]
    fn test_shared_across_threads() {
        let calc = calculator();
        let handles: Vec<_> = (1..=4)
            .map(|i| {
                let calc = calc.clone();
                std::thread::spawn(move || {
                    calc.compute_dose(&DoseRequest::new("Dog", "Amoxicillin", i as f64 * 5.0))
                        .map(|r| r.total_dose_mg)
                })
            })
            .collect();

        let totals: Vec<f64> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        assert_eq!(totals, vec![50.0, 100.0, 150.0, 200.0]);
    }
}
