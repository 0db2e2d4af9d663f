use serde::{Deserialize, Serialize};

/// One row of the reference table: how much of a drug a species gets per kg,
/// and how concentrated the formulation is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugReference {
    pub drug_name: String,
    pub species: String,
    pub dose_rate_mg_per_kg: f64,
    pub concentration_mg_per_ml: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseRequest {
    pub species: String,
    pub drug: String,
    pub weight: f64,
}

impl DoseRequest {
    pub fn new(species: impl Into<String>, drug: impl Into<String>, weight_kg: f64) -> Self {
        Self {
            species: species.into(),
            drug: drug.into(),
            weight: weight_kg,
        }
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseResult {
    pub drug_info: DrugReference,
    pub animal_weight_kg: f64,
    pub total_dose_mg: f64,
    pub volume_to_administer_ml: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub drugs: Vec<String>,
    pub species: Vec<String>,
}
