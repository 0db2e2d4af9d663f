use crate::core::calculator::DoseCalculator;
use crate::domain::model::{Catalog, DoseRequest};
use crate::utils::error::{DoseError, Result};
use serde::Serialize;
use serde_json::{json, Value};

pub const CATALOG_FAILURE: &str = "Failed to load drug data";
pub const CALCULATION_FAILURE: &str = "Failed to calculate dose";

/// Transport-neutral response: what an HTTP adapter would send back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(body) => Self { status: 200, body },
            Err(e) => {
                tracing::error!("Failed to serialize response: {}", e);
                Self::error(500, CALCULATION_FAILURE)
            }
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "statusCode": status, "message": message }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// `GET /drugs`
pub fn respond_catalog(catalog: Result<Catalog>) -> ApiResponse {
    match catalog {
        Ok(catalog) => ApiResponse::ok(&catalog),
        Err(e) => {
            tracing::error!("Catalog request failed: {}", e);
            ApiResponse::error(500, CATALOG_FAILURE)
        }
    }
}

/// `POST /dose/calculate`
pub fn respond_dose(calculator: &DoseCalculator, request: &DoseRequest) -> ApiResponse {
    match calculator.compute_dose(request) {
        Ok(result) => ApiResponse::ok(&result),
        Err(e @ (DoseError::InvalidWeight { .. } | DoseError::DrugNotFound { .. })) => {
            tracing::info!("Rejected dose request: {}", e);
            ApiResponse::error(e.status_code(), &e.to_string())
        }
        Err(e) => {
            tracing::error!("Dose calculation failed: {}", e);
            ApiResponse::error(500, CALCULATION_FAILURE)
        }
    }
}
