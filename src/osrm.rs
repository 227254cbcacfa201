//! OSRM HTTP adapter for road-network distance matrices.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PlanError, Result};
use crate::traits::DistanceMatrixProvider;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| PlanError::DistanceSource(err.to_string()))?;

        Ok(Self { config, client })
    }

    fn table_url(&self, locations: &[(f64, f64)]) -> String {
        let coords = locations
            .iter()
            .map(|(lat, lng)| format!("{:.6},{:.6}", lng, lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/table/v1/{}/{}?annotations=distance",
            self.config.base_url, self.config.profile, coords
        )
    }
}

impl DistanceMatrixProvider for OsrmClient {
    /// Returns an empty matrix when the service is unreachable; the index
    /// builder falls back to great-circle distances in that case.
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Vec<Vec<f64>> {
        if locations.is_empty() {
            return Vec::new();
        }

        let url = self.table_url(locations);
        debug!(locations = locations.len(), "requesting OSRM distance table");

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmTableResponse>());

        match response {
            Ok(body) => body.into_km_matrix(),
            Err(err) => {
                warn!(error = %err, "OSRM table request failed");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    /// Metres; `null` marks an unroutable pair.
    distances: Option<Vec<Vec<Option<f64>>>>,
}

impl OsrmTableResponse {
    /// Unroutable pairs become infinite so the relaxation pass can route
    /// around them.
    fn into_km_matrix(self) -> Vec<Vec<f64>> {
        self.distances
            .unwrap_or_default()
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|value| value.map_or(f64::INFINITY, |metres| metres / 1000.0))
                    .collect()
            })
            .collect()
    }
}
