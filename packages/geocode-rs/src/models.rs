use serde::Deserialize;

/// Response envelope of the geocoding endpoint.
///
/// `status` is the provider's semantic status ("OK", "ZERO_RESULTS", ...).
/// Transport-level failures never reach this type; they surface as
/// [`crate::GeocodeError`] instead.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

impl GeocodeResponse {
    /// True when the provider answered "OK" with at least one result.
    pub fn is_ok(&self) -> bool {
        self.status == "OK" && !self.results.is_empty()
    }
}

/// One geocoding result.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

impl GeocodeResult {
    /// Long name of the first address component carrying `component_type`,
    /// or an empty string when absent.
    pub fn component(&self, component_type: &str) -> String {
        self.address_components
            .iter()
            .find(|c| c.types.iter().any(|t| t == component_type))
            .map(|c| c.long_name.clone())
            .unwrap_or_default()
    }
}

/// One `address_components[]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Response envelope of the place-autocomplete endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AutocompleteResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

/// One autocomplete prediction.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_lookup_by_type() {
        let result: GeocodeResult = serde_json::from_value(serde_json::json!({
            "address_components": [
                { "long_name": "Toronto", "types": ["locality", "political"] },
                { "long_name": "Ontario", "types": ["administrative_area_level_1"] },
                { "long_name": "Canada", "types": ["country", "political"] }
            ],
            "formatted_address": "Toronto, ON, Canada"
        }))
        .unwrap();

        assert_eq!(result.component("locality"), "Toronto");
        assert_eq!(result.component("administrative_area_level_1"), "Ontario");
        assert_eq!(result.component("country"), "Canada");
        assert_eq!(result.component("postal_town"), "");
    }

    #[test]
    fn test_response_status_gate() {
        let ok: GeocodeResponse = serde_json::from_value(serde_json::json!({
            "status": "OK",
            "results": [{ "formatted_address": "Paris, France" }]
        }))
        .unwrap();
        assert!(ok.is_ok());

        let zero: GeocodeResponse =
            serde_json::from_value(serde_json::json!({ "status": "ZERO_RESULTS" })).unwrap();
        assert!(!zero.is_ok());
        assert!(zero.results.is_empty());

        let empty_ok: GeocodeResponse =
            serde_json::from_value(serde_json::json!({ "status": "OK", "results": [] })).unwrap();
        assert!(!empty_ok.is_ok());
    }

    #[test]
    fn test_predictions_default_to_empty() {
        let response: AutocompleteResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(response.predictions.is_empty());
    }
}
