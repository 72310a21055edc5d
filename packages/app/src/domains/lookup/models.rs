use serde::{Deserialize, Serialize};

use geocode::GeocodeResult;

use crate::domains::lookup::errors::LookupError;

/// Candidate lists are capped to keep the suggestion dropdown short.
pub const MAX_CANDIDATES: usize = 5;

/// One parsed city suggestion from the geocoding provider.
///
/// `formatted` doubles as the display label and the deduplication key.
/// Candidates without a country never get built: they could not be joined
/// back to a search later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityCandidate {
    /// May be empty when the provider resolved only a region.
    pub city: String,
    pub state: String,
    pub country: String,
    pub formatted: String,
}

impl CityCandidate {
    /// Parse one raw geocoding result. `None` when the result has no
    /// country component.
    pub fn from_result(result: &GeocodeResult) -> Option<Self> {
        let city = {
            let locality = result.component("locality");
            if !locality.is_empty() {
                locality
            } else {
                let level2 = result.component("administrative_area_level_2");
                if !level2.is_empty() {
                    level2
                } else {
                    result.component("postal_town")
                }
            }
        };
        let state = result.component("administrative_area_level_1");
        let country = result.component("country");
        if country.is_empty() {
            return None;
        }

        let formatted = match &result.formatted_address {
            Some(formatted) if !formatted.is_empty() => formatted.clone(),
            _ => [city.as_str(), state.as_str(), country.as_str()]
                .iter()
                .filter(|part| !part.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(", "),
        };

        Some(Self {
            city,
            state,
            country,
            formatted,
        })
    }
}

/// Map a raw geocoding result set to the candidate list shown to the user:
/// parse, drop country-less results, deduplicate by `formatted` keeping
/// first-seen order, cap at [`MAX_CANDIDATES`].
pub fn extract_candidates(results: &[GeocodeResult]) -> Vec<CityCandidate> {
    let mut candidates: Vec<CityCandidate> = Vec::new();
    for result in results {
        let Some(candidate) = CityCandidate::from_result(result) else {
            continue;
        };
        if candidates.iter().any(|c| c.formatted == candidate.formatted) {
            continue;
        }
        candidates.push(candidate);
        if candidates.len() == MAX_CANDIDATES {
            break;
        }
    }
    candidates
}

/// Per-input-session lookup state.
///
/// Invariant: `selected` survives a text change only while the text still
/// equals the selected candidate's label.
#[derive(Debug, Clone, Default)]
pub struct CityQueryState {
    pub raw_text: String,
    pub loading: bool,
    pub candidates: Vec<CityCandidate>,
    pub selected: Option<CityCandidate>,
    pub error: Option<LookupError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: serde_json::Value) -> GeocodeResult {
        serde_json::from_value(json).unwrap()
    }

    fn city_result(city: &str, state: &str, country: &str, formatted: &str) -> GeocodeResult {
        raw(serde_json::json!({
            "address_components": [
                { "long_name": city, "types": ["locality"] },
                { "long_name": state, "types": ["administrative_area_level_1"] },
                { "long_name": country, "types": ["country"] }
            ],
            "formatted_address": formatted
        }))
    }

    #[test]
    fn test_locality_preferred_over_level_two() {
        let result = raw(serde_json::json!({
            "address_components": [
                { "long_name": "São Paulo", "types": ["locality"] },
                { "long_name": "Região Metropolitana", "types": ["administrative_area_level_2"] },
                { "long_name": "SP", "types": ["administrative_area_level_1"] },
                { "long_name": "Brasil", "types": ["country"] }
            ],
            "formatted_address": "São Paulo, SP, Brasil"
        }));

        let candidate = CityCandidate::from_result(&result).unwrap();
        assert_eq!(candidate.city, "São Paulo");
        assert_eq!(candidate.state, "SP");
        assert_eq!(candidate.country, "Brasil");
    }

    #[test]
    fn test_level_two_then_postal_town_fallback() {
        let level2 = raw(serde_json::json!({
            "address_components": [
                { "long_name": "Braga", "types": ["administrative_area_level_2"] },
                { "long_name": "Portugal", "types": ["country"] }
            ]
        }));
        assert_eq!(CityCandidate::from_result(&level2).unwrap().city, "Braga");

        let postal_town = raw(serde_json::json!({
            "address_components": [
                { "long_name": "London", "types": ["postal_town"] },
                { "long_name": "United Kingdom", "types": ["country"] }
            ]
        }));
        assert_eq!(
            CityCandidate::from_result(&postal_town).unwrap().city,
            "London"
        );
    }

    #[test]
    fn test_result_without_country_is_dropped() {
        let result = raw(serde_json::json!({
            "address_components": [
                { "long_name": "Nowhere", "types": ["locality"] }
            ],
            "formatted_address": "Nowhere"
        }));
        assert!(CityCandidate::from_result(&result).is_none());
    }

    #[test]
    fn test_label_synthesized_when_formatted_address_missing() {
        let result = raw(serde_json::json!({
            "address_components": [
                { "long_name": "Toronto", "types": ["locality"] },
                { "long_name": "Ontario", "types": ["administrative_area_level_1"] },
                { "long_name": "Canada", "types": ["country"] }
            ]
        }));

        let candidate = CityCandidate::from_result(&result).unwrap();
        assert_eq!(candidate.formatted, "Toronto, Ontario, Canada");
    }

    #[test]
    fn test_synthesized_label_skips_empty_parts() {
        let result = raw(serde_json::json!({
            "address_components": [
                { "long_name": "Monaco", "types": ["country"] }
            ]
        }));

        let candidate = CityCandidate::from_result(&result).unwrap();
        assert_eq!(candidate.formatted, "Monaco");
    }

    #[test]
    fn test_extract_deduplicates_by_label_keeping_first() {
        let results = vec![
            city_result("Paris", "Île-de-France", "France", "Paris, France"),
            city_result("Paris Centre", "Île-de-France", "France", "Paris, France"),
            city_result("Paris", "Texas", "United States", "Paris, TX, USA"),
        ];

        let candidates = extract_candidates(&results);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].city, "Paris");
        assert_eq!(candidates[1].formatted, "Paris, TX, USA");
    }

    #[test]
    fn test_extract_caps_at_five() {
        let results: Vec<GeocodeResult> = (0..8)
            .map(|i| {
                city_result(
                    &format!("City {i}"),
                    "State",
                    "Country",
                    &format!("City {i}, Country"),
                )
            })
            .collect();

        let candidates = extract_candidates(&results);
        assert_eq!(candidates.len(), MAX_CANDIDATES);
        assert_eq!(candidates[0].city, "City 0");
    }
}
