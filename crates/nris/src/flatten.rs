//! The NRIS flattening transform.
//!
//! Input is the raw RiskIndexes response:
//!
//! ```text
//! { "nris": [ { "state": .., "county": .., "population": ..,
//!               "socialVulnerability": { "score": .. },
//!               "communityResilience": { "score": .. },
//!               "<hazard>": { "events": .., "annualizedFrequency": ..,
//!                             "annualLoss": { "total": .. },
//!                             "hazardTypeRiskIndex": { "score": .. } },
//!               .. } ] }
//! ```
//!
//! Output is a single-level record with the five summary fields and one
//! four-field entry per hazard. Only the first `nris` element is consulted.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::hazard::HazardType;
use crate::lookup::{field, first_element, lookup};

/// Metrics for one hazard at the queried location.
///
/// Values are copied from the provider untouched; a metric the provider did
/// not send is `Value::Null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardSummary {
    /// Number of recorded events.
    pub events: Value,
    /// Expected events per year.
    pub annualized_frequency: Value,
    /// `annualLoss.total`: expected annual loss across all consequence types.
    pub annual_loss: Value,
    /// `hazardTypeRiskIndex.score`.
    pub hazard_type_risk_score: Value,
}

impl HazardSummary {
    /// Extract the four metrics from a provider hazard object.
    ///
    /// Anything that is not an object yields an all-null summary.
    pub fn from_hazard(hazard: &Value) -> Self {
        Self {
            events: field(hazard, &["events"]),
            annualized_frequency: field(hazard, &["annualizedFrequency"]),
            annual_loss: field(hazard, &["annualLoss", "total"]),
            hazard_type_risk_score: field(hazard, &["hazardTypeRiskIndex", "score"]),
        }
    }

    /// Whether the provider supplied none of the metrics.
    pub fn is_empty(&self) -> bool {
        self.events.is_null()
            && self.annualized_frequency.is_null()
            && self.annual_loss.is_null()
            && self.hazard_type_risk_score.is_null()
    }

    fn to_json(&self) -> Value {
        let mut map = Map::with_capacity(4);
        map.insert("events".into(), self.events.clone());
        map.insert("annualizedFrequency".into(), self.annualized_frequency.clone());
        map.insert("annualLoss".into(), self.annual_loss.clone());
        map.insert("hazardTypeRiskScore".into(), self.hazard_type_risk_score.clone());
        Value::Object(map)
    }
}

/// Flat summary of one NRIS record.
///
/// Always carries an entry for every [`HazardType`]; the hazard table is a
/// fixed array indexed by hazard so the shape cannot drift.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRiskRecord {
    pub state: Value,
    pub county: Value,
    pub population: Value,
    /// `socialVulnerability.score`.
    pub social_vulnerability: Value,
    /// `communityResilience.score`.
    pub community_resilience: Value,
    hazards: [HazardSummary; 18],
}

impl FlatRiskRecord {
    /// Summary for one hazard.
    pub fn hazard(&self, hazard: HazardType) -> &HazardSummary {
        &self.hazards[hazard as usize]
    }

    /// All hazards with their summaries, in canonical order.
    pub fn hazards(&self) -> impl Iterator<Item = (HazardType, &HazardSummary)> {
        HazardType::ALL.into_iter().zip(self.hazards.iter())
    }

    /// Number of hazards with at least one metric present.
    pub fn reported_hazards(&self) -> usize {
        self.hazards.iter().filter(|h| !h.is_empty()).count()
    }

    /// Render as the JSON object served to clients.
    pub fn to_json(&self) -> Value {
        let mut map = Map::with_capacity(5 + HazardType::ALL.len());
        map.insert("state".into(), self.state.clone());
        map.insert("county".into(), self.county.clone());
        map.insert("population".into(), self.population.clone());
        map.insert("socialVulnerability".into(), self.social_vulnerability.clone());
        map.insert("communityResilience".into(), self.community_resilience.clone());
        for (hazard, summary) in self.hazards() {
            map.insert(hazard.to_string(), summary.to_json());
        }
        Value::Object(map)
    }
}

impl Serialize for FlatRiskRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<FlatRiskRecord> for Value {
    fn from(record: FlatRiskRecord) -> Self {
        record.to_json()
    }
}

/// Flatten a RiskIndexes response into a [`FlatRiskRecord`].
///
/// Total over arbitrary JSON: a missing or empty `nris`, a non-object record,
/// or a hazard of the wrong type all degrade to `null` fields.
pub fn flatten(document: &Value) -> FlatRiskRecord {
    let record = first_element(document, "nris");

    let hazards = HazardType::ALL.map(|hazard| match lookup(record, &[hazard.key()]) {
        Some(obj) => HazardSummary::from_hazard(obj),
        None => HazardSummary::default(),
    });

    FlatRiskRecord {
        state: field(record, &["state"]),
        county: field(record, &["county"]),
        population: field(record, &["population"]),
        social_vulnerability: field(record, &["socialVulnerability", "score"]),
        community_resilience: field(record, &["communityResilience", "score"]),
        hazards,
    }
}

/// JSON-in, JSON-out form of [`flatten`].
pub fn flatten_json(document: &Value) -> Value {
    flatten(document).to_json()
}
