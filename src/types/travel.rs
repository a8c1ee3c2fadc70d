//! Travel request and recommendation types.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::RoamError;

/// Kind of trip the traveller wants.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TravelStyle {
    Beach,
    Culture,
    Adventure,
    City,
    Nature,
}

/// Who the traveller is going with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Companion {
    Solo,
    Partner,
    Family,
    Friends,
    Colleagues,
}

/// Spending limit for the trip, or no limit yet.
///
/// On the wire this is either a non-negative integer (KRW) or the string
/// `"undecided"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "BudgetRepr", into = "BudgetRepr")]
pub enum Budget {
    Fixed(u64),
    Undecided,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum BudgetRepr {
    Amount(u64),
    Label(String),
}

impl TryFrom<BudgetRepr> for Budget {
    type Error = String;

    fn try_from(repr: BudgetRepr) -> Result<Self, Self::Error> {
        match repr {
            BudgetRepr::Amount(amount) => Ok(Budget::Fixed(amount)),
            BudgetRepr::Label(label) if label.eq_ignore_ascii_case("undecided") => {
                Ok(Budget::Undecided)
            }
            BudgetRepr::Label(label) => Err(format!(
                "budget must be a non-negative integer or \"undecided\", got \"{label}\""
            )),
        }
    }
}

impl From<Budget> for BudgetRepr {
    fn from(budget: Budget) -> Self {
        match budget {
            Budget::Fixed(amount) => BudgetRepr::Amount(amount),
            Budget::Undecided => BudgetRepr::Label("undecided".to_string()),
        }
    }
}

impl Budget {
    /// Whether `cost` fits within the budget plus 10% headroom.
    pub fn allows(&self, cost: u64) -> bool {
        match self {
            Budget::Undecided => true,
            Budget::Fixed(budget) => u128::from(cost) * 10 <= u128::from(*budget) * 11,
        }
    }

    pub fn amount(&self) -> Option<u64> {
        match self {
            Budget::Fixed(amount) => Some(*amount),
            Budget::Undecided => None,
        }
    }
}

/// A recommendation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TravelPreferences {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(alias = "budgetPerPerson")]
    pub budget: Budget,
    pub number_of_people: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companion: Option<Companion>,
    pub travel_style: TravelStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_request: Option<String>,
}

impl TravelPreferences {
    /// Check the cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), RoamError> {
        if self.end_date < self.start_date {
            return Err(RoamError::InvalidArgument(format!(
                "endDate {} is before startDate {}",
                self.end_date, self.start_date
            )));
        }
        if self.number_of_people == 0 {
            return Err(RoamError::InvalidArgument(
                "numberOfPeople must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Trip length in days, also used as the number of nights.
    pub fn days(&self) -> u32 {
        (self.end_date - self.start_date).num_days().max(0) as u32
    }

    /// Month of departure (1-12).
    pub fn month(&self) -> u32 {
        self.start_date.month()
    }
}

/// One recommended destination, as produced by the result parser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRecommendation {
    pub name: String,
    pub country: String,
    #[serde(deserialize_with = "deserialize_cost")]
    pub estimated_cost: u64,
    #[serde(deserialize_with = "deserialize_cost")]
    pub flight_cost: u64,
    #[serde(deserialize_with = "deserialize_cost")]
    pub accommodation_cost: u64,
    pub highlights: Vec<String>,
    pub reason: String,
    pub best_season: String,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tips")]
    pub tips: Vec<String>,
}

/// Outbound answer for one recommendation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub destinations: Vec<DestinationRecommendation>,
    pub total_count: usize,
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_processing_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecommendationResponse {
    pub fn new(destinations: Vec<DestinationRecommendation>, total_count: usize) -> Self {
        Self {
            destinations,
            total_count,
            generated_at: Utc::now(),
            total_processing_time: None,
            error: None,
        }
    }

    /// Empty destination list with the failure surfaced.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            destinations: Vec::new(),
            total_count: 0,
            generated_at: Utc::now(),
            total_processing_time: None,
            error: Some(error.into()),
        }
    }

    pub fn with_processing_time(mut self, seconds: f64) -> Self {
        self.total_processing_time = Some(seconds);
        self
    }
}

/// Accept integers, whole-ish floats and formatted strings like `"₩1,800,000"`.
fn deserialize_cost<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = serde_json::Value::deserialize(deserializer)?;
    match &value {
        serde_json::Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok(v)
            } else if let Some(v) = n.as_f64().filter(|v| v.is_finite() && *v >= 0.0) {
                Ok(v.round() as u64)
            } else {
                Err(D::Error::custom(format!("cost must be non-negative, got {n}")))
            }
        }
        serde_json::Value::String(s) => {
            let digits: String = s.chars().filter(|c| !matches!(c, ',' | '_' | ' ' | '₩')).collect();
            let digits = digits.trim_end_matches("KRW").trim_end_matches('원');
            digits
                .parse::<u64>()
                .map_err(|_| D::Error::custom(format!("cost is not a number: \"{s}\"")))
        }
        other => Err(D::Error::custom(format!("cost must be a number, got {other}"))),
    }
}

fn deserialize_tips<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
