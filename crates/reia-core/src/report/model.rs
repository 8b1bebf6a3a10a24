//! Models for the analysis service payload.
//!
//! The service response is loosely typed: no field is guaranteed present and
//! unknown fields may appear at any level. Every section is therefore
//! independently optional, and a snapshot parses successfully as long as it is
//! valid JSON. The success flag splits the payload into the two variants of
//! [`Analysis`].

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ReiaResult;

/// Request body for the analysis endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// The listing URL, forwarded exactly as typed.
    pub link: String,
}

/// A parsed analysis snapshot.
///
/// `Failed` covers a falsy or missing success flag; everything else the
/// payload may carry is ignored in that case, so a failed analysis can never
/// render partially.
#[derive(Debug, Clone)]
pub enum Analysis {
    Failed { error: Option<String> },
    Complete(AnalysisReport),
}

impl Analysis {
    /// Parse a raw snapshot body.
    ///
    /// Returns an error only for invalid JSON; a well-formed payload always
    /// classifies into one of the two variants.
    pub fn from_json(raw: &str) -> ReiaResult<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let success = value
            .get("success")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);

        if !success {
            let error = value
                .get("error")
                .and_then(serde_json::Value::as_str)
                .map(String::from);
            return Ok(Self::Failed { error });
        }

        let report: AnalysisReport = serde_json::from_value(value)?;
        Ok(Self::Complete(report))
    }
}

/// The successful-analysis payload: five independently-optional sections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisReport {
    #[serde(default, deserialize_with = "string_or_number")]
    pub listing_id: Option<String>,
    #[serde(default)]
    pub property_info: Option<PropertyInfo>,
    #[serde(default)]
    pub investment: Option<Investment>,
    #[serde(default)]
    pub rehab_costs: Option<RehabCosts>,
    #[serde(default)]
    pub rent_estimate: Option<RentEstimate>,
    #[serde(default)]
    pub financial_metrics: Option<FinancialMetrics>,
}

/// Descriptors scraped from the listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyInfo {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub size_m2: Option<f64>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
}

/// Purchase plus renovation totals.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Investment {
    #[serde(default)]
    pub purchase_price: Option<f64>,
    #[serde(default)]
    pub remodeling_costs: Option<f64>,
    #[serde(default)]
    pub total_investment: Option<f64>,
}

/// Renovation-cost section: property total, per-category summary, and the
/// per-division breakdown.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RehabCosts {
    #[serde(default)]
    pub property_total: Option<f64>,
    #[serde(default)]
    pub summary: BTreeMap<String, f64>,
    #[serde(default)]
    pub divisions: Vec<Division>,
}

/// A room of the property with its own size, condition ratings, and itemized
/// renovation cost.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Division {
    #[serde(default, deserialize_with = "string_or_number")]
    pub division_id: Option<String>,
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub size_m2: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub costs: BTreeMap<String, f64>,
    #[serde(default)]
    pub total_cost: Option<f64>,
    #[serde(default)]
    pub detailed_notes: Option<String>,
    #[serde(default)]
    pub conditions: Conditions,
}

/// The eight 0-4 condition ratings a division may carry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Conditions {
    #[serde(default)]
    pub overall_condition: Option<f64>,
    #[serde(default)]
    pub flooring_condition: Option<f64>,
    #[serde(default)]
    pub painting_condition: Option<f64>,
    #[serde(default)]
    pub windows_condition: Option<f64>,
    #[serde(default)]
    pub plumbing_condition: Option<f64>,
    #[serde(default)]
    pub electrical_condition: Option<f64>,
    #[serde(default)]
    pub appliances_condition: Option<f64>,
    #[serde(default)]
    pub ceiling_condition: Option<f64>,
}

impl Conditions {
    /// All ratings in display order, keyed by their wire name.
    pub fn entries(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("overall_condition", self.overall_condition),
            ("flooring_condition", self.flooring_condition),
            ("painting_condition", self.painting_condition),
            ("windows_condition", self.windows_condition),
            ("plumbing_condition", self.plumbing_condition),
            ("electrical_condition", self.electrical_condition),
            ("appliances_condition", self.appliances_condition),
            ("ceiling_condition", self.ceiling_condition),
        ]
    }

    /// True when no rating is present at all.
    pub fn is_empty(&self) -> bool {
        self.entries().iter().all(|(_, v)| v.is_none())
    }
}

/// Rent estimate, shaped by the rental strategy: whole-apartment estimates
/// carry `monthly_rent`, by-room estimates carry `total_monthly_rent`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RentEstimate {
    #[serde(default)]
    pub rental_strategy: Option<String>,
    #[serde(default)]
    pub monthly_rent: Option<f64>,
    #[serde(default)]
    pub total_monthly_rent: Option<f64>,
    #[serde(default)]
    pub annual_rent: Option<f64>,
    #[serde(default)]
    pub annual_rent_after_vacancy: Option<f64>,
    #[serde(default)]
    pub rent_per_room_monthly: Option<f64>,
    #[serde(default)]
    pub rent_per_m2_monthly: Option<f64>,
    #[serde(default)]
    pub bedroom_count: Option<u32>,
    #[serde(default)]
    pub property_size_m2: Option<f64>,
    #[serde(default)]
    pub vacancy_rate: Option<f64>,
}

impl RentEstimate {
    /// The monthly figure to display: direct monthly rent first, then the
    /// by-room aggregate, then zero.
    pub fn monthly_figure(&self) -> f64 {
        self.monthly_rent
            .or(self.total_monthly_rent)
            .unwrap_or(0.0)
    }
}

/// Financial metrics section as the service nests it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinancialMetrics {
    #[serde(default)]
    pub total_investment: Option<f64>,
    #[serde(default)]
    pub purchase_price: Option<f64>,
    #[serde(default)]
    pub remodeling_costs: Option<f64>,
    #[serde(default)]
    pub metrics: Option<MetricSet>,
    #[serde(default)]
    pub net_income: Option<NetIncome>,
    #[serde(default)]
    pub expenses: Option<ExpenseBreakdown>,
    #[serde(default)]
    pub income: Option<IncomeFigures>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricSet {
    #[serde(default)]
    pub roi_percentage: Option<f64>,
    #[serde(default)]
    pub cash_on_cash_return: Option<f64>,
    #[serde(default)]
    pub gross_yield: Option<f64>,
    #[serde(default)]
    pub net_yield: Option<f64>,
    #[serde(default)]
    pub months_to_break_even: Option<f64>,
}

impl MetricSet {
    /// Payback period in years, as displayed: months to break even over 12.
    pub fn payback_years(&self) -> Option<f64> {
        self.months_to_break_even.map(|months| months / 12.0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetIncome {
    #[serde(default)]
    pub monthly_net_income: Option<f64>,
    #[serde(default)]
    pub annual_net_income: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseBreakdown {
    #[serde(default)]
    pub monthly_expenses: Option<f64>,
    #[serde(default)]
    pub annual_property_tax: Option<f64>,
    #[serde(default)]
    pub annual_insurance: Option<f64>,
    #[serde(default)]
    pub annual_maintenance: Option<f64>,
    #[serde(default)]
    pub annual_management_fee: Option<f64>,
    #[serde(default)]
    pub annual_additional_expenses: Option<f64>,
    #[serde(default)]
    pub total_annual_expenses: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomeFigures {
    #[serde(default)]
    pub monthly_rent: Option<f64>,
    #[serde(default)]
    pub annual_rent: Option<f64>,
}

/// The service emits listing and division ids either as numbers (scraped data)
/// or strings (extracted from the URL). Accept both.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAYLOAD: &str = r#"{
        "success": true,
        "listing_id": "34458598",
        "property_info": {
            "location": "Arroios, Lisboa",
            "size_m2": 104.0,
            "bedrooms": 3,
            "bathrooms": 2
        },
        "investment": {
            "purchase_price": 315000.0,
            "remodeling_costs": 49606.43,
            "total_investment": 364606.43
        },
        "rehab_costs": {
            "property_total": 49606.43,
            "summary": {
                "flooring": 18200.5,
                "painting": 9405.93,
                "windows": 0.0
            },
            "divisions": [
                {
                    "division_id": "bedroom_1",
                    "room_type": "bedroom",
                    "size_m2": 14.5,
                    "images": ["https://img.example/1.jpg"],
                    "costs": {"flooring": 2100.0, "painting": 800.0},
                    "total_cost": 2900.0,
                    "detailed_notes": "Worn parquet, damp stain near window.",
                    "conditions": {
                        "overall_condition": 2.0,
                        "flooring_condition": 1.5,
                        "painting_condition": 2.5
                    }
                }
            ]
        },
        "rent_estimate": {
            "rental_strategy": "whole_apartment",
            "property_size_m2": 104.0,
            "rent_per_m2_monthly": 12.0,
            "monthly_rent": 1248.0,
            "annual_rent": 14976.0,
            "annual_rent_after_vacancy": 13777.92,
            "vacancy_rate": 0.08
        },
        "financial_metrics": {
            "total_investment": 364606.43,
            "metrics": {
                "roi_percentage": 2.1,
                "gross_yield": 3.78,
                "net_yield": 2.1,
                "months_to_break_even": 292.2
            },
            "net_income": {
                "monthly_net_income": 638.21,
                "annual_net_income": 7658.49
            },
            "expenses": {
                "total_annual_expenses": 6119.43
            }
        }
    }"#;

    #[test]
    fn test_full_payload_parses() {
        let analysis = Analysis::from_json(FULL_PAYLOAD).unwrap();
        let report = match analysis {
            Analysis::Complete(report) => report,
            Analysis::Failed { .. } => panic!("expected a complete analysis"),
        };

        assert_eq!(report.listing_id.as_deref(), Some("34458598"));
        assert_eq!(
            report.property_info.as_ref().unwrap().location.as_deref(),
            Some("Arroios, Lisboa")
        );
        assert_eq!(
            report.investment.as_ref().unwrap().total_investment,
            Some(364606.43)
        );

        let rehab = report.rehab_costs.as_ref().unwrap();
        assert_eq!(rehab.summary.len(), 3);
        assert_eq!(rehab.divisions.len(), 1);
        assert_eq!(rehab.divisions[0].conditions.flooring_condition, Some(1.5));

        let metrics = report.financial_metrics.as_ref().unwrap();
        assert_eq!(
            metrics.metrics.as_ref().unwrap().payback_years(),
            Some(292.2 / 12.0)
        );
    }

    #[test]
    fn test_minimal_success_payload() {
        let analysis = Analysis::from_json(r#"{"success": true}"#).unwrap();
        match analysis {
            Analysis::Complete(report) => {
                assert!(report.listing_id.is_none());
                assert!(report.property_info.is_none());
                assert!(report.investment.is_none());
                assert!(report.rehab_costs.is_none());
                assert!(report.rent_estimate.is_none());
                assert!(report.financial_metrics.is_none());
            }
            Analysis::Failed { .. } => panic!("expected a complete analysis"),
        }
    }

    #[test]
    fn test_explicit_failure() {
        let analysis =
            Analysis::from_json(r#"{"success": false, "error": "scrape failed"}"#).unwrap();
        match analysis {
            Analysis::Failed { error } => assert_eq!(error.as_deref(), Some("scrape failed")),
            Analysis::Complete(_) => panic!("expected a failed analysis"),
        }
    }

    #[test]
    fn test_missing_success_flag_is_failure() {
        // Sections present but no success flag: must classify as failed so the
        // renderer never partially renders it.
        let analysis = Analysis::from_json(
            r#"{"listing_id": 7, "investment": {"purchase_price": 100000}}"#,
        )
        .unwrap();
        assert!(matches!(analysis, Analysis::Failed { error: None }));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Analysis::from_json("not json at all").is_err());
        assert!(Analysis::from_json("").is_err());
    }

    #[test]
    fn test_numeric_listing_id() {
        let analysis =
            Analysis::from_json(r#"{"success": true, "listing_id": 34458598}"#).unwrap();
        match analysis {
            Analysis::Complete(report) => {
                assert_eq!(report.listing_id.as_deref(), Some("34458598"))
            }
            Analysis::Failed { .. } => panic!("expected a complete analysis"),
        }
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let analysis = Analysis::from_json(
            r#"{"success": true, "pipeline_state": {"listing_json_path": "x.json"}, "extra": 1}"#,
        )
        .unwrap();
        assert!(matches!(analysis, Analysis::Complete(_)));
    }

    #[test]
    fn test_rent_monthly_preference_chain() {
        let direct = RentEstimate {
            monthly_rent: Some(1248.0),
            total_monthly_rent: Some(999.0),
            ..Default::default()
        };
        assert_eq!(direct.monthly_figure(), 1248.0);

        let by_room = RentEstimate {
            total_monthly_rent: Some(1500.0),
            ..Default::default()
        };
        assert_eq!(by_room.monthly_figure(), 1500.0);

        assert_eq!(RentEstimate::default().monthly_figure(), 0.0);
    }

    #[test]
    fn test_conditions_entries_order_and_emptiness() {
        let conditions = Conditions {
            flooring_condition: Some(3.0),
            ..Default::default()
        };
        assert!(!conditions.is_empty());
        let entries = conditions.entries();
        assert_eq!(entries[0].0, "overall_condition");
        assert_eq!(entries[1], ("flooring_condition", Some(3.0)));
        assert!(Conditions::default().is_empty());
    }
}
