//! Report page.
//!
//! Reads the snapshot slot once, classifies it, and projects the payload into
//! view models so the templates stay logic-free. Every section is guarded by
//! the presence of its parent field; a missing section is omitted, never an
//! error.

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::warn;

use reia_core::format::{format_currency, format_label, format_percent, ConditionTier};
use reia_core::report::{
    Analysis, AnalysisReport, Division, FinancialMetrics, Investment, PropertyInfo, RehabCosts,
    RentEstimate,
};

use crate::state::AppState;

// ============================================================
// TEMPLATES
// ============================================================

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate {
    listing_id: String,
    property: Option<SectionView>,
    investment: Option<SectionView>,
    rent: Option<SectionView>,
    metrics: Option<SectionView>,
    rehab: Option<RehabView>,
}

#[derive(Template)]
#[template(path = "report_empty.html")]
struct EmptyTemplate {}

#[derive(Template)]
#[template(path = "report_failed.html")]
struct FailedTemplate {
    detail: String,
}

/// A key-value card.
struct SectionView {
    rows: Vec<RowView>,
}

struct RowView {
    label: String,
    value: String,
}

/// Renovation section: property total, per-division cards, filtered summary.
struct RehabView {
    total: String,
    divisions: Vec<DivisionView>,
    summary: Vec<RowView>,
}

struct DivisionView {
    title: String,
    size: String,
    total_cost: String,
    notes: String,
    images: Vec<String>,
    conditions: Vec<ConditionRow>,
    costs: Vec<RowView>,
}

struct ConditionRow {
    label: String,
    tier: &'static str,
    color: &'static str,
}

// ============================================================
// HANDLER
// ============================================================

/// GET /report - render the stored analysis snapshot.
pub async fn report(State(state): State<AppState>) -> Response {
    let Some(raw) = state.snapshots.load_raw() else {
        return render(EmptyTemplate {});
    };

    let analysis = match Analysis::from_json(&raw) {
        Ok(analysis) => analysis,
        Err(err) => {
            warn!(error = %err, "Stored snapshot is not valid JSON, rendering empty state");
            return render(EmptyTemplate {});
        }
    };

    match analysis {
        Analysis::Failed { error } => render(FailedTemplate {
            detail: error.unwrap_or_default(),
        }),
        Analysis::Complete(report) => render(report_view(&report)),
    }
}

fn render<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("Template error: {}", e)),
        )
            .into_response(),
    }
}

// ============================================================
// VIEW BUILDERS
// ============================================================

fn report_view(report: &AnalysisReport) -> ReportTemplate {
    ReportTemplate {
        listing_id: report.listing_id.clone().unwrap_or_default(),
        property: report.property_info.as_ref().map(property_section),
        investment: report.investment.as_ref().map(investment_section),
        rent: report.rent_estimate.as_ref().map(rent_section),
        metrics: report.financial_metrics.as_ref().map(metrics_section),
        rehab: report.rehab_costs.as_ref().map(rehab_view),
    }
}

fn property_section(info: &PropertyInfo) -> SectionView {
    let mut rows = Vec::new();
    if let Some(location) = &info.location {
        rows.push(row("Location", location.clone()));
    }
    if let Some(size) = info.size_m2 {
        rows.push(row("Size", format!("{} m²", size)));
    }
    if let Some(bedrooms) = info.bedrooms {
        rows.push(row("Bedrooms", bedrooms.to_string()));
    }
    if let Some(bathrooms) = info.bathrooms {
        rows.push(row("Bathrooms", bathrooms.to_string()));
    }
    SectionView { rows }
}

fn investment_section(investment: &Investment) -> SectionView {
    let mut rows = Vec::new();
    if let Some(price) = investment.purchase_price {
        rows.push(row("Purchase Price", format_currency(price)));
    }
    if let Some(costs) = investment.remodeling_costs {
        rows.push(row("Remodeling Cost", format_currency(costs)));
    }
    if let Some(total) = investment.total_investment {
        rows.push(row("Total Investment", format_currency(total)));
    }
    SectionView { rows }
}

fn rent_section(rent: &RentEstimate) -> SectionView {
    let mut rows = vec![row(
        "Estimated Monthly Rent",
        format_currency(rent.monthly_figure()),
    )];
    if let Some(annual) = rent.annual_rent {
        rows.push(row("Annual Rent", format_currency(annual)));
    }
    if let Some(after_vacancy) = rent.annual_rent_after_vacancy {
        rows.push(row("Annual Rent (after vacancy)", format_currency(after_vacancy)));
    }
    if let Some(strategy) = &rent.rental_strategy {
        rows.push(row("Strategy", format_label(strategy)));
    }
    SectionView { rows }
}

fn metrics_section(financial: &FinancialMetrics) -> SectionView {
    let mut rows = Vec::new();
    if let Some(metrics) = &financial.metrics {
        if let Some(roi) = metrics.roi_percentage {
            rows.push(row("ROI", format_percent(roi)));
        }
        if let Some(gross) = metrics.gross_yield {
            rows.push(row("Gross Yield", format_percent(gross)));
        }
        if let Some(net) = metrics.net_yield {
            rows.push(row("Net Yield", format_percent(net)));
        }
        if let Some(years) = metrics.payback_years() {
            rows.push(row("Payback Period", format!("{:.1} years", years)));
        }
    }
    if let Some(net_income) = &financial.net_income {
        if let Some(monthly) = net_income.monthly_net_income {
            rows.push(row("Monthly Net Income", format_currency(monthly)));
        }
        if let Some(annual) = net_income.annual_net_income {
            rows.push(row("Annual Net Income", format_currency(annual)));
        }
    }
    if let Some(expenses) = &financial.expenses {
        if let Some(total) = expenses.total_annual_expenses {
            rows.push(row("Total Annual Expenses", format_currency(total)));
        }
    }
    SectionView { rows }
}

fn rehab_view(rehab: &RehabCosts) -> RehabView {
    RehabView {
        total: rehab.property_total.map(format_currency).unwrap_or_default(),
        divisions: rehab.divisions.iter().map(division_view).collect(),
        summary: summary_rows(rehab),
    }
}

/// Category summary keeps strictly positive amounts only.
fn summary_rows(rehab: &RehabCosts) -> Vec<RowView> {
    rehab
        .summary
        .iter()
        .filter(|(_, amount)| **amount > 0.0)
        .map(|(category, amount)| row(format_label(category), format_currency(*amount)))
        .collect()
}

fn division_view(division: &Division) -> DivisionView {
    let conditions = if division.conditions.is_empty() {
        Vec::new()
    } else {
        division
            .conditions
            .entries()
            .iter()
            .map(|(key, rating)| {
                let tier = ConditionTier::from_rating(*rating);
                ConditionRow {
                    label: format_label(key),
                    tier: tier.label(),
                    color: tier.css_color(),
                }
            })
            .collect()
    };

    DivisionView {
        title: division
            .room_type
            .as_deref()
            .map(format_label)
            .unwrap_or_else(|| "Division".to_string()),
        size: division
            .size_m2
            .map(|size| format!("{} m²", size))
            .unwrap_or_default(),
        total_cost: division.total_cost.map(format_currency).unwrap_or_default(),
        notes: division
            .detailed_notes
            .clone()
            .unwrap_or_default()
            .trim()
            .to_string(),
        images: division.images.clone(),
        conditions,
        costs: division
            .costs
            .iter()
            .map(|(category, amount)| row(format_label(category), format_currency(*amount)))
            .collect(),
    }
}

fn row(label: impl Into<String>, value: impl Into<String>) -> RowView {
    RowView {
        label: label.into(),
        value: value.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reia_core::report::Conditions;
    use std::collections::BTreeMap;

    #[test]
    fn test_summary_excludes_non_positive_amounts() {
        let mut summary = BTreeMap::new();
        summary.insert("flooring".to_string(), 1.0);
        summary.insert("painting".to_string(), 0.0);
        summary.insert("windows".to_string(), -50.0);
        let rehab = RehabCosts {
            summary,
            ..Default::default()
        };

        let rows = summary_rows(&rehab);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "Flooring");
        assert_eq!(rows[0].value, "€1");
    }

    #[test]
    fn test_rent_section_prefers_direct_monthly_figure() {
        let rent = RentEstimate {
            monthly_rent: Some(1248.0),
            total_monthly_rent: Some(900.0),
            rental_strategy: Some("whole_apartment".to_string()),
            ..Default::default()
        };
        let section = rent_section(&rent);
        assert_eq!(section.rows[0].value, "€1,248");
        assert!(section
            .rows
            .iter()
            .any(|r| r.label == "Strategy" && r.value == "Whole Apartment"));
    }

    #[test]
    fn test_rent_section_defaults_to_zero() {
        let section = rent_section(&RentEstimate::default());
        assert_eq!(section.rows[0].value, "€0");
    }

    #[test]
    fn test_payback_is_months_over_twelve() {
        let financial: FinancialMetrics = serde_json::from_value(serde_json::json!({
            "metrics": {"months_to_break_even": 292.2}
        }))
        .unwrap();
        let section = metrics_section(&financial);
        let payback = section
            .rows
            .iter()
            .find(|r| r.label == "Payback Period")
            .unwrap();
        assert_eq!(payback.value, "24.3 years");
    }

    #[test]
    fn test_division_without_ratings_omits_condition_rows() {
        let division = Division::default();
        assert!(division_view(&division).conditions.is_empty());
    }

    #[test]
    fn test_division_condition_tiers() {
        let division = Division {
            room_type: Some("living_room".to_string()),
            conditions: Conditions {
                overall_condition: Some(3.5),
                flooring_condition: Some(1.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let view = division_view(&division);
        assert_eq!(view.title, "Living Room");
        // All eight rows render once any rating is present; missing ones are N/A.
        assert_eq!(view.conditions.len(), 8);
        assert_eq!(view.conditions[0].tier, "Good");
        assert_eq!(view.conditions[1].tier, "Poor");
        assert_eq!(view.conditions[2].tier, "N/A");
    }
}
