//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use reia_core::format::{format_currency, format_label, format_percent, ConditionTier};
use reia_core::report::{AnalysisReport, Division};

/// Print a complete analysis report, sectioned like the web view.
pub fn print_report(report: &AnalysisReport) {
    match &report.listing_id {
        Some(id) => println!(
            "{} {}",
            "Analysis Report".bold(),
            format!("(listing {})", id).dimmed()
        ),
        None => println!("{}", "Analysis Report".bold()),
    }
    println!();

    if let Some(info) = &report.property_info {
        println!("{}", "Property".cyan().bold());
        if let Some(location) = &info.location {
            println!("  {:<24} {}", "Location", location);
        }
        if let Some(size) = info.size_m2 {
            println!("  {:<24} {} m²", "Size", size);
        }
        if let Some(bedrooms) = info.bedrooms {
            println!("  {:<24} {}", "Bedrooms", bedrooms);
        }
        if let Some(bathrooms) = info.bathrooms {
            println!("  {:<24} {}", "Bathrooms", bathrooms);
        }
        println!();
    }

    if let Some(investment) = &report.investment {
        println!("{}", "Investment".cyan().bold());
        if let Some(price) = investment.purchase_price {
            println!("  {:<24} {}", "Purchase price", format_currency(price));
        }
        if let Some(costs) = investment.remodeling_costs {
            println!("  {:<24} {}", "Remodeling", format_currency(costs));
        }
        if let Some(total) = investment.total_investment {
            println!("  {:<24} {}", "Total", format_currency(total).bold());
        }
        println!();
    }

    if let Some(rent) = &report.rent_estimate {
        println!("{}", "Rental Potential".cyan().bold());
        println!(
            "  {:<24} {}",
            "Monthly rent",
            format_currency(rent.monthly_figure())
        );
        if let Some(annual) = rent.annual_rent {
            println!("  {:<24} {}", "Annual rent", format_currency(annual));
        }
        if let Some(after_vacancy) = rent.annual_rent_after_vacancy {
            println!(
                "  {:<24} {}",
                "Annual (after vacancy)",
                format_currency(after_vacancy)
            );
        }
        if let Some(strategy) = &rent.rental_strategy {
            println!("  {:<24} {}", "Strategy", format_label(strategy));
        }
        println!();
    }

    if let Some(financial) = &report.financial_metrics {
        println!("{}", "Financial Metrics".cyan().bold());
        if let Some(metrics) = &financial.metrics {
            if let Some(roi) = metrics.roi_percentage {
                println!("  {:<24} {}", "ROI", format_percent(roi));
            }
            if let Some(gross) = metrics.gross_yield {
                println!("  {:<24} {}", "Gross yield", format_percent(gross));
            }
            if let Some(net) = metrics.net_yield {
                println!("  {:<24} {}", "Net yield", format_percent(net));
            }
            if let Some(years) = metrics.payback_years() {
                println!("  {:<24} {:.1} years", "Payback period", years);
            }
        }
        if let Some(net_income) = &financial.net_income {
            if let Some(monthly) = net_income.monthly_net_income {
                println!("  {:<24} {}", "Monthly net income", format_currency(monthly));
            }
            if let Some(annual) = net_income.annual_net_income {
                println!("  {:<24} {}", "Annual net income", format_currency(annual));
            }
        }
        if let Some(expenses) = &financial.expenses {
            if let Some(total) = expenses.total_annual_expenses {
                println!("  {:<24} {}", "Annual expenses", format_currency(total));
            }
        }
        println!();
    }

    if let Some(rehab) = &report.rehab_costs {
        println!("{}", "Renovation Breakdown".cyan().bold());
        if let Some(total) = rehab.property_total {
            println!("  {:<24} {}", "Property total", format_currency(total).bold());
        }
        println!();

        for division in &rehab.divisions {
            print_division(division);
        }

        let summary: Vec<_> = rehab
            .summary
            .iter()
            .filter(|(_, amount)| **amount > 0.0)
            .collect();
        if !summary.is_empty() {
            println!("  {}", "Cost summary".bold());
            for (category, amount) in summary {
                println!("    {:<22} {}", format_label(category), format_currency(*amount));
            }
        }
    }
}

fn print_division(division: &Division) {
    let title = division
        .room_type
        .as_deref()
        .map(format_label)
        .unwrap_or_else(|| "Division".to_string());

    match division.size_m2 {
        Some(size) => println!("  {} {}", title.bold(), format!("({} m²)", size).dimmed()),
        None => println!("  {}", title.bold()),
    }

    if let Some(total) = division.total_cost {
        println!("    {:<22} {}", "Estimated cost", format_currency(total));
    }

    if !division.conditions.is_empty() {
        for (key, rating) in division.conditions.entries() {
            let tier = ConditionTier::from_rating(rating);
            println!("    {:<22} {}", format_label(key), tier_colored(tier));
        }
    }

    for (category, amount) in &division.costs {
        println!("    {:<22} {}", format_label(category), format_currency(*amount));
    }

    if let Some(notes) = &division.detailed_notes {
        let notes = notes.trim();
        if !notes.is_empty() {
            println!("    {}", notes.italic().dimmed());
        }
    }

    println!();
}

fn tier_colored(tier: ConditionTier) -> ColoredString {
    let label = tier.label();
    match tier {
        ConditionTier::Good => label.green(),
        ConditionTier::Average => label.yellow(),
        ConditionTier::Fair | ConditionTier::Poor => label.red(),
        ConditionTier::NotApplicable => label.dimmed(),
    }
}
