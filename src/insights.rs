// Business insight derivation over the full table.
//
// Insights read the raw rows rather than the capped rankings, so an item
// outside the top list can still surface here. At most five are reported.
use indexmap::IndexMap;

use crate::aggregate::aggregate_categories;
use crate::tags::PREMIUM_PRICE_FLOOR;
use crate::types::{Insight, InsightKind, LegacyRow, RevenueRow, SalesTable};
use crate::util::format_number;

const MAX_INSIGHTS: usize = 5;
const MAX_TREND_INSIGHTS: usize = 3;

/// Derive up to five insights for the table, bestseller first.
pub fn derive_insights(table: &SalesTable) -> Vec<Insight> {
    if table.is_empty() {
        return vec![insight(InsightKind::Info, "No data available for insights".to_string())];
    }

    let mut out = Vec::new();
    match table {
        SalesTable::Revenue(rows) => {
            push_bestseller(rows, &mut out);
            push_revenue_insights(table, rows, &mut out);
        }
        SalesTable::Legacy(rows) => {
            push_legacy_bestseller(rows, &mut out);
            push_monthly_trends(rows, &mut out);
        }
    }
    out.truncate(MAX_INSIGHTS);
    out
}

fn push_bestseller(rows: &[RevenueRow], out: &mut Vec<Insight>) {
    let Some(top) = first_max_by(rows, |r| Some(r.quantity)) else { return };
    out.push(insight(
        InsightKind::Bestseller,
        format!("{} is the top seller with {} units sold", top.item_name, top.quantity as i64),
    ));
}

/// Revenue-share, top-earner, discount, and premium insights. All of them
/// need a positive revenue total; a zero or negative total yields none.
fn push_revenue_insights(table: &SalesTable, rows: &[RevenueRow], out: &mut Vec<Insight>) {
    let total_revenue: f64 = rows.iter().map(|r| r.net_sales).sum();
    if total_revenue <= 0.0 {
        return;
    }

    let categories = aggregate_categories(table);
    if let Some(top) = first_max_by(&categories, |c| c.net_sales) {
        let amount = top.net_sales.unwrap_or(0.0);
        let share = amount / total_revenue * 100.0;
        out.push(insight(
            InsightKind::Revenue,
            format!(
                "{} drives {:.0}% of total revenue (${})",
                top.category,
                share,
                format_number(amount, 2)
            ),
        ));
    }

    if let Some(top) = first_max_by(rows, |r| Some(r.net_sales)) {
        out.push(insight(
            InsightKind::TopRevenue,
            format!(
                "{} generates the most revenue at ${}",
                top.item_name,
                format_number(top.net_sales, 2)
            ),
        ));
    }

    let total_discount: f64 = rows.iter().map(|r| r.discount_amount).sum();
    if total_discount > 0.0 {
        let share = total_discount / (total_revenue + total_discount) * 100.0;
        out.push(insight(
            InsightKind::Discount,
            format!(
                "Total discounts: ${} ({:.1}% of gross sales)",
                format_number(total_discount, 2),
                share
            ),
        ));
    }

    let premium: Vec<&RevenueRow> = rows.iter().filter(|r| r.avg_price > PREMIUM_PRICE_FLOOR).collect();
    if let Some(top) = first_max_by(&premium, |r| Some(r.quantity)) {
        out.push(insight(
            InsightKind::Premium,
            format!(
                "{} is the top premium item (${:.2} avg) with {} sales",
                top.item_name, top.avg_price, top.quantity as i64
            ),
        ));
    }
}

fn push_legacy_bestseller(rows: &[LegacyRow], out: &mut Vec<Insight>) {
    // Candidates need both a name and a parsed quantity.
    let Some(top) = first_max_by(rows, |r| r.item_name.as_ref().and(r.quantity)) else { return };
    let Some(item_name) = &top.item_name else { return };
    out.push(insight(
        InsightKind::Bestseller,
        format!(
            "{} is the top seller with {} units sold",
            item_name,
            top.quantity.unwrap_or(0.0) as i64
        ),
    ));
}

/// One insight per calendar month naming its busiest category, months in
/// alphabetical name order, until three insights exist overall.
fn push_monthly_trends(rows: &[LegacyRow], out: &mut Vec<Insight>) {
    let mut groups: IndexMap<(String, String), f64> = IndexMap::new();
    for r in rows {
        let (Some(date), Some(category)) = (&r.date, &r.category) else { continue };
        let month = date.format("%B").to_string();
        *groups.entry((month, category.clone())).or_default() += r.quantity.unwrap_or(0.0);
    }

    let mut entries: Vec<(String, String, f64)> = groups
        .into_iter()
        .map(|((month, category), quantity)| (month, category, quantity))
        .collect();
    // Category order inside a month breaks quantity ties.
    entries.sort_by(|a, b| (a.0.as_str(), a.1.as_str()).cmp(&(b.0.as_str(), b.1.as_str())));

    let mut i = 0;
    while i < entries.len() && out.len() < MAX_TREND_INSIGHTS {
        let month = entries[i].0.clone();
        let mut top_category = entries[i].1.as_str();
        let mut top_quantity = entries[i].2;
        let mut j = i + 1;
        while j < entries.len() && entries[j].0 == month {
            if entries[j].2 > top_quantity {
                top_category = entries[j].1.as_str();
                top_quantity = entries[j].2;
            }
            j += 1;
        }
        out.push(insight(
            InsightKind::Trend,
            format!("Higher {} sales in {}", top_category.to_lowercase(), month),
        ));
        i = j;
    }
}

/// First element carrying the maximum key; `None` keys do not participate.
fn first_max_by<T, F>(rows: &[T], mut key: F) -> Option<&T>
where
    F: FnMut(&T) -> Option<f64>,
{
    let mut best: Option<(&T, f64)> = None;
    for row in rows {
        let Some(k) = key(row) else { continue };
        if best.as_ref().map_or(true, |(_, best_k)| k > *best_k) {
            best = Some((row, k));
        }
    }
    best.map(|(row, _)| row)
}

fn insight(kind: InsightKind, text: String) -> Insight {
    Insight { kind, text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn revenue_row(item: &str, category: &str, quantity: f64, net_sales: f64, avg_price: f64, discount: f64) -> RevenueRow {
        RevenueRow {
            category: Some(category.to_string()),
            item_name: item.to_string(),
            quantity,
            avg_price,
            gross_sales: net_sales + discount,
            discount_amount: discount,
            net_sales,
        }
    }

    fn legacy_row(date: &str, item: &str, category: &str, quantity: f64) -> LegacyRow {
        LegacyRow {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            item_name: Some(item.to_string()),
            quantity: Some(quantity),
            category: Some(category.to_string()),
        }
    }

    fn texts(insights: &[Insight]) -> Vec<&str> {
        insights.iter().map(|i| i.text.as_str()).collect()
    }

    #[test]
    fn empty_table_reports_a_single_info_insight() {
        let insights = derive_insights(&SalesTable::Legacy(Vec::new()));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Info);
        assert_eq!(insights[0].text, "No data available for insights");
    }

    #[test]
    fn revenue_insights_use_exact_wording() {
        let table = SalesTable::Revenue(vec![
            revenue_row("Pho", "Drinks", 10.0, 125.0, 12.5, 0.0),
            revenue_row("Pho", "Drinks", 5.0, 62.5, 12.5, 0.0),
            revenue_row("Spring Roll", "Appetizers", 20.0, 120.0, 6.0, 0.0),
        ]);
        let insights = derive_insights(&table);
        assert_eq!(
            texts(&insights),
            vec![
                "Spring Roll is the top seller with 20 units sold",
                "Drinks drives 61% of total revenue ($187.50)",
                // Top revenue reads single rows, so Pho's biggest row wins
                // even though its item total is higher.
                "Pho generates the most revenue at $125.00",
            ]
        );
        assert_eq!(insights[0].kind, InsightKind::Bestseller);
        assert_eq!(insights[1].kind, InsightKind::Revenue);
        assert_eq!(insights[2].kind, InsightKind::TopRevenue);
    }

    #[test]
    fn discount_and_premium_insights_round_out_the_five() {
        let table = SalesTable::Revenue(vec![
            revenue_row("Burger", "Mains", 30.0, 300.0, 10.0, 20.0),
            revenue_row("Wagyu", "Mains", 12.0, 384.0, 32.0, 5.0),
        ]);
        let insights = derive_insights(&table);
        assert_eq!(insights.len(), 5);
        assert_eq!(insights[3].kind, InsightKind::Discount);
        assert_eq!(insights[3].text, "Total discounts: $25.00 (3.5% of gross sales)");
        assert_eq!(insights[4].kind, InsightKind::Premium);
        assert_eq!(insights[4].text, "Wagyu is the top premium item ($32.00 avg) with 12 sales");
    }

    #[test]
    fn zero_revenue_total_keeps_only_the_bestseller() {
        let table = SalesTable::Revenue(vec![revenue_row("Pho", "Drinks", 10.0, 0.0, 0.0, 0.0)]);
        let insights = derive_insights(&table);
        assert_eq!(texts(&insights), vec!["Pho is the top seller with 10 units sold"]);
    }

    #[test]
    fn bestseller_picks_the_first_of_tied_rows() {
        let table = SalesTable::Revenue(vec![
            revenue_row("First", "X", 9.0, 10.0, 1.0, 0.0),
            revenue_row("Second", "X", 9.0, 20.0, 1.0, 0.0),
        ]);
        let insights = derive_insights(&table);
        assert_eq!(insights[0].text, "First is the top seller with 9 units sold");
    }

    #[test]
    fn legacy_trends_walk_months_alphabetically() {
        let table = SalesTable::Legacy(vec![
            legacy_row("2024-03-02", "Pho", "Soups", 14.0),
            legacy_row("2024-01-10", "Spring Roll", "Appetizers", 30.0),
            legacy_row("2024-02-05", "Latte", "Drinks", 22.0),
            legacy_row("2024-01-15", "Latte", "Drinks", 9.0),
        ]);
        let insights = derive_insights(&table);
        // Bestseller plus two trends; month names sort February < January.
        assert_eq!(
            texts(&insights),
            vec![
                "Spring Roll is the top seller with 30 units sold",
                "Higher drinks sales in February",
                "Higher appetizers sales in January",
            ]
        );
        assert_eq!(insights[1].kind, InsightKind::Trend);
    }

    #[test]
    fn legacy_rows_missing_dates_or_categories_skip_trends() {
        let table = SalesTable::Legacy(vec![
            LegacyRow { date: None, item_name: Some("Pho".to_string()), quantity: Some(5.0), category: Some("Soups".to_string()) },
            LegacyRow {
                date: NaiveDate::from_ymd_opt(2024, 1, 5),
                item_name: Some("Latte".to_string()),
                quantity: Some(3.0),
                category: None,
            },
        ]);
        let insights = derive_insights(&table);
        assert_eq!(texts(&insights), vec!["Pho is the top seller with 5 units sold"]);
    }
}
