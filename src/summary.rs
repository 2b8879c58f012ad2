// Pipeline assembly: one raw export document in, one summary out.
use tracing::debug;

use crate::aggregate::{aggregate_categories, aggregate_items, rank_categories, rank_items};
use crate::error::SummaryError;
use crate::insights::derive_insights;
use crate::normalize;
use crate::schema;
use crate::tags::{apply_performance_tags, TagRuleSet};
use crate::types::{DateRange, SalesSummary, SalesTable};

/// Number of items and categories the summary keeps by default.
pub const DEFAULT_TOP_LIMIT: usize = 5;

/// Pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Cap for the ranked item and category lists.
    pub limit: usize,
    /// Tag rule set applied to the ranked items.
    pub tag_rules: TagRuleSet,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_TOP_LIMIT,
            tag_rules: TagRuleSet::default(),
        }
    }
}

/// Parse a raw export document into a typed sales table.
pub fn parse_sales_table(text: &str) -> Result<SalesTable, SummaryError> {
    schema::resolve(normalize::parse_document(text)?)
}

/// Run the full pipeline with default options.
pub fn generate_summary(text: &str) -> Result<SalesSummary, SummaryError> {
    generate_summary_with(text, &SummaryOptions::default())
}

pub fn generate_summary_with(text: &str, options: &SummaryOptions) -> Result<SalesSummary, SummaryError> {
    Ok(summarize_table(&parse_sales_table(text)?, options))
}

/// Assemble the summary for an already-resolved table. Infallible: every
/// fatal condition has surfaced by the time a [`SalesTable`] exists.
pub fn summarize_table(table: &SalesTable, options: &SummaryOptions) -> SalesSummary {
    let ranked = rank_items(aggregate_items(table), options.limit);
    debug!(items = ranked.len(), "ranked top items");
    let top_items = apply_performance_tags(&ranked, options.tag_rules);
    let top_categories = rank_categories(aggregate_categories(table), options.limit);
    let insights = derive_insights(table);

    SalesSummary {
        date_range: date_range(table),
        top_items,
        top_categories,
        insights,
    }
}

/// Date coverage of a legacy table, rendered for display. `None` for the
/// revenue format and for legacy tables with no parsed dates.
fn date_range(table: &SalesTable) -> Option<DateRange> {
    let SalesTable::Legacy(rows) = table else { return None };
    let mut dates = rows.iter().filter_map(|r| r.date);
    let first = dates.next()?;
    let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some(DateRange {
        start: start.format("%b %d, %Y").to_string(),
        end: end.format("%b %d, %Y").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LegacyRow;
    use chrono::NaiveDate;

    fn dated_row(date: Option<&str>) -> LegacyRow {
        LegacyRow {
            date: date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
            item_name: Some("Pho".to_string()),
            quantity: Some(1.0),
            category: Some("Soups".to_string()),
        }
    }

    #[test]
    fn date_range_spans_min_to_max() {
        let table = SalesTable::Legacy(vec![
            dated_row(Some("2024-02-10")),
            dated_row(Some("2024-01-05")),
            dated_row(None),
            dated_row(Some("2024-03-20")),
        ]);
        let range = date_range(&table).unwrap();
        assert_eq!(range.start, "Jan 05, 2024");
        assert_eq!(range.end, "Mar 20, 2024");
    }

    #[test]
    fn date_range_is_absent_without_parsed_dates() {
        assert_eq!(date_range(&SalesTable::Legacy(vec![dated_row(None)])), None);
        assert_eq!(date_range(&SalesTable::Revenue(Vec::new())), None);
    }

    #[test]
    fn options_default_to_five_items_and_exclusive_rules() {
        let options = SummaryOptions::default();
        assert_eq!(options.limit, 5);
        assert_eq!(options.tag_rules, TagRuleSet::PriorityExclusive);
    }
}
