use chrono::NaiveDate;
use serde::Serialize;

/// A typed sales table, produced by schema resolution.
///
/// The two export formats carry different column sets, so the table is a
/// tagged enum rather than one row type full of optionals: code downstream of
/// the resolver can only touch fields that exist for the detected format.
#[derive(Debug, Clone, PartialEq)]
pub enum SalesTable {
    /// Current POS export with per-item revenue columns.
    Revenue(Vec<RevenueRow>),
    /// Older date-keyed export without revenue columns.
    Legacy(Vec<LegacyRow>),
}

impl SalesTable {
    pub fn len(&self) -> usize {
        match self {
            SalesTable::Revenue(rows) => rows.len(),
            SalesTable::Legacy(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short format name for diagnostics.
    pub fn format_name(&self) -> &'static str {
        match self {
            SalesTable::Revenue(_) => "revenue",
            SalesTable::Legacy(_) => "legacy",
        }
    }
}

/// One row of the revenue-format export.
///
/// Rows without an item name are dropped before this type is built, so
/// `item_name` is always present. Numeric cells that failed to parse have
/// already been coerced to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueRow {
    pub category: Option<String>,
    pub item_name: String,
    pub quantity: f64,
    pub avg_price: f64,
    pub gross_sales: f64,
    pub discount_amount: f64,
    pub net_sales: f64,
}

/// One row of the legacy export. Any cell may be unset; unset cells simply
/// drop out of the groupings that would have used them.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyRow {
    pub date: Option<NaiveDate>,
    pub item_name: Option<String>,
    pub quantity: Option<f64>,
    pub category: Option<String>,
}

/// Per-item totals across all rows, before ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedItem {
    pub item_name: String,
    pub quantity: f64,
    /// Present for the revenue format only.
    pub net_sales: Option<f64>,
    /// Mean of the per-row average prices; revenue format only.
    pub avg_price: Option<f64>,
}

/// Per-category totals across all rows, before ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedCategory {
    pub category: String,
    pub quantity: f64,
    pub net_sales: Option<f64>,
}

/// An item that survived the ranking cut, with money fields rounded to cents
/// and quantity truncated to a whole unit count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedItem {
    pub item_name: String,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_sales: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCategory {
    pub category: String,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_sales: Option<f64>,
}

/// Machine-readable half of a performance tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Hot,
    Revenue,
    Premium,
    Rising,
}

/// Performance call-out attached to a ranked item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceTag {
    #[serde(rename = "type")]
    pub kind: TagKind,
    pub label: String,
}

/// A ranked item plus its performance tag. The tag field is always serialized
/// so consumers can rely on its presence; untagged items carry `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedItem {
    #[serde(flatten)]
    pub item: RankedItem,
    pub performance_tag: Option<PerformanceTag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Bestseller,
    Revenue,
    TopRevenue,
    Discount,
    Premium,
    Trend,
    Info,
}

/// One human-readable observation about the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub text: String,
}

/// Date coverage of a legacy export, pre-rendered for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// The complete summary for one export document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    /// `None` for the revenue format and for legacy exports with no parseable
    /// dates, but always present in the serialized output.
    pub date_range: Option<DateRange>,
    pub top_items: Vec<TaggedItem>,
    pub top_categories: Vec<RankedCategory>,
    pub insights: Vec<Insight>,
}
