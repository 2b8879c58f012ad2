//! Sales summarization for restaurant POS menu exports.
//!
//! The pipeline takes one raw CSV document and produces a [`SalesSummary`]:
//! repaired text is parsed into a string table, headers are canonicalized and
//! the export format detected, rows are coerced into typed records, and the
//! typed table is aggregated, ranked, tagged, and narrated.
//!
//! ```
//! let csv = "Sales Category,Item Name,Quantity,Avg Price,Gross Sales,Discount Amount,Net Sales\n\
//!            Drinks,Pho,10,12.50,125.00,0.00,125.00\n";
//! let summary = menu_report::generate_summary(csv).unwrap();
//! assert_eq!(summary.top_items[0].item.item_name, "Pho");
//! ```

pub mod aggregate;
pub mod error;
pub mod insights;
pub mod normalize;
pub mod output;
pub mod schema;
pub mod summary;
pub mod tags;
pub mod types;
pub mod util;

pub use error::SummaryError;
pub use summary::{
    generate_summary, generate_summary_with, parse_sales_table, summarize_table, SummaryOptions,
    DEFAULT_TOP_LIMIT,
};
pub use tags::TagRuleSet;
pub use types::{
    DateRange, Insight, InsightKind, LegacyRow, PerformanceTag, RankedCategory, RankedItem,
    RevenueRow, SalesSummary, SalesTable, TagKind, TaggedItem,
};
