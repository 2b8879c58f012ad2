// Header canonicalization, format detection, and cell coercion.
//
// Detection runs on canonical column names: a `date` column marks the legacy
// export, otherwise `item_name` plus `category` marks the revenue export.
// Anything else is rejected with the column list in hand.
use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::SummaryError;
use crate::normalize::NormalizedTable;
use crate::types::{LegacyRow, RevenueRow, SalesTable};
use crate::util::{parse_date_safe, parse_f64_safe};

/// Observed-header to canonical-field lookup. Keys are matched after trimming
/// and lowercasing; headers that match nothing keep their original text.
static COLUMN_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("sales category", "category"),
        ("item name", "item_name"),
        ("quantity", "quantity"),
        ("avg price", "avg_price"),
        ("gross sales", "gross_sales"),
        ("discount amount", "discount_amount"),
        ("net sales", "net_sales"),
        // legacy export naming
        ("quantity_sold", "quantity"),
        ("date", "date"),
    ])
});

/// Detect the export format and coerce the string table into typed rows.
pub fn resolve(table: NormalizedTable) -> Result<SalesTable, SummaryError> {
    let columns = canonical_columns(&table.headers);
    debug!(columns = ?columns, "canonicalized headers");

    let find = |name: &str| columns.iter().position(|c| c == name);
    match (find("date"), find("item_name"), find("category")) {
        (Some(_), _, _) => resolve_legacy(table, &columns),
        (None, Some(item_idx), Some(category_idx)) => {
            resolve_revenue(table, &columns, item_idx, category_idx)
        }
        _ => Err(SummaryError::UnrecognizedFormat(columns)),
    }
}

fn canonical_columns(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .map(|h| {
            let key = h.trim().to_lowercase();
            match COLUMN_MAP.get(key.as_str()) {
                Some(canonical) => canonical.to_string(),
                None => h.clone(),
            }
        })
        .collect()
}

fn resolve_legacy(table: NormalizedTable, columns: &[String]) -> Result<SalesTable, SummaryError> {
    let find = |name: &str| columns.iter().position(|c| c == name);
    let date_idx = find("date");
    let item_idx = find("item_name");
    let quantity_idx = find("quantity");
    let category_idx = find("category");

    let missing: Vec<String> = [
        ("date", date_idx),
        ("item_name", item_idx),
        ("quantity", quantity_idx),
        ("category", category_idx),
    ]
    .iter()
    .filter(|(_, idx)| idx.is_none())
    .map(|(name, _)| name.to_string())
    .collect();

    let (Some(date_idx), Some(item_idx), Some(quantity_idx), Some(category_idx)) =
        (date_idx, item_idx, quantity_idx, category_idx)
    else {
        return Err(SummaryError::MissingColumns(missing));
    };

    let mut rows = Vec::with_capacity(table.rows.len());
    for cells in &table.rows {
        // Empty date cells stay unset; anything non-empty must parse.
        let date = match cells[date_idx].trim() {
            "" => None,
            value => {
                Some(parse_date_safe(value).ok_or_else(|| SummaryError::DateParse(value.to_string()))?)
            }
        };
        rows.push(LegacyRow {
            date,
            item_name: non_empty(&cells[item_idx]),
            quantity: parse_f64_safe(&cells[quantity_idx]),
            category: non_empty(&cells[category_idx]),
        });
    }
    debug!(rows = rows.len(), "detected legacy format");
    Ok(SalesTable::Legacy(rows))
}

fn resolve_revenue(
    table: NormalizedTable,
    columns: &[String],
    item_idx: usize,
    category_idx: usize,
) -> Result<SalesTable, SummaryError> {
    let find = |name: &str| columns.iter().position(|c| c == name);
    let quantity_idx = find("quantity");
    let avg_price_idx = find("avg_price");
    let gross_sales_idx = find("gross_sales");
    let discount_idx = find("discount_amount");
    let net_sales_idx = find("net_sales");

    let total = table.rows.len();
    let mut rows = Vec::with_capacity(total);
    for cells in &table.rows {
        let item_name = cells[item_idx].trim();
        if item_name.is_empty() {
            continue;
        }
        rows.push(RevenueRow {
            category: non_empty(&cells[category_idx]),
            item_name: item_name.to_string(),
            quantity: numeric_cell(cells, quantity_idx),
            avg_price: numeric_cell(cells, avg_price_idx),
            gross_sales: numeric_cell(cells, gross_sales_idx),
            discount_amount: numeric_cell(cells, discount_idx),
            net_sales: numeric_cell(cells, net_sales_idx),
        });
    }
    debug!(total, kept = rows.len(), "detected revenue format");

    if rows.is_empty() {
        return Err(SummaryError::EmptyDataset);
    }
    Ok(SalesTable::Revenue(rows))
}

fn non_empty(cell: &str) -> Option<String> {
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

/// Numeric coercion for the revenue format: unparseable cells and absent
/// columns both become zero.
fn numeric_cell(cells: &[String], idx: Option<usize>) -> f64 {
    idx.and_then(|i| parse_f64_safe(&cells[i])).unwrap_or(0.0)
}
