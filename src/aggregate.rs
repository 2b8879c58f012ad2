// Grouping and ranking over the typed sales table.
//
// Groups keep first-seen order (IndexMap) and the sort is stable, so ties
// rank in the order rows appeared in the file.
use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::types::{AggregatedCategory, AggregatedItem, RankedCategory, RankedItem, SalesTable};
use crate::util::{average, round2};

/// Total quantity, revenue, and mean price per item. Legacy rows without an
/// item name do not contribute.
pub fn aggregate_items(table: &SalesTable) -> Vec<AggregatedItem> {
    match table {
        SalesTable::Revenue(rows) => {
            #[derive(Default)]
            struct Acc {
                quantity: f64,
                net_sales: f64,
                prices: Vec<f64>,
            }
            let mut groups: IndexMap<String, Acc> = IndexMap::new();
            for r in rows {
                let acc = groups.entry(r.item_name.clone()).or_default();
                acc.quantity += r.quantity;
                acc.net_sales += r.net_sales;
                acc.prices.push(r.avg_price);
            }
            groups
                .into_iter()
                .map(|(item_name, acc)| AggregatedItem {
                    item_name,
                    quantity: acc.quantity,
                    net_sales: Some(acc.net_sales),
                    avg_price: Some(average(&acc.prices)),
                })
                .collect()
        }
        SalesTable::Legacy(rows) => {
            let mut groups: IndexMap<String, f64> = IndexMap::new();
            for r in rows {
                let Some(item_name) = &r.item_name else { continue };
                *groups.entry(item_name.clone()).or_default() += r.quantity.unwrap_or(0.0);
            }
            groups
                .into_iter()
                .map(|(item_name, quantity)| AggregatedItem {
                    item_name,
                    quantity,
                    net_sales: None,
                    avg_price: None,
                })
                .collect()
        }
    }
}

/// Total quantity and revenue per category. Rows without a category do not
/// contribute.
pub fn aggregate_categories(table: &SalesTable) -> Vec<AggregatedCategory> {
    match table {
        SalesTable::Revenue(rows) => {
            #[derive(Default)]
            struct Acc {
                quantity: f64,
                net_sales: f64,
            }
            let mut groups: IndexMap<String, Acc> = IndexMap::new();
            for r in rows {
                let Some(category) = &r.category else { continue };
                let acc = groups.entry(category.clone()).or_default();
                acc.quantity += r.quantity;
                acc.net_sales += r.net_sales;
            }
            groups
                .into_iter()
                .map(|(category, acc)| AggregatedCategory {
                    category,
                    quantity: acc.quantity,
                    net_sales: Some(acc.net_sales),
                })
                .collect()
        }
        SalesTable::Legacy(rows) => {
            let mut groups: IndexMap<String, f64> = IndexMap::new();
            for r in rows {
                let Some(category) = &r.category else { continue };
                *groups.entry(category.clone()).or_default() += r.quantity.unwrap_or(0.0);
            }
            groups
                .into_iter()
                .map(|(category, quantity)| AggregatedCategory {
                    category,
                    quantity,
                    net_sales: None,
                })
                .collect()
        }
    }
}

/// Rank items by unit volume, descending, and keep the top `limit`. Revenue
/// never affects item order.
pub fn rank_items(mut items: Vec<AggregatedItem>, limit: usize) -> Vec<RankedItem> {
    items.sort_by(|a, b| b.quantity.partial_cmp(&a.quantity).unwrap_or(Ordering::Equal));
    items
        .into_iter()
        .take(limit)
        .map(|item| RankedItem {
            item_name: item.item_name,
            quantity: item.quantity as i64,
            net_sales: item.net_sales.map(round2),
            avg_price: item.avg_price.map(round2),
        })
        .collect()
}

/// Rank categories by revenue when the format carries it, by unit volume
/// otherwise, and keep the top `limit`.
pub fn rank_categories(mut categories: Vec<AggregatedCategory>, limit: usize) -> Vec<RankedCategory> {
    categories.sort_by(|a, b| {
        let key_a = a.net_sales.unwrap_or(a.quantity);
        let key_b = b.net_sales.unwrap_or(b.quantity);
        key_b.partial_cmp(&key_a).unwrap_or(Ordering::Equal)
    });
    categories
        .into_iter()
        .take(limit)
        .map(|c| RankedCategory {
            category: c.category,
            quantity: c.quantity as i64,
            net_sales: c.net_sales.map(round2),
        })
        .collect()
}
