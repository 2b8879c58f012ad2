use serde::Serialize;
use std::error::Error;
use tabled::{settings::Style, Table, Tabled};

use crate::types::{RankedCategory, TaggedItem};
use crate::util::format_number;

pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Console-friendly rendering of one ranked, tagged item. Money fields use
/// pre-formatted strings so absent legacy values show as `-`.
#[derive(Debug, Tabled, Clone)]
pub struct ItemPreviewRow {
    #[tabled(rename = "Item")]
    pub item: String,
    #[tabled(rename = "Qty")]
    pub quantity: i64,
    #[tabled(rename = "NetSales")]
    pub net_sales: String,
    #[tabled(rename = "AvgPrice")]
    pub avg_price: String,
    #[tabled(rename = "Tag")]
    pub tag: String,
}

#[derive(Debug, Tabled, Clone)]
pub struct CategoryPreviewRow {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Qty")]
    pub quantity: i64,
    #[tabled(rename = "NetSales")]
    pub net_sales: String,
}

pub fn item_preview_rows(items: &[TaggedItem]) -> Vec<ItemPreviewRow> {
    items
        .iter()
        .map(|t| ItemPreviewRow {
            item: t.item.item_name.clone(),
            quantity: t.item.quantity,
            net_sales: money_cell(t.item.net_sales),
            avg_price: money_cell(t.item.avg_price),
            tag: t
                .performance_tag
                .as_ref()
                .map(|tag| tag.label.clone())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

pub fn category_preview_rows(categories: &[RankedCategory]) -> Vec<CategoryPreviewRow> {
    categories
        .iter()
        .map(|c| CategoryPreviewRow {
            category: c.category.clone(),
            quantity: c.quantity,
            net_sales: money_cell(c.net_sales),
        })
        .collect()
}

fn money_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format_number(v, 2),
        None => "-".to_string(),
    }
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}
