// Performance tagging over the ranked top items.
//
// Tags are computed on the rounded, capped list, so thresholds compare the
// same numbers the consumer sees.
use crate::types::{PerformanceTag, RankedItem, TagKind, TaggedItem};

/// Price floor shared by the premium tag rule and the premium insight.
pub const PREMIUM_PRICE_FLOOR: f64 = 15.0;

/// Which tag rule set to apply.
///
/// Two rule sets exist in the product's history and disagree on precedence
/// and on whether one item can hold several labels. Which is right is an open
/// product question, so both are selectable; the priority-ordered exclusive
/// set is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagRuleSet {
    /// First matching rule wins; at most one label per item.
    #[default]
    PriorityExclusive,
    /// Every matching rule contributes a label, premium checked before
    /// revenue and against an absolute volume floor. Labels join with
    /// `" + "`; the tag kind comes from the first match.
    StackedAbsolute,
}

/// Attach a performance tag to each ranked item. Items matching no rule get
/// `None`.
pub fn apply_performance_tags(items: &[RankedItem], rules: TagRuleSet) -> Vec<TaggedItem> {
    if items.is_empty() {
        return Vec::new();
    }
    let max_quantity = items.iter().map(|i| i.quantity).max().unwrap_or(0);
    let max_revenue = items
        .iter()
        .map(|i| i.net_sales.unwrap_or(0.0))
        .fold(0.0_f64, f64::max);

    items
        .iter()
        .map(|item| {
            let performance_tag = match rules {
                TagRuleSet::PriorityExclusive => priority_tag(item, max_quantity, max_revenue),
                TagRuleSet::StackedAbsolute => stacked_tag(item, max_quantity, max_revenue),
            };
            TaggedItem {
                item: item.clone(),
                performance_tag,
            }
        })
        .collect()
}

fn priority_tag(item: &RankedItem, max_quantity: i64, max_revenue: f64) -> Option<PerformanceTag> {
    let quantity = item.quantity;
    let net_sales = item.net_sales.unwrap_or(0.0);
    let avg_price = item.avg_price.unwrap_or(0.0);

    if quantity == max_quantity && quantity > 0 {
        Some(tag(TagKind::Hot, "Hot Seller"))
    } else if net_sales == max_revenue && net_sales > 0.0 {
        Some(tag(TagKind::Revenue, "High Revenue Driver"))
    } else if avg_price >= PREMIUM_PRICE_FLOOR && quantity as f64 > max_quantity as f64 * 0.3 {
        Some(tag(TagKind::Premium, "Premium Performer"))
    } else if quantity as f64 >= max_quantity as f64 * 0.7 && quantity < max_quantity {
        Some(tag(TagKind::Rising, "Rising Star"))
    } else {
        None
    }
}

fn stacked_tag(item: &RankedItem, max_quantity: i64, max_revenue: f64) -> Option<PerformanceTag> {
    let quantity = item.quantity;
    let net_sales = item.net_sales.unwrap_or(0.0);
    let avg_price = item.avg_price.unwrap_or(0.0);

    let mut matched: Vec<(TagKind, &str)> = Vec::new();
    if quantity == max_quantity && quantity > 0 {
        matched.push((TagKind::Hot, "Hot Seller"));
    }
    if avg_price >= PREMIUM_PRICE_FLOOR && quantity > 50 {
        matched.push((TagKind::Premium, "Premium Performer"));
    }
    if net_sales == max_revenue && net_sales > 0.0 {
        matched.push((TagKind::Revenue, "High Revenue Driver"));
    }
    if quantity as f64 >= max_quantity as f64 * 0.7 && quantity < max_quantity {
        matched.push((TagKind::Rising, "Rising Star"));
    }

    let (kind, _) = *matched.first()?;
    let label = matched
        .iter()
        .map(|(_, label)| *label)
        .collect::<Vec<_>>()
        .join(" + ");
    Some(PerformanceTag { kind, label })
}

fn tag(kind: TagKind, label: &str) -> PerformanceTag {
    PerformanceTag {
        kind,
        label: label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: i64, net_sales: f64, avg_price: f64) -> RankedItem {
        RankedItem {
            item_name: name.to_string(),
            quantity,
            net_sales: Some(net_sales),
            avg_price: Some(avg_price),
        }
    }

    fn labels(tagged: &[TaggedItem]) -> Vec<Option<String>> {
        tagged
            .iter()
            .map(|t| t.performance_tag.as_ref().map(|tag| tag.label.clone()))
            .collect()
    }

    #[test]
    fn priority_rules_assign_one_label_each() {
        let items = vec![
            item("Spring Roll", 20, 120.0, 6.0),
            item("Pho", 15, 187.5, 12.5),
            item("Wagyu", 8, 160.0, 20.0),
            item("Fries", 2, 6.0, 3.0),
        ];
        let tagged = apply_performance_tags(&items, TagRuleSet::PriorityExclusive);
        assert_eq!(
            labels(&tagged),
            vec![
                Some("Hot Seller".to_string()),
                Some("High Revenue Driver".to_string()),
                Some("Premium Performer".to_string()),
                None,
            ]
        );
        assert_eq!(tagged[0].performance_tag.as_ref().map(|t| t.kind), Some(TagKind::Hot));
    }

    #[test]
    fn every_item_at_max_quantity_is_hot() {
        let items = vec![
            item("A", 10, 50.0, 5.0),
            item("B", 10, 80.0, 8.0),
            item("C", 4, 10.0, 2.5),
        ];
        let tagged = apply_performance_tags(&items, TagRuleSet::PriorityExclusive);
        assert_eq!(
            labels(&tagged)[..2],
            [Some("Hot Seller".to_string()), Some("Hot Seller".to_string())]
        );
    }

    #[test]
    fn near_max_volume_earns_rising_star() {
        let items = vec![item("A", 100, 10.0, 1.0), item("B", 70, 5.0, 1.0), item("C", 69, 5.0, 1.0)];
        let tagged = apply_performance_tags(&items, TagRuleSet::PriorityExclusive);
        // B sits exactly on the 70% line; C sits just under it.
        assert_eq!(labels(&tagged)[1], Some("Rising Star".to_string()));
        assert_eq!(labels(&tagged)[2], None);
    }

    #[test]
    fn zero_volume_list_gets_no_tags() {
        let items = vec![item("A", 0, 0.0, 0.0), item("B", 0, 0.0, 0.0)];
        let tagged = apply_performance_tags(&items, TagRuleSet::PriorityExclusive);
        assert_eq!(labels(&tagged), vec![None, None]);
    }

    #[test]
    fn legacy_items_without_money_fields_still_tag_by_volume() {
        let items = vec![
            RankedItem { item_name: "A".to_string(), quantity: 9, net_sales: None, avg_price: None },
            RankedItem { item_name: "B".to_string(), quantity: 7, net_sales: None, avg_price: None },
        ];
        let tagged = apply_performance_tags(&items, TagRuleSet::PriorityExclusive);
        assert_eq!(labels(&tagged), vec![Some("Hot Seller".to_string()), Some("Rising Star".to_string())]);
    }

    #[test]
    fn stacked_rules_concatenate_labels() {
        let items = vec![item("A", 100, 2000.0, 18.0), item("B", 10, 50.0, 2.0)];
        let tagged = apply_performance_tags(&items, TagRuleSet::StackedAbsolute);
        assert_eq!(
            labels(&tagged)[0],
            Some("Hot Seller + Premium Performer + High Revenue Driver".to_string())
        );
        // Kind reflects the first matching rule.
        assert_eq!(tagged[0].performance_tag.as_ref().map(|t| t.kind), Some(TagKind::Hot));
    }

    #[test]
    fn stacked_premium_needs_absolute_volume() {
        // 40 units clears the exclusive rule's relative bar but not the
        // stacked rule's absolute one.
        let items = vec![item("A", 100, 2000.0, 2.0), item("B", 40, 700.0, 18.0)];
        let exclusive = apply_performance_tags(&items, TagRuleSet::PriorityExclusive);
        assert_eq!(labels(&exclusive)[1], Some("Premium Performer".to_string()));
        let stacked = apply_performance_tags(&items, TagRuleSet::StackedAbsolute);
        assert_eq!(labels(&stacked)[1], None);
    }
}
