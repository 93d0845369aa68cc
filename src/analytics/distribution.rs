use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use utoipa::ToSchema;

use crate::entities::item::{self, ItemType};

pub const TOP_VENDORS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeShare {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub label: String,
    pub count: u64,
    /// Rounded share of all live items, 0..=100.
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorVolume {
    pub vendor: String,
    pub item_count: u64,
}

pub fn type_distribution(items: &[item::Model]) -> Vec<TypeShare> {
    let mut counts: BTreeMap<ItemType, u64> = BTreeMap::new();
    for item in items.iter().filter(|i| i.deleted_at.is_none()) {
        *counts.entry(item.item_type).or_default() += 1;
    }
    let total: u64 = counts.values().sum();

    let mut shares: Vec<TypeShare> = counts
        .into_iter()
        .map(|(item_type, count)| TypeShare {
            item_type,
            label: item_type.label().to_string(),
            count,
            percentage: if total == 0 {
                0
            } else {
                ((count as f64 / total as f64) * 100.0).round() as u32
            },
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then(a.item_type.cmp(&b.item_type)));
    shares
}

/// Vendors by supplied item count, largest first, ties by name.
pub fn vendor_performance(items: &[item::Model]) -> Vec<VendorVolume> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for item in items.iter().filter(|i| i.deleted_at.is_none()) {
        *counts.entry(item.vendor_name.as_str()).or_default() += 1;
    }

    let mut volumes: Vec<VendorVolume> = counts
        .into_iter()
        .map(|(vendor, item_count)| VendorVolume {
            vendor: vendor.to_string(),
            item_count,
        })
        .collect();
    volumes.sort_by(|a, b| {
        b.item_count
            .cmp(&a.item_count)
            .then_with(|| a.vendor.cmp(&b.vendor))
    });
    volumes.truncate(TOP_VENDORS);
    volumes
}
