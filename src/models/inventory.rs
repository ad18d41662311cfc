use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::enums::StockType;
use super::page::Page;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub product_name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock_type: Option<StockType>,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub quantity_in_stock: i64,
    #[serde(default)]
    pub reorder_level: Option<i64>,
    #[serde(default)]
    pub use_in_trial: bool,
    #[serde(default)]
    pub status: Option<String>,
}

impl InventoryItem {
    /// At or below the reorder threshold.
    pub fn needs_reorder(&self) -> bool {
        self.reorder_level
            .is_some_and(|level| self.quantity_in_stock <= level)
    }
}

/// Inventory list page with the stock-level counters shown on the
/// inventory screen.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InventoryPage {
    #[serde(flatten)]
    pub page: Page<InventoryItem>,
    #[serde(default)]
    pub low_count: u64,
    #[serde(default)]
    pub critical_count: u64,
}

/// Option of the "book a device" dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceOption {
    pub id: i64,
    pub label: String,
    pub brand: Option<String>,
    pub price: Option<f64>,
}

impl From<InventoryItem> for DeviceOption {
    fn from(item: InventoryItem) -> Self {
        Self {
            id: item.id,
            label: item.product_name,
            brand: item.brand,
            price: item.unit_price,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub product_name: String,
    pub brand: String,
    pub model_type: String,
    pub category: String,
    pub stock_type: Option<StockType>,
    pub unit_price: Option<f64>,
    pub reorder_level: Option<i64>,
    pub use_in_trial: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_in_trial: Option<bool>,
}

/// Stock added to an item: serial numbers for serialized items,
/// a plain quantity otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StockEntry {
    Serialized {
        inventory_item: i64,
        serial_numbers: Vec<String>,
    },
    Quantity {
        inventory_item: i64,
        quantity: u32,
    },
}

/// Filters for the inventory list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryQuery {
    pub page: u32,
    pub status: Option<String>,
    pub clinic_id: Option<i64>,
    pub use_in_trial: bool,
}

/// Option of a category/brand/model dropdown.
///
/// Categories arrive as bare strings, brands and models as
/// `{"id", "name"}` objects; both decode here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogOption {
    pub id: Option<i64>,
    pub name: String,
}

impl<'de> Deserialize<'de> for CatalogOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Name(String),
            Entry { id: Option<i64>, name: String },
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Name(name) => Self { id: None, name },
            Raw::Entry { id, name } => Self { id, name },
        })
    }
}

/// Dropdown contents for the item form; absent lists decode empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryCatalog {
    #[serde(default)]
    pub categories: Vec<CatalogOption>,
    #[serde(default)]
    pub brands: Vec<CatalogOption>,
    #[serde(default)]
    pub models: Vec<CatalogOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewBrand {
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewModel {
    pub name: String,
    pub category: String,
    pub brand: i64,
}

/// One movement of stock between clinics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTransfer {
    pub id: i64,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub from_clinic: Option<String>,
    #[serde(default)]
    pub to_clinic: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub transferred_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inventory_page_reads_counters() {
        let page: InventoryPage = serde_json::from_value(json!({
            "nextPage": -1, "previousPage": -1, "totalItems": 1, "totalPages": 1,
            "low_count": 2, "critical_count": 1,
            "data": [{"id": 3, "product_name": "Receiver", "quantity_in_stock": 1, "reorder_level": 5}]
        }))
        .unwrap();
        assert_eq!(page.low_count, 2);
        assert_eq!(page.critical_count, 1);
        assert!(page.page.data[0].needs_reorder());
    }

    #[test]
    fn catalog_accepts_names_and_entries() {
        let catalog: InventoryCatalog = serde_json::from_value(json!({
            "categories": ["Hearing Aid", "Accessory"],
            "brands": [{"id": 2, "name": "Phonak"}]
        }))
        .unwrap();
        assert_eq!(catalog.categories[1], CatalogOption { id: None, name: "Accessory".into() });
        assert_eq!(catalog.brands[0].id, Some(2));
        assert!(catalog.models.is_empty());
    }

    #[test]
    fn stock_entry_wire_shapes() {
        let serialized = StockEntry::Serialized {
            inventory_item: 4,
            serial_numbers: vec!["S1".into()],
        };
        assert_eq!(
            serde_json::to_value(&serialized).unwrap(),
            json!({"inventory_item": 4, "serial_numbers": ["S1"]})
        );
        let quantity = StockEntry::Quantity { inventory_item: 4, quantity: 10 };
        assert_eq!(
            serde_json::to_value(&quantity).unwrap(),
            json!({"inventory_item": 4, "quantity": 10})
        );
    }
}
