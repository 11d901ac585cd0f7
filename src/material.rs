use crate::error::{AppError, Result};
use crate::lenient::{self, string_enum};
use serde::{Deserialize, Serialize};

string_enum! {
    pub enum MaterialCategory {
        Basic => "Básico",
        Steel => "Ferro",
        Masonry => "Alvenaria",
        Plumbing => "Hidráulica",
        Electrical => "Elétrica",
        Finishing => "Acabamento",
        Other => "Outros",
    }
    default Other
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub unit: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub unit_price: f64,
    /// Reorder threshold.
    #[serde(default, deserialize_with = "lenient::number")]
    pub min_quantity: f64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub supplier: String,
    #[serde(default)]
    pub category: MaterialCategory,
}

impl Material {
    /// Inclusive: stock sitting exactly at the threshold already needs reordering.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }

    pub fn total_value(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Material form input. `min_quantity` and `supplier` may be left blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialInput {
    pub name: String,
    #[serde(deserialize_with = "lenient::number")]
    pub quantity: f64,
    pub unit: String,
    #[serde(deserialize_with = "lenient::number")]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub min_quantity: Option<f64>,
    #[serde(default)]
    pub supplier: Option<String>,
    pub category: MaterialCategory,
}

impl MaterialInput {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid("material name cannot be empty"));
        }
        if self.unit.trim().is_empty() {
            return Err(AppError::invalid("material unit cannot be empty"));
        }
        if self.quantity < 0.0 {
            return Err(AppError::invalid("quantity cannot be negative"));
        }
        if self.unit_price < 0.0 {
            return Err(AppError::invalid("unit price cannot be negative"));
        }
        if self.min_quantity.is_some_and(|min| min < 0.0) {
            return Err(AppError::invalid("minimum quantity cannot be negative"));
        }
        Ok(())
    }

    pub fn into_material(self, id: String) -> Material {
        Material {
            id,
            name: self.name.trim().to_string(),
            quantity: self.quantity,
            unit: self.unit.trim().to_string(),
            unit_price: self.unit_price,
            min_quantity: self.min_quantity.unwrap_or(0.0),
            supplier: self.supplier.unwrap_or_default().trim().to_string(),
            category: self.category,
        }
    }
}
