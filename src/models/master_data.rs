// src/models/master_data.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct City {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Area {
    pub id: i64,
    pub name: String,
    pub city_id: Option<i64>,
}

/// Select option for form dropdowns
#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub value: i64,
    pub label: String,
}

impl From<&City> for SelectOption {
    fn from(city: &City) -> Self {
        SelectOption {
            value: city.id,
            label: city.name.clone(),
        }
    }
}

impl From<&Area> for SelectOption {
    fn from(area: &Area) -> Self {
        SelectOption {
            value: area.id,
            label: area.name.clone(),
        }
    }
}
