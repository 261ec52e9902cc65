use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::model::UserRef;

use super::Id;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    pub price: f64,
    pub location: Location,
    pub features: Features,
    #[serde(default)]
    pub images: Vec<String>,
    pub owner: UserRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<UserRef>,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Studio,
    Commercial,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Studio,
        PropertyType::Commercial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Studio => "studio",
            PropertyType::Commercial => "commercial",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "House",
            PropertyType::Studio => "Studio",
            PropertyType::Commercial => "Commercial",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    pub bedrooms: u32,
    pub bathrooms: u32,
    /// Surface in square meters.
    pub area: f64,
    #[serde(default)]
    pub furnished: bool,
}

/// List-view filters, mapped one-to-one onto query parameters.
#[derive(Clone, Debug, Default)]
pub struct PropertyFilter {
    pub kind: Option<PropertyType>,
    pub city: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub bedrooms: Option<u32>,
}

impl PropertyFilter {
    pub(super) fn to_query(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", page.to_string()),
            ("limit", super::PAGE_SIZE.to_string()),
        ];
        if let Some(kind) = self.kind {
            query.push(("type", kind.as_str().to_owned()));
        }
        if let Some(city) = &self.city {
            query.push(("city", city.clone()));
        }
        if let Some(min) = self.min_price {
            query.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            query.push(("maxPrice", max.to_string()));
        }
        if let Some(bedrooms) = self.bedrooms {
            query.push(("bedrooms", bedrooms.to_string()));
        }
        query
    }
}

/// Create/update payload; the server fills in ids, ownership and timestamps.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    pub price: f64,
    pub location: Location,
    pub features: Features,
}
