// src/models/property.rs
// DOCUMENTATION: Property listings shown on the public site
// PURPOSE: API record, listing card, detail view and map feature

use chrono::{DateTime, Utc};
use geo_types::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{format_amount, format_date, lenient_enum, ImageResolver, NamedRef};

/// Listing purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Sale,
    Rent,
}

impl Purpose {
    pub fn label(&self) -> &'static str {
        match self {
            Purpose::Sale => "للبيع",
            Purpose::Rent => "للإيجار",
        }
    }
}

/// Agent summary pre-joined on a property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentContact {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
}

/// Property record from /properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub purpose: Option<Purpose>,
    pub property_type: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area_sqm: Option<f64>,
    pub city: Option<NamedRef>,
    pub area: Option<NamedRef>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub agent: Option<AgentContact>,
    #[serde(default)]
    pub is_featured: bool,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Listing card for the properties grid and favorites page
#[derive(Debug, Clone, Serialize)]
pub struct PropertyCard {
    pub id: i64,
    pub title: String,
    pub price_label: String,
    pub purpose_label: &'static str,
    pub property_type: String,
    pub location: String,
    pub cover_url: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area_sqm: Option<f64>,
    pub is_featured: bool,
    pub is_favorite: bool,
}

/// Full property page
#[derive(Debug, Clone, Serialize)]
pub struct PropertyDetail {
    #[serde(flatten)]
    pub card: PropertyCard,
    pub description: String,
    pub address: String,
    pub gallery: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub agent: Option<AgentContact>,
    pub listed_at: Option<String>,
}

impl Property {
    /// Geographic point when both coordinates are present and in range
    pub fn point(&self) -> Option<Point<f64>> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng))
                if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) =>
            {
                Some(Point::new(lng, lat))
            }
            _ => None,
        }
    }

    /// "Area, City" or whichever part is known
    pub fn location_label(&self) -> String {
        [self.area.as_ref(), self.city.as_ref()]
            .into_iter()
            .flatten()
            .map(|r| r.name.as_str())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join("، ")
    }

    pub fn price_label(&self) -> String {
        match self.price {
            Some(price) if price > 0.0 => format!("{} ريال", format_amount(price)),
            _ => "السعر عند الطلب".to_string(),
        }
    }

    pub fn to_card(&self, images: &ImageResolver, is_favorite: bool) -> PropertyCard {
        let cover = self
            .cover_image
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str));

        PropertyCard {
            id: self.id,
            title: self.title.clone(),
            price_label: self.price_label(),
            purpose_label: self.purpose.map(|p| p.label()).unwrap_or(""),
            property_type: self.property_type.clone().unwrap_or_default(),
            location: self.location_label(),
            cover_url: images.resolve(cover),
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            area_sqm: self.area_sqm,
            is_featured: self.is_featured,
            is_favorite,
        }
    }

    pub fn to_detail(&self, images: &ImageResolver, is_favorite: bool) -> PropertyDetail {
        PropertyDetail {
            card: self.to_card(images, is_favorite),
            description: self.description.clone().unwrap_or_default(),
            address: self.address.clone().unwrap_or_default(),
            gallery: self
                .images
                .iter()
                .filter_map(|path| images.resolve(Some(path)))
                .collect(),
            latitude: self.latitude,
            longitude: self.longitude,
            agent: self.agent.clone(),
            listed_at: format_date(self.created_at),
        }
    }

    /// GeoJSON feature for the map view, None without coordinates
    pub fn to_feature(&self, images: &ImageResolver) -> Option<geojson::Feature> {
        let point = self.point()?;

        let mut properties = Map::new();
        properties.insert("title".to_string(), Value::from(self.title.clone()));
        properties.insert("price_label".to_string(), Value::from(self.price_label()));
        properties.insert(
            "cover_url".to_string(),
            images
                .resolve(self.cover_image.as_deref())
                .map(Value::from)
                .unwrap_or(Value::Null),
        );
        properties.insert("href".to_string(), Value::from(format!("/properties/{}", self.id)));

        Some(geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(&point))),
            id: Some(geojson::feature::Id::Number(self.id.into())),
            properties: Some(properties),
            foreign_members: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Property {
        serde_json::from_str(
            r#"{
                "id": 44,
                "title": "فيلا حديثة",
                "price": 2750000,
                "purpose": "sale",
                "property_type": "villa",
                "bedrooms": 5,
                "city": {"id": 1, "name": "الرياض"},
                "area": {"id": 9, "name": "الملقا"},
                "latitude": 24.8,
                "longitude": 46.6,
                "images": ["properties/44/a.jpg", "properties/44/b.jpg"]
            }"#,
        )
        .unwrap()
    }

    fn resolver() -> ImageResolver {
        ImageResolver::new("https://cdn.example.com", vec![])
    }

    #[test]
    fn unknown_purpose_keeps_the_rest_of_the_page() {
        let page: crate::models::Page<Property> = serde_json::from_str(
            r#"{
                "total_records": 2,
                "records": [
                    {"id": 1, "title": "شقة", "purpose": "sale"},
                    {"id": 2, "title": "أرض", "purpose": "investment"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[0].purpose, Some(Purpose::Sale));
        assert_eq!(page.records[1].purpose, None);
    }

    #[test]
    fn card_uses_first_image_when_no_cover() {
        let card = sample().to_card(&resolver(), true);
        assert_eq!(
            card.cover_url.as_deref(),
            Some("https://cdn.example.com/properties/44/a.jpg")
        );
        assert_eq!(card.location, "الملقا، الرياض");
        assert_eq!(card.price_label, "2,750,000 ريال");
        assert_eq!(card.purpose_label, "للبيع");
        assert!(card.is_favorite);
    }

    #[test]
    fn missing_price_reads_on_request() {
        let mut property = sample();
        property.price = None;
        assert_eq!(property.price_label(), "السعر عند الطلب");
    }

    #[test]
    fn feature_requires_valid_coordinates() {
        let property = sample();
        let feature = property.to_feature(&resolver()).unwrap();
        assert!(feature.geometry.is_some());

        let mut off_map = sample();
        off_map.latitude = Some(120.0);
        assert!(off_map.to_feature(&resolver()).is_none());
    }
}
