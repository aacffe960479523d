use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::business::BusinessType;

/// Closed set of intents the keyword classifier can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicLabel {
    Menu,
    Hours,
    Location,
    Contact,
    Properties,
    Agents,
    Unknown,
}

impl TopicLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Hours => "hours",
            Self::Location => "location",
            Self::Contact => "contact",
            Self::Properties => "properties",
            Self::Agents => "agents",
            Self::Unknown => "unknown",
        }
    }

    /// Knowledge-document key this topic reads from. `Unknown` reads nothing.
    pub fn document_key(&self) -> Option<&'static str> {
        match self {
            Self::Unknown => None,
            other => Some(other.as_str()),
        }
    }
}

/// Value shape a topic query resolved to. `NotAvailable` stands in for both
/// a missing document key and the `Unknown` topic.
#[derive(Clone, Debug, PartialEq)]
pub enum AnswerPayload {
    Text(String),
    Items(Vec<Value>),
    Document(Map<String, Value>),
    NotAvailable,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TopicAnswer {
    pub label: TopicLabel,
    pub payload: AnswerPayload,
}

impl TopicAnswer {
    pub fn not_available(label: TopicLabel) -> Self {
        Self { label, payload: AnswerPayload::NotAvailable }
    }

    /// Wire shape used by the admin knowledge endpoints: `{"type", "data"}`.
    pub fn to_json(&self) -> Value {
        let data = match &self.payload {
            AnswerPayload::Text(text) => Value::String(text.clone()),
            AnswerPayload::Items(items) => Value::Array(items.clone()),
            AnswerPayload::Document(map) => Value::Object(map.clone()),
            AnswerPayload::NotAvailable => Value::Null,
        };
        json!({ "type": self.label.as_str(), "data": data })
    }
}

/// The business-fact document: a JSON mapping from topic key to value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeDocument(pub Map<String, Value>);

impl KnowledgeDocument {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Applies a partial document. Per top-level key: mapping into mapping
    /// merges key-by-key (recursively, so nested lists still concatenate),
    /// sequence into sequence concatenates, anything else replaces.
    pub fn merge(&mut self, partial: KnowledgeDocument) {
        for (key, new_value) in partial.0 {
            match self.0.get_mut(&key) {
                Some(existing) => merge_value(existing, new_value),
                None => {
                    self.0.insert(key, new_value);
                }
            }
        }
    }

    /// Canned document for a business deployment, used when no stored
    /// document exists yet.
    pub fn default_for(business_type: BusinessType) -> Self {
        let value = match business_type {
            BusinessType::Restaurant => json!({
                "menu": {
                    "appetizers": [
                        {"name": "Bruschetta", "price": 8.99, "description": "Toasted bread with tomatoes, garlic, and basil"},
                        {"name": "Calamari", "price": 12.99, "description": "Fried squid rings with marinara sauce"},
                        {"name": "Wings", "price": 10.99, "description": "Buffalo wings with blue cheese dressing"}
                    ],
                    "main_courses": [
                        {"name": "Pasta Carbonara", "price": 16.99, "description": "Spaghetti with pancetta, egg, and parmesan"},
                        {"name": "Grilled Salmon", "price": 22.99, "description": "Fresh salmon with lemon butter sauce"},
                        {"name": "Beef Tenderloin", "price": 29.99, "description": "8oz tenderloin with mushroom sauce"}
                    ],
                    "desserts": [
                        {"name": "Tiramisu", "price": 7.99, "description": "Classic Italian dessert with coffee and mascarpone"},
                        {"name": "Chocolate Cake", "price": 6.99, "description": "Rich chocolate cake with ganache"},
                        {"name": "Ice Cream", "price": 5.99, "description": "Vanilla, chocolate, or strawberry"}
                    ]
                },
                "hours": "Monday-Sunday: 11am-10pm",
                "location": "123 Main St, Anytown, USA",
                "contact": "555-123-4567"
            }),
            BusinessType::RealEstate => json!({
                "properties": [
                    {
                        "id": "1",
                        "type": "House",
                        "address": "123 Oak St, Anytown, USA",
                        "price": 350000,
                        "bedrooms": 3,
                        "bathrooms": 2,
                        "square_feet": 2000,
                        "description": "Beautiful family home with large backyard"
                    },
                    {
                        "id": "2",
                        "type": "Apartment",
                        "address": "456 Pine Ave, Anytown, USA",
                        "price": 250000,
                        "bedrooms": 2,
                        "bathrooms": 1,
                        "square_feet": 1200,
                        "description": "Modern apartment in downtown area"
                    },
                    {
                        "id": "3",
                        "type": "Condo",
                        "address": "789 Maple Dr, Anytown, USA",
                        "price": 300000,
                        "bedrooms": 2,
                        "bathrooms": 2,
                        "square_feet": 1500,
                        "description": "Luxury condo with city views"
                    }
                ],
                "agents": [
                    {"name": "John Smith", "phone": "555-123-4567", "email": "john@example.com"},
                    {"name": "Jane Doe", "phone": "555-987-6543", "email": "jane@example.com"}
                ],
                "office_hours": "Monday-Friday: 9am-5pm, Saturday: 10am-2pm",
                "location": "789 Real Estate Ave, Anytown, USA",
                "contact": "555-555-5555"
            }),
        };

        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

fn merge_value(existing: &mut Value, new_value: Value) {
    match (existing, new_value) {
        (Value::Object(old), Value::Object(new)) => {
            for (key, value) in new {
                match old.get_mut(&key) {
                    Some(slot) => merge_value(slot, value),
                    None => {
                        old.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(old), Value::Array(new)) => {
            old.extend(new);
        }
        (slot, new) => {
            *slot = new;
        }
    }
}
