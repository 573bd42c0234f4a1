//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle state
///
/// The only legal transition is `Pendiente` → `Listo`; orders are never
/// reverted and there is no other state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pendiente,
    Listo,
}

impl OrderStatus {
    /// Wire representation, matches the `estado` column values
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendiente => "pendiente",
            Self::Listo => "listo",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity (row in the `pedido` table)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Store-assigned ID (`pedido:<key>` format)
    pub id: String,
    /// Human-facing sequence number, cashier-assigned.
    /// Not unique: the counter is local to the cashier station.
    pub numero: i64,
    /// Customer name
    pub nombre: String,
    /// Free-form order contents
    pub detalles: String,
    /// Lifecycle state
    pub estado: OrderStatus,
    /// Set by the store at insert
    pub created_at: DateTime<Utc>,
    /// Refreshed by the store on each mutation
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn is_pending(&self) -> bool {
        self.estado == OrderStatus::Pendiente
    }

    pub fn is_ready(&self) -> bool {
        self.estado == OrderStatus::Listo
    }
}

/// Insert payload for a new order
///
/// `estado` is not part of the draft: every order is created `pendiente`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDraft {
    pub numero: i64,
    pub nombre: String,
    pub detalles: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estado_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pendiente).unwrap(),
            "\"pendiente\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Listo).unwrap(),
            "\"listo\""
        );
    }

    #[test]
    fn estado_roundtrip() {
        let estado: OrderStatus = serde_json::from_str("\"listo\"").unwrap();
        assert_eq!(estado, OrderStatus::Listo);
        assert_eq!(estado.as_str(), "listo");
    }

    #[test]
    fn order_json_shape() {
        let json = serde_json::json!({
            "id": "pedido:abc",
            "numero": 7,
            "nombre": "Ana",
            "detalles": "2 tacos",
            "estado": "pendiente",
            "created_at": "2025-01-22T10:00:00Z",
            "updated_at": "2025-01-22T10:00:00Z"
        });
        let order: Order = serde_json::from_value(json).unwrap();
        assert!(order.is_pending());
        assert_eq!(order.numero, 7);
    }
}
