use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::item::{self, ItemType};
use crate::errors::ServiceError;
use crate::repositories::InventoryStore;

/// What an item's QR tag encodes. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QrPayload {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub vendor: String,
}

impl From<&item::Model> for QrPayload {
    fn from(item: &item::Model) -> Self {
        Self {
            id: item.id,
            item_type: item.item_type,
            vendor: item.vendor_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    /// Image reference produced by the configured encoder.
    pub qr_code: String,
    pub data: QrPayload,
}

/// Turns the serialized payload into something a client can render.
pub trait QrEncoder: Send + Sync {
    fn encode(&self, payload: &str) -> Result<String, ServiceError>;
}

/// `data:` URI carrying the payload itself; clients draw the QR image locally.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUriEncoder;

impl QrEncoder for DataUriEncoder {
    fn encode(&self, payload: &str) -> Result<String, ServiceError> {
        Ok(format!(
            "data:application/json;base64,{}",
            STANDARD.encode(payload.as_bytes())
        ))
    }
}

#[derive(Clone)]
pub struct QrService {
    store: Arc<dyn InventoryStore>,
    encoder: Arc<dyn QrEncoder>,
}

impl QrService {
    pub fn new(store: Arc<dyn InventoryStore>, encoder: Arc<dyn QrEncoder>) -> Self {
        Self { store, encoder }
    }

    #[instrument(skip(self))]
    pub async fn qr_for_item(&self, id: Uuid) -> Result<QrCode, ServiceError> {
        let item = self
            .store
            .get_item(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", id)))?;
        let data = QrPayload::from(&item);
        let serialized = serde_json::to_string(&data)?;
        Ok(QrCode {
            qr_code: self.encoder.encode(&serialized)?,
            data,
        })
    }
}
