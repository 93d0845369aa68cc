use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, ActiveValue::Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Kind of track fitting an item row describes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ItemType {
    #[sea_orm(string_value = "wooden-sleeper")]
    WoodenSleeper,
    #[sea_orm(string_value = "concrete-sleeper")]
    ConcreteSleeper,
    #[sea_orm(string_value = "rail-liner")]
    RailLiner,
    #[sea_orm(string_value = "rail-pad")]
    RailPad,
    #[sea_orm(string_value = "elastic-rail-clip")]
    ElasticRailClip,
}

impl ItemType {
    /// Human-readable label used by distribution views.
    pub fn label(self) -> &'static str {
        match self {
            ItemType::WoodenSleeper => "Wooden Sleeper",
            ItemType::ConcreteSleeper => "Concrete Sleeper",
            ItemType::RailLiner => "Rail Liner",
            ItemType::RailPad => "Rail Pad",
            ItemType::ElasticRailClip => "Elastic Rail Clip",
        }
    }
}

/// Physical condition recorded for an item or an inspection.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConditionStatus {
    #[sea_orm(string_value = "excellent")]
    Excellent,
    #[default]
    #[sea_orm(string_value = "good")]
    Good,
    #[sea_orm(string_value = "fair")]
    Fair,
    #[sea_orm(string_value = "poor")]
    Poor,
}

/// The `items` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub item_type: ItemType,
    pub vendor_name: String,
    pub supply_date: DateTime<Utc>,
    /// Warranty length in months.
    pub warranty_period: i32,
    /// Set once at creation from `supply_date + warranty_period`.
    pub warranty_expiry_date: DateTime<Utc>,
    pub last_inspection_date: Option<DateTime<Utc>>,
    pub condition_status: ConditionStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub inspection_notes: Option<String>,
    pub qr_code_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; rows with a value are invisible to every read.
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inspection::Entity")]
    Inspections,
}

impl Related<super::inspection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inspections.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        let now = Utc::now();

        if insert {
            if active_model.created_at.is_not_set() {
                active_model.created_at = Set(now);
            }
            if active_model.updated_at.is_not_set() {
                active_model.updated_at = Set(now);
            }
        } else {
            active_model.updated_at = Set(now);
        }

        Ok(active_model)
    }
}

/// Path under which the QR payload of an item is served.
pub fn qr_code_path(id: Uuid) -> String {
    format!("/api/qr/{}", id)
}
