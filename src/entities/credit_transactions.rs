use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "credit_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    /// Open string in the store: purchase / redeem / adjustment / refund /
    /// chargeback, read as free text.
    pub transaction_type: String,
    pub amount: i64,
    /// Package price in dollars; absent for non-purchase rows and for
    /// custom-priced purchases.
    pub price: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
