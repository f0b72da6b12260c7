use std::env;

use crate::pricing::{PriceTable, UNIT_PRICE};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub admin_password: String,
    pub session_secret: String,
    pub bulk_min_quantity: Option<i64>,
    pub bulk_unit_price: Option<f64>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let admin_password = env::var("ADMIN_PASSWORD")?;
        let session_secret = env::var("SESSION_SECRET")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let bulk_min_quantity = env::var("BULK_MIN_QTY")
            .ok()
            .and_then(|v| v.parse::<i64>().ok());
        let bulk_unit_price = env::var("BULK_UNIT_PRICE")
            .ok()
            .and_then(|v| v.parse::<f64>().ok());
        Ok(Self {
            database_url,
            host,
            port,
            admin_password,
            session_secret,
            bulk_min_quantity,
            bulk_unit_price,
        })
    }

    /// Flat per-unit price unless a bulk tier is configured.
    pub fn price_table(&self) -> PriceTable {
        match (self.bulk_min_quantity, self.bulk_unit_price) {
            (Some(min_quantity), Some(unit_price)) => {
                PriceTable::with_bulk_tier(UNIT_PRICE, min_quantity, unit_price)
            }
            _ => PriceTable::default(),
        }
    }
}
