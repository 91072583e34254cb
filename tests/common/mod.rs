#![allow(dead_code)]

use chrono::NaiveDate;
use interchain_metrics::source::RawEvent;
use serde_json::{json, Value};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Builder for raw warehouse events
pub struct EventBuilder {
    id: String,
    created_at: String,
    data: Value,
}

impl EventBuilder {
    pub fn new(id: &str, created_at: &str) -> Self {
        Self {
            id: id.to_string(),
            created_at: created_at.to_string(),
            data: json!({
                "symbol": "ATH",
                "amount": 0,
                "call": {
                    "chain": "ethereum",
                    "transaction": { "from": "0xsender" },
                    "returnValues": {
                        "destinationChain": "arbitrum",
                        "destinationContractAddress": "0xreceiver"
                    }
                }
            }),
        }
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.data["amount"] = json!(amount);
        self
    }

    pub fn value(mut self, value: f64) -> Self {
        self.data["value"] = json!(value);
        self
    }

    pub fn symbol(mut self, symbol: &str) -> Self {
        self.data["symbol"] = json!(symbol);
        self
    }

    pub fn sender(mut self, sender: &str) -> Self {
        self.data["call"]["transaction"]["from"] = json!(sender);
        self
    }

    pub fn route(mut self, source: &str, destination: &str) -> Self {
        self.data["call"]["chain"] = json!(source);
        self.data["call"]["returnValues"]["destinationChain"] = json!(destination);
        self
    }

    pub fn gas(mut self, gas_used: f64, token_price_usd: f64) -> Self {
        self.data["gas"] = json!({ "gas_used_amount": gas_used });
        self.data["gas_price_rate"] = json!({
            "source_token": { "token_price": { "usd": token_price_usd } }
        });
        self
    }

    pub fn express_fee(mut self, fee: f64) -> Self {
        self.data["fees"] = json!({ "express_fee_usd": fee });
        self
    }

    pub fn build(self) -> RawEvent {
        RawEvent {
            created_at: Some(json!(self.created_at)),
            id: Some(self.id),
            data: self.data,
        }
    }
}

pub fn event(id: &str, created_at: &str, amount: f64) -> EventBuilder {
    EventBuilder::new(id, created_at).amount(amount)
}
