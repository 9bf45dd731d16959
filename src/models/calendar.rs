// src/models/calendar.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Dias úteis do período, já descontadas ausências e domingos (região centro).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkCalendar {
    #[schema(example = 26)]
    pub total_work_days: u32,
    #[schema(example = 13)]
    pub elapsed_work_days: u32,
    #[schema(example = 13)]
    pub remaining_work_days: u32,
    #[schema(example = "50")]
    pub percent_time_elapsed: Decimal,
}

// Tempo de casa
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tenure {
    pub anos: u32,
    pub meses: u32, // 0..=11, complementa os anos
}

impl Tenure {
    pub fn from_total_meses(total: u32) -> Self {
        Self { anos: total / 12, meses: total % 12 }
    }

    pub fn total_meses(&self) -> u32 {
        self.anos * 12 + self.meses
    }
}
