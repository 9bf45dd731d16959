// src/models/sales.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::math::somar;

// Linha de venda já agregada por (colaborador, loja, dia, grupo de produto),
// como chega da API de vendas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    #[schema(example = 4512)]
    pub employee_code: u32, // Matrícula de quem vendeu

    #[schema(example = 27)]
    pub store_code: u32,

    pub date: NaiveDate,

    #[schema(example = 20)]
    pub product_group_code: u32,

    #[schema(example = "1530.90")]
    pub total_value: Decimal,

    #[schema(example = "42")]
    pub total_quantity: Decimal,
}

// Acumulado de uma categoria
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryValue {
    pub valor: Decimal,
    pub quantidade: Decimal,
}

impl CategoryValue {
    pub fn somar(&mut self, registro: &SalesRecord) {
        self.valor = somar(self.valor, registro.total_value);
        self.quantidade = somar(self.quantidade, registro.total_quantity);
    }
}

/// Categoria -> acumulado. Uma instância por árvore (individual ou loja).
pub type CategoryTotals = BTreeMap<String, CategoryValue>;

/// Categoria -> meta mensal.
pub type Targets = BTreeMap<String, Decimal>;
