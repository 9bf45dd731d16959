// src/models/snapshot.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::{
    calendar::{Tenure, WorkCalendar},
    insight::Insight,
    premiacao::{Cargo, PremiacaoResult, Projection, RitmoCategoria},
    sales::{CategoryValue, SalesRecord},
};

// ---
// Validação Customizada
// ---
fn validate_metas(metas: &BTreeMap<String, Decimal>) -> Result<(), ValidationError> {
    if let Some((categoria, _)) = metas.iter().find(|(_, meta)| meta.is_sign_negative()) {
        let mut err = ValidationError::new("range");
        err.add_param("categoria".into(), categoria);
        err.message = Some(format!("A meta da categoria '{}' não pode ser negativa.", categoria).into());
        return Err(err);
    }
    Ok(())
}

// --- Entrada ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Periodo {
    #[validate(length(min = 1, message = "O identificador do período é obrigatório."))]
    #[schema(example = "2024-03")]
    pub id: String,
    pub inicio: NaiveDate,
    pub fim: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Loja {
    #[schema(example = 27)]
    pub codigo: u32,
    // "centro" fecha aos domingos
    #[serde(default)]
    #[schema(example = "centro")]
    pub regiao: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Colaborador {
    #[validate(length(min = 1, message = "O cargo é obrigatório."))]
    #[schema(example = "farmaceutico")]
    pub cargo: String,
    // Sem matrícula não há como atribuir vendas individuais
    #[schema(example = 4512)]
    pub matricula: Option<u32>,
    pub data_admissao: Option<NaiveDate>,
}

/// Fotografia completa dos dados de um cálculo (colaborador, período, loja),
/// já buscada pela camada externa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PremiacaoSnapshot {
    #[validate(nested)]
    pub periodo: Periodo,
    pub hoje: NaiveDate,
    #[serde(default)]
    pub has_sales_today: bool,
    #[validate(nested)]
    pub loja: Loja,
    #[validate(nested)]
    pub colaborador: Colaborador,
    #[serde(default)]
    pub vendas: Vec<SalesRecord>,
    #[serde(default)]
    #[validate(custom(function = "validate_metas"))]
    pub metas_individuais: BTreeMap<String, Decimal>,
    #[serde(default)]
    #[validate(custom(function = "validate_metas"))]
    pub metas_loja: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub ausencias: Vec<NaiveDate>,
    #[serde(default)]
    pub balanco: bool,
}

impl PremiacaoSnapshot {
    pub fn selecao(&self) -> SelectionKey {
        SelectionKey {
            matricula: self.colaborador.matricula,
            periodo: self.periodo.id.clone(),
            loja: self.loja.codigo,
        }
    }
}

// Chave de uma computação: (colaborador, período, loja)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectionKey {
    pub matricula: Option<u32>,
    pub periodo: String,
    pub loja: u32,
}

// --- Saída ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArvoreResultado {
    pub totais: BTreeMap<String, CategoryValue>,
    pub metas: BTreeMap<String, Decimal>,
    pub projecoes: BTreeMap<String, Projection>,
    pub ritmo: BTreeMap<String, RitmoCategoria>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PremiacaoBundle {
    pub selecao: SelectionKey,
    pub cargo: Cargo,
    pub calendario: WorkCalendar,
    pub tempo_de_casa: Tenure,
    // Só as árvores que o cargo exige são montadas
    pub individual: Option<ArvoreResultado>,
    pub loja: Option<ArvoreResultado>,
    pub premiacao: PremiacaoResult,
    pub insights: Vec<Insight>,
    // Degradações não fatais (ex.: matrícula ausente)
    pub avisos: Vec<String>,
}
