// src/models/premiacao.rs

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::error::EngineError;

// --- Cargos ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Cargo {
    Gerente,
    Lider,
    Farmaceutico,
    Auxiliar,
    Consultora,
    Aux1,
    Fiscal,
    Zelador,
    AuxConveniencia,
}

impl Cargo {
    pub const TODOS: [Cargo; 9] = [
        Cargo::Gerente,
        Cargo::Lider,
        Cargo::Farmaceutico,
        Cargo::Auxiliar,
        Cargo::Consultora,
        Cargo::Aux1,
        Cargo::Fiscal,
        Cargo::Zelador,
        Cargo::AuxConveniencia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Cargo::Gerente => "gerente",
            Cargo::Lider => "lider",
            Cargo::Farmaceutico => "farmaceutico",
            Cargo::Auxiliar => "auxiliar",
            Cargo::Consultora => "consultora",
            Cargo::Aux1 => "aux1",
            Cargo::Fiscal => "fiscal",
            Cargo::Zelador => "zelador",
            Cargo::AuxConveniencia => "aux_conveniencia",
        }
    }
}

impl fmt::Display for Cargo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// O cadastro de colaboradores grava o cargo como texto livre
// ("Farmacêutico", "AUX CONVENIÊNCIA", "lider"...).
impl FromStr for Cargo {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalizado: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| match c {
                'á' | 'à' | 'â' | 'ã' => 'a',
                'é' | 'ê' => 'e',
                'í' => 'i',
                'ó' | 'ô' | 'õ' => 'o',
                'ú' => 'u',
                'ç' => 'c',
                ' ' | '-' => '_',
                other => other,
            })
            .collect();

        match normalizado.as_str() {
            "gerente" => Ok(Cargo::Gerente),
            "lider" => Ok(Cargo::Lider),
            "farmaceutico" => Ok(Cargo::Farmaceutico),
            "auxiliar" => Ok(Cargo::Auxiliar),
            "consultora" => Ok(Cargo::Consultora),
            "aux1" => Ok(Cargo::Aux1),
            "fiscal" => Ok(Cargo::Fiscal),
            "zelador" => Ok(Cargo::Zelador),
            "aux_conveniencia" | "auxconveniencia" => Ok(Cargo::AuxConveniencia),
            _ => Err(EngineError::UnsupportedRole(s.trim().to_string())),
        }
    }
}

// --- Ritmo ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RitmoStatus {
    Ahead,   // Vira "ahead"
    OnPace,  // Vira "on-pace"
    Caution, // Vira "caution"
    Behind,  // Vira "behind"
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RitmoCategoria {
    #[schema(example = "geral")]
    pub categoria: String,
    pub valor: Decimal,
    pub meta: Decimal,
    pub percent_complete: Decimal,
    pub percent_time_elapsed: Decimal,
    pub ratio: Decimal,
    pub status: RitmoStatus,
}

// --- Projeção ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub valor_atual: Decimal,
    pub meta: Decimal,
    pub percentual_atual: Decimal,
    pub valor_projetado: Decimal,
    pub percentual_projetado: Decimal,
    pub faltante: Decimal,          // Quanto falta para a meta (nunca negativo)
    pub necessario_por_dia: Decimal, // faltante / dias úteis restantes
}

// --- Resultado da Premiação ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PremiacaoResult {
    #[schema(example = "1400")]
    pub base_calculo: Decimal,
    pub multiplicadores: BTreeMap<String, Decimal>,
    pub premiacoes: BTreeMap<String, Decimal>,
    pub premiacao_atual: Decimal,
    pub premiacao_projetada: Decimal,
    pub premiacao_maxima: Decimal,
    // Bônus (e não comissão pura): a apresentação rotula diferente
    pub is_bonus: bool,
}
