// src/models/insight.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severidade {
    Critico, // Vira "CRITICO"
    Atencao, // Vira "ATENCAO"
    Sucesso, // Vira "SUCESSO"
}

impl Severidade {
    pub fn cor(&self) -> &'static str {
        match self {
            Severidade::Critico => "#dc2626",
            Severidade::Atencao => "#f59e0b",
            Severidade::Sucesso => "#16a34a",
        }
    }

    pub fn icone(&self) -> &'static str {
        match self {
            Severidade::Critico => "alert-octagon",
            Severidade::Atencao => "alert-triangle",
            Severidade::Sucesso => "trending-up",
        }
    }
}

// Recomendação derivada do ritmo. Não é persistida.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    #[schema(example = "r_mais")]
    pub categoria: String,
    #[schema(example = "R+ abaixo do ritmo")]
    pub titulo: String,
    pub descricao: String,
    pub severidade: Severidade,
    #[schema(example = "#dc2626")]
    pub cor: String,
    #[schema(example = "alert-octagon")]
    pub icone: String,
}
