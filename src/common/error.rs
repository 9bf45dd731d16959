// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;

// Erros do motor de cálculo. São sempre fatais para a computação corrente:
// nenhum resultado parcial é devolvido.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Período inválido: fim ({fim}) anterior ao início ({inicio})")]
    InvalidPeriod { inicio: NaiveDate, fim: NaiveDate },

    #[error("Cargo não suportado: '{0}'")]
    UnsupportedRole(String),

    #[error("Tabela de premiação inválida: {0}")]
    InvalidSchedule(String),
}

// Erros da camada de serviço/HTTP.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Engine(#[from] EngineError),

    // A busca externa falhou: o motor nem chega a ser chamado.
    #[error("Falha ao buscar dados externos: {0}")]
    FetchFailed(#[source] anyhow::Error),

    #[error("Cálculo substituído por uma requisição mais recente")]
    Superseded,

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .map(|e| e.message.as_ref().map(|m| m.to_string()).unwrap_or_else(|| e.code.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::Engine(EngineError::UnsupportedRole(role)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("O cargo '{}' não possui regra de premiação.", role),
            ),
            AppError::Engine(ref e @ EngineError::InvalidPeriod { .. }) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Superseded => (
                StatusCode::CONFLICT,
                "Uma requisição mais recente para o mesmo colaborador, período e loja substituiu esta.".to_string(),
            ),
            AppError::FetchFailed(ref e) => {
                tracing::warn!("Falha na busca de dados externos: {:#}", e);
                (StatusCode::BAD_GATEWAY, "Não foi possível obter os dados de vendas.".to_string())
            }

            // Tabela inválida e erros internos viram 500.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_role_maps_to_422() {
        let response = AppError::from(EngineError::UnsupportedRole("inexistente".into())).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn superseded_maps_to_409() {
        assert_eq!(AppError::Superseded.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn invalid_period_message_names_both_dates() {
        let err = EngineError::InvalidPeriod {
            inicio: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            fim: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2024-03-31"));
        assert!(msg.contains("2024-03-01"));
    }
}
