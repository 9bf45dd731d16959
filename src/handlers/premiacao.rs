// src/handlers/premiacao.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    engine::rules::RegrasPremiacao,
    models::snapshot::{PremiacaoBundle, PremiacaoSnapshot},
    sources::SnapshotSource,
};

// POST /api/premiacao/calcular
#[utoipa::path(
    post,
    path = "/api/premiacao/calcular",
    tag = "Premiação",
    request_body = PremiacaoSnapshot,
    responses(
        (status = 200, description = "Premiação calculada", body = PremiacaoBundle),
        (status = 400, description = "Dados inválidos ou período com fim antes do início"),
        (status = 409, description = "Substituída por uma requisição mais recente da mesma seleção"),
        (status = 422, description = "Cargo sem regra de premiação")
    )
)]
pub async fn calcular_premiacao(
    State(app_state): State<AppState>,
    Json(payload): Json<PremiacaoSnapshot>,
) -> Result<Json<PremiacaoBundle>, AppError> {
    payload.validate()?;

    let selecao = payload.selecao();
    let source = SnapshotSource::new(payload);

    let bundle = app_state
        .premiacao_service
        .calcular(&source, selecao)
        .await?
        .ok_or(AppError::Superseded)?;

    Ok(Json(bundle))
}

// GET /api/premiacao/regras
#[utoipa::path(
    get,
    path = "/api/premiacao/regras",
    tag = "Premiação",
    responses(
        (status = 200, description = "Tabelas de premiação em uso", body = RegrasPremiacao)
    )
)]
pub async fn get_regras(State(app_state): State<AppState>) -> Json<RegrasPremiacao> {
    Json(app_state.premiacao_service.engine().regras().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        sales::Targets,
        snapshot::{Colaborador, Loja, Periodo},
    };
    use axum::{http::StatusCode, response::IntoResponse};
    use chrono::NaiveDate;

    fn payload(cargo: &str) -> PremiacaoSnapshot {
        let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
        PremiacaoSnapshot {
            periodo: Periodo { id: "2024-03".into(), inicio: d(3, 1), fim: d(3, 31) },
            hoje: d(3, 10),
            has_sales_today: true,
            loja: Loja { codigo: 8, regiao: "sul".into() },
            colaborador: Colaborador { cargo: cargo.into(), matricula: Some(101), data_admissao: None },
            vendas: vec![],
            metas_individuais: Targets::new(),
            metas_loja: Targets::new(),
            ausencias: vec![],
            balanco: false,
        }
    }

    #[tokio::test]
    async fn calculates_for_known_role() {
        let state = AppState::com_regras("127.0.0.1:0".into(), RegrasPremiacao::default());
        let Json(bundle) = calcular_premiacao(State(state), Json(payload("consultora"))).await.unwrap();
        assert!(bundle.individual.is_some());
    }

    #[tokio::test]
    async fn unknown_role_is_unprocessable() {
        let state = AppState::com_regras("127.0.0.1:0".into(), RegrasPremiacao::default());
        let err = calcular_premiacao(State(state), Json(payload("inexistente"))).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn negative_target_is_rejected() {
        let state = AppState::com_regras("127.0.0.1:0".into(), RegrasPremiacao::default());
        let mut p = payload("gerente");
        p.metas_loja.insert("geral".into(), rust_decimal::Decimal::from(-1));
        let err = calcular_premiacao(State(state), Json(p)).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn serves_rules_in_use() {
        let state = AppState::com_regras("127.0.0.1:0".into(), RegrasPremiacao::default());
        let Json(regras) = get_regras(State(state)).await;
        assert_eq!(regras, RegrasPremiacao::default());
    }
}
