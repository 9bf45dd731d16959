// src/docs.rs

use utoipa::OpenApi;

use crate::engine::rules;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Premiação ---
        handlers::premiacao::calcular_premiacao,
        handlers::premiacao::get_regras,
    ),
    components(
        schemas(
            // --- Entrada ---
            models::snapshot::PremiacaoSnapshot,
            models::snapshot::Periodo,
            models::snapshot::Loja,
            models::snapshot::Colaborador,
            models::sales::SalesRecord,

            // --- Resultado ---
            models::snapshot::PremiacaoBundle,
            models::snapshot::SelectionKey,
            models::snapshot::ArvoreResultado,
            models::sales::CategoryValue,
            models::calendar::WorkCalendar,
            models::calendar::Tenure,
            models::premiacao::Cargo,
            models::premiacao::RitmoStatus,
            models::premiacao::RitmoCategoria,
            models::premiacao::Projection,
            models::premiacao::PremiacaoResult,
            models::insight::Severidade,
            models::insight::Insight,

            // --- Regras ---
            rules::RegrasPremiacao,
            rules::CategoryTree,
            rules::CategoryDef,
            rules::Tier,
            rules::TierSchedule,
            rules::FaturamentoBracket,
            rules::TabelaFaixas,
            rules::GerencialRules,
            rules::TabelaComissao,
            rules::FaixaTempoCasa,
            rules::ApoioRules,
            rules::ConvenienciaRules,
        )
    ),
    tags(
        (name = "Premiação", description = "Cálculo de premiação, ritmo e projeções")
    )
)]
pub struct ApiDoc;
