// src/services/premiacao_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    engine::PremiacaoEngine,
    models::snapshot::{PremiacaoBundle, SelectionKey},
    services::computation_guard::ComputationGuard,
    sources::PremiacaoSource,
};

#[derive(Clone)]
pub struct PremiacaoService {
    engine: Arc<PremiacaoEngine>,
    guard: Arc<ComputationGuard<SelectionKey>>,
}

impl PremiacaoService {
    pub fn new(engine: PremiacaoEngine) -> Self {
        Self { engine: Arc::new(engine), guard: ComputationGuard::new() }
    }

    pub fn engine(&self) -> &PremiacaoEngine {
        &self.engine
    }

    /// Busca e calcula a premiação de uma seleção.
    ///
    /// `Ok(None)` quando uma requisição mais nova para o mesmo
    /// colaborador/período/loja chegou enquanto esta estava em andamento.
    /// Sem matrícula não há como identificar o colaborador: a seleção não
    /// ocupa slot e nunca é superada.
    pub async fn calcular<S>(
        &self,
        source: &S,
        selecao: SelectionKey,
    ) -> Result<Option<PremiacaoBundle>, AppError>
    where
        S: PremiacaoSource + ?Sized,
    {
        let ticket = selecao.matricula.map(|_| self.guard.iniciar(&selecao));
        let corrente = || ticket.as_ref().is_none_or(|t| t.is_current());

        // 1. Busca externa (único ponto assíncrono)
        let snapshot = source.carregar(&selecao).await.map_err(AppError::FetchFailed)?;

        if !corrente() {
            tracing::info!("Busca de {:?} superada por requisição mais recente; descartando", selecao);
            return Ok(None);
        }

        // 2. Cálculo puro
        let resultado = self.engine.calcular(&snapshot);

        // 3. Só publica se ainda for a computação corrente
        if !ticket.is_none_or(|t| t.concluir()) {
            tracing::info!("Resultado de {:?} obsoleto; descartando", selecao);
            return Ok(None);
        }

        Ok(Some(resultado?))
    }
}
