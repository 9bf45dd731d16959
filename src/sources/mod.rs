// src/sources/mod.rs

use async_trait::async_trait;

use crate::models::snapshot::{PremiacaoSnapshot, SelectionKey};

pub mod snapshot_source;

pub use snapshot_source::SnapshotSource;

/// Camada de busca: vendas, metas, ausências e cadastros de uma seleção.
/// Implementações falam com os sistemas externos; o motor só vê o snapshot.
#[async_trait]
pub trait PremiacaoSource: Send + Sync {
    async fn carregar(&self, selecao: &SelectionKey) -> anyhow::Result<PremiacaoSnapshot>;
}
