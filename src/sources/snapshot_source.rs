// src/sources/snapshot_source.rs

use anyhow::bail;
use async_trait::async_trait;

use crate::{
    models::snapshot::{PremiacaoSnapshot, SelectionKey},
    sources::PremiacaoSource,
};

// Snapshot já buscado pelo chamador (ex: enviado no corpo da requisição).
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    snapshot: PremiacaoSnapshot,
}

impl SnapshotSource {
    pub fn new(snapshot: PremiacaoSnapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl PremiacaoSource for SnapshotSource {
    async fn carregar(&self, selecao: &SelectionKey) -> anyhow::Result<PremiacaoSnapshot> {
        if self.snapshot.selecao() != *selecao {
            bail!(
                "snapshot de {:?} não corresponde à seleção pedida {:?}",
                self.snapshot.selecao(),
                selecao
            );
        }
        Ok(self.snapshot.clone())
    }
}
