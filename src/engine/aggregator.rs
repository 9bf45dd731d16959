// src/engine/aggregator.rs

use chrono::NaiveDate;

use crate::{
    engine::rules::{CategoryTree, GERAL},
    models::sales::{CategoryTotals, CategoryValue, SalesRecord},
};

/// Vendas da loja dentro do período. Linhas de outras lojas ou de fora do
/// período são descartadas.
pub fn vendas_da_loja(
    vendas: &[SalesRecord],
    loja: u32,
    inicio: NaiveDate,
    fim: NaiveDate,
) -> Vec<&SalesRecord> {
    vendas
        .iter()
        .filter(|v| v.store_code == loja && v.date >= inicio && v.date <= fim)
        .collect()
}

pub fn vendas_do_colaborador<'a>(vendas_loja: &[&'a SalesRecord], matricula: u32) -> Vec<&'a SalesRecord> {
    vendas_loja
        .iter()
        .copied()
        .filter(|v| v.employee_code == matricula)
        .collect()
}

/// Reclassifica as vendas por grupo de produto nas categorias da árvore.
///
/// Toda linha soma em `geral`. Depois soma em cada categoria cuja lista de
/// códigos contém o grupo da linha (um código pode alimentar várias). Todas as
/// categorias configuradas aparecem no resultado, mesmo zeradas.
pub fn agregar<'a, I>(vendas: I, arvore: &CategoryTree) -> CategoryTotals
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut totais: CategoryTotals = std::iter::once(GERAL)
        .chain(arvore.chaves())
        .map(|chave| (chave.to_string(), CategoryValue::default()))
        .collect();

    for registro in vendas {
        if let Some(geral) = totais.get_mut(GERAL) {
            geral.somar(registro);
        }
        for chave in arvore.categorias_do_codigo(registro.product_group_code) {
            if let Some(categoria) = totais.get_mut(chave) {
                categoria.somar(registro);
            }
        }
    }

    totais
}
