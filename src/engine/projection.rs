// src/engine/projection.rs

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use crate::{
    common::math::{dividir, multiplicar},
    engine::ritmo::percentual_atingido,
    models::{
        calendar::WorkCalendar,
        premiacao::Projection,
        sales::{CategoryTotals, Targets},
    },
};

// Extrapolação linear do ritmo até hoje. Sem suavização.
pub fn projetar(valor_atual: Decimal, meta: Decimal, calendario: &WorkCalendar) -> Projection {
    let decorridos = Decimal::from(calendario.elapsed_work_days);
    let restantes = Decimal::from(calendario.remaining_work_days);

    let valor_projetado = if calendario.elapsed_work_days > 0 {
        multiplicar(dividir(valor_atual, decorridos), decorridos + restantes)
    } else {
        Decimal::ZERO
    };

    let faltante = meta.saturating_sub(valor_atual).max(Decimal::ZERO);
    let necessario_por_dia = if calendario.remaining_work_days > 0 {
        dividir(faltante, restantes)
    } else {
        Decimal::ZERO
    };

    Projection {
        valor_atual,
        meta,
        percentual_atual: percentual_atingido(valor_atual, meta),
        valor_projetado,
        percentual_projetado: percentual_atingido(valor_projetado, meta),
        faltante,
        necessario_por_dia,
    }
}

pub fn projetar_todas(
    totais: &CategoryTotals,
    metas: &Targets,
    calendario: &WorkCalendar,
) -> BTreeMap<String, Projection> {
    let chaves: BTreeSet<&String> = totais.keys().chain(metas.keys()).collect();

    chaves
        .into_iter()
        .map(|chave| {
            let valor = totais.get(chave).map(|v| v.valor).unwrap_or_default();
            let meta = metas.get(chave).copied().unwrap_or_default();
            (chave.clone(), projetar(valor, meta, calendario))
        })
        .collect()
}
