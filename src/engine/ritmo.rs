// src/engine/ritmo.rs

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use crate::common::math::{dividir, multiplicar};
use crate::models::{
    calendar::WorkCalendar,
    premiacao::{RitmoCategoria, RitmoStatus},
    sales::{CategoryTotals, Targets},
};

// Acima disso a categoria é "ahead" independente da razão.
const PERCENTUAL_ABSOLUTO_AHEAD: Decimal = Decimal::from_parts(95, 0, 0, false, 0);
const RAZAO_AHEAD: Decimal = Decimal::from_parts(110, 0, 0, false, 2);
const RAZAO_NO_RITMO: Decimal = Decimal::from_parts(95, 0, 0, false, 2);
const RAZAO_ATENCAO: Decimal = Decimal::from_parts(80, 0, 0, false, 2);

/// `valor / meta * 100`, zero quando não há meta.
pub fn percentual_atingido(valor: Decimal, meta: Decimal) -> Decimal {
    if meta <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    multiplicar(dividir(valor, meta), Decimal::ONE_HUNDRED)
}

pub fn razao(percent_complete: Decimal, percent_time_elapsed: Decimal) -> Decimal {
    if percent_time_elapsed <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    dividir(percent_complete, percent_time_elapsed)
}

// A ordem importa: a primeira regra que casar vence.
pub fn classificar(percent_complete: Decimal, ratio: Decimal) -> RitmoStatus {
    if percent_complete >= PERCENTUAL_ABSOLUTO_AHEAD {
        RitmoStatus::Ahead
    } else if ratio >= RAZAO_AHEAD {
        RitmoStatus::Ahead
    } else if ratio >= RAZAO_NO_RITMO {
        RitmoStatus::OnPace
    } else if ratio >= RAZAO_ATENCAO {
        RitmoStatus::Caution
    } else {
        RitmoStatus::Behind
    }
}

pub fn analisar_categoria(
    categoria: &str,
    valor: Decimal,
    meta: Decimal,
    percent_time_elapsed: Decimal,
) -> RitmoCategoria {
    let percent_complete = percentual_atingido(valor, meta);
    let ratio = razao(percent_complete, percent_time_elapsed);

    RitmoCategoria {
        categoria: categoria.to_string(),
        valor,
        meta,
        percent_complete,
        percent_time_elapsed,
        ratio,
        status: classificar(percent_complete, ratio),
    }
}

/// Analisa toda categoria que aparece nos totais ou nas metas.
pub fn analisar(
    totais: &CategoryTotals,
    metas: &Targets,
    calendario: &WorkCalendar,
) -> BTreeMap<String, RitmoCategoria> {
    let chaves: BTreeSet<&String> = totais.keys().chain(metas.keys()).collect();

    chaves
        .into_iter()
        .map(|chave| {
            let valor = totais.get(chave).map(|v| v.valor).unwrap_or_default();
            let meta = metas.get(chave).copied().unwrap_or_default();
            let resultado = analisar_categoria(chave, valor, meta, calendario.percent_time_elapsed);
            tracing::debug!(
                "Ritmo {}: {}% da meta, razão {} -> {:?}",
                chave, resultado.percent_complete.round_dp(2), resultado.ratio.round_dp(3), resultado.status
            );
            (chave.clone(), resultado)
        })
        .collect()
}
