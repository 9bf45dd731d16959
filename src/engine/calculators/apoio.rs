// src/engine/calculators/apoio.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    engine::{
        calculators::{ArvoreCalculo, CalculoContext, Escopo, PremiacaoCalculator},
        rules::{ApoioRules, BALANCO},
    },
    models::{calendar::Tenure, premiacao::PremiacaoResult},
};

pub const META_LOJA: &str = "meta_loja";

/// Bônus fixo do apoio: a faixa de tempo de casa define os valores; a meta da
/// loja e o balanço decidem se cada parcela é paga. Não há multiplicador.
pub fn calcular_bonus_tempo_de_casa(
    regras: &ApoioRules,
    loja: &ArvoreCalculo<'_>,
    tempo_de_casa: Tenure,
    balanco: bool,
) -> PremiacaoResult {
    let Some(faixa) = regras.faixa_para(tempo_de_casa.total_meses()) else {
        return PremiacaoResult::default();
    };

    let bateu_meta = loja.percentual_atual(&regras.categoria_meta) >= regras.percentual_minimo;
    let vai_bater_meta = loja.percentual_projetado(&regras.categoria_meta) >= regras.percentual_minimo;

    let pago = |condicao: bool, valor: Decimal| if condicao { valor } else { Decimal::ZERO };
    let parcela_balanco = pago(balanco, faixa.valor_balanco);

    let mut premiacoes = BTreeMap::new();
    premiacoes.insert(META_LOJA.to_string(), pago(bateu_meta, faixa.valor_meta));
    premiacoes.insert(BALANCO.to_string(), parcela_balanco);

    PremiacaoResult {
        base_calculo: faixa.valor_meta,
        multiplicadores: BTreeMap::new(),
        premiacoes,
        premiacao_atual: pago(bateu_meta, faixa.valor_meta) + parcela_balanco,
        premiacao_projetada: pago(vai_bater_meta, faixa.valor_meta) + parcela_balanco,
        premiacao_maxima: faixa.valor_meta + faixa.valor_balanco,
        is_bonus: false,
    }
}

// aux1, fiscal e zelador
pub struct ApoioCalculator {
    regras: ApoioRules,
}

impl ApoioCalculator {
    pub fn new(regras: ApoioRules) -> Self {
        Self { regras }
    }
}

impl PremiacaoCalculator for ApoioCalculator {
    fn nome(&self) -> &'static str {
        "apoio"
    }

    fn escopo(&self) -> Escopo {
        Escopo::Loja
    }

    fn usa_tempo_de_casa(&self) -> bool {
        true
    }

    fn calcular(&self, ctx: &CalculoContext<'_>) -> PremiacaoResult {
        calcular_bonus_tempo_de_casa(&self.regras, &ctx.loja, ctx.tempo_de_casa, ctx.balanco)
    }
}
