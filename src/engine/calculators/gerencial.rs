// src/engine/calculators/gerencial.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    common::format::arredondar,
    engine::{
        calculators::{CalculoContext, Escopo, PremiacaoCalculator},
        rules::{GerencialRules, BALANCO, GERAL},
    },
    models::premiacao::PremiacaoResult,
};

// Gerente e líder: base pela faixa de faturamento da loja, multiplicada pela
// soma dos multiplicadores atingidos em cada indicador.
pub struct GerencialCalculator {
    regras: GerencialRules,
}

impl GerencialCalculator {
    pub fn new(regras: GerencialRules) -> Self {
        Self { regras }
    }
}

impl PremiacaoCalculator for GerencialCalculator {
    fn nome(&self) -> &'static str {
        "gerencial"
    }

    fn escopo(&self) -> Escopo {
        Escopo::Loja
    }

    fn calcular(&self, ctx: &CalculoContext<'_>) -> PremiacaoResult {
        let loja = &ctx.loja;
        let faturamento = loja.valor(GERAL);
        let base = self.regras.faixas.base_para(faturamento);

        let mut multiplicadores = BTreeMap::new();
        let mut soma_atual = Decimal::ZERO;
        let mut soma_projetada = Decimal::ZERO;
        let mut soma_maxima = Decimal::ZERO;

        // 1. Faturamento geral (sempre conta para a máxima)
        let mult_geral = self.regras.tiers_geral.multiplicador(loja.percentual_atual(GERAL));
        multiplicadores.insert(GERAL.to_string(), mult_geral);
        soma_atual += mult_geral;
        soma_projetada += self.regras.tiers_geral.multiplicador(loja.percentual_projetado(GERAL));
        soma_maxima += self.regras.tiers_geral.maximo();

        // 2. Demais indicadores
        for indicador in &self.regras.indicadores {
            let mult = self.regras.tiers_indicadores.multiplicador(loja.percentual_atual(indicador));
            multiplicadores.insert(indicador.clone(), mult);
            soma_atual += mult;
            soma_projetada += self.regras.tiers_indicadores.multiplicador(loja.percentual_projetado(indicador));
            // Indicador sem meta não tem como ser atingido
            if loja.meta(indicador) > Decimal::ZERO {
                soma_maxima += self.regras.tiers_indicadores.maximo();
            }
        }

        // 3. Balanço
        let mult_balanco = if ctx.balanco { self.regras.multiplicador_balanco } else { Decimal::ZERO };
        multiplicadores.insert(BALANCO.to_string(), mult_balanco);
        soma_atual += mult_balanco;
        soma_projetada += mult_balanco;
        soma_maxima += self.regras.multiplicador_balanco;

        let premiacoes = multiplicadores
            .iter()
            .map(|(categoria, mult)| (categoria.clone(), arredondar(base * *mult)))
            .collect();

        tracing::debug!(
            "Gerencial: faturamento {} -> base {}, multiplicador atual {}",
            faturamento, base, soma_atual
        );

        PremiacaoResult {
            base_calculo: base,
            multiplicadores,
            premiacoes,
            premiacao_atual: arredondar(base * soma_atual),
            premiacao_projetada: arredondar(base * soma_projetada),
            premiacao_maxima: arredondar(base * soma_maxima),
            is_bonus: false,
        }
    }
}
