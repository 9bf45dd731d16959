// src/engine/calculators/conveniencia.rs

use crate::{
    common::math::somar,
    engine::{
        calculators::{
            apoio::calcular_bonus_tempo_de_casa, comissao::calcular_comissao, CalculoContext, Escopo,
            PremiacaoCalculator,
        },
        rules::ConvenienciaRules,
    },
    models::premiacao::PremiacaoResult,
};

// Híbrido: bônus fixo por tempo de casa (meta da loja + balanço) somado à
// comissão sobre conveniência e brinquedos vendidos pelo próprio colaborador.
pub struct AuxConvenienciaCalculator {
    regras: ConvenienciaRules,
}

impl AuxConvenienciaCalculator {
    pub fn new(regras: ConvenienciaRules) -> Self {
        Self { regras }
    }
}

impl PremiacaoCalculator for AuxConvenienciaCalculator {
    fn nome(&self) -> &'static str {
        "aux_conveniencia"
    }

    fn escopo(&self) -> Escopo {
        Escopo::Ambos
    }

    fn usa_tempo_de_casa(&self) -> bool {
        true
    }

    fn calcular(&self, ctx: &CalculoContext<'_>) -> PremiacaoResult {
        let bonus = calcular_bonus_tempo_de_casa(&self.regras.apoio, &ctx.loja, ctx.tempo_de_casa, ctx.balanco);
        let comissao = calcular_comissao(&self.regras.comissao, &ctx.individual);

        let mut premiacoes = bonus.premiacoes;
        premiacoes.extend(comissao.premiacoes);

        // A base é só o vendido comissionável; o bônus fixo não tem base de cálculo.
        PremiacaoResult {
            base_calculo: comissao.base_calculo,
            multiplicadores: comissao.multiplicadores,
            premiacoes,
            premiacao_atual: somar(bonus.premiacao_atual, comissao.premiacao_atual),
            premiacao_projetada: somar(bonus.premiacao_projetada, comissao.premiacao_projetada),
            premiacao_maxima: somar(bonus.premiacao_maxima, comissao.premiacao_maxima),
            is_bonus: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::calculators::test_support::{arvore, calendario_meio_periodo, contexto};
    use crate::models::calendar::Tenure;
    use rust_decimal::Decimal;

    #[test]
    fn adds_flat_bonus_and_convenience_commission() {
        let cal = calendario_meio_periodo();
        let individual = arvore(&[("conveniencia", 2_000, 0), ("brinquedo", 1_000, 0), ("similar", 9_000, 0)], &cal);
        let loja = arvore(&[("geral", 500_000, 400_000)], &cal);
        let ctx = contexto(&individual, &loja, Tenure::from_total_meses(13), false);

        let r = AuxConvenienciaCalculator::new(ConvenienciaRules::default()).calcular(&ctx);

        // 180 (faixa 12+ meses, meta batida) + 3% de 3000
        assert_eq!(r.premiacao_atual, Decimal::from(270));
        assert_eq!(r.premiacoes["conveniencia"], Decimal::from(60));
        assert_eq!(r.premiacoes["brinquedo"], Decimal::from(30));
        assert_eq!(r.premiacoes["meta_loja"], Decimal::from(180));
        // só conveniência + brinquedo; o valor fixo do bônus não entra na base
        assert_eq!(r.base_calculo, Decimal::from(3_000));
        assert!(!r.premiacoes.contains_key("similar"));
        assert!(r.is_bonus);
    }

    #[test]
    fn commission_still_paid_during_experience() {
        let cal = calendario_meio_periodo();
        let individual = arvore(&[("conveniencia", 1_000, 0)], &cal);
        let loja = arvore(&[("geral", 500_000, 400_000)], &cal);
        let ctx = contexto(&individual, &loja, Tenure::from_total_meses(1), true);

        let r = AuxConvenienciaCalculator::new(ConvenienciaRules::default()).calcular(&ctx);
        assert_eq!(r.premiacao_atual, Decimal::from(30));
        assert!(r.is_bonus);
    }
}
