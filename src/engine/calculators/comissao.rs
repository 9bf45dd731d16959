// src/engine/calculators/comissao.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    common::{
        format::arredondar,
        math::{multiplicar, somar},
    },
    engine::{
        calculators::{ArvoreCalculo, CalculoContext, Escopo, PremiacaoCalculator},
        rules::TabelaComissao,
    },
    models::premiacao::PremiacaoResult,
};

/// Comissão sobre as vendas individuais: `valor vendido × taxa` por categoria.
///
/// Categorias sem venda ficam fora da lista detalhada (`premiacoes`), mas a
/// taxa continua em `multiplicadores`. A máxima considera, por categoria, o
/// maior entre a meta e o valor projetado.
pub fn calcular_comissao(tabela: &TabelaComissao, arvore: &ArvoreCalculo<'_>) -> PremiacaoResult {
    let mut base = Decimal::ZERO;
    let mut premiacoes = BTreeMap::new();
    let mut atual = Decimal::ZERO;
    let mut projetada = Decimal::ZERO;
    let mut maxima = Decimal::ZERO;

    for (categoria, taxa) in &tabela.taxas {
        let vendido = arvore.valor(categoria);
        let projetado = arvore.valor_projetado(categoria);
        let comissao = multiplicar(vendido, *taxa);

        base = somar(base, vendido);
        atual = somar(atual, comissao);
        projetada = somar(projetada, multiplicar(projetado, *taxa));
        maxima = somar(maxima, multiplicar(arvore.meta(categoria).max(projetado), *taxa));

        if !vendido.is_zero() {
            premiacoes.insert(categoria.clone(), arredondar(comissao));
        }
    }

    PremiacaoResult {
        base_calculo: arredondar(base),
        multiplicadores: tabela.taxas.clone(),
        premiacoes,
        premiacao_atual: arredondar(atual),
        premiacao_projetada: arredondar(projetada),
        premiacao_maxima: arredondar(maxima),
        is_bonus: false,
    }
}

// Farmacêutico, auxiliar e consultora: mesma mecânica, tabelas diferentes.
pub struct ComissaoCalculator {
    nome: &'static str,
    tabela: TabelaComissao,
}

impl ComissaoCalculator {
    pub fn new(nome: &'static str, tabela: TabelaComissao) -> Self {
        Self { nome, tabela }
    }
}

impl PremiacaoCalculator for ComissaoCalculator {
    fn nome(&self) -> &'static str {
        self.nome
    }

    fn escopo(&self) -> Escopo {
        Escopo::Individual
    }

    fn calcular(&self, ctx: &CalculoContext<'_>) -> PremiacaoResult {
        let resultado = calcular_comissao(&self.tabela, &ctx.individual);
        tracing::debug!(
            "Comissão {}: base {} -> {}",
            self.nome, resultado.base_calculo, resultado.premiacao_atual
        );
        resultado
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::calculators::test_support::{arvore, calendario_meio_periodo, contexto};
    use crate::engine::rules::RegrasPremiacao;
    use crate::models::{calendar::Tenure, snapshot::ArvoreResultado};

    fn calcular(tabela: TabelaComissao, individual: &ArvoreResultado) -> PremiacaoResult {
        let vazio = ArvoreResultado::default();
        let ctx = contexto(individual, &vazio, Tenure::default(), false);
        ComissaoCalculator::new("teste", tabela).calcular(&ctx)
    }

    #[test]
    fn farmaceutico_two_percent_on_unified_generics() {
        let cal = calendario_meio_periodo();
        let individual = arvore(&[("generico_similar", 10_000, 0)], &cal);
        let r = calcular(RegrasPremiacao::default().farmaceutico, &individual);
        assert_eq!(r.premiacoes["generico_similar"], Decimal::from(200));
        assert_eq!(r.premiacao_atual, Decimal::from(200));
    }

    #[test]
    fn auxiliar_rates_split_similar_and_generic() {
        let cal = calendario_meio_periodo();
        let individual = arvore(
            &[("similar", 1_000, 0), ("generico", 2_000, 0), ("generico_similar", 3_000, 0)],
            &cal,
        );
        let r = calcular(RegrasPremiacao::default().auxiliar, &individual);
        // 5% de 1000 + 4,5% de 2000; generico_similar não está na tabela do auxiliar
        assert_eq!(r.premiacao_atual, Decimal::from(140));
        assert_eq!(r.premiacoes["generico"], Decimal::from(90));
        assert!(!r.premiacoes.contains_key("generico_similar"));
    }

    #[test]
    fn zero_sales_left_out_of_itemized_list() {
        let cal = calendario_meio_periodo();
        let individual = arvore(&[("dermocosmetico", 0, 5_000), ("rentaveis20", 4_000, 0)], &cal);
        let r = calcular(RegrasPremiacao::default().farmaceutico, &individual);
        assert!(!r.premiacoes.contains_key("dermocosmetico"));
        assert_eq!(r.premiacoes.len(), 1);
        assert_eq!(r.premiacao_atual, Decimal::from(40));
        assert_eq!(r.multiplicadores["dermocosmetico"], Decimal::new(2, 2));
    }

    #[test]
    fn projected_and_maximum() {
        let cal = calendario_meio_periodo();
        // consultora: perfumaria 3%, meta 10 mil, vendeu 3 mil na metade -> projeta 6 mil
        let individual = arvore(&[("perfumaria_alta", 3_000, 10_000), ("goodlife", 1_000, 0)], &cal);
        let r = calcular(RegrasPremiacao::default().consultora, &individual);
        assert_eq!(r.premiacao_atual, Decimal::from(110));
        assert_eq!(r.premiacao_projetada, Decimal::from(220));
        // perfumaria pela meta (10 mil * 3%) + goodlife pelo projetado (2 mil * 2%)
        assert_eq!(r.premiacao_maxima, Decimal::from(340));
        assert_eq!(r.base_calculo, Decimal::from(4_000));
    }

    #[test]
    fn consultora_ignores_non_beauty_sales() {
        let cal = calendario_meio_periodo();
        let individual = arvore(&[("generico_similar", 50_000, 0), ("rentaveis25", 8_000, 0)], &cal);
        let r = calcular(RegrasPremiacao::default().consultora, &individual);
        assert_eq!(r.premiacao_atual, Decimal::ZERO);
        assert!(r.premiacoes.is_empty());
    }
}
