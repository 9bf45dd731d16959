// src/engine/insights.rs

use std::collections::BTreeMap;

use crate::{
    common::format::{format_brl, format_percentual},
    engine::rules::CategoryTree,
    models::{
        calendar::WorkCalendar,
        insight::{Insight, Severidade},
        premiacao::{Projection, RitmoCategoria, RitmoStatus},
    },
};

/// Voz do texto: gerência e apoio leem sobre a loja, os demais sobre si.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enquadramento {
    Loja,
    Individual,
}

impl Enquadramento {
    fn sujeito(&self) -> &'static str {
        match self {
            Enquadramento::Loja => "A loja",
            Enquadramento::Individual => "Você",
        }
    }
}

fn severidade(status: RitmoStatus) -> Option<Severidade> {
    match status {
        RitmoStatus::Behind => Some(Severidade::Critico),
        RitmoStatus::Caution => Some(Severidade::Atencao),
        RitmoStatus::Ahead => Some(Severidade::Sucesso),
        RitmoStatus::OnPace => None,
    }
}

fn dias(qtd: u32) -> String {
    if qtd == 1 { "1 dia útil".to_string() } else { format!("{} dias úteis", qtd) }
}

fn texto_alerta(
    enquadramento: Enquadramento,
    nome: &str,
    ritmo: &RitmoCategoria,
    projecao: &Projection,
    calendario: &WorkCalendar,
) -> String {
    let situacao = format!(
        "{} atingiu {} da meta de {} com {} do período decorrido.",
        enquadramento.sujeito(),
        format_percentual(ritmo.percent_complete),
        nome,
        format_percentual(ritmo.percent_time_elapsed),
    );

    if calendario.remaining_work_days == 0 {
        return format!(
            "{} O período terminou {} abaixo da meta.",
            situacao,
            format_brl(projecao.faltante)
        );
    }

    format!(
        "{} Faltam {} em {}: {} por dia para fechar a meta.",
        situacao,
        format_brl(projecao.faltante),
        dias(calendario.remaining_work_days),
        format_brl(projecao.necessario_por_dia),
    )
}

fn texto_positivo(enquadramento: Enquadramento, nome: &str, ritmo: &RitmoCategoria, projecao: &Projection) -> String {
    let fechamento = match enquadramento {
        Enquadramento::Loja => "Mantenha a equipe nesse ritmo.",
        Enquadramento::Individual => "Continue assim!",
    };
    format!(
        "{} já atingiu {} da meta de {}, com projeção de fechar em {}. {}",
        enquadramento.sujeito(),
        format_percentual(ritmo.percent_complete),
        nome,
        format_percentual(projecao.percentual_projetado),
        fechamento,
    )
}

/// Gera os insights a partir do ritmo de cada categoria com meta.
///
/// Ordem: atrasadas, em atenção, adiantadas; dentro de cada grupo, a ordem
/// das categorias na árvore. Categorias no ritmo não geram texto.
pub fn gerar_insights(
    enquadramento: Enquadramento,
    ritmo: &BTreeMap<String, RitmoCategoria>,
    projecoes: &BTreeMap<String, Projection>,
    calendario: &WorkCalendar,
    arvore: &CategoryTree,
) -> Vec<Insight> {
    let mut candidatos: Vec<(Severidade, usize, Insight)> = ritmo
        .values()
        .filter(|r| r.meta > rust_decimal::Decimal::ZERO)
        .filter_map(|r| {
            let severidade = severidade(r.status)?;
            let projecao = projecoes.get(&r.categoria).cloned().unwrap_or_default();
            let nome = arvore.nome(&r.categoria);

            let (titulo, descricao) = match severidade {
                Severidade::Critico => (
                    format!("{} abaixo do ritmo", nome),
                    texto_alerta(enquadramento, nome, r, &projecao, calendario),
                ),
                Severidade::Atencao => (
                    format!("{} pede atenção", nome),
                    texto_alerta(enquadramento, nome, r, &projecao, calendario),
                ),
                Severidade::Sucesso => (
                    format!("{} acima do ritmo", nome),
                    texto_positivo(enquadramento, nome, r, &projecao),
                ),
            };

            let insight = Insight {
                categoria: r.categoria.clone(),
                titulo,
                descricao,
                severidade,
                cor: severidade.cor().to_string(),
                icone: severidade.icone().to_string(),
            };
            Some((severidade, arvore.ordem(&r.categoria), insight))
        })
        .collect();

    // Severidade já ordena Critico < Atencao < Sucesso
    candidatos.sort_by(|a, b| (a.0, a.1, &a.2.categoria).cmp(&(b.0, b.1, &b.2.categoria)));
    candidatos.into_iter().map(|(_, _, insight)| insight).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{projection::projetar, ritmo::analisar_categoria};
    use rust_decimal::Decimal;

    fn calendario(restantes: u32) -> WorkCalendar {
        WorkCalendar {
            total_work_days: 20,
            elapsed_work_days: 20 - restantes,
            remaining_work_days: restantes,
            percent_time_elapsed: Decimal::from(20 - restantes) / Decimal::from(20) * Decimal::ONE_HUNDRED,
        }
    }

    fn montar(itens: &[(&str, i64, i64)], cal: &WorkCalendar) -> (BTreeMap<String, RitmoCategoria>, BTreeMap<String, Projection>) {
        let mut ritmo = BTreeMap::new();
        let mut projecoes = BTreeMap::new();
        for (categoria, valor, meta) in itens {
            let (valor, meta) = (Decimal::from(*valor), Decimal::from(*meta));
            ritmo.insert(categoria.to_string(), analisar_categoria(categoria, valor, meta, cal.percent_time_elapsed));
            projecoes.insert(categoria.to_string(), projetar(valor, meta, cal));
        }
        (ritmo, projecoes)
    }

    #[test]
    fn orders_by_severity_then_tree_order() {
        let cal = calendario(10);
        let arvore = CategoryTree::loja_padrao();
        // 50% do tempo: saude 10% (behind), r_mais 42% (caution), geral 60% (ahead), conveniência 50% (on-pace)
        let (ritmo, projecoes) = montar(
            &[
                ("geral", 600, 1000),
                ("r_mais", 420, 1000),
                ("saude", 100, 1000),
                ("conveniencia", 500, 1000),
            ],
            &cal,
        );

        let insights = gerar_insights(Enquadramento::Loja, &ritmo, &projecoes, &cal, &arvore);
        let ordem: Vec<&str> = insights.iter().map(|i| i.categoria.as_str()).collect();
        assert_eq!(ordem, vec!["saude", "r_mais", "geral"]);
        assert_eq!(insights[0].severidade, Severidade::Critico);
        assert_eq!(insights[0].cor, "#dc2626");
        assert_eq!(insights[2].icone, "trending-up");
    }

    #[test]
    fn store_and_personal_framing() {
        let cal = calendario(10);
        let arvore = CategoryTree::individual_padrao();
        let (ritmo, projecoes) = montar(&[("dermocosmetico", 100, 1000)], &cal);

        let loja = gerar_insights(Enquadramento::Loja, &ritmo, &projecoes, &cal, &arvore);
        let pessoal = gerar_insights(Enquadramento::Individual, &ritmo, &projecoes, &cal, &arvore);

        assert!(loja[0].descricao.starts_with("A loja atingiu 10,0% da meta de Dermocosmético"));
        assert!(pessoal[0].descricao.starts_with("Você atingiu"));
        assert!(pessoal[0].descricao.contains("Faltam R$ 900,00 em 10 dias úteis: R$ 90,00 por dia"));
        assert_eq!(pessoal[0].titulo, "Dermocosmético abaixo do ritmo");
    }

    #[test]
    fn closed_period_reports_final_gap() {
        let cal = calendario(0);
        let arvore = CategoryTree::loja_padrao();
        let (ritmo, projecoes) = montar(&[("saude", 500, 1000)], &cal);
        let insights = gerar_insights(Enquadramento::Loja, &ritmo, &projecoes, &cal, &arvore);
        assert!(insights[0].descricao.ends_with("O período terminou R$ 500,00 abaixo da meta."));
    }

    #[test]
    fn categories_without_target_are_silent() {
        let cal = calendario(10);
        let arvore = CategoryTree::loja_padrao();
        let (ritmo, projecoes) = montar(&[("saude", 100, 0)], &cal);
        assert!(gerar_insights(Enquadramento::Loja, &ritmo, &projecoes, &cal, &arvore).is_empty());
    }

    #[test]
    fn deterministic_output() {
        let cal = calendario(7);
        let arvore = CategoryTree::loja_padrao();
        let (ritmo, projecoes) = montar(&[("geral", 100, 1000), ("saude", 900, 1000), ("r_mais", 10, 50)], &cal);
        let a = gerar_insights(Enquadramento::Loja, &ritmo, &projecoes, &cal, &arvore);
        let b = gerar_insights(Enquadramento::Loja, &ritmo, &projecoes, &cal, &arvore);
        assert_eq!(a, b);
    }
}
