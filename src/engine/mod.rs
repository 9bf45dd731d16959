// src/engine/mod.rs

use std::sync::Arc;

use crate::{
    common::error::EngineError,
    models::{
        calendar::{Tenure, WorkCalendar},
        sales::{SalesRecord, Targets},
        snapshot::{ArvoreResultado, PremiacaoBundle, PremiacaoSnapshot},
    },
};

pub mod aggregator;
pub mod calculators;
pub mod calendar;
pub mod insights;
pub mod projection;
pub mod ritmo;
pub mod rules;
pub mod tenure;

use calculators::{CalculatorRegistry, CalculoContext, Escopo};
use insights::Enquadramento;
use rules::{CategoryTree, RegrasPremiacao};

/// Motor puro: recebe a fotografia já buscada e devolve o pacote de resultados.
/// Sem I/O e sem estado mutável; mesma entrada, mesma saída.
#[derive(Clone)]
pub struct PremiacaoEngine {
    regras: Arc<RegrasPremiacao>,
    registro: CalculatorRegistry,
}

impl PremiacaoEngine {
    pub fn new(regras: RegrasPremiacao) -> Self {
        let registro = CalculatorRegistry::a_partir_das_regras(&regras);
        Self::with_registry(regras, registro)
    }

    pub fn with_registry(regras: RegrasPremiacao, registro: CalculatorRegistry) -> Self {
        Self { regras: Arc::new(regras), registro }
    }

    pub fn regras(&self) -> &RegrasPremiacao {
        &self.regras
    }

    fn montar_arvore<'a>(
        &self,
        arvore: &CategoryTree,
        vendas: impl IntoIterator<Item = &'a SalesRecord>,
        metas: &Targets,
        calendario: &WorkCalendar,
    ) -> ArvoreResultado {
        let totais = aggregator::agregar(vendas, arvore);
        let projecoes = projection::projetar_todas(&totais, metas, calendario);
        let ritmo = ritmo::analisar(&totais, metas, calendario);
        ArvoreResultado { totais, metas: metas.clone(), projecoes, ritmo }
    }

    pub fn calcular(&self, snapshot: &PremiacaoSnapshot) -> Result<PremiacaoBundle, EngineError> {
        let selecao = snapshot.selecao();

        // 1. Cargo primeiro: cargo sem regra aborta antes de qualquer trabalho
        let (cargo, calculadora) = self.registro.resolver(&snapshot.colaborador.cargo)?;
        let escopo = calculadora.escopo();

        // 2. Calendário
        let calendario = calendar::calcular_calendario(
            snapshot.periodo.inicio,
            snapshot.periodo.fim,
            &snapshot.loja.regiao,
            &snapshot.ausencias,
            snapshot.has_sales_today,
            snapshot.hoje,
        )?;

        tracing::info!(
            "Calculando premiação {} (cargo {}, loja {}, matrícula {:?})",
            selecao.periodo, cargo, selecao.loja, selecao.matricula
        );

        let mut avisos = Vec::new();

        // 3. Tempo de casa
        let tempo_de_casa = match snapshot.colaborador.data_admissao {
            Some(admissao) => tenure::calcular_tempo_de_casa(admissao, snapshot.hoje),
            None => {
                if calculadora.usa_tempo_de_casa() {
                    tracing::warn!("Colaborador sem data de admissão: tempo de casa considerado zero");
                    avisos.push("Data de admissão não informada: tempo de casa considerado zero.".to_string());
                }
                Tenure::default()
            }
        };

        // 4. Árvores de categorias (só as que o cargo usa)
        let vendas_loja = aggregator::vendas_da_loja(
            &snapshot.vendas,
            snapshot.loja.codigo,
            snapshot.periodo.inicio,
            snapshot.periodo.fim,
        );

        let individual = if escopo.usa_individual() {
            let vendas_individuais = match snapshot.colaborador.matricula {
                Some(matricula) => aggregator::vendas_do_colaborador(&vendas_loja, matricula),
                None => {
                    tracing::warn!(
                        "Colaborador sem matrícula: vendas individuais zeradas (período {}, loja {})",
                        selecao.periodo, selecao.loja
                    );
                    avisos.push("Matrícula não informada: vendas individuais consideradas zero.".to_string());
                    Vec::new()
                }
            };
            Some(self.montar_arvore(
                &self.regras.categorias_individuais,
                vendas_individuais,
                &snapshot.metas_individuais,
                &calendario,
            ))
        } else {
            None
        };

        let loja = if escopo.usa_loja() {
            Some(self.montar_arvore(
                &self.regras.categorias_loja,
                vendas_loja.iter().copied(),
                &snapshot.metas_loja,
                &calendario,
            ))
        } else {
            None
        };

        // 5. Premiação
        let vazia = ArvoreResultado::default();
        let ctx = CalculoContext {
            individual: individual.as_ref().unwrap_or(&vazia).como_calculo(),
            loja: loja.as_ref().unwrap_or(&vazia).como_calculo(),
            tempo_de_casa,
            balanco: snapshot.balanco,
        };
        let premiacao = calculadora.calcular(&ctx);

        // 6. Insights
        let (enquadramento, arvore_insights, config_arvore) = match escopo {
            Escopo::Loja => (Enquadramento::Loja, loja.as_ref(), &self.regras.categorias_loja),
            Escopo::Individual | Escopo::Ambos => {
                (Enquadramento::Individual, individual.as_ref(), &self.regras.categorias_individuais)
            }
        };
        let arvore_insights = arvore_insights.unwrap_or(&vazia);
        let insights = insights::gerar_insights(
            enquadramento,
            &arvore_insights.ritmo,
            &arvore_insights.projecoes,
            &calendario,
            config_arvore,
        );

        tracing::info!(
            "Premiação {} calculada: atual {}, projetada {}, máxima {}",
            cargo, premiacao.premiacao_atual, premiacao.premiacao_projetada, premiacao.premiacao_maxima
        );

        Ok(PremiacaoBundle {
            selecao,
            cargo,
            calendario,
            tempo_de_casa,
            individual,
            loja,
            premiacao,
            insights,
            avisos,
        })
    }
}

impl Default for PremiacaoEngine {
    fn default() -> Self {
        Self::new(RegrasPremiacao::default())
    }
}
