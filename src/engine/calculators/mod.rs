// src/engine/calculators/mod.rs

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    common::error::EngineError,
    engine::rules::RegrasPremiacao,
    models::{
        calendar::Tenure,
        premiacao::{Cargo, PremiacaoResult, Projection},
        sales::{CategoryTotals, Targets},
        snapshot::ArvoreResultado,
    },
};

pub mod apoio;
pub mod comissao;
pub mod conveniencia;
pub mod gerencial;

pub use apoio::ApoioCalculator;
pub use comissao::ComissaoCalculator;
pub use conveniencia::AuxConvenienciaCalculator;
pub use gerencial::GerencialCalculator;

/// Quais árvores de categorias o cálculo precisa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escopo {
    Individual,
    Loja,
    Ambos,
}

impl Escopo {
    pub fn usa_individual(&self) -> bool {
        matches!(self, Escopo::Individual | Escopo::Ambos)
    }

    pub fn usa_loja(&self) -> bool {
        matches!(self, Escopo::Loja | Escopo::Ambos)
    }
}

// Visão emprestada de uma árvore já agregada e projetada.
#[derive(Debug, Clone, Copy)]
pub struct ArvoreCalculo<'a> {
    pub totais: &'a CategoryTotals,
    pub metas: &'a Targets,
    pub projecoes: &'a BTreeMap<String, Projection>,
}

impl<'a> ArvoreCalculo<'a> {
    pub fn valor(&self, categoria: &str) -> Decimal {
        self.totais.get(categoria).map(|v| v.valor).unwrap_or_default()
    }

    pub fn meta(&self, categoria: &str) -> Decimal {
        self.metas.get(categoria).copied().unwrap_or_default()
    }

    pub fn percentual_atual(&self, categoria: &str) -> Decimal {
        self.projecoes.get(categoria).map(|p| p.percentual_atual).unwrap_or_default()
    }

    pub fn percentual_projetado(&self, categoria: &str) -> Decimal {
        self.projecoes.get(categoria).map(|p| p.percentual_projetado).unwrap_or_default()
    }

    pub fn valor_projetado(&self, categoria: &str) -> Decimal {
        self.projecoes.get(categoria).map(|p| p.valor_projetado).unwrap_or_default()
    }
}

impl ArvoreResultado {
    pub fn como_calculo(&self) -> ArvoreCalculo<'_> {
        ArvoreCalculo {
            totais: &self.totais,
            metas: &self.metas,
            projecoes: &self.projecoes,
        }
    }
}

pub struct CalculoContext<'a> {
    pub individual: ArvoreCalculo<'a>,
    pub loja: ArvoreCalculo<'a>,
    pub tempo_de_casa: Tenure,
    pub balanco: bool,
}

/// Contrato comum das fórmulas de premiação.
pub trait PremiacaoCalculator: Send + Sync {
    fn nome(&self) -> &'static str;

    fn escopo(&self) -> Escopo;

    fn usa_tempo_de_casa(&self) -> bool {
        false
    }

    fn calcular(&self, ctx: &CalculoContext<'_>) -> PremiacaoResult;
}

// ---
// Registro: cargo -> calculadora
// ---
#[derive(Clone, Default)]
pub struct CalculatorRegistry {
    calculadoras: HashMap<Cargo, Arc<dyn PremiacaoCalculator>>,
}

impl CalculatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registrar(&mut self, cargo: Cargo, calculadora: Arc<dyn PremiacaoCalculator>) -> &mut Self {
        self.calculadoras.insert(cargo, calculadora);
        self
    }

    /// Monta o registro padrão, um cálculo por família de cargo.
    pub fn a_partir_das_regras(regras: &RegrasPremiacao) -> Self {
        let gerencial: Arc<dyn PremiacaoCalculator> = Arc::new(GerencialCalculator::new(regras.gerencial.clone()));
        let apoio: Arc<dyn PremiacaoCalculator> = Arc::new(ApoioCalculator::new(regras.apoio.clone()));

        let mut registro = Self::new();
        registro
            .registrar(Cargo::Gerente, gerencial.clone())
            .registrar(Cargo::Lider, gerencial)
            .registrar(
                Cargo::Farmaceutico,
                Arc::new(ComissaoCalculator::new("farmaceutico", regras.farmaceutico.clone())),
            )
            .registrar(
                Cargo::Auxiliar,
                Arc::new(ComissaoCalculator::new("auxiliar", regras.auxiliar.clone())),
            )
            .registrar(
                Cargo::Consultora,
                Arc::new(ComissaoCalculator::new("consultora", regras.consultora.clone())),
            )
            .registrar(Cargo::Aux1, apoio.clone())
            .registrar(Cargo::Fiscal, apoio.clone())
            .registrar(Cargo::Zelador, apoio)
            .registrar(
                Cargo::AuxConveniencia,
                Arc::new(AuxConvenienciaCalculator::new(regras.aux_conveniencia.clone())),
            );
        registro
    }

    pub fn resolver(&self, cargo: &str) -> Result<(Cargo, Arc<dyn PremiacaoCalculator>), EngineError> {
        let cargo: Cargo = cargo.parse()?;
        self.calculadoras
            .get(&cargo)
            .cloned()
            .map(|calculadora| (cargo, calculadora))
            .ok_or_else(|| EngineError::UnsupportedRole(cargo.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::engine::projection::projetar_todas;
    use crate::models::{calendar::WorkCalendar, sales::CategoryValue};

    pub fn calendario_meio_periodo() -> WorkCalendar {
        WorkCalendar {
            total_work_days: 20,
            elapsed_work_days: 10,
            remaining_work_days: 10,
            percent_time_elapsed: Decimal::from(50),
        }
    }

    // (categoria, valor vendido, meta)
    pub fn arvore(itens: &[(&str, i64, i64)], calendario: &WorkCalendar) -> ArvoreResultado {
        let totais: CategoryTotals = itens
            .iter()
            .map(|(c, v, _)| (c.to_string(), CategoryValue { valor: Decimal::from(*v), quantidade: Decimal::ONE }))
            .collect();
        let metas: Targets = itens
            .iter()
            .filter(|(_, _, m)| *m > 0)
            .map(|(c, _, m)| (c.to_string(), Decimal::from(*m)))
            .collect();
        let projecoes = projetar_todas(&totais, &metas, calendario);
        ArvoreResultado { totais, metas, projecoes, ritmo: BTreeMap::new() }
    }

    pub fn contexto<'a>(
        individual: &'a ArvoreResultado,
        loja: &'a ArvoreResultado,
        tempo_de_casa: Tenure,
        balanco: bool,
    ) -> CalculoContext<'a> {
        CalculoContext {
            individual: individual.como_calculo(),
            loja: loja.como_calculo(),
            tempo_de_casa,
            balanco,
        }
    }
}
