// src/engine/rules.rs
//
// Tabelas de negócio da premiação. Tudo aqui é dado explícito, passado para
// as calculadoras: nada de singletons globais. O binário pode substituir os
// valores padrão por um JSON (PREMIACAO_REGRAS_PATH).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::error::EngineError;

pub const GERAL: &str = "geral";
pub const BALANCO: &str = "balanco";

// =========================================================================
//  1. ÁRVORES DE CATEGORIAS (grupo de produto -> categoria)
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDef {
    #[schema(example = "generico_similar")]
    pub chave: String,
    #[schema(example = "Genérico + Similar")]
    pub nome: String,
    pub codigos: Vec<u32>,
}

impl CategoryDef {
    fn new(chave: &str, nome: &str, codigos: &[u32]) -> Self {
        Self { chave: chave.to_string(), nome: nome.to_string(), codigos: codigos.to_vec() }
    }
}

/// Uma árvore de categorias. Um mesmo código pode cair em mais de uma
/// categoria da mesma árvore; `geral` é implícita e recebe tudo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTree {
    pub categorias: Vec<CategoryDef>,
}

impl CategoryTree {
    pub fn categorias_do_codigo(&self, codigo: u32) -> impl Iterator<Item = &str> + '_ {
        self.categorias
            .iter()
            .filter(move |c| c.codigos.contains(&codigo))
            .map(|c| c.chave.as_str())
    }

    pub fn chaves(&self) -> impl Iterator<Item = &str> + '_ {
        self.categorias.iter().map(|c| c.chave.as_str())
    }

    pub fn nome<'a>(&'a self, chave: &'a str) -> &'a str {
        if chave == GERAL {
            return "Geral";
        }
        self.categorias
            .iter()
            .find(|c| c.chave == chave)
            .map(|c| c.nome.as_str())
            .unwrap_or(chave)
    }

    // geral primeiro, depois a ordem configurada; desconhecidas por último
    pub fn ordem(&self, chave: &str) -> usize {
        if chave == GERAL {
            return 0;
        }
        self.categorias
            .iter()
            .position(|c| c.chave == chave)
            .map(|p| p + 1)
            .unwrap_or(usize::MAX)
    }

    fn validar(&self, arvore: &str) -> Result<(), EngineError> {
        let mut vistas = std::collections::HashSet::new();
        for categoria in &self.categorias {
            if categoria.chave == GERAL {
                return Err(EngineError::InvalidSchedule(format!(
                    "a árvore {} não pode redefinir a categoria '{}'", arvore, GERAL
                )));
            }
            if !vistas.insert(categoria.chave.as_str()) {
                return Err(EngineError::InvalidSchedule(format!(
                    "categoria '{}' duplicada na árvore {}", categoria.chave, arvore
                )));
            }
        }
        Ok(())
    }

    /// Árvore individual. Sobreposições conhecidas:
    /// `generico_similar` = `similar` + `generico`; `goodlife` ⊂ `rentaveis25`.
    pub fn individual_padrao() -> Self {
        Self {
            categorias: vec![
                CategoryDef::new("similar", "Similar", &[20, 21]),
                CategoryDef::new("generico", "Genérico", &[22, 23]),
                CategoryDef::new("generico_similar", "Genérico + Similar", &[20, 21, 22, 23]),
                CategoryDef::new("rentaveis20", "Rentáveis 20%", &[40, 41]),
                CategoryDef::new("rentaveis25", "Rentáveis 25%", &[42, 43, 60]),
                CategoryDef::new("dermocosmetico", "Dermocosmético", &[30, 31]),
                CategoryDef::new("perfumaria_alta", "Perfumaria Alta", &[32]),
                CategoryDef::new("goodlife", "GoodLife", &[60]),
                CategoryDef::new("conveniencia", "Conveniência", &[70, 71]),
                CategoryDef::new("brinquedo", "Brinquedos", &[72]),
            ],
        }
    }

    /// Árvore da loja. Sobreposição conhecida: a linha GoodLife (60) conta
    /// em `r_mais` e em `perfumaria_r_mais`.
    pub fn loja_padrao() -> Self {
        Self {
            categorias: vec![
                CategoryDef::new("r_mais", "R+", &[40, 41, 42, 43, 60]),
                CategoryDef::new("perfumaria_r_mais", "Perfumaria R+", &[32, 33, 60]),
                CategoryDef::new("saude", "Saúde", &[20, 21, 22, 23]),
                CategoryDef::new("conveniencia", "Conveniência", &[70, 71, 72]),
            ],
        }
    }
}

// =========================================================================
//  2. FAIXAS (TIERS) DE MULTIPLICADOR
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    #[schema(example = "95")]
    pub threshold_percent: Decimal,
    #[schema(example = "0.4")]
    pub multiplier: Decimal,
}

/// Faixas ordenadas: limiares crescentes, multiplicadores estritamente
/// crescentes. Vale a faixa mais alta atingida (não a soma).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "Vec<Tier>", into = "Vec<Tier>")]
pub struct TierSchedule(Vec<Tier>);

impl TierSchedule {
    pub fn new(tiers: Vec<Tier>) -> Result<Self, EngineError> {
        for par in tiers.windows(2) {
            if par[1].threshold_percent <= par[0].threshold_percent {
                return Err(EngineError::InvalidSchedule(format!(
                    "limiares fora de ordem: {}% depois de {}%",
                    par[1].threshold_percent, par[0].threshold_percent
                )));
            }
            if par[1].multiplier <= par[0].multiplier {
                return Err(EngineError::InvalidSchedule(format!(
                    "multiplicador {} não é maior que {}",
                    par[1].multiplier, par[0].multiplier
                )));
            }
        }
        Ok(Self(tiers))
    }

    pub fn multiplicador(&self, percentual: Decimal) -> Decimal {
        self.0
            .iter()
            .rev()
            .find(|t| percentual >= t.threshold_percent)
            .map(|t| t.multiplier)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn maximo(&self) -> Decimal {
        self.0.last().map(|t| t.multiplier).unwrap_or(Decimal::ZERO)
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.0
    }
}

impl TryFrom<Vec<Tier>> for TierSchedule {
    type Error = EngineError;

    fn try_from(tiers: Vec<Tier>) -> Result<Self, Self::Error> {
        TierSchedule::new(tiers)
    }
}

impl From<TierSchedule> for Vec<Tier> {
    fn from(schedule: TierSchedule) -> Self {
        schedule.0
    }
}

fn tier(threshold: i64, multiplier: Decimal) -> Tier {
    Tier { threshold_percent: Decimal::from(threshold), multiplier }
}

// =========================================================================
//  3. FAIXAS DE FATURAMENTO (GERENCIAL)
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaturamentoBracket {
    #[schema(example = "299000")]
    pub minimo: Decimal,
    // None = faixa aberta (última)
    #[schema(example = "399000")]
    pub maximo: Option<Decimal>,
    #[schema(example = "1400")]
    pub valor_base: Decimal,
}

impl FaturamentoBracket {
    // [minimo, maximo)
    pub fn contem(&self, faturamento: Decimal) -> bool {
        faturamento >= self.minimo && self.maximo.is_none_or(|max| faturamento < max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "Vec<FaturamentoBracket>", into = "Vec<FaturamentoBracket>")]
pub struct TabelaFaixas(Vec<FaturamentoBracket>);

impl TabelaFaixas {
    pub fn new(faixas: Vec<FaturamentoBracket>) -> Result<Self, EngineError> {
        if faixas.is_empty() {
            return Err(EngineError::InvalidSchedule("tabela de faixas vazia".into()));
        }
        for (i, faixa) in faixas.iter().enumerate() {
            let ultima = i + 1 == faixas.len();
            match (faixa.maximo, faixas.get(i + 1)) {
                (Some(max), Some(proxima)) if max == proxima.minimo && max > faixa.minimo => {}
                (None, None) => {}
                (Some(max), None) if max > faixa.minimo => {}
                _ => {
                    return Err(EngineError::InvalidSchedule(format!(
                        "faixa de faturamento {} a partir de {} não é contígua{}",
                        i + 1,
                        faixa.minimo,
                        if ultima { "" } else { " com a próxima" }
                    )));
                }
            }
        }
        Ok(Self(faixas))
    }

    // Faturamento fora de todas as faixas (negativo, ou acima de uma última
    // faixa fechada) não gera base.
    pub fn base_para(&self, faturamento: Decimal) -> Decimal {
        self.0
            .iter()
            .find(|f| f.contem(faturamento))
            .map(|f| f.valor_base)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn faixas(&self) -> &[FaturamentoBracket] {
        &self.0
    }
}

impl TryFrom<Vec<FaturamentoBracket>> for TabelaFaixas {
    type Error = EngineError;

    fn try_from(faixas: Vec<FaturamentoBracket>) -> Result<Self, Self::Error> {
        TabelaFaixas::new(faixas)
    }
}

impl From<TabelaFaixas> for Vec<FaturamentoBracket> {
    fn from(tabela: TabelaFaixas) -> Self {
        tabela.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GerencialRules {
    pub faixas: TabelaFaixas,
    pub tiers_geral: TierSchedule,
    pub tiers_indicadores: TierSchedule,
    // Categorias da árvore da loja que contam como indicador
    pub indicadores: Vec<String>,
    pub multiplicador_balanco: Decimal,
}

impl Default for GerencialRules {
    fn default() -> Self {
        let limites: [(i64, i64); 13] = [
            (0, 1300),
            (299_000, 1400),
            (399_000, 1600),
            (499_000, 1800),
            (599_000, 2000),
            (699_000, 2200),
            (799_000, 2400),
            (899_000, 2600),
            (999_000, 2800),
            (1_199_000, 3100),
            (1_399_000, 3400),
            (1_699_000, 3900),
            (1_999_000, 4500),
        ];
        let faixas = limites
            .iter()
            .enumerate()
            .map(|(i, (minimo, base))| FaturamentoBracket {
                minimo: Decimal::from(*minimo),
                maximo: limites.get(i + 1).map(|(proximo, _)| Decimal::from(*proximo)),
                valor_base: Decimal::from(*base),
            })
            .collect();

        Self {
            faixas: TabelaFaixas(faixas),
            tiers_geral: TierSchedule(vec![
                tier(90, Decimal::new(2, 1)),
                tier(95, Decimal::new(4, 1)),
                tier(100, Decimal::new(6, 1)),
            ]),
            tiers_indicadores: TierSchedule(vec![
                tier(95, Decimal::new(1, 1)),
                tier(100, Decimal::new(2, 1)),
            ]),
            indicadores: ["r_mais", "perfumaria_r_mais", "saude", "conveniencia"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            multiplicador_balanco: Decimal::new(1, 1),
        }
    }
}

// =========================================================================
//  4. TABELAS DE COMISSÃO
// =========================================================================

// Categoria (árvore individual) -> taxa (fração: 0.02 = 2%)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TabelaComissao {
    pub taxas: BTreeMap<String, Decimal>,
}

impl TabelaComissao {
    pub fn from_percentuais(itens: &[(&str, Decimal)]) -> Self {
        Self {
            taxas: itens
                .iter()
                .map(|(chave, percentual)| (chave.to_string(), *percentual / Decimal::ONE_HUNDRED))
                .collect(),
        }
    }

    fn validar(&self, tabela: &str) -> Result<(), EngineError> {
        match self.taxas.iter().find(|(_, taxa)| taxa.is_sign_negative()) {
            Some((chave, _)) => Err(EngineError::InvalidSchedule(format!(
                "taxa negativa para '{}' na tabela {}", chave, tabela
            ))),
            None => Ok(()),
        }
    }
}

// =========================================================================
//  5. APOIO (TEMPO DE CASA)
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaixaTempoCasa {
    #[schema(example = 12)]
    pub meses_minimos: u32,
    // Pago se a loja bater a meta
    #[schema(example = "250")]
    pub valor_meta: Decimal,
    // Pago se o balanço estiver em dia
    #[schema(example = "80")]
    pub valor_balanco: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApoioRules {
    pub faixas: Vec<FaixaTempoCasa>,
    // Categoria da árvore da loja usada para aprovar/reprovar a meta
    pub categoria_meta: String,
    pub percentual_minimo: Decimal,
}

impl ApoioRules {
    pub fn faixa_para(&self, meses: u32) -> Option<&FaixaTempoCasa> {
        self.faixas.iter().rev().find(|f| meses >= f.meses_minimos)
    }

    fn validar(&self, tabela: &str) -> Result<(), EngineError> {
        if self.faixas.windows(2).any(|par| par[1].meses_minimos <= par[0].meses_minimos) {
            return Err(EngineError::InvalidSchedule(format!(
                "faixas de tempo de casa fora de ordem na tabela {}", tabela
            )));
        }
        Ok(())
    }

    fn com_faixas(faixas: &[(u32, i64, i64)]) -> Self {
        Self {
            faixas: faixas
                .iter()
                .map(|(meses, meta, balanco)| FaixaTempoCasa {
                    meses_minimos: *meses,
                    valor_meta: Decimal::from(*meta),
                    valor_balanco: Decimal::from(*balanco),
                })
                .collect(),
            categoria_meta: GERAL.to_string(),
            percentual_minimo: Decimal::ONE_HUNDRED,
        }
    }
}

impl Default for ApoioRules {
    fn default() -> Self {
        // Período de experiência (até 3 meses) não recebe
        Self::com_faixas(&[(0, 0, 0), (3, 150, 50), (12, 250, 80), (24, 350, 100)])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvenienciaRules {
    pub apoio: ApoioRules,
    pub comissao: TabelaComissao,
}

impl Default for ConvenienciaRules {
    fn default() -> Self {
        Self {
            apoio: ApoioRules::com_faixas(&[(0, 0, 0), (3, 100, 40), (12, 180, 60)]),
            comissao: TabelaComissao::from_percentuais(&[
                ("conveniencia", Decimal::from(3)),
                ("brinquedo", Decimal::from(3)),
            ]),
        }
    }
}

// =========================================================================
//  6. CONJUNTO COMPLETO
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegrasPremiacao {
    pub categorias_individuais: CategoryTree,
    pub categorias_loja: CategoryTree,
    pub gerencial: GerencialRules,
    pub farmaceutico: TabelaComissao,
    pub auxiliar: TabelaComissao,
    pub consultora: TabelaComissao,
    pub apoio: ApoioRules,
    pub aux_conveniencia: ConvenienciaRules,
}

impl Default for RegrasPremiacao {
    fn default() -> Self {
        Self {
            categorias_individuais: CategoryTree::individual_padrao(),
            categorias_loja: CategoryTree::loja_padrao(),
            gerencial: GerencialRules::default(),
            // Farmacêutico recebe igual em similar e genérico: usa a categoria unificada
            farmaceutico: TabelaComissao::from_percentuais(&[
                ("generico_similar", Decimal::from(2)),
                ("dermocosmetico", Decimal::from(2)),
                ("rentaveis20", Decimal::ONE),
                ("rentaveis25", Decimal::ONE),
            ]),
            auxiliar: TabelaComissao::from_percentuais(&[
                ("similar", Decimal::from(5)),
                ("generico", Decimal::new(45, 1)),
                ("dermocosmetico", Decimal::from(2)),
                ("rentaveis20", Decimal::ONE),
                ("rentaveis25", Decimal::ONE),
            ]),
            consultora: TabelaComissao::from_percentuais(&[
                ("perfumaria_alta", Decimal::from(3)),
                ("dermocosmetico", Decimal::from(3)),
                ("goodlife", Decimal::from(2)),
            ]),
            apoio: ApoioRules::default(),
            aux_conveniencia: ConvenienciaRules::default(),
        }
    }
}

impl RegrasPremiacao {
    /// Checagens que não cabem no `try_from` das tabelas (relações entre elas).
    pub fn validar(&self) -> Result<(), EngineError> {
        self.categorias_individuais.validar("individual")?;
        self.categorias_loja.validar("loja")?;

        for indicador in &self.gerencial.indicadores {
            if self.categorias_loja.ordem(indicador) == usize::MAX {
                return Err(EngineError::InvalidSchedule(format!(
                    "indicador gerencial '{}' não existe na árvore da loja", indicador
                )));
            }
        }

        for (nome, tabela) in [
            ("farmaceutico", &self.farmaceutico),
            ("auxiliar", &self.auxiliar),
            ("consultora", &self.consultora),
            ("aux_conveniencia", &self.aux_conveniencia.comissao),
        ] {
            tabela.validar(nome)?;
            for chave in tabela.taxas.keys() {
                if chave != GERAL && self.categorias_individuais.ordem(chave) == usize::MAX {
                    return Err(EngineError::InvalidSchedule(format!(
                        "a tabela {} cita a categoria '{}', ausente da árvore individual", nome, chave
                    )));
                }
            }
        }

        for (nome, apoio) in [("apoio", &self.apoio), ("aux_conveniencia", &self.aux_conveniencia.apoio)] {
            apoio.validar(nome)?;
            if self.categorias_loja.ordem(&apoio.categoria_meta) == usize::MAX {
                return Err(EngineError::InvalidSchedule(format!(
                    "a tabela {} usa a categoria '{}' como meta, ausente da árvore da loja",
                    nome, apoio.categoria_meta
                )));
            }
        }
        Ok(())
    }
}
