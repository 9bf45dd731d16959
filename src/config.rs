// src/config.rs

use std::{env, fs, path::Path};

use anyhow::Context;

use crate::{
    engine::{rules::RegrasPremiacao, PremiacaoEngine},
    services::PremiacaoService,
};

#[derive(Clone)]
pub struct AppState {
    pub bind_addr: String,
    pub premiacao_service: PremiacaoService,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("PREMIACAO_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        // Sem arquivo de regras, usa as tabelas embutidas
        let regras = match env::var("PREMIACAO_REGRAS_PATH") {
            Ok(path) => {
                let regras = carregar_regras(Path::new(&path))?;
                tracing::info!("✅ Regras de premiação carregadas de {}", path);
                regras
            }
            Err(_) => {
                tracing::info!("Usando as regras de premiação padrão");
                RegrasPremiacao::default()
            }
        };

        Ok(Self::com_regras(bind_addr, regras))
    }

    // --- Monta o gráfico de dependências ---
    pub fn com_regras(bind_addr: String, regras: RegrasPremiacao) -> Self {
        let engine = PremiacaoEngine::new(regras);
        Self { bind_addr, premiacao_service: PremiacaoService::new(engine) }
    }
}

/// Lê e valida um arquivo JSON de `RegrasPremiacao`.
pub fn carregar_regras(path: &Path) -> anyhow::Result<RegrasPremiacao> {
    let conteudo = fs::read_to_string(path)
        .with_context(|| format!("Falha ao ler o arquivo de regras {}", path.display()))?;
    let regras: RegrasPremiacao = serde_json::from_str(&conteudo)
        .with_context(|| format!("Arquivo de regras {} mal formado", path.display()))?;
    regras.validar()?;
    Ok(regras)
}
