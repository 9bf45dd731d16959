// src/handlers/mod.rs

pub mod premiacao;
