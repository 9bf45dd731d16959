// src/services/mod.rs

pub mod computation_guard;
pub mod premiacao_service;

pub use premiacao_service::PremiacaoService;
