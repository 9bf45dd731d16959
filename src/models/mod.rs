// src/models/mod.rs

pub mod calendar;
pub mod insight;
pub mod premiacao;
pub mod sales;
pub mod snapshot;
