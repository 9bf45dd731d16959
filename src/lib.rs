// src/lib.rs

pub mod common;
pub mod config;
pub mod docs;
pub mod engine;
pub mod handlers;
pub mod models;
pub mod services;
pub mod sources;

pub use engine::PremiacaoEngine;
