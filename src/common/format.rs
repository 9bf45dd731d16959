// src/common/format.rs

use rust_decimal::{Decimal, RoundingStrategy};

/// Arredonda valores monetários para centavos (meio para cima).
pub fn arredondar(valor: Decimal) -> Decimal {
    valor.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formata um valor no padrão brasileiro: `R$ 1.234,56`.
pub fn format_brl(valor: Decimal) -> String {
    let arredondado = arredondar(valor);
    let negativo = arredondado.is_sign_negative() && !arredondado.is_zero();
    let texto = format!("{:.2}", arredondado.abs());
    let (inteiro, centavos) = texto.split_once('.').unwrap_or((texto.as_str(), "00"));

    let mut agrupado = String::with_capacity(inteiro.len() + inteiro.len() / 3);
    for (i, c) in inteiro.chars().enumerate() {
        if i > 0 && (inteiro.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(c);
    }

    format!("{}R$ {},{}", if negativo { "-" } else { "" }, agrupado, centavos)
}

// "97,5%"
pub fn format_percentual(valor: Decimal) -> String {
    let arredondado = valor.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", arredondado).replace('.', ",")
}
