// src/common/math.rs
//
// Aritmética de Decimal que nunca entra em pânico. Metas minúsculas ou vendas
// enormes podem estourar os 96 bits do Decimal; nesses casos o valor satura
// no limite do tipo, com o sinal do resultado.

use rust_decimal::Decimal;

fn limite(negativo: bool) -> Decimal {
    if negativo { Decimal::MIN } else { Decimal::MAX }
}

/// `numerador / denominador`; zero quando o denominador é zero.
pub fn dividir(numerador: Decimal, denominador: Decimal) -> Decimal {
    if denominador.is_zero() {
        return Decimal::ZERO;
    }
    numerador
        .checked_div(denominador)
        .unwrap_or_else(|| limite(numerador.is_sign_negative() != denominador.is_sign_negative()))
}

pub fn multiplicar(a: Decimal, b: Decimal) -> Decimal {
    a.saturating_mul(b)
}

pub fn somar(a: Decimal, b: Decimal) -> Decimal {
    a.saturating_add(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_saturates_instead_of_panicking() {
        let minuscula = Decimal::new(1, 20);
        assert_eq!(dividir(Decimal::from(1_000_000_000), minuscula), Decimal::MAX);
        assert_eq!(dividir(Decimal::from(-1_000_000_000), minuscula), Decimal::MIN);
    }

    #[test]
    fn division_by_zero_is_zero() {
        assert_eq!(dividir(Decimal::from(10), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn regular_values_are_exact() {
        assert_eq!(dividir(Decimal::from(10), Decimal::from(4)), Decimal::new(25, 1));
        assert_eq!(multiplicar(Decimal::MAX, Decimal::ONE_HUNDRED), Decimal::MAX);
        assert_eq!(somar(Decimal::MAX, Decimal::ONE), Decimal::MAX);
    }
}
