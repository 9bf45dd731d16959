// src/engine/tenure.rs

use chrono::{Datelike, NaiveDate};

use crate::models::calendar::Tenure;

// Diferença em meses completos: o mês só conta quando o dia da admissão é
// alcançado. Admissão no futuro dá zero.
pub fn calcular_tempo_de_casa(admissao: NaiveDate, agora: NaiveDate) -> Tenure {
    if agora <= admissao {
        return Tenure::default();
    }

    let mut meses = (agora.year() - admissao.year()) * 12
        + agora.month() as i32
        - admissao.month() as i32;
    if agora.day() < admissao.day() {
        meses -= 1;
    }

    Tenure::from_total_meses(meses.max(0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn whole_years_and_months() {
        let t = calcular_tempo_de_casa(d(2021, 5, 10), d(2024, 3, 15));
        assert_eq!(t, Tenure { anos: 2, meses: 10 });
        assert_eq!(t.total_meses(), 34);
    }

    #[test]
    fn month_needs_the_day_reached() {
        assert_eq!(calcular_tempo_de_casa(d(2024, 1, 20), d(2024, 3, 19)).total_meses(), 1);
        assert_eq!(calcular_tempo_de_casa(d(2024, 1, 20), d(2024, 3, 20)).total_meses(), 2);
    }

    #[test]
    fn exact_anniversary() {
        assert_eq!(calcular_tempo_de_casa(d(2023, 3, 1), d(2024, 3, 1)), Tenure { anos: 1, meses: 0 });
    }

    #[test]
    fn future_or_same_day_hire_is_zero() {
        assert_eq!(calcular_tempo_de_casa(d(2024, 6, 1), d(2024, 3, 1)), Tenure::default());
        assert_eq!(calcular_tempo_de_casa(d(2024, 3, 1), d(2024, 3, 1)), Tenure::default());
    }

    #[test]
    fn end_of_month_hire() {
        // 31/01 -> 29/02 ainda não completa um mês
        assert_eq!(calcular_tempo_de_casa(d(2024, 1, 31), d(2024, 2, 29)).total_meses(), 0);
        assert_eq!(calcular_tempo_de_casa(d(2024, 1, 31), d(2024, 3, 31)).total_meses(), 2);
    }
}
