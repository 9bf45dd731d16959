// src/engine/calendar.rs

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::{common::error::EngineError, models::calendar::WorkCalendar};

const REGIAO_CENTRO: &str = "centro";

pub fn fecha_aos_domingos(regiao: &str) -> bool {
    regiao.trim().eq_ignore_ascii_case(REGIAO_CENTRO)
}

/// Calcula os dias úteis decorridos e restantes do período.
///
/// Um dia não conta se for ausência do colaborador, ou domingo numa loja da
/// região centro. O dia de hoje só conta como decorrido quando já há vendas
/// registradas nele.
pub fn calcular_calendario(
    inicio: NaiveDate,
    fim: NaiveDate,
    regiao: &str,
    ausencias: &[NaiveDate],
    has_sales_today: bool,
    hoje: NaiveDate,
) -> Result<WorkCalendar, EngineError> {
    if fim < inicio {
        return Err(EngineError::InvalidPeriod { inicio, fim });
    }

    let fecha_domingo = fecha_aos_domingos(regiao);
    let ausencias: HashSet<NaiveDate> = ausencias.iter().copied().collect();

    let mut elapsed = 0u32;
    let mut remaining = 0u32;

    for dia in inicio.iter_days().take_while(|d| *d <= fim) {
        if fecha_domingo && dia.weekday() == Weekday::Sun {
            continue;
        }
        if ausencias.contains(&dia) {
            continue;
        }

        if dia < hoje || (dia == hoje && has_sales_today) {
            elapsed += 1;
        } else {
            remaining += 1;
        }
    }

    let total = elapsed + remaining;
    let percent_time_elapsed = if total == 0 {
        Decimal::ZERO
    } else {
        Decimal::from(elapsed) / Decimal::from(total) * Decimal::ONE_HUNDRED
    };

    tracing::debug!(
        "Calendário {}..{}: {} dias úteis ({} decorridos, {} restantes)",
        inicio, fim, total, elapsed, remaining
    );

    Ok(WorkCalendar {
        total_work_days: total,
        elapsed_work_days: elapsed,
        remaining_work_days: remaining,
        percent_time_elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // Março/2024: começa numa sexta, 31 dias, 5 domingos (3, 10, 17, 24, 31)
    #[test]
    fn centro_skips_every_sunday() {
        let cal = calcular_calendario(d(2024, 3, 1), d(2024, 3, 31), "centro", &[], false, d(2024, 4, 1)).unwrap();
        assert_eq!(cal.total_work_days, 26);
        assert_eq!(cal.elapsed_work_days, 26);
        assert_eq!(cal.remaining_work_days, 0);
        assert_eq!(cal.percent_time_elapsed, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn other_regions_work_on_sundays() {
        let cal = calcular_calendario(d(2024, 3, 1), d(2024, 3, 31), "litoral", &[], false, d(2024, 3, 1)).unwrap();
        assert_eq!(cal.total_work_days, 31);
        assert_eq!(cal.elapsed_work_days, 0);
        assert_eq!(cal.remaining_work_days, 31);
        assert_eq!(cal.percent_time_elapsed, Decimal::ZERO);
    }

    #[test]
    fn region_match_ignores_case_and_blanks() {
        assert!(fecha_aos_domingos(" Centro "));
        assert!(!fecha_aos_domingos("centro-oeste"));
    }

    #[test]
    fn today_counts_only_with_sales() {
        let sem = calcular_calendario(d(2024, 3, 1), d(2024, 3, 10), "", &[], false, d(2024, 3, 6)).unwrap();
        let com = calcular_calendario(d(2024, 3, 1), d(2024, 3, 10), "", &[], true, d(2024, 3, 6)).unwrap();
        assert_eq!(sem.elapsed_work_days, 5);
        assert_eq!(sem.remaining_work_days, 5);
        assert_eq!(com.elapsed_work_days, 6);
        assert_eq!(com.remaining_work_days, 4);
        assert_eq!(sem.total_work_days, com.total_work_days);
    }

    #[test]
    fn absences_leave_totals_and_elapsed() {
        let ausencias = [d(2024, 3, 2), d(2024, 3, 2), d(2024, 3, 8), d(2024, 4, 15)];
        let cal = calcular_calendario(d(2024, 3, 1), d(2024, 3, 10), "", &ausencias, false, d(2024, 3, 6)).unwrap();
        assert_eq!(cal.total_work_days, 8);
        assert_eq!(cal.elapsed_work_days, 4);
        assert_eq!(cal.remaining_work_days, 4);
        assert_eq!(cal.percent_time_elapsed, Decimal::from(50));
    }

    #[test]
    fn end_before_start_is_invalid_period() {
        let err = calcular_calendario(d(2024, 3, 31), d(2024, 3, 1), "", &[], false, d(2024, 3, 15)).unwrap_err();
        assert_eq!(err, EngineError::InvalidPeriod { inicio: d(2024, 3, 31), fim: d(2024, 3, 1) });
    }

    #[test]
    fn everything_absent_gives_zero_percent() {
        let ausencias = [d(2024, 3, 4), d(2024, 3, 5)];
        let cal = calcular_calendario(d(2024, 3, 4), d(2024, 3, 5), "", &ausencias, false, d(2024, 3, 5)).unwrap();
        assert_eq!(cal.total_work_days, 0);
        assert_eq!(cal.percent_time_elapsed, Decimal::ZERO);
    }

    #[test]
    fn elapsed_plus_remaining_always_matches_total() {
        let inicio = d(2024, 2, 1);
        let fim = d(2024, 2, 29);
        for offset in 0..40 {
            let hoje = inicio + chrono::Days::new(offset);
            for regiao in ["centro", "norte"] {
                for vendas_hoje in [false, true] {
                    let cal = calcular_calendario(inicio, fim, regiao, &[d(2024, 2, 14)], vendas_hoje, hoje).unwrap();
                    assert_eq!(cal.elapsed_work_days + cal.remaining_work_days, cal.total_work_days);
                    assert!(cal.percent_time_elapsed >= Decimal::ZERO);
                    assert!(cal.percent_time_elapsed <= Decimal::ONE_HUNDRED);
                }
            }
        }
    }
}
