//! Random log line generation.

use std::fmt;

use rand::Rng;

use crate::service::EventCatalog;

/// Exclusive upper bound of fabricated entity numbers.
pub const ENTITY_ID_BOUND: u32 = 10_000;

/// Range of fabricated payment amounts, `[min, min + span)`.
pub const AMOUNT_MIN: f64 = 10.0;
pub const AMOUNT_SPAN: f64 = 990.0;

/// Severity of a generated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// Weighted pool: three in five lines are INFO.
pub const LEVEL_POOL: [LogLevel; 5] = [
    LogLevel::Info,
    LogLevel::Info,
    LogLevel::Info,
    LogLevel::Warn,
    LogLevel::Error,
];

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fabricated log line, ready to emit.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedLog {
    pub event: &'static str,
    pub entity_id: String,
    pub amount: Option<f64>,
    pub level: LogLevel,
    pub message: String,
}

/// Draw a log line from `catalog`.
///
/// Draw order is event, entity number, amount (when the catalogue has one),
/// level.
pub fn generate<R: Rng + ?Sized>(catalog: &EventCatalog, rng: &mut R) -> GeneratedLog {
    let event = catalog.events[rng.gen_range(0..catalog.events.len())];
    let entity_id = format!("{}{}", catalog.entity_prefix, rng.gen_range(0..ENTITY_ID_BOUND));
    let amount = catalog
        .with_amount
        .then(|| AMOUNT_MIN + rng.gen::<f64>() * AMOUNT_SPAN);
    let level = LEVEL_POOL[rng.gen_range(0..LEVEL_POOL.len())];

    let mut message = match amount {
        Some(amount) => format!(
            "{} for {}={}, amount={:.2}",
            event, catalog.entity_key, entity_id, amount
        ),
        None => format!("{} for {}={}", event, catalog.entity_key, entity_id),
    };
    match level {
        LogLevel::Info => {}
        LogLevel::Warn => message.push_str(catalog.warn_suffix),
        LogLevel::Error => message.push_str(catalog.error_suffix),
    }

    GeneratedLog {
        event,
        entity_id,
        amount,
        level,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{ORDER_CATALOG, PAYMENT_CATALOG};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entity_number(log: &GeneratedLog, prefix: &str) -> u32 {
        log.entity_id
            .strip_prefix(prefix)
            .expect("prefix")
            .parse()
            .expect("numeric entity id")
    }

    #[test]
    fn test_order_lines() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let log = generate(&ORDER_CATALOG, &mut rng);
            assert!(ORDER_CATALOG.events.contains(&log.event));
            assert!(entity_number(&log, "ORD-") < ENTITY_ID_BOUND);
            assert_eq!(log.amount, None);

            let base = format!("{} for orderId={}", log.event, log.entity_id);
            let expected = match log.level {
                LogLevel::Info => base,
                LogLevel::Warn => format!("{base} - potential delay detected"),
                LogLevel::Error => format!("{base} - validation failed"),
            };
            assert_eq!(log.message, expected);
        }
    }

    #[test]
    fn test_payment_lines() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let log = generate(&PAYMENT_CATALOG, &mut rng);
            assert!(PAYMENT_CATALOG.events.contains(&log.event));
            assert!(entity_number(&log, "PAY-") < ENTITY_ID_BOUND);

            let amount = log.amount.expect("payment lines carry an amount");
            assert!((AMOUNT_MIN..AMOUNT_MIN + AMOUNT_SPAN).contains(&amount));

            let base = format!(
                "{} for paymentId={}, amount={:.2}",
                log.event, log.entity_id, amount
            );
            let expected = match log.level {
                LogLevel::Info => base,
                LogLevel::Warn => format!("{base} - fraud check pending"),
                LogLevel::Error => format!("{base} - insufficient funds"),
            };
            assert_eq!(log.message, expected);
        }
    }

    #[test]
    fn test_level_distribution_favours_info() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 3];
        for _ in 0..5_000 {
            match generate(&ORDER_CATALOG, &mut rng).level {
                LogLevel::Info => counts[0] += 1,
                LogLevel::Warn => counts[1] += 1,
                LogLevel::Error => counts[2] += 1,
            }
        }
        // Expected 3000 / 1000 / 1000.
        assert!((2_700..3_300).contains(&counts[0]), "{:?}", counts);
        assert!((800..1_200).contains(&counts[1]), "{:?}", counts);
        assert!((800..1_200).contains(&counts[2]), "{:?}", counts);
    }

    #[test]
    fn test_same_seed_same_line() {
        let a = generate(&PAYMENT_CATALOG, &mut StdRng::seed_from_u64(3));
        let b = generate(&PAYMENT_CATALOG, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
