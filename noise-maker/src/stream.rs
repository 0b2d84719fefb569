use std::io::{self, Write};

use chrono::{Duration, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::generator::{generate_access_log, generate_garbage};

pub struct StreamConfig {
    pub count: usize,
    pub seed: Option<u64>,
    pub days: u32,
    pub garbage_rate: f64,
}

pub fn write_log_stream<W: Write>(config: &StreamConfig, out: &mut W) -> io::Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    // NaN survives clamp and would panic in random_bool
    let garbage_rate = if config.garbage_rate.is_nan() {
        0.0
    } else {
        config.garbage_rate.clamp(0.0, 1.0)
    };
    let end = Utc::now();
    let span = Duration::days(i64::from(config.days));

    for _ in 0..config.count {
        let line = if rng.random_bool(garbage_rate) {
            generate_garbage(&mut rng)
        } else {
            generate_access_log(&mut rng, end, span)
        };
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_garbage_rate_writes_valid_lines() {
        let config = StreamConfig {
            count: 5,
            seed: Some(1),
            days: 1,
            garbage_rate: f64::NAN,
        };
        let mut out = Vec::new();
        write_log_stream(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().all(|l| l.starts_with("192.168.")), "{text}");
    }
}
