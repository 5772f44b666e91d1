//! Duration arguments
//!
//! Accepts the units `ms`, `s`, `m` and `h`, optionally compounded
//! (`1m30s`) and with decimals (`1.5h`). A bare integer is seconds.

use std::time::Duration;

/// Parse a duration argument such as `5m`, `90s` or `1m30s`
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }

    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total = Duration::ZERO;
    let mut rest = s;

    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| format!("missing unit in duration {input:?}"))?;
        if number_end == 0 {
            return Err(format!("invalid duration {input:?}"));
        }
        let number = &rest[..number_end];
        rest = &rest[number_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = &rest[..unit_end];
        rest = &rest[unit_end..];

        let millis_per_unit: u64 = match unit {
            "ms" => 1,
            "s" => 1_000,
            "m" => 60_000,
            "h" => 3_600_000,
            other => return Err(format!("unknown unit {other:?} in duration {input:?}")),
        };

        let part = match number.parse::<u64>() {
            Ok(whole) => whole
                .checked_mul(millis_per_unit)
                .map(Duration::from_millis)
                .ok_or_else(|| format!("duration {input:?} is too large"))?,
            Err(_) => {
                let value: f64 = number
                    .parse()
                    .map_err(|_| format!("invalid number {number:?} in duration {input:?}"))?;
                Duration::try_from_secs_f64(value * millis_per_unit as f64 / 1_000.0)
                    .map_err(|e| format!("invalid duration {input:?}: {e}"))?
            }
        };

        total = total
            .checked_add(part)
            .ok_or_else(|| format!("duration {input:?} is too large"))?;
    }

    Ok(total)
}
