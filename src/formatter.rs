use crate::models::{Kpi, Unit};
use rand::Rng;

pub const PLACEHOLDER: &str = "--";
const FALLBACK_HISTORY_POINTS: usize = 10;
const FALLBACK_JITTER: f64 = 0.1;
// Every finite f64 has a terminating decimal expansion shorter than this.
const EXACT_FRACTION_DIGITS: usize = 1100;

/// Renders a number the way the dashboard front end prints plain numbers:
/// no trailing `.0` for integral values.
pub fn format_plain(value: f64) -> String {
    format!("{}", value)
}

/// Fixed-point rendering that rounds ties away from zero, matching the front
/// end's `toFixed`. `format!("{:.N}")` rounds exact binary ties to even.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return format_plain(value);
    }

    let expanded = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let Some((whole, fraction)) = expanded.split_once('.') else {
        return expanded;
    };
    let fraction = fraction.as_bytes();
    let mut kept = whole.as_bytes().to_vec();
    kept.extend_from_slice(&fraction[..digits]);

    if fraction[digits] >= b'5' {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let split = kept.len() - digits;
    let mut rendered = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        rendered.push('-');
    }
    rendered.push_str(&String::from_utf8_lossy(&kept[..split]));
    if digits > 0 {
        rendered.push('.');
        rendered.push_str(&String::from_utf8_lossy(&kept[split..]));
    }
    rendered
}

pub fn format_value(value: f64, unit: Unit) -> String {
    match unit {
        Unit::InrBillion => format!("₹{}B", to_fixed(value, 2)),
        Unit::InrMillion => format!("₹{}M", to_fixed(value, 1)),
        Unit::InrCrores => format!("₹{}Cr", to_fixed(value, 1)),
        Unit::MillionUnits => format!("{}M", to_fixed(value, 1)),
        Unit::MillionLitres => format!("{}M L", to_fixed(value, 1)),
        Unit::Percent => format!("{}%", to_fixed(value, 1)),
        Unit::OutOfTen => format!("{}/10", to_fixed(value, 1)),
        Unit::TimesPerYear => format!("{}x", to_fixed(value, 1)),
        Unit::Hours => format!("{}h", to_fixed(value, 1)),
        Unit::Days => format!("{} days", to_fixed(value, 1)),
        Unit::Count | Unit::CountPerMonth => format_plain(value),
    }
}

pub fn format_optional(value: Option<f64>, unit: Unit) -> String {
    value
        .map(|value| format_value(value, unit))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Compact value label used in chat metric lines, e.g. `32.8%` or `1.24B`.
pub fn chat_value_label(kpi: &Kpi, abbreviate_billions: bool) -> String {
    let suffix = match kpi.unit {
        Unit::Percent => "%",
        Unit::InrBillion if abbreviate_billions => "B",
        other => other.as_str(),
    };
    format!("{}{}", format_plain(kpi.value), suffix)
}

/// Sparkline points for a KPI card. Falls back to a jittered series around the
/// current value when the record carries fewer than two history points.
pub fn sparkline(kpi: &Kpi) -> Vec<f64> {
    if kpi.history.len() > 1 {
        return kpi.history.clone();
    }
    fallback_history(kpi.value, &mut rand::rng())
}

fn fallback_history(current: f64, rng: &mut impl Rng) -> Vec<f64> {
    (0..FALLBACK_HISTORY_POINTS)
        .map(|_| {
            let variation = current * (1.0 + (rng.random::<f64>() - 0.5) * FALLBACK_JITTER);
            (variation * 100.0).round() / 100.0
        })
        .collect()
}
