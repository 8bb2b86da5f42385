use serde::{Deserialize, Serialize};

/// Unit label and decimal precision used for tooltips and axis labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueFormat {
    pub unit: String,
    pub decimals: usize,
}

impl ValueFormat {
    #[must_use]
    pub fn new(unit: impl Into<String>, decimals: usize) -> Self {
        Self {
            unit: unit.into(),
            decimals,
        }
    }

    /// Monthly balance convention: whole gigawatt-hours.
    #[must_use]
    pub fn gigawatt_hours() -> Self {
        Self::new("GWh", 0)
    }

    /// Annual generation convention: terawatt-hours with two decimals.
    #[must_use]
    pub fn terawatt_hours() -> Self {
        Self::new("TWh", 2)
    }

    #[must_use]
    pub fn format_number(&self, value: f64) -> String {
        group_thousands(value, self.decimals)
    }

    /// `1,234 GWh` / `12.50 TWh`.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if self.unit.is_empty() {
            self.format_number(value)
        } else {
            format!("{} {}", self.format_number(value), self.unit)
        }
    }
}

/// Fixed-point formatting with `,` between thousands groups.
#[must_use]
pub fn group_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    if value.is_sign_negative() && !is_zero {
        grouped.push('-');
    }
    for (idx, digit) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Decimals needed to tell apart ticks spaced `step` apart.
#[must_use]
pub fn decimals_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    (-step.log10()).ceil().clamp(0.0, 12.0) as usize
}
