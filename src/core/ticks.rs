use crate::core::{DateGranularity, TemporalPoint};

pub const AXIS_TIME_TARGET_SPACING_PX: f64 = 80.0;
pub const AXIS_VALUE_TARGET_SPACING_PX: f64 = 40.0;

const MONTH_STEPS: [u32; 8] = [1, 2, 3, 6, 12, 24, 60, 120];
const YEAR_STEPS: [u32; 7] = [1, 2, 5, 10, 20, 50, 100];
const NICE_ITERATIONS: usize = 10;

/// Number of ticks that fit an axis span at the target spacing.
#[must_use]
pub fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

/// Rounds a raw step to 1, 2, 5 or 10 times a power of ten.
#[must_use]
pub fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// Extends `max` up to the next multiple of a nice tick step.
///
/// The step is recomputed against the extended bound until it settles, so the
/// result is aligned with the ticks `nice_ticks(0, result, tick_count)` yields.
#[must_use]
pub fn nice_upper_bound(max: f64, tick_count: usize) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return max;
    }
    let count = tick_count.max(1) as f64;
    let mut upper = max;
    let mut previous_step = 0.0;
    for _ in 0..NICE_ITERATIONS {
        let step = nice_step(upper / count);
        if step == 0.0 || step == previous_step {
            break;
        }
        upper = (max / step).ceil() * step;
        previous_step = step;
    }
    upper
}

/// Evenly spaced nice ticks covering `[min, max]`.
#[must_use]
pub fn nice_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    if min == max {
        return vec![min];
    }
    let step = nice_step((max - min) / count as f64);
    if step == 0.0 {
        return vec![min, max];
    }

    let start = (min / step).ceil();
    let stop = (max / step).floor();
    let n = (stop - start).round().clamp(0.0, 10_000.0) as u64;
    (0..=n)
        .map(|i| (start + i as f64) * step)
        .filter(|value| *value >= min - step * 1e-9 && *value <= max + step * 1e-9)
        .collect()
}

/// Calendar-aligned ticks between two points at the points' precision.
#[must_use]
pub fn temporal_ticks(
    start: TemporalPoint,
    end: TemporalPoint,
    target_count: usize,
) -> Vec<TemporalPoint> {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let target = target_count.max(1) as i64;
    let (span, steps): (i64, &[u32]) = match start.granularity() {
        DateGranularity::Month => (period_index(end) - period_index(start), &MONTH_STEPS),
        DateGranularity::Year => (
            i64::from(end.year_value()) - i64::from(start.year_value()),
            &YEAR_STEPS,
        ),
    };
    let step = steps
        .iter()
        .copied()
        .find(|step| span / i64::from(*step) < target)
        .unwrap_or(steps[steps.len() - 1]);

    // First tick is the first period at or after `start` aligned to the step.
    let offset = period_index(start).rem_euclid(i64::from(step));
    let lead = if offset == 0 {
        0
    } else {
        i64::from(step) - offset
    };
    let mut tick = start.advance(lead as u32);
    let mut ticks = Vec::new();
    while tick <= end {
        ticks.push(tick);
        tick = tick.advance(step);
    }
    ticks
}

fn period_index(point: TemporalPoint) -> i64 {
    match point.month_value() {
        Some(month) => i64::from(point.year_value()) * 12 + i64::from(month - 1),
        None => i64::from(point.year_value()),
    }
}
