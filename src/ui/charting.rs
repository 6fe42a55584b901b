/// X span and Y ceiling for the progress chart. Scores are percentages, so
/// the ceiling never drops below 100.
pub fn compute_chart_params(coords: &[(f64, f64)]) -> (f64, f64) {
    let highest = coords.iter().map(|&(_, y)| y).fold(100.0, f64::max);

    let mut overall = coords.last().map(|p| p.0).unwrap_or(1.0);
    if overall < 2.0 {
        overall = 2.0;
    }

    (overall, highest.round())
}

/// X span of a waveform trace
pub fn waveform_span(coords: &[(f64, f64)]) -> f64 {
    match coords.last() {
        Some(&(x, _)) if x > 0.0 => x,
        _ => 1.0,
    }
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
