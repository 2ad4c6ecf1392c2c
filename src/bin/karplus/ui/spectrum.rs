//! Spectrum analyzer widget

use karplus::analysis::spectrum::{MAX_DB, MIN_DB};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Render (frequency_hz, magnitude_db) pairs on a log-frequency axis.
pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let data: Vec<(f64, f64)> = spectrum
        .iter()
        .map(|&(freq, db)| (freq.max(1.0).log10(), db.clamp(MIN_DB, MAX_DB)))
        .collect();

    let (lo, hi) = data
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), &(x, _)| (lo.min(x), hi.max(x)));
    let x_bounds = if lo < hi { [lo, hi] } else { [0.0, 1.0] };

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds(x_bounds)
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([MIN_DB, MAX_DB])
                .labels(vec!["-100", "-65", "-30"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
