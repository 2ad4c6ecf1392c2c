//! Status bar and volume gauge

use karplus::analysis::AudioStats;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    sample_rate: f32,
    volume: f32,
    stats: &AudioStats,
) {
    let block = Block::default().title(" karplus ").borders(Borders::ALL);

    let line = Line::from(vec![
        Span::styled(" ▶ Plucking  ", Style::default().fg(Color::Green)),
        Span::styled(
            format!("{:.1}kHz  ", sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Vol: {:>3.0}%  ", volume * 100.0),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

pub fn render_volume(frame: &mut Frame, area: Rect, volume: f32) {
    let gauge = Gauge::default()
        .block(Block::default().title(" Volume ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(volume.clamp(0.0, 1.0) as f64)
        .label(format!("{:.0}%", volume * 100.0));

    frame.render_widget(gauge, area);
}
