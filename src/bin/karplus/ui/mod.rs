//! TUI module for karplus
//!
//! Spectrum, oscilloscope and volume control over the engine's analyzer tap.

mod spectrum;
mod transport;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use karplus::{
    analysis::{spectrum::SpectrumAnalyzer, AudioStats, FFT_SIZE},
    graph::{TapReader, VolumeHandle},
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use std::time::Duration;

use spectrum::render_spectrum;
use transport::{render_transport, render_volume};
use waveform::render_waveform;

/// Samples shown by the oscilloscope
const VIS_BUFFER_SIZE: usize = 1024;
/// Volume change per key press
const VOLUME_STEP: f32 = 0.05;

pub struct UiApp {
    reader: TapReader,
    volume: VolumeHandle,
    sample_rate: f32,
    analyzer: SpectrumAnalyzer,
    stats: AudioStats,
    should_quit: bool,
}

impl UiApp {
    pub fn new(reader: TapReader, volume: VolumeHandle, sample_rate: f32) -> Self {
        Self {
            reader,
            volume,
            sample_rate,
            analyzer: SpectrumAnalyzer::new(FFT_SIZE, sample_rate),
            stats: AudioStats::default(),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Drain the tap; a slow or empty tap just leaves the last picture up.
    fn poll_audio(&mut self) {
        if self.reader.poll() == 0 {
            return;
        }
        self.stats = AudioStats::from_buffer(self.oscilloscope());
        if self.reader.has_full_window() {
            self.analyzer.update(self.reader.window());
            self.reader.mark_seen();
        }
    }

    fn oscilloscope(&self) -> &[f32] {
        let window = self.reader.window();
        &window[window.len().saturating_sub(VIS_BUFFER_SIZE)..]
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => {
                self.volume.nudge(VOLUME_STEP);
            }
            KeyCode::Down | KeyCode::Char('-') => {
                self.volume.nudge(-VOLUME_STEP);
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(8),    // Spectrum
                Constraint::Length(8), // Waveform
                Constraint::Length(3), // Volume
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let volume = self.volume.volume();
        render_transport(frame, chunks[0], self.sample_rate, volume, &self.stats);
        render_spectrum(frame, chunks[1], self.analyzer.data());
        render_waveform(frame, chunks[2], self.oscilloscope());
        render_volume(frame, chunks[3], volume);

        let help = Paragraph::new(" [Q] Quit  [Up/+] Louder  [Down/-] Quieter")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[4]);
    }
}
