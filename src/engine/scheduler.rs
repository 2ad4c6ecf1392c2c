use crate::{
    engine::{clock::Clock, Engine},
    MAX_BLOCK_SIZE,
};

/// Drives an [`Engine`] from an output callback.
///
/// The device hands over interleaved buffers of arbitrary size. They are cut
/// into blocks of at most `MAX_BLOCK_SIZE` frames, the clock is read once per
/// block, and the mono result is copied to every channel. Pluck timing is
/// therefore only as fine as one block.
pub struct BlockScheduler<C: Clock> {
    engine: Engine,
    clock: C,
    channels: usize,
    block: Vec<f32>,
}

impl<C: Clock> BlockScheduler<C> {
    pub fn new(engine: Engine, clock: C, channels: usize) -> Self {
        Self {
            engine,
            clock,
            channels: channels.max(1),
            block: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Output callback body: fill an interleaved device buffer.
    pub fn fill_interleaved(&mut self, data: &mut [f32]) {
        let channels = self.channels;
        let total_frames = data.len() / channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);

            let block = &mut self.block[..frames_to_render];
            self.engine.render_block(block, self.clock.now_ms());
            self.clock.advance(frames_to_render);

            let out_off = frames_written * channels;
            let out = &mut data[out_off..out_off + frames_to_render * channels];
            for (frame, &s) in out.chunks_exact_mut(channels).zip(block.iter()) {
                frame.fill(s);
            }

            frames_written += frames_to_render;
        }

        // a trailing partial frame cannot be played, keep it silent
        data[total_frames * channels..].fill(0.0);
    }

    /// Render mono samples directly, e.g. for offline use.
    pub fn render_mono(&mut self, out: &mut [f32]) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.engine.render_block(chunk, self.clock.now_ms());
            self.clock.advance(chunk.len());
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn channels(&self) -> usize {
        self.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::EngineConfig,
        dsp::noise::WhiteNoise,
        engine::clock::{ManualClock, SampleClock},
        synth::chord::Chord,
    };

    const SR: f32 = 44_100.0;

    fn engine(frequencies: &[f32]) -> Engine {
        let config = EngineConfig::default();
        let clock = ManualClock::new(0);
        let chord = Chord::build_with(frequencies, &config.voice, SR, &clock, |i| {
            WhiteNoise::seeded(i as u64 + 1)
        })
        .unwrap();
        Engine::new(&config, vec![chord]).unwrap()
    }

    #[test]
    fn test_mono_is_copied_to_every_channel() {
        let mut stereo = BlockScheduler::new(engine(&[220.0]), ManualClock::new(0), 2);
        let mut mono = BlockScheduler::new(engine(&[220.0]), ManualClock::new(0), 1);

        let mut interleaved = vec![0.0; 512 * 2];
        stereo.fill_interleaved(&mut interleaved);
        let mut reference = vec![0.0; 512];
        mono.fill_interleaved(&mut reference);

        for (frame, &s) in interleaved.chunks_exact(2).zip(&reference) {
            assert_eq!(frame, &[s, s]);
        }
    }

    #[test]
    fn test_trailing_partial_frame_is_silenced() {
        let mut scheduler = BlockScheduler::new(engine(&[220.0]), ManualClock::new(0), 2);
        let mut data = vec![9.0; 7];
        scheduler.fill_interleaved(&mut data);
        assert_eq!(data[6], 0.0);
    }

    #[test]
    fn test_sample_clock_follows_rendered_frames() {
        let mut scheduler = BlockScheduler::new(engine(&[220.0]), SampleClock::new(SR), 2);
        let mut data = vec![0.0; 4410 * 2];
        scheduler.fill_interleaved(&mut data);
        assert_eq!(scheduler.clock().frames(), 4410);
        assert_eq!(scheduler.clock().now_ms(), 100);
    }

    #[test]
    fn test_pluck_cadence_over_k_periods() {
        // 5 s of audio in 512-frame callbacks
        let k = 5u64;
        let mut scheduler = BlockScheduler::new(engine(&[220.0]), SampleClock::new(SR), 1);
        let mut data = vec![0.0; 512];
        while scheduler.clock().now_ms() < k * 1000 {
            scheduler.fill_interleaved(&mut data);
        }

        let plucks = scheduler.engine().chords()[0].voices()[0].plucks();
        assert!(
            (k - 1..=k).contains(&plucks),
            "expected {} or {} plucks, got {plucks}",
            k - 1,
            k
        );
    }

    #[test]
    fn test_clock_is_read_once_per_block() {
        let clock = ManualClock::new(0);
        let mut scheduler = BlockScheduler::new(engine(&[220.0]), clock.clone(), 1);
        let mut data = vec![0.0; 256];

        clock.set(999);
        scheduler.fill_interleaved(&mut data);
        assert_eq!(scheduler.engine().chords()[0].voices()[0].plucks(), 1);

        // a long stall collapses into a single pluck
        clock.set(7_250);
        scheduler.fill_interleaved(&mut data);
        scheduler.fill_interleaved(&mut data);
        let voice = &scheduler.engine().chords()[0].voices()[0];
        assert_eq!(voice.plucks(), 2);
        assert_eq!(voice.next_pluck_at_ms(), 8_250);
    }

    #[test]
    fn test_render_mono_matches_single_channel_fill() {
        let mut a = BlockScheduler::new(engine(&[147.0, 220.0]), SampleClock::new(SR), 1);
        let mut b = BlockScheduler::new(engine(&[147.0, 220.0]), SampleClock::new(SR), 1);

        let mut x = vec![0.0; 3000];
        let mut y = vec![0.0; 3000];
        a.render_mono(&mut x);
        b.fill_interleaved(&mut y);
        assert_eq!(x, y);
    }
}
