use crate::{
    dsp::{
        distortion::WaveShaper,
        filter::{Biquad, FilterStage},
    },
    error::ConfigError,
};

/*
Linear Post-Processing Chain
============================

After the voices of every chord are summed, the signal passes through a
fixed, strictly ordered list of stages:

  Σ voices ──→ [stage 0] ──→ [stage 1] ──→ ... ──→ master gain

There is no branching and no bypass. Each stage owns its own state, so the
chain as a whole holds nothing per voice.

The default chain balances registers: Karplus-Strong voices at high pitch
decay faster and sound thinner than low ones, so lows get a shelf boost, the
A3 region a small lift, and the top end a shelf cut.

Order:
------
Stages run in the order they were declared. Linear EQ stages commute in
exact arithmetic, but a waveshaper does not: shaping before a +15 dB boost
is a very different sound from shaping after it. The chain therefore never
reorders.
*/

/// One step of a [`FilterChain`].
pub enum ChainStage {
    Eq(Biquad),
    Shaper(WaveShaper),
}

impl ChainStage {
    #[inline]
    pub fn next_sample(&mut self, sample: f32) -> f32 {
        match self {
            ChainStage::Eq(biquad) => biquad.next_sample(sample),
            ChainStage::Shaper(shaper) => shaper.apply(sample),
        }
    }

    pub fn reset(&mut self) {
        if let ChainStage::Eq(biquad) = self {
            biquad.reset();
        }
    }
}

pub struct FilterChain {
    stages: Vec<ChainStage>,
}

impl FilterChain {
    pub fn new(stages: &[FilterStage], sample_rate: f32) -> Result<Self, ConfigError> {
        let stages = stages
            .iter()
            .map(|&stage| Biquad::new(stage, sample_rate).map(ChainStage::Eq))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { stages })
    }

    /// LowShelf(600 Hz, +15 dB) → Peaking(220 Hz, +5 dB) → HighShelf(2500 Hz, −15 dB)
    pub fn default_chain(sample_rate: f32) -> Result<Self, ConfigError> {
        Self::new(&FilterStage::default_chain(), sample_rate)
    }

    pub fn empty() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append an EQ stage after the existing ones.
    pub fn with_stage(mut self, stage: FilterStage, sample_rate: f32) -> Result<Self, ConfigError> {
        self.stages.push(ChainStage::Eq(Biquad::new(stage, sample_rate)?));
        Ok(self)
    }

    /// Append a waveshaper after the existing stages.
    pub fn with_shaper(mut self, shaper: WaveShaper) -> Self {
        self.stages.push(ChainStage::Shaper(shaper));
        self
    }

    #[inline]
    pub fn apply(&mut self, sample: f32) -> f32 {
        self.stages
            .iter_mut()
            .fold(sample, |x, stage| stage.next_sample(x))
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.apply(*sample);
        }
    }

    pub fn stages(&self) -> &[ChainStage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::filter::FilterKind;

    const SR: f32 = 44_100.0;

    fn test_signal(len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| {
                let t = i as f32 / SR;
                0.4 * (std::f32::consts::TAU * 220.0 * t).sin()
                    + 0.2 * (std::f32::consts::TAU * 1800.0 * t).sin()
            })
            .collect()
    }

    #[test]
    fn test_default_chain_layout() {
        let chain = FilterChain::default_chain(SR).unwrap();
        let kinds: Vec<FilterKind> = chain
            .stages()
            .iter()
            .map(|stage| match stage {
                ChainStage::Eq(biquad) => biquad.stage().kind,
                ChainStage::Shaper(_) => panic!("default chain has no shaper"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![FilterKind::LowShelf, FilterKind::Peaking, FilterKind::HighShelf]
        );
    }

    #[test]
    fn test_chain_applies_stages_in_declared_order() {
        let stages = FilterStage::default_chain();
        let mut chain = FilterChain::new(&stages, SR).unwrap();
        let mut manual: Vec<Biquad> = stages
            .iter()
            .map(|&s| Biquad::new(s, SR).unwrap())
            .collect();

        for x in test_signal(1024) {
            let expected = manual.iter_mut().fold(x, |acc, b| b.next_sample(acc));
            assert_eq!(chain.apply(x), expected);
        }
    }

    #[test]
    fn test_order_matters_with_shaper() {
        let boost = FilterStage::low_shelf(600.0, 15.0);

        let mut shape_then_boost = FilterChain::empty()
            .with_shaper(WaveShaper::asymmetric())
            .with_stage(boost, SR)
            .unwrap();
        let mut boost_then_shape = FilterChain::empty()
            .with_stage(boost, SR)
            .unwrap()
            .with_shaper(WaveShaper::asymmetric());

        let mut a = test_signal(2048);
        let mut b = a.clone();
        shape_then_boost.render(&mut a);
        boost_then_shape.render(&mut b);

        let max_diff = a
            .iter()
            .zip(&b)
            .fold(0.0f32, |acc, (x, y)| acc.max((x - y).abs()));
        assert!(max_diff > 0.1, "expected order to matter, max diff {max_diff}");
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let mut chain = FilterChain::empty();
        assert!(chain.is_empty());
        let input = test_signal(128);
        let mut buffer = input.clone();
        chain.render(&mut buffer);
        assert_eq!(buffer, input);
    }

    #[test]
    fn test_invalid_stage_fails_chain() {
        let stages = [
            FilterStage::low_shelf(600.0, 15.0),
            FilterStage::high_shelf(40_000.0, -15.0),
        ];
        assert!(matches!(
            FilterChain::new(&stages, SR),
            Err(ConfigError::InvalidFilterFrequency { .. })
        ));
    }

    #[test]
    fn test_reset_restores_initial_response() {
        let mut chain = FilterChain::default_chain(SR).unwrap();
        let input = test_signal(256);

        let mut first = input.clone();
        chain.render(&mut first);
        chain.reset();
        let mut second = input.clone();
        chain.render(&mut second);

        assert_eq!(first, second);
    }

    #[test]
    fn test_default_chain_favours_low_register() {
        let mut low = FilterChain::default_chain(SR).unwrap();
        let mut high = FilterChain::default_chain(SR).unwrap();

        let tone = |freq: f32| -> Vec<f32> {
            (0..22_050)
                .map(|i| (std::f32::consts::TAU * freq * i as f32 / SR).sin())
                .collect()
        };
        let mut low_buf = tone(150.0);
        let mut high_buf = tone(4000.0);
        low.render(&mut low_buf);
        high.render(&mut high_buf);

        let peak = |b: &[f32]| b[11_025..].iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        assert!(peak(&low_buf[..]) > 4.0 * peak(&high_buf[..]));
    }
}
