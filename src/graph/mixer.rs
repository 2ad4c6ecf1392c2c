use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

/*
Master Gain
===========

The volume lives in an AtomicU32 holding the bit pattern of an f32. The
control thread writes it, the audio thread reads it once per block. Being a
block late is fine, so relaxed ordering is enough and no lock is involved.

To avoid zipper noise when the volume jumps, the mixer ramps linearly from
the gain it used at the end of the previous block to the new target across
the current block:

  gain[i] = previous + (target - previous) * (i + 1) / len

so the last sample of the block lands exactly on the target.
*/

/// Clamp a user-supplied volume into [0, 1]. NaN becomes silence.
#[inline]
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Cloneable control-side handle to the master volume.
#[derive(Clone)]
pub struct VolumeHandle {
    bits: Arc<AtomicU32>,
}

impl VolumeHandle {
    pub fn new(volume: f32) -> Self {
        Self {
            bits: Arc::new(AtomicU32::new(clamp_volume(volume).to_bits())),
        }
    }

    /// Set the normalised volume; out-of-range input is clamped. Returns the
    /// value actually stored.
    pub fn set_volume(&self, volume: f32) -> f32 {
        let volume = clamp_volume(volume);
        self.bits.store(volume.to_bits(), Ordering::Relaxed);
        volume
    }

    pub fn volume(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Shift the volume by `delta`, clamped.
    pub fn nudge(&self, delta: f32) -> f32 {
        self.set_volume(self.volume() + delta)
    }
}

/// Applies the master volume to the post-chain signal.
pub struct Mixer {
    volume: VolumeHandle,
    current_gain: f32,
}

impl Mixer {
    pub fn new(volume: f32) -> Self {
        let volume = VolumeHandle::new(volume);
        let current_gain = volume.volume();
        Self {
            volume,
            current_gain,
        }
    }

    pub fn volume_handle(&self) -> VolumeHandle {
        self.volume.clone()
    }

    /// Gain reached at the end of the last processed block.
    pub fn current_gain(&self) -> f32 {
        self.current_gain
    }

    pub fn apply(&mut self, block: &mut [f32]) {
        if block.is_empty() {
            return;
        }

        let target = self.volume.volume();
        let start = self.current_gain;

        if start == target {
            for sample in block.iter_mut() {
                *sample *= target;
            }
        } else {
            let step = (target - start) / block.len() as f32;
            let last = block.len() - 1;
            for (i, sample) in block.iter_mut().enumerate() {
                let gain = if i == last {
                    target
                } else {
                    start + step * (i + 1) as f32
                };
                *sample *= gain;
            }
        }

        self.current_gain = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_volume_is_clamped() {
        let handle = VolumeHandle::new(0.5);
        assert_eq!(handle.set_volume(1.7), 1.0);
        assert_eq!(handle.volume(), 1.0);
        assert_eq!(handle.set_volume(-0.3), 0.0);
        assert_eq!(handle.set_volume(f32::NAN), 0.0);
        assert_eq!(VolumeHandle::new(4.0).volume(), 1.0);
    }

    #[test]
    fn test_nudge_saturates() {
        let handle = VolumeHandle::new(0.9);
        assert_eq!(handle.nudge(0.5), 1.0);
        handle.set_volume(0.05);
        assert_eq!(handle.nudge(-0.1), 0.0);
    }

    #[test]
    fn test_steady_volume_scales_block() {
        let mut mixer = Mixer::new(0.25);
        let mut block = vec![2.0; 16];
        mixer.apply(&mut block);
        assert!(block.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn test_volume_change_ramps_across_one_block() {
        let mut mixer = Mixer::new(1.0);
        let handle = mixer.volume_handle();
        handle.set_volume(0.5);

        let mut block = vec![1.0; 64];
        mixer.apply(&mut block);
        assert!(block[0] < 1.0 && block[0] > 0.5);
        for pair in block.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        assert_eq!(block[63], 0.5);
        assert_eq!(mixer.current_gain(), 0.5);

        let mut next = vec![1.0; 64];
        mixer.apply(&mut next);
        assert!(next.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn test_zero_volume_silences_after_ramp() {
        let mut mixer = Mixer::new(0.8);
        mixer.volume_handle().set_volume(0.0);
        let mut ramp = vec![1.0; 32];
        mixer.apply(&mut ramp);
        let mut block = vec![1.0; 32];
        mixer.apply(&mut block);
        assert!(block.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_handle_works_across_threads() {
        let mixer = Mixer::new(1.0);
        let handle = mixer.volume_handle();
        std::thread::spawn(move || {
            handle.set_volume(0.3);
        })
        .join()
        .unwrap();
        assert_eq!(mixer.volume_handle().volume(), 0.3);
    }
}
