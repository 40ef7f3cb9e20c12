//! Release velocity estimation for swipe gestures.
//!
//! The swipe detector uses the coarse average speed of the whole drag to pick
//! a navigation threshold. Once the finger lifts, the settle animation wants
//! the instantaneous speed instead, so the page keeps moving the way the
//! finger did. This tracker provides that: a weighted least-squares fit over
//! the most recent samples.

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within this window of the newest one are fitted.
const HORIZON_MS: u64 = 100;

/// A pointer resting this long without real movement counts as stopped.
const ASSUME_STOPPED_MS: u64 = 40;

/// Movement (px) below which a resting pointer counts as stopped.
const MIN_MOVEMENT_THRESHOLD: f32 = 2.0;

/// Per-sample weight decay; newer samples dominate the fit.
const RECENCY_DECAY: f32 = 0.95;

#[derive(Clone, Copy, Debug, Default)]
struct Sample {
    time_ms: u64,
    position: f32,
}

/// 1D velocity tracker over absolute positions.
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    /// Records the pointer position at `time_ms`.
    pub fn add_position(&mut self, time_ms: u64, position: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time_ms, position });
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }

    /// Velocity in px/ms; positive when the position grows.
    ///
    /// Returns 0.0 with fewer than two samples in the window or when the
    /// pointer has effectively stopped.
    pub fn velocity_per_ms(&self) -> f32 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        let mut offsets = [0.0f32; HISTORY_SIZE];
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut oldest = newest;
        let mut cursor = self.newest;

        while count < HISTORY_SIZE {
            let Some(sample) = self.samples[cursor] else {
                break;
            };
            let age = newest.time_ms.saturating_sub(sample.time_ms);
            if age > HORIZON_MS || sample.time_ms > newest.time_ms {
                break;
            }
            oldest = sample;
            offsets[count] = -(age as f32);
            positions[count] = sample.position;
            count += 1;
            cursor = cursor.checked_sub(1).unwrap_or(HISTORY_SIZE - 1);
        }

        if count < 2 {
            return 0.0;
        }

        let span_ms = newest.time_ms - oldest.time_ms;
        let travel = (newest.position - oldest.position).abs();
        if span_ms > ASSUME_STOPPED_MS && travel < MIN_MOVEMENT_THRESHOLD {
            return 0.0;
        }

        weighted_slope(&offsets[..count], &positions[..count])
    }
}

/// Slope of `positions` over `times` by weighted linear regression, with
/// weights decaying from the first (newest) sample.
fn weighted_slope(times: &[f32], positions: &[f32]) -> f32 {
    let mut weight = 1.0f32;
    let (mut sw, mut st, mut sx, mut stt, mut stx) = (0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32);

    for (&t, &x) in times.iter().zip(positions) {
        sw += weight;
        st += weight * t;
        sx += weight * x;
        stt += weight * t * t;
        stx += weight * t * x;
        weight *= RECENCY_DECAY;
    }

    let denom = sw * stt - st * st;
    if denom.abs() < f32::EPSILON {
        return 0.0;
    }
    (sw * stx - st * sx) / denom
}
