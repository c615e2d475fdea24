//! Keyframe interpolation over a repeating timeline.
//!
//! Times are offsets from the start of the animation. One cycle runs from that
//! start to the last keyframe; before the first keyframe the first keyframe's
//! values are held. Between keyframes values are blended linearly.

use std::time::Duration;

use smallvec::SmallVec;

use crate::error::KeyframeError;

/// Values for one keyframe or one sample. Two elements stay inline.
pub type Values = SmallVec<[f32; 4]>;

/// How many cycles the timeline plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    /// Play this many cycles, then hold the final values. `Count(0)` plays
    /// one cycle, like `Count(1)`.
    Count(u32),
    /// Loop for as long as the timeline is sampled.
    #[default]
    Infinite,
}

/// Where a sample landed on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the first keyframe of the first cycle; the first keyframe's
    /// values are held. An empty timeline also reports this, with zeros.
    FreezeStart,
    Normal,
    /// All cycles have played.
    FreezeEnd,
}

#[derive(Debug, Clone, PartialEq)]
struct Keyframe {
    time: Duration,
    values: Values,
}

/// A multi-element keyframe interpolator.
///
/// ```
/// use std::time::Duration;
/// use clip_draw_match::Interpolator;
///
/// let mut fade = Interpolator::new(1);
/// fade.set_keyframe(Duration::from_secs(0), &[0.0]).unwrap();
/// fade.set_keyframe(Duration::from_secs(2), &[1.0]).unwrap();
///
/// assert_eq!(fade.values_at(Duration::from_secs(1))[0], 0.5);
/// // The second cycle starts over.
/// assert_eq!(fade.values_at(Duration::from_secs(3))[0], 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolator {
    element_count: usize,
    keyframes: Vec<Keyframe>,
    repeat: Repeat,
    mirror: bool,
}

impl Interpolator {
    /// Creates an empty, infinitely repeating timeline of `element_count` values.
    pub fn new(element_count: usize) -> Self {
        Self {
            element_count,
            keyframes: Vec::new(),
            repeat: Repeat::Infinite,
            mirror: false,
        }
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Plays every other cycle backwards.
    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    /// Length of one cycle: the time of the last keyframe.
    pub fn period(&self) -> Duration {
        self.keyframes
            .last()
            .map(|keyframe| keyframe.time)
            .unwrap_or_default()
    }

    /// Adds a keyframe, replacing any keyframe already at `time`.
    pub fn set_keyframe(&mut self, time: Duration, values: &[f32]) -> Result<(), KeyframeError> {
        if values.len() != self.element_count {
            return Err(KeyframeError::ElementCount {
                expected: self.element_count,
                actual: values.len(),
            });
        }

        let keyframe = Keyframe {
            time,
            values: values.iter().copied().collect(),
        };
        match self
            .keyframes
            .binary_search_by(|existing| existing.time.cmp(&time))
        {
            Ok(index) => self.keyframes[index] = keyframe,
            Err(index) => self.keyframes.insert(index, keyframe),
        }

        Ok(())
    }

    /// Writes the values at `elapsed` into `out` and reports the phase.
    ///
    /// `out` is written up to the shorter of its length and the element count.
    pub fn sample(&self, elapsed: Duration, out: &mut [f32]) -> Phase {
        let (Some(first), Some(last)) = (self.keyframes.first(), self.keyframes.last()) else {
            out.iter_mut().for_each(|value| *value = 0.0);
            return Phase::FreezeStart;
        };

        let period = last.time.as_nanos();
        if period == 0 {
            copy_values(&last.values, out);
            return Phase::FreezeEnd;
        }

        let elapsed = elapsed.as_nanos();
        let mut cycle = elapsed / period;
        let mut within = elapsed % period;

        let mut phase = Phase::Normal;
        if let Repeat::Count(count) = self.repeat {
            let count = u128::from(count.max(1));
            if cycle >= count {
                cycle = count - 1;
                within = period;
                phase = Phase::FreezeEnd;
            }
        }

        if phase == Phase::Normal && cycle == 0 && within < first.time.as_nanos() {
            copy_values(&first.values, out);
            return Phase::FreezeStart;
        }

        if self.mirror && cycle % 2 == 1 {
            within = period - within;
        }

        if within <= first.time.as_nanos() {
            copy_values(&first.values, out);
            return phase;
        }

        // First keyframe strictly after `within`; there is one because
        // `within` < `period` unless frozen at the end.
        let next = self
            .keyframes
            .partition_point(|keyframe| keyframe.time.as_nanos() <= within);
        let Some(to) = self.keyframes.get(next) else {
            copy_values(&last.values, out);
            return phase;
        };
        let from = &self.keyframes[next - 1];

        let span = (to.time - from.time).as_nanos() as f64;
        let t = ((within - from.time.as_nanos()) as f64 / span) as f32;
        for ((value, a), b) in out.iter_mut().zip(&from.values).zip(&to.values) {
            *value = a + (b - a) * t;
        }

        phase
    }

    /// Returns the values at `elapsed`.
    pub fn values_at(&self, elapsed: Duration) -> Values {
        let mut values: Values = SmallVec::from_elem(0.0, self.element_count);
        self.sample(elapsed, &mut values);
        values
    }
}

fn copy_values(values: &[f32], out: &mut [f32]) {
    for (value, source) in out.iter_mut().zip(values) {
        *value = *source;
    }
}
