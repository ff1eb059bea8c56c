//! Two-level recursive model index.

use log::debug;
use serde::Serialize;
use std::sync::Arc;

use strata_common::{NullSink, Result, RmiConfig, StrataError, TraceEvent, TraceSink};

use crate::linear::LinearModel;

/// Two-level learned index over a sorted `i64` array.
///
/// Level 0 routes a key to one of `segment_count` level-1 models; the chosen
/// model predicts a position, and a window of `search_window` positions on
/// each side of the prediction is scanned for an exact match.
///
/// The index has exactly two observable states: *empty* (built over no data,
/// every search misses) and *built* (trained, immutable). It is never
/// partially built — construction either completes or returns an error —
/// and once built it is `Send + Sync`, so concurrent readers need no
/// locking.
#[derive(Debug)]
pub struct LearnedIndex {
    /// The training keys, shared read-only: positions are baked into the
    /// level-1 models, so the array must never change under the index.
    data: Arc<[i64]>,
    config: RmiConfig,
    level0: LinearModel,
    level1: Vec<Option<LinearModel>>,
}

/// Summary of a trained cascade, for reports and demos.
#[derive(Debug, Clone, Serialize)]
pub struct RmiStats {
    pub keys: usize,
    pub segment_count: usize,
    pub trained_segments: usize,
    pub search_window: usize,
    pub level0_slope: f64,
    pub level0_intercept: f64,
}

impl LearnedIndex {
    /// Builds the index over `data`, which must be sorted ascending.
    ///
    /// Fails with [`StrataError::UnsortedInput`] on out-of-order input and
    /// [`StrataError::InvalidParameter`] when `segment_count < 1`. Empty
    /// input is legal and produces the degenerate always-miss index.
    pub fn build(
        data: impl Into<Arc<[i64]>>,
        segment_count: usize,
        search_window: usize,
    ) -> Result<Self> {
        Self::with_config(
            data,
            RmiConfig {
                segment_count,
                search_window,
            },
        )
    }

    /// Builds the index from a configuration.
    pub fn with_config(data: impl Into<Arc<[i64]>>, config: RmiConfig) -> Result<Self> {
        Self::build_with(data, config, &mut NullSink)
    }

    /// Builds the index, reporting training progress to `sink`.
    pub fn build_with(
        data: impl Into<Arc<[i64]>>,
        config: RmiConfig,
        sink: &mut dyn TraceSink,
    ) -> Result<Self> {
        config.validate()?;
        let data: Arc<[i64]> = data.into();

        if let Some(position) = first_unsorted(&data) {
            return Err(StrataError::UnsortedInput { position });
        }

        let n = data.len();
        let segments = config.segment_count;

        if n == 0 {
            debug!("building degenerate learned index over empty input");
            return Ok(Self {
                data,
                config,
                level0: LinearModel::constant(0.0),
                level1: vec![None; segments],
            });
        }

        // Level 0 learns a uniform ramp from key to fractional segment
        // index: position i maps to i * (segments - 1) / (n - 1), so the
        // first key routes to segment 0 and the last to segments - 1.
        let ramp: Vec<(f64, f64)> = if n == 1 {
            vec![(data[0] as f64, 0.0)]
        } else {
            data.iter()
                .enumerate()
                .map(|(i, &key)| {
                    let target = (i * (segments - 1)) as f64 / (n - 1) as f64;
                    (key as f64, target)
                })
                .collect()
        };
        let level0 = LinearModel::fit(&ramp);
        sink.record(TraceEvent::Level0Trained {
            slope: level0.slope(),
            intercept: level0.intercept(),
        });

        // Route every training key through level 0 and group
        // (key, true position) pairs by assigned segment.
        let mut grouped: Vec<Vec<(f64, f64)>> = vec![Vec::new(); segments];
        for (i, &key) in data.iter().enumerate() {
            let seg = clamp_segment(level0.predict(key as f64), segments);
            grouped[seg].push((key as f64, i as f64));
        }

        // One position model per non-empty segment. A single-point segment
        // gets the constant model predicting that point's position; an
        // empty segment keeps its slot empty and searches routed to it
        // miss.
        let mut level1 = Vec::with_capacity(segments);
        for (seg, points) in grouped.iter().enumerate() {
            if points.is_empty() {
                sink.record(TraceEvent::SegmentEmpty { segment: seg });
                level1.push(None);
            } else {
                sink.record(TraceEvent::SegmentTrained {
                    segment: seg,
                    points: points.len(),
                });
                level1.push(Some(LinearModel::fit(points)));
            }
        }

        debug!(
            "learned index built: {} keys, {}/{} segments trained, window {}",
            n,
            level1.iter().filter(|m| m.is_some()).count(),
            segments,
            config.search_window,
        );

        Ok(Self {
            data,
            config,
            level0,
            level1,
        })
    }

    /// Looks up `key`, returning its position in the backing array.
    ///
    /// A returned position always holds exactly `key`. A miss may be a
    /// false negative when the key routes to an untrained segment or the
    /// correction window undershoots the true position.
    pub fn search(&self, key: i64) -> Option<usize> {
        if self.data.is_empty() {
            return None;
        }

        let seg = clamp_segment(self.level0.predict(key as f64), self.config.segment_count);
        // An untrained segment means no key was routed here during
        // training; give up rather than probing neighbor segments (known
        // accuracy gap of this design, preserved deliberately).
        let model = self.level1[seg].as_ref()?;

        let predicted = model.predict(key as f64).round() as i64;
        let w = self.config.search_window as i64;
        let last = (self.data.len() - 1) as i64;
        let start = (predicted - w).max(0);
        let end = (predicted + w).min(last);

        for i in start..=end {
            let value = self.data[i as usize];
            if value == key {
                return Some(i as usize);
            }
            if value > key {
                // Sorted data: once past `key` it cannot appear further
                // right.
                return None;
            }
        }
        None
    }

    /// Returns true if `key` is found by [`LearnedIndex::search`].
    #[inline]
    pub fn contains(&self, key: i64) -> bool {
        self.search(key).is_some()
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Number of indexed keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the index was built over no data.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The backing sorted key array.
    #[inline]
    pub fn data(&self) -> &[i64] {
        &self.data
    }

    /// Number of level-1 slots.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.config.segment_count
    }

    /// Correction window half-width.
    #[inline]
    pub fn search_window(&self) -> usize {
        self.config.search_window
    }

    /// The level-0 routing model.
    #[inline]
    pub fn level0(&self) -> &LinearModel {
        &self.level0
    }

    /// Number of level-1 slots holding a trained model.
    pub fn trained_segments(&self) -> usize {
        self.level1.iter().filter(|m| m.is_some()).count()
    }

    /// Rough model size in abstract units: two parameters per model slot,
    /// level 0 included. The benchmark report compares this against the
    /// B-Tree's key-and-node units.
    pub fn memory_estimate(&self) -> usize {
        (1 + self.config.segment_count) * 2
    }

    /// Summary of the trained cascade.
    pub fn stats(&self) -> RmiStats {
        RmiStats {
            keys: self.data.len(),
            segment_count: self.config.segment_count,
            trained_segments: self.trained_segments(),
            search_window: self.config.search_window,
            level0_slope: self.level0.slope(),
            level0_intercept: self.level0.intercept(),
        }
    }
}

/// Position of the first element smaller than its predecessor, if any.
fn first_unsorted(data: &[i64]) -> Option<usize> {
    data.windows(2).position(|w| w[0] > w[1]).map(|i| i + 1)
}

/// Rounds a level-0 prediction to the nearest segment and clamps it into
/// `[0, segments - 1]`.
#[inline]
fn clamp_segment(prediction: f64, segments: usize) -> usize {
    (prediction.round().max(0.0) as usize).min(segments - 1)
}
