//! Trailing window of (liquid density, buoyant force) samples for the chart
//!
//! Eviction is FIFO on append order only; values never influence what is
//! dropped.

use std::collections::VecDeque;

use crate::presentation::format_density;

#[derive(Clone, Debug, PartialEq)]
pub struct TrendSample {
    /// Density formatted for the x axis, e.g. "1.2"
    pub label: String,
    /// Buoyant force (N)
    pub value: f64,
}

#[derive(Clone, Debug)]
pub struct TrendBuffer {
    samples: VecDeque<TrendSample>,
    capacity: usize,
}

impl TrendBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn append(&mut self, density: f64, force: f64) {
        self.samples.push_back(TrendSample {
            label: format_density(density),
            value: force,
        });
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrendSample> {
        self.samples.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.samples.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    /// (min, max) of the stored forces, `None` when empty
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.samples.iter().map(|s| s.value).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}
