//! Deduplication of a wave sequence into unique waves plus an index sequence.

/// A wave sequence split into its distinct waves and the order they play in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combined<T> {
    /// Distinct waves in first-occurrence order.
    pub waves: Vec<Vec<T>>,
    /// For every input frame, the index of its wave in `waves`.
    pub indices: Vec<usize>,
}

impl<T: Clone> Combined<T> {
    /// Rebuild the original frame sequence.
    pub fn expand(&self) -> Vec<Vec<T>> {
        self.indices.iter().map(|&i| self.waves[i].clone()).collect()
    }
}

impl<T> Combined<T> {
    /// Number of frames described.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when no frames were combined.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Assign each distinct wave the next index in first-occurrence order.
///
/// Waves compare by exact element equality; inputs are expected to be
/// quantized already.
pub fn combine<T: Clone + PartialEq>(waveseq: &[Vec<T>]) -> Combined<T> {
    let mut waves: Vec<Vec<T>> = Vec::new();
    let mut indices = Vec::with_capacity(waveseq.len());

    for wave in waveseq {
        let index = match waves.iter().position(|w| w == wave) {
            Some(index) => index,
            None => {
                waves.push(wave.clone());
                waves.len() - 1
            }
        };
        indices.push(index);
    }

    Combined { waves, indices }
}
