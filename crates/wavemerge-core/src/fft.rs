//! Planned FFT wrapper for real single-cycle waves.

use rustfft::FftPlanner;
use rustfft::num_complex::Complex64;
use std::sync::Arc;

/// Forward/inverse FFT pair planned for one length.
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f64>>,
    ifft: Arc<dyn rustfft::Fft<f64>>,
    size: usize,
}

impl Fft {
    /// Plan an FFT of the given size.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let ifft = planner.plan_fft_inverse(size);

        Self { fft, ifft, size }
    }

    /// Get FFT size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Unnormalized forward FFT of real input.
    ///
    /// Returns the `size/2 + 1` non-negative frequency bins (DC to Nyquist).
    /// Input shorter than the FFT size is zero-padded, longer input is truncated.
    pub fn forward_real(&self, input: &[f64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = input
            .iter()
            .take(self.size)
            .map(|&x| Complex64::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex64::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer.truncate(self.size / 2 + 1);
        buffer
    }

    /// Inverse of [`forward_real`](Self::forward_real), normalized by `1/size`.
    ///
    /// Bins past the end of `spectrum` are zero. The imaginary parts of DC and
    /// (for even sizes) Nyquist are discarded, since a real signal cannot carry them.
    pub fn inverse_real(&self, spectrum: &[Complex64]) -> Vec<f64> {
        let n = self.size;
        let half = n / 2;

        let mut buffer = vec![Complex64::new(0.0, 0.0); n];
        for (slot, &bin) in buffer.iter_mut().zip(spectrum.iter().take(half + 1)) {
            *slot = bin;
        }
        if n > 0 {
            buffer[0].im = 0.0;
            if n % 2 == 0 {
                buffer[half].im = 0.0;
            }
        }

        // Hermitian mirror for negative frequencies
        for k in 1..n.div_ceil(2) {
            buffer[n - k] = buffer[k].conj();
        }

        self.ifft.process(&mut buffer);

        let scale = 1.0 / n as f64;
        buffer.iter().map(|c| c.re * scale).collect()
    }

    /// Perform forward FFT on complex input (in-place)
    pub fn forward_complex(&self, buffer: &mut [Complex64]) {
        self.fft.process(buffer);
    }

    /// Perform inverse FFT on complex buffer (in-place), normalized by `1/size`.
    pub fn inverse_complex(&self, buffer: &mut [Complex64]) {
        self.ifft.process(buffer);

        let scale = 1.0 / self.size as f64;
        for c in buffer.iter_mut() {
            *c *= scale;
        }
    }
}
