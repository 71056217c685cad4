use rustfft::{num_complex::Complex, FftPlanner};

/// Forward DFT driver for one analysis pass.
///
/// Owns the planner so repeated blocks of the same length reuse one plan; a
/// shorter final block simply plans at its own length (the planner caches per
/// size). Output is unnormalized, matching the raw-magnitude convention the
/// classifier's dB scale expects.
pub struct SpectrumAnalyzer {
    planner: FftPlanner<f64>,
}

impl SpectrumAnalyzer {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    /// Transform one channel's real-valued samples (imaginary part fixed at
    /// zero) into frequency-domain coefficients of the same length.
    pub fn transform(&mut self, samples: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> =
            samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
        if buffer.is_empty() {
            return buffer;
        }
        let fft = self.planner.plan_fft_forward(buffer.len());
        fft.process(&mut buffer);
        buffer
    }
}
