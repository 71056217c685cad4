use rustfft::num_complex::Complex;

use super::bands::{BandSet, BAND_COUNT};
use super::store::BlockResult;

/// Numeric floor for band maxima. Seeding with a tiny positive value instead
/// of zero keeps log10 defined for bands that saw no qualifying bin; such
/// bands report a hugely negative dB which the renderer floors to an empty
/// bar. This is a deliberate floor, not a bug.
const MAGNITUDE_FLOOR: f64 = 1.7e-308;

/// One channel's spectrum fingerprint for one block.
#[derive(Clone, Debug)]
pub struct ChannelSpectrum {
    /// Frequency of the strongest bin in Hz.
    pub peak_freq: f64,
    /// Magnitude of the strongest bin, linear scale.
    pub peak_magnitude: f64,
    /// Maximum magnitude seen in each band, in dB.
    pub band_db: [f64; BAND_COUNT],
}

/// Reduce one channel's transform output to a peak and five banded dB maxima.
///
/// Only the non-redundant half of the real-input spectrum is examined. Both
/// the global peak and the band maxima use strict `>` comparisons, so the
/// first occurrence wins ties.
pub fn classify(spectrum: &[Complex<f64>], sample_rate: u32, bands: &BandSet) -> ChannelSpectrum {
    let frames = spectrum.len();
    let mut band_max = [MAGNITUDE_FLOOR; BAND_COUNT];
    let mut peak_magnitude = MAGNITUDE_FLOOR;
    let mut peak_bin: Option<usize> = None;

    for (m, coeff) in spectrum.iter().take(frames / 2).enumerate() {
        let magnitude = (coeff.re * coeff.re + coeff.im * coeff.im).sqrt();
        let freq = m as f64 * sample_rate as f64 / frames as f64;

        if let Some(band) = bands.classify(freq) {
            if magnitude > band_max[band] {
                band_max[band] = magnitude;
            }
        }

        if magnitude > peak_magnitude {
            peak_magnitude = magnitude;
            peak_bin = Some(m);
        }
    }

    let peak_freq = peak_bin
        .map(|m| m as f64 * sample_rate as f64 / frames as f64)
        .unwrap_or(0.0);

    let mut band_db = [0.0; BAND_COUNT];
    for (db, max) in band_db.iter_mut().zip(band_max.iter()) {
        *db = 10.0 * max.log10();
    }

    ChannelSpectrum {
        peak_freq,
        peak_magnitude,
        band_db,
    }
}

/// The peak magnitude shown on the stats page, in dB clamped to >= 0.
///
/// Stereo blocks report the dB of the arithmetic mean of the two channels'
/// peak magnitudes; mono uses its single peak directly.
pub fn display_peak_db(block: &BlockResult) -> f64 {
    let channels = block.channels();
    let mean = match channels.len() {
        0 => return 0.0,
        1 => channels[0].peak_magnitude,
        _ => (channels[0].peak_magnitude + channels[1].peak_magnitude) / 2.0,
    };
    (10.0 * mean.log10()).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone_spectrum(frames: usize, bin: usize, magnitude: f64) -> Vec<Complex<f64>> {
        let mut out = vec![Complex::new(0.0, 0.0); frames];
        out[bin] = Complex::new(magnitude, 0.0);
        out
    }

    #[test]
    fn peak_tracks_strongest_bin() {
        let sample_rate = 8192;
        let frames = 1024;
        let mut spectrum = tone_spectrum(frames, 100, 50.0);
        spectrum[30] = Complex::new(0.0, 20.0);

        let result = classify(&spectrum, sample_rate, &BandSet::new(4096.0));
        let expected_freq = 100.0 * sample_rate as f64 / frames as f64;
        assert!((result.peak_freq - expected_freq).abs() < 1e-9);
        assert!((result.peak_magnitude - 50.0).abs() < 1e-9);
    }

    #[test]
    fn first_occurrence_wins_ties() {
        let mut spectrum = tone_spectrum(64, 5, 10.0);
        spectrum[9] = Complex::new(10.0, 0.0);
        let result = classify(&spectrum, 640, &BandSet::new(320.0));
        // Bin 5 = 50 Hz, bin 9 = 90 Hz; equal magnitudes keep the earlier bin.
        assert!((result.peak_freq - 50.0).abs() < 1e-9);
    }

    #[test]
    fn empty_bands_stay_at_the_floor() {
        // Energy only near 1 kHz; every other band keeps its epsilon seed.
        let sample_rate = 44_100;
        let frames = 4410;
        let bin = 100; // 100 * 44100 / 4410 = 1000 Hz
        let spectrum = tone_spectrum(frames, bin, 1000.0);
        let result = classify(&spectrum, sample_rate, &BandSet::new(22_050.0));

        assert!((result.band_db[2] - 30.0).abs() < 1e-9);
        for (band, &db) in result.band_db.iter().enumerate() {
            if band != 2 {
                assert!(db.is_finite(), "band {band} produced non-finite dB");
                assert!(db < -3000.0, "band {band} should sit at the floor");
            }
        }
    }

    #[test]
    fn decibels_grow_with_magnitude() {
        let bands = BandSet::new(22_050.0);
        let quiet = classify(&tone_spectrum(4410, 100, 10.0), 44_100, &bands);
        let loud = classify(&tone_spectrum(4410, 100, 100.0), 44_100, &bands);
        assert!(loud.band_db[2] > quiet.band_db[2]);
        assert!((loud.band_db[2] - quiet.band_db[2] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn stereo_display_peak_averages_channels() {
        let bands = BandSet::new(22_050.0);
        let left = classify(&tone_spectrum(4410, 100, 40.0), 44_100, &bands);
        let right = classify(&tone_spectrum(4410, 100, 60.0), 44_100, &bands);
        let block = BlockResult::new(vec![left, right]);
        let expected = 10.0 * 50.0f64.log10();
        assert!((display_peak_db(&block) - expected).abs() < 1e-9);
    }

    #[test]
    fn display_peak_clamps_below_zero() {
        let bands = BandSet::new(22_050.0);
        // Tiny magnitude: raw dB is negative, display clamps to 0.
        let ch = classify(&tone_spectrum(4410, 100, 1e-6), 44_100, &bands);
        let block = BlockResult::new(vec![ch]);
        assert_eq!(display_peak_db(&block), 0.0);
    }
}
