/// Number of summary bands in every spectrum fingerprint.
pub const BAND_COUNT: usize = 5;

/// Lower edges of the five bands in Hz; each band is the half-open interval
/// `(lower, upper]` with the next edge (or Nyquist, for the last band) as its
/// upper bound. Frequencies at or below the first edge belong to no band.
const BAND_EDGES: [f64; BAND_COUNT] = [19.0, 140.0, 400.0, 2600.0, 5200.0];

/// The fixed frequency-band partition used by the classifier.
///
/// Only the top edge varies between instances: it is the Nyquist frequency of
/// the stream under analysis.
#[derive(Clone, Copy, Debug)]
pub struct BandSet {
    nyquist: f64,
}

impl BandSet {
    pub fn new(nyquist: f64) -> Self {
        Self { nyquist }
    }

    /// Map a frequency to its band index, or None for frequencies outside
    /// every band (at or below 19 Hz, or above Nyquist).
    pub fn classify(&self, freq: f64) -> Option<usize> {
        if freq <= BAND_EDGES[0] {
            return None;
        }
        for band in 0..BAND_COUNT {
            let upper = self.upper_edge(band);
            if freq <= upper {
                return Some(band);
            }
        }
        None
    }

    /// Inclusive upper edge of a band in Hz.
    pub fn upper_edge(&self, band: usize) -> f64 {
        if band + 1 < BAND_COUNT {
            BAND_EDGES[band + 1]
        } else {
            self.nyquist
        }
    }

    /// Exclusive lower edge of a band in Hz.
    pub fn lower_edge(&self, band: usize) -> f64 {
        BAND_EDGES[band]
    }
}
