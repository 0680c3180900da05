use super::error::OverlayError;

/// Precomputed triangle wave of alpha values, indexed with wraparound.
///
/// For amplitude `A` the sequence is `0, 1, …, 2A-1` followed by
/// `2A, 2A-1, …, 1`, so it has length `4A` and repeats with that period.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Waveform {
    values: Vec<u8>,
}

impl Waveform {
    pub fn new(amplitude: u8) -> Result<Self, OverlayError> {
        if amplitude == 0 || amplitude > 127 {
            return Err(OverlayError::Amplitude(amplitude));
        }

        let amp = i32::from(amplitude);
        let rising = -amp..amp;
        let falling = (-amp + 1..=amp).rev();
        let values = rising
            .chain(falling)
            .map(|v| (v + amp) as u8)
            .collect();

        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Alpha for the given frame, wrapping around the period.
    pub fn at(&self, frame: u64) -> u8 {
        self.values[(frame % self.values.len() as u64) as usize]
    }

    #[cfg(test)]
    pub fn values(&self) -> &[u8] {
        &self.values
    }
}
