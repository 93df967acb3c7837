//! Equal-tempered pitch table.
//!
//! 84 frequencies over 7 octaves, A = 440 Hz at index 33. Index 0 is the C of
//! octave 0, so a pitch index is always `semitone + 12 * octave`.

use serde::Serialize;

pub const SEMITONES: i32 = 12;

/// Highest valid pitch index.
pub const PITCH_MAX: u8 = 83;

/// Highest valid octave.
pub const OCTAVE_MAX: u8 = PITCH_MAX / SEMITONES as u8;

const FREQUENCIES: [f64; PITCH_MAX as usize + 1] = [
    // O0
    65.40639, 69.29566, 73.41619, 77.78175,
    82.40689, 87.30706, 92.49861, 97.99886,
    103.82617, 110.00000, 116.54094, 123.47083,
    // O1
    130.81278, 138.59132, 146.83238, 155.56349,
    164.81378, 174.61412, 184.99721, 195.99772,
    207.65235, 220.00000, 233.08188, 246.94165,
    // O2
    261.62557, 277.18263, 293.66477, 311.12698,
    329.62756, 349.22823, 369.99442, 391.99544,
    415.30470, 440.00000, 466.16376, 493.88330,
    // O3
    523.25113, 554.36526, 587.32954, 622.25397,
    659.25511, 698.45646, 739.98885, 783.99087,
    830.60940, 880.00000, 932.32752, 987.76660,
    // O4
    1046.50226, 1108.73052, 1174.65907, 1244.50793,
    1318.51023, 1396.91293, 1479.97769, 1567.98174,
    1661.21879, 1760.00000, 1864.65505, 1975.53321,
    // O5
    2093.00452, 2217.46105, 2349.31814, 2489.01587,
    2637.02046, 2793.82585, 2959.95538, 3135.96349,
    3322.43758, 3520.00000, 3729.31009, 3951.06641,
    // O6
    4186.00904, 4434.92210, 4698.63629, 4978.03174,
    5274.04091, 5587.65170, 5919.91076, 6271.92698,
    6644.87516, 7040.00000, 7458.62018, 7902.13282,
];

/// A validated index into the pitch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Pitch(u8);

impl Pitch {
    /// Returns `None` unless `index` lies in `0..=PITCH_MAX`.
    pub fn new(index: i64) -> Option<Self> {
        if (0..=PITCH_MAX as i64).contains(&index) {
            Some(Pitch(index as u8))
        } else {
            None
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn frequency(self) -> f64 {
        FREQUENCIES[self.0 as usize]
    }

    pub fn octave(self) -> u8 {
        self.0 / SEMITONES as u8
    }
}

/// Frequency in Hz of a pitch index, or `None` outside the table.
pub fn frequency_of(index: u8) -> Option<f64> {
    FREQUENCIES.get(index as usize).copied()
}
