/// Fixed-length recirculating delay line
use rand::Rng;

#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<f32>,
    head: usize,
}

impl DelayLine {
    /// Creates a line of `len` slots filled with uniform noise in [-1.0, 1.0].
    /// Magnitude and sign are drawn independently.
    ///
    /// Returns `None` for a zero length or when the buffer cannot be allocated.
    pub fn with_noise<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<Self> {
        if len == 0 {
            return None;
        }

        let mut buffer = Vec::new();
        buffer.try_reserve_exact(len).ok()?;
        buffer.extend((0..len).map(|_| {
            let magnitude: f32 = rng.gen();
            if rng.gen_bool(0.5) {
                -magnitude
            } else {
                magnitude
            }
        }));

        Some(Self { buffer, head: 0 })
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The sample written `len` steps ago.
    pub fn read(&self) -> f32 {
        self.buffer[self.head]
    }

    /// Overwrites the slot just read and moves the head forward, so `value`
    /// comes back out of `read` after exactly `len` steps.
    pub fn write_and_advance(&mut self, value: f32) {
        self.buffer[self.head] = value;
        self.head = (self.head + 1) % self.buffer.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_noise_is_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        let line = DelayLine::with_noise(1000, &mut rng).unwrap();
        assert_eq!(line.len(), 1000);
        assert!(line.buffer.iter().all(|s| (-1.0..=1.0).contains(s)));
        assert!(line.buffer.iter().any(|s| *s < 0.0));
        assert!(line.buffer.iter().any(|s| *s > 0.0));
    }

    #[test]
    fn test_written_value_returns_after_len_steps() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut line = DelayLine::with_noise(3, &mut rng).unwrap();

        line.write_and_advance(10.0);
        line.write_and_advance(20.0);
        line.write_and_advance(30.0);

        assert_eq!(line.read(), 10.0);
        line.write_and_advance(40.0);
        assert_eq!(line.read(), 20.0);
        line.write_and_advance(50.0);
        assert_eq!(line.read(), 30.0);
        line.write_and_advance(60.0);
        assert_eq!(line.read(), 40.0);
    }

    #[test]
    fn test_zero_length_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(DelayLine::with_noise(0, &mut rng).is_none());
    }

    #[test]
    fn test_unallocatable_length_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(DelayLine::with_noise(usize::MAX, &mut rng).is_none());
    }

    #[test]
    fn test_single_slot_line() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut line = DelayLine::with_noise(1, &mut rng).unwrap();
        line.write_and_advance(0.25);
        assert_eq!(line.read(), 0.25);
    }
}
