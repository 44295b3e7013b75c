// partition.rs - Splitting the board into row bands, one per worker

use std::ops::Range;

/// Half-open row range `[start_y, end_y)` handled by one worker for one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Band {
    pub start_y: usize,
    pub end_y: usize,
}

impl Band {
    pub fn rows(&self) -> Range<usize> {
        self.start_y..self.end_y
    }

    pub fn height(&self) -> usize {
        self.end_y - self.start_y
    }
}

/// Most even split of `height` rows into `threads` bands. The first
/// `height % threads` bands get one extra row.
///
/// # Panics
///
/// If `threads` is zero. [`Params::validate`](crate::Params::validate) rejects
/// that before a run starts.
pub fn band_heights(height: usize, threads: usize) -> Vec<usize> {
    assert!(threads > 0, "cannot split rows across zero bands");
    let base = height / threads;
    let remainder = height % threads;
    (0..threads).map(|i| if i < remainder { base + 1 } else { base }).collect()
}

/// Contiguous, gap-free bands covering `0..height`, in ascending order.
/// Panics if `threads` is zero, like [`band_heights`].
pub fn bands(height: usize, threads: usize) -> Vec<Band> {
    let mut start_y = 0;
    band_heights(height, threads)
        .into_iter()
        .map(|h| {
            let band = Band { start_y, end_y: start_y + h };
            start_y += h;
            band
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_goes_to_earliest_bands() {
        assert_eq!(band_heights(10, 4), vec![3, 3, 2, 2]);
        assert_eq!(band_heights(16, 4), vec![4, 4, 4, 4]);
        assert_eq!(band_heights(7, 1), vec![7]);
    }

    #[test]
    #[should_panic(expected = "zero bands")]
    fn zero_threads_panics() {
        bands(8, 0);
    }

    #[test]
    fn bands_cover_every_row_once() {
        for height in 1..40 {
            for threads in 1..=height {
                let bands = bands(height, threads);
                assert_eq!(bands.len(), threads);
                assert_eq!(bands[0].start_y, 0);
                assert_eq!(bands[threads - 1].end_y, height);
                for pair in bands.windows(2) {
                    assert_eq!(pair[0].end_y, pair[1].start_y);
                }
                assert!(bands.iter().all(|b| b.height() > 0));
            }
        }
    }
}
