use super::sample::Sample;

/// Where a sample sits in the replay: which pass over the dataset and
/// which row within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayPosition {
    pub cycle: u64,
    pub index: usize,
}

/// Endless iterator over a slice of samples, wrapping to the first sample
/// after the last. Yields nothing for an empty slice.
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    samples: &'a [Sample],
    next: ReplayPosition,
}

impl<'a> Replay<'a> {
    pub fn new(samples: &'a [Sample]) -> Self {
        Self {
            samples,
            next: ReplayPosition { cycle: 0, index: 0 },
        }
    }
}

impl<'a> Iterator for Replay<'a> {
    type Item = (ReplayPosition, &'a Sample);

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.samples.get(self.next.index)?;
        let position = self.next;

        self.next.index += 1;
        if self.next.index == self.samples.len() {
            self.next.index = 0;
            self.next.cycle += 1;
        }

        Some((position, sample))
    }
}
