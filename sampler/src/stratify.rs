use rand::seq::SliceRandom;
use rand::Rng;

use geom::{DistanceBand, DistanceBands};
use gpolyutil::Result;

use crate::classify_url;

/// URLs grouped by distance band.
pub struct SampleSet {
    bands: DistanceBands,
    // Indexed by band
    urls: Vec<Vec<String>>,
}

impl SampleSet {
    pub fn new(bands: DistanceBands) -> SampleSet {
        let urls = vec![Vec::new(); bands.len()];
        SampleSet { bands, urls }
    }

    /// Classifies and stores one URL.
    pub fn add(&mut self, url: String) -> Result<()> {
        let idx = classify_url(&url, &self.bands)?;
        self.urls[idx].push(url);
        Ok(())
    }

    /// How many URLs landed in each band.
    pub fn populations(&self) -> Vec<usize> {
        self.urls.iter().map(|urls| urls.len()).collect()
    }

    /// How many URLs to draw from each band, aiming for `count` in total. Each non-empty band
    /// gets its proportional share of `count`, but at least `count / number of bands`, and never
    /// more than it contains. If those floors push the total over `count`, the biggest shares
    /// are trimmed.
    pub fn sample_sizes(&self, count: usize) -> Vec<usize> {
        let populations = self.populations();
        let total: usize = populations.iter().sum();
        if total == 0 {
            return vec![0; populations.len()];
        }
        let floor = count / populations.len();

        let mut sizes: Vec<usize> = populations
            .iter()
            .map(|pop| {
                if *pop == 0 {
                    return 0;
                }
                let share = ((*pop as f64) / (total as f64) * (count as f64)).round() as usize;
                share.max(floor).min(*pop)
            })
            .collect();

        let mut sum: usize = sizes.iter().sum();
        while sum > count {
            // Ties go to the first band
            let mut biggest = 0;
            for (idx, size) in sizes.iter().enumerate() {
                if *size > sizes[biggest] {
                    biggest = idx;
                }
            }
            sizes[biggest] -= 1;
            sum -= 1;
        }
        sizes
    }

    /// Draws without replacement from every non-empty band, in band order.
    pub fn draw<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<(DistanceBand, Vec<String>)> {
        let mut results = Vec::new();
        for (idx, size) in self.sample_sizes(count).into_iter().enumerate() {
            if self.urls[idx].is_empty() {
                continue;
            }
            let picked: Vec<String> = self.urls[idx]
                .choose_multiple(rng, size)
                .cloned()
                .collect();
            results.push((self.bands.band(idx), picked));
        }
        results
    }
}
