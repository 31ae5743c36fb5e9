use serde::Serialize;

/// Order statistics over the extracted salary figures, in whole pounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SalaryStats {
    pub median: u64,
    pub q1: u64,
    pub q3: u64,
    pub min: u64,
    pub max: u64,
    pub count: usize,
}

impl SalaryStats {
    /// Quartiles use the lower index: `floor(n * p)` into the ascending list.
    pub fn from_figures(mut figures: Vec<u64>) -> Self {
        figures.sort_unstable();
        let n = figures.len();
        if n == 0 {
            return Self::default();
        }

        Self {
            median: figures[n / 2],
            q1: figures[n / 4],
            q3: figures[(n * 3) / 4],
            min: figures[0],
            max: figures[n - 1],
            count: n,
        }
    }
}

/// Fixed half-open GBP salary ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryBand {
    Under25k,
    From25kTo35k,
    From35kTo45k,
    From45kTo60k,
    Over60k,
}

impl SalaryBand {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Under25k,
            Self::From25kTo35k,
            Self::From35kTo45k,
            Self::From45kTo60k,
            Self::Over60k,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Under25k => "Under £25k",
            Self::From25kTo35k => "£25k-£35k",
            Self::From35kTo45k => "£35k-£45k",
            Self::From45kTo60k => "£45k-£60k",
            Self::Over60k => "£60k+",
        }
    }

    /// Inclusive lower bound and exclusive upper bound.
    pub const fn bounds(self) -> (u64, Option<u64>) {
        match self {
            Self::Under25k => (0, Some(25_000)),
            Self::From25kTo35k => (25_000, Some(35_000)),
            Self::From35kTo45k => (35_000, Some(45_000)),
            Self::From45kTo60k => (45_000, Some(60_000)),
            Self::Over60k => (60_000, None),
        }
    }

    pub fn for_figure(figure: u64) -> Self {
        Self::ordered()
            .into_iter()
            .find(|band| match band.bounds() {
                (low, Some(high)) => figure >= low && figure < high,
                (low, None) => figure >= low,
            })
            .unwrap_or(Self::Over60k)
    }

    pub fn histogram(figures: &[u64]) -> Vec<(Self, usize)> {
        let mut counts: Vec<(Self, usize)> =
            Self::ordered().into_iter().map(|band| (band, 0)).collect();
        for figure in figures {
            let band = Self::for_figure(*figure);
            if let Some(entry) = counts.iter_mut().find(|(candidate, _)| *candidate == band) {
                entry.1 += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_statistics_use_floor_indices() {
        let stats = SalaryStats::from_figures(vec![55_000, 25_000, 35_000]);
        assert_eq!(
            stats,
            SalaryStats {
                median: 35_000,
                q1: 25_000,
                q3: 55_000,
                min: 25_000,
                max: 55_000,
                count: 3,
            }
        );

        let stats = SalaryStats::from_figures(vec![10, 20, 30, 40]);
        assert_eq!(stats.median, 30);
        assert_eq!(stats.q1, 20);
        assert_eq!(stats.q3, 40);
    }

    #[test]
    fn no_figures_is_all_zero() {
        assert_eq!(SalaryStats::from_figures(Vec::new()), SalaryStats::default());
    }

    #[test]
    fn band_edges_are_half_open() {
        assert_eq!(SalaryBand::for_figure(0), SalaryBand::Under25k);
        assert_eq!(SalaryBand::for_figure(24_999), SalaryBand::Under25k);
        assert_eq!(SalaryBand::for_figure(25_000), SalaryBand::From25kTo35k);
        assert_eq!(SalaryBand::for_figure(45_000), SalaryBand::From45kTo60k);
        assert_eq!(SalaryBand::for_figure(59_999), SalaryBand::From45kTo60k);
        assert_eq!(SalaryBand::for_figure(60_000), SalaryBand::Over60k);
        assert_eq!(SalaryBand::for_figure(u64::MAX), SalaryBand::Over60k);
    }

    #[test]
    fn histogram_counts_sum_to_figure_count() {
        let figures = [12_000, 25_000, 34_999, 35_000, 47_500, 61_000, 90_000];
        let histogram = SalaryBand::histogram(&figures);
        let counts: Vec<usize> = histogram.iter().map(|(_, count)| *count).collect();
        assert_eq!(counts, vec![1, 2, 1, 1, 2]);
        assert_eq!(counts.iter().sum::<usize>(), figures.len());
    }
}
