// Per-class aggregations behind the three dashboard charts
use crate::domain::passenger::Dataset;
use crate::domain::passenger_class::PassengerClass;
use std::collections::HashMap;
use std::hash::Hash;

pub const AGE_BINS: usize = 25;

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub left: f64,
    pub right: f64,
    pub count: usize,
}

/// Counts per `Survived` code, most frequent first.
pub fn survival_counts(dataset: &Dataset, class: PassengerClass) -> Vec<(u8, usize)> {
    value_counts(dataset.in_class(class).map(|p| p.survived))
}

/// Counts per title, most frequent first.
pub fn title_counts(dataset: &Dataset, class: PassengerClass) -> Vec<(String, usize)> {
    value_counts(dataset.in_class(class).map(|p| p.title.clone()))
}

/// Age histogram of the class. Unknown ages take the dataset-wide mean.
pub fn age_histogram(dataset: &Dataset, class: PassengerClass) -> Vec<HistogramBin> {
    let mean_age = dataset.mean_age();
    let ages: Vec<f64> = dataset
        .in_class(class)
        .map(|p| p.age.unwrap_or(mean_age))
        .collect();
    histogram(&ages, AGE_BINS)
}

/// Ties keep first-seen order.
fn value_counts<K, I>(values: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for value in values {
        match index.get(&value).copied() {
            Some(i) => counts[i].1 += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Equal-width bins over `[min, max]`, last bin closed on the right.
fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if bins == 0 {
        return Vec::new();
    }

    let (mut low, mut high) = values
        .iter()
        .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        })
        .unwrap_or((0.0, 1.0));
    if low == high {
        low -= 0.5;
        high += 0.5;
    }

    let width = (high - low) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { high } else { low + width * i as f64 })
        .collect();

    let mut counts = vec![0usize; bins];
    for &value in values {
        counts[bin_index(value, &edges)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            left: edges[i],
            right: edges[i + 1],
            count,
        })
        .collect()
}

/// Bin `i` holds `edges[i] <= v < edges[i + 1]`; the estimate from the width is
/// corrected against the edges so counts agree with the reported bounds.
fn bin_index(value: f64, edges: &[f64]) -> usize {
    let bins = edges.len() - 1;
    let low = edges[0];
    let width = (edges[bins] - low) / bins as f64;

    let position = ((value - low) / width).floor();
    let mut bin = if position < 0.0 {
        0
    } else {
        (position as usize).min(bins - 1)
    };
    while bin > 0 && value < edges[bin] {
        bin -= 1;
    }
    while bin < bins - 1 && value >= edges[bin + 1] {
        bin += 1;
    }
    bin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::passenger::Passenger;

    fn passenger(class: u8, survived: u8, name: &str, age: Option<f64>) -> Passenger {
        Passenger::new(class, survived, name.to_string(), age).unwrap()
    }

    fn sample_dataset() -> Dataset {
        Dataset::new(vec![
            passenger(3, 0, "Braund, Mr. Owen Harris", Some(22.0)),
            passenger(1, 1, "Cumings, Mrs. John Bradley", Some(38.0)),
            passenger(3, 1, "Heikkinen, Miss. Laina", Some(26.0)),
            passenger(1, 1, "Futrelle, Mrs. Jacques Heath", Some(35.0)),
            passenger(3, 0, "Allen, Mr. William Henry", Some(35.0)),
            passenger(3, 0, "Moran, Mr. James", None),
            passenger(1, 0, "McCarthy, Mr. Timothy J", Some(54.0)),
            passenger(3, 0, "Palsson, Master. Gosta Leonard", Some(2.0)),
            passenger(2, 1, "Nasser, Mrs. Nicholas", Some(14.0)),
            passenger(2, 1, "Williams, Mr. Charles Eugene", None),
        ])
    }

    #[test]
    fn test_survival_counts_orders_by_frequency() {
        let dataset = sample_dataset();

        assert_eq!(survival_counts(&dataset, PassengerClass::First), vec![(1, 2), (0, 1)]);
        assert_eq!(survival_counts(&dataset, PassengerClass::Third), vec![(0, 4), (1, 1)]);
        assert_eq!(survival_counts(&dataset, PassengerClass::Second), vec![(1, 2)]);
    }

    #[test]
    fn test_title_counts_ties_keep_first_seen_order() {
        let dataset = sample_dataset();

        assert_eq!(
            title_counts(&dataset, PassengerClass::Third),
            vec![("Mr.".to_string(), 3), ("Miss.".to_string(), 1), ("Master.".to_string(), 1)]
        );
        assert_eq!(
            title_counts(&dataset, PassengerClass::Second),
            vec![("Mrs.".to_string(), 1), ("Mr.".to_string(), 1)]
        );
    }

    #[test]
    fn test_counts_sum_to_class_size() {
        let dataset = sample_dataset();

        for class in PassengerClass::ALL {
            let size = dataset.in_class(class).count();
            let survival: usize = survival_counts(&dataset, class).iter().map(|(_, c)| c).sum();
            let titles: usize = title_counts(&dataset, class).iter().map(|(_, c)| c).sum();
            let ages: usize = age_histogram(&dataset, class).iter().map(|b| b.count).sum();

            assert_eq!(survival, size, "survival for class {}", class);
            assert_eq!(titles, size, "titles for class {}", class);
            assert_eq!(ages, size, "ages for class {}", class);
        }
    }

    #[test]
    fn test_age_histogram_has_contiguous_bins() {
        let dataset = sample_dataset();

        for class in PassengerClass::ALL {
            let bins = age_histogram(&dataset, class);
            assert_eq!(bins.len(), AGE_BINS);
            for pair in bins.windows(2) {
                assert_eq!(pair[0].right, pair[1].left);
            }
        }
    }

    #[test]
    fn test_age_histogram_spans_class_min_max() {
        let dataset = sample_dataset();
        let bins = age_histogram(&dataset, PassengerClass::Third);

        assert_eq!(bins[0].left, 2.0);
        assert_eq!(bins[AGE_BINS - 1].right, 35.0);
        assert_eq!(bins[0].count, 1);
        // The maximum lands in the last, right-closed bin.
        assert_eq!(bins[AGE_BINS - 1].count, 1);
    }

    #[test]
    fn test_missing_age_uses_global_mean() {
        let dataset = sample_dataset();
        // Known ages: 22, 38, 26, 35, 35, 54, 2, 14 -> mean 28.25
        assert_eq!(dataset.mean_age(), 28.25);

        let bins = age_histogram(&dataset, PassengerClass::Second);
        // Class 2 ages become [14.0, 28.25]
        assert_eq!(bins[0].left, 14.0);
        assert_eq!(bins[AGE_BINS - 1].right, 28.25);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[AGE_BINS - 1].count, 1);
    }

    #[test]
    fn test_histogram_single_value_widens_span() {
        let bins = histogram(&[30.0, 30.0], AGE_BINS);

        assert_eq!(bins.len(), AGE_BINS);
        assert_eq!(bins[0].left, 29.5);
        assert_eq!(bins[AGE_BINS - 1].right, 30.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn test_value_on_interior_edge_starts_its_bin() {
        let width = 1.17 / AGE_BINS as f64;
        let edge = width * 3.0;
        let bins = histogram(&[0.0, edge, 1.17], AGE_BINS);

        assert_eq!(bins[3].left, edge);
        assert_eq!(bins[2].count, 0);
        assert_eq!(bins[3].count, 1);
    }

    #[test]
    fn test_edge_values_agree_with_reported_bounds() {
        for (low, high) in [(0.0, 1.17), (0.42, 80.0), (2.0, 35.0), (14.0, 28.25), (-3.3, 7.1)] {
            let span_bins = histogram(&[low, high], AGE_BINS);
            let mut values: Vec<f64> = span_bins.iter().map(|b| b.left).collect();
            values.push(high);

            let bins = histogram(&values, AGE_BINS);
            for (i, bin) in bins.iter().enumerate() {
                let expected = if i == AGE_BINS - 1 { 2 } else { 1 };
                assert_eq!(bin.count, expected, "span ({}, {}) bin {}", low, high, i);
            }
        }
    }

    #[test]
    fn test_histogram_of_nothing() {
        let bins = histogram(&[], AGE_BINS);

        assert_eq!(bins.len(), AGE_BINS);
        assert_eq!(bins[0].left, 0.0);
        assert_eq!(bins[AGE_BINS - 1].right, 1.0);
        assert!(bins.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_aggregations_are_idempotent() {
        let dataset = sample_dataset();

        for class in PassengerClass::ALL {
            assert_eq!(survival_counts(&dataset, class), survival_counts(&dataset, class));
            assert_eq!(title_counts(&dataset, class), title_counts(&dataset, class));
            assert_eq!(age_histogram(&dataset, class), age_histogram(&dataset, class));
        }
    }
}
