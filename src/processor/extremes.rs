use crate::error::WeatherError;
use crate::processor::table::DerivedTable;
use crate::types::metric::Metric;
use crate::types::record::DerivedRecord;
use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// The `k` highest and `k` lowest records of one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extremes {
    pub metric: Metric,
    /// Descending by value.
    pub highest: Vec<DerivedRecord>,
    /// Ascending by value.
    pub lowest: Vec<DerivedRecord>,
}

// Lower score is better; the heap top is the worst kept candidate.
#[derive(Debug)]
struct Candidate {
    score: OrderedFloat<f64>,
    date: NaiveDate,
    index: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Candidate {}
impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| self.date.cmp(&other.date))
    }
}

/// Indices of the `k` best-scoring records, best first.
fn best_k<'a>(
    records: impl Iterator<Item = (usize, &'a DerivedRecord)>,
    k: usize,
    score: impl Fn(&DerivedRecord) -> f64,
) -> Vec<usize> {
    let mut heap: BinaryHeap<Candidate> = BinaryHeap::with_capacity(k + 1);
    for (index, record) in records {
        heap.push(Candidate {
            score: OrderedFloat(score(record)),
            date: record.date(),
            index,
        });
        if heap.len() > k {
            heap.pop();
        }
    }
    heap.into_sorted_vec().into_iter().map(|c| c.index).collect()
}

impl DerivedTable {
    /// Returns the `k` highest and `k` lowest records for `metric`.
    ///
    /// Ties are broken by ascending date. The two lists never share a record:
    /// `highest` is filled first with up to `k` records and `lowest` is picked
    /// from whatever remains, so on a table with fewer than `2k` records
    /// `lowest` is shorter than `k`.
    ///
    /// # Errors
    ///
    /// [`WeatherError::InvalidParameter`] when `k` is zero.
    ///
    /// ```rust
    /// use weather_dashboard::{derive, generate, Metric};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let table = derive(generate(2023, Some(3))?)?;
    /// let extremes = table.extremes(Metric::Temperature, 3)?;
    /// assert_eq!(extremes.highest.len(), 3);
    /// assert!(extremes.highest[0].temperature() >= extremes.lowest[0].temperature());
    /// # Ok(())
    /// # }
    /// ```
    pub fn extremes(&self, metric: Metric, k: usize) -> Result<Extremes, WeatherError> {
        if k == 0 {
            return Err(WeatherError::InvalidParameter(
                "extremes need k of at least 1".to_string(),
            ));
        }

        let records = self.records();
        // neither list can hold more than the whole table
        let k = k.min(records.len());
        let highest = best_k(records.iter().enumerate(), k, |r| -metric.value_of(r));
        let taken: HashSet<usize> = highest.iter().copied().collect();
        let lowest = best_k(
            records.iter().enumerate().filter(|(i, _)| !taken.contains(i)),
            k,
            |r| metric.value_of(r),
        );

        Ok(Extremes {
            metric,
            highest: highest.into_iter().map(|i| records[i]).collect(),
            lowest: lowest.into_iter().map(|i| records[i]).collect(),
        })
    }
}
