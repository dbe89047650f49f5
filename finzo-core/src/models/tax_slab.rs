use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single income band taxed at a flat marginal rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub lower_bound: Decimal,
    /// `None` for the final, unbounded slab.
    pub upper_bound: Option<Decimal>,
    /// Marginal rate as a percentage, e.g. `5` for 5%.
    pub rate_percent: Decimal,
}

impl TaxSlab {
    pub fn new(
        lower_bound: Decimal,
        upper_bound: Option<Decimal>,
        rate_percent: Decimal,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound,
            rate_percent,
        }
    }
}

/// Errors raised when a slab table breaks its structural invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlabTableError {
    #[error("slab table is empty")]
    Empty,

    #[error("first slab must start at 0, got {0}")]
    FirstLowerBoundNotZero(Decimal),

    #[error("slab {index} starts at {found} but the previous slab ends at {expected}")]
    NotContiguous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("slab {index} has upper bound {upper} not above its lower bound {lower}")]
    EmptyRange {
        index: usize,
        lower: Decimal,
        upper: Decimal,
    },

    #[error("only the last slab may be unbounded, but slab {0} has no upper bound")]
    UnboundedBeforeLast(usize),

    #[error("last slab must be unbounded, but it ends at {0}")]
    LastSlabBounded(Decimal),

    #[error("slab {index} has rate {rate}% outside 0..=100")]
    InvalidRate { index: usize, rate: Decimal },

    #[error("slab {index} rate {rate}% is lower than the previous slab's {previous}%")]
    DecreasingRate {
        index: usize,
        rate: Decimal,
        previous: Decimal,
    },
}

/// Ordered, contiguous list of slabs covering `[0, ∞)`.
///
/// Construct with [`SlabTable::new`], which enforces:
/// - the first slab starts at 0
/// - each slab starts where the previous one ends
/// - only the last slab is unbounded
/// - rates lie in `0..=100` and never decrease
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use finzo_core::{SlabTable, TaxSlab};
///
/// let table = SlabTable::new(vec![
///     TaxSlab::new(dec!(0), Some(dec!(250000)), dec!(0)),
///     TaxSlab::new(dec!(250000), None, dec!(5)),
/// ])
/// .unwrap();
///
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxSlab>", into = "Vec<TaxSlab>")]
pub struct SlabTable {
    slabs: Vec<TaxSlab>,
}

impl SlabTable {
    pub fn new(slabs: Vec<TaxSlab>) -> Result<Self, SlabTableError> {
        validate(&slabs)?;
        Ok(Self { slabs })
    }

    /// Builds a table from `(lower, upper, rate)` rows the crate knows are valid.
    pub(crate) fn from_rows(rows: &[(Decimal, Option<Decimal>, Decimal)]) -> Self {
        let slabs: Vec<TaxSlab> = rows
            .iter()
            .map(|&(lower, upper, rate)| TaxSlab::new(lower, upper, rate))
            .collect();
        debug_assert_eq!(validate(&slabs), Ok(()));
        Self { slabs }
    }

    pub fn slabs(&self) -> &[TaxSlab] {
        &self.slabs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaxSlab> {
        self.slabs.iter()
    }

    pub fn len(&self) -> usize {
        self.slabs.len()
    }

    /// Always `false` for a validated table.
    pub fn is_empty(&self) -> bool {
        self.slabs.is_empty()
    }

    /// Highest marginal rate, taken from the unbounded slab.
    pub fn top_rate(&self) -> Decimal {
        self.slabs
            .last()
            .map(|s| s.rate_percent)
            .unwrap_or(Decimal::ZERO)
    }
}

impl TryFrom<Vec<TaxSlab>> for SlabTable {
    type Error = SlabTableError;

    fn try_from(slabs: Vec<TaxSlab>) -> Result<Self, Self::Error> {
        Self::new(slabs)
    }
}

impl From<SlabTable> for Vec<TaxSlab> {
    fn from(table: SlabTable) -> Self {
        table.slabs
    }
}

impl<'a> IntoIterator for &'a SlabTable {
    type Item = &'a TaxSlab;
    type IntoIter = std::slice::Iter<'a, TaxSlab>;

    fn into_iter(self) -> Self::IntoIter {
        self.slabs.iter()
    }
}

fn validate(slabs: &[TaxSlab]) -> Result<(), SlabTableError> {
    let first = slabs.first().ok_or(SlabTableError::Empty)?;
    if !first.lower_bound.is_zero() {
        return Err(SlabTableError::FirstLowerBoundNotZero(first.lower_bound));
    }

    let hundred = Decimal::ONE_HUNDRED;
    let last_index = slabs.len() - 1;

    for (index, slab) in slabs.iter().enumerate() {
        if slab.rate_percent < Decimal::ZERO || slab.rate_percent > hundred {
            return Err(SlabTableError::InvalidRate {
                index,
                rate: slab.rate_percent,
            });
        }

        match slab.upper_bound {
            Some(upper) if index == last_index => {
                return Err(SlabTableError::LastSlabBounded(upper));
            }
            Some(upper) if upper <= slab.lower_bound => {
                return Err(SlabTableError::EmptyRange {
                    index,
                    lower: slab.lower_bound,
                    upper,
                });
            }
            None if index != last_index => {
                return Err(SlabTableError::UnboundedBeforeLast(index));
            }
            _ => {}
        }

        if index > 0 {
            let previous = &slabs[index - 1];
            // The previous slab is bounded: an unbounded one before the last was rejected above.
            let expected = previous.upper_bound.unwrap_or(Decimal::MAX);
            if slab.lower_bound != expected {
                return Err(SlabTableError::NotContiguous {
                    index,
                    expected,
                    found: slab.lower_bound,
                });
            }
            if slab.rate_percent < previous.rate_percent {
                return Err(SlabTableError::DecreasingRate {
                    index,
                    rate: slab.rate_percent,
                    previous: previous.rate_percent,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn slab(
        lower: Decimal,
        upper: Option<Decimal>,
        rate: Decimal,
    ) -> TaxSlab {
        TaxSlab::new(lower, upper, rate)
    }

    #[test]
    fn accepts_contiguous_table() {
        let table = SlabTable::new(vec![
            slab(dec!(0), Some(dec!(250000)), dec!(0)),
            slab(dec!(250000), Some(dec!(500000)), dec!(5)),
            slab(dec!(500000), None, dec!(20)),
        ]);

        let table = table.expect("table should be valid");
        assert_eq!(table.len(), 3);
        assert_eq!(table.top_rate(), dec!(20));
    }

    #[test]
    fn rejects_empty_table() {
        assert_eq!(SlabTable::new(vec![]), Err(SlabTableError::Empty));
    }

    #[test]
    fn rejects_nonzero_start() {
        let result = SlabTable::new(vec![slab(dec!(100), None, dec!(5))]);

        assert_eq!(result, Err(SlabTableError::FirstLowerBoundNotZero(dec!(100))));
    }

    #[test]
    fn rejects_gap_between_slabs() {
        let result = SlabTable::new(vec![
            slab(dec!(0), Some(dec!(250000)), dec!(0)),
            slab(dec!(300000), None, dec!(5)),
        ]);

        assert_eq!(
            result,
            Err(SlabTableError::NotContiguous {
                index: 1,
                expected: dec!(250000),
                found: dec!(300000),
            })
        );
    }

    #[test]
    fn rejects_bounded_last_slab() {
        let result = SlabTable::new(vec![slab(dec!(0), Some(dec!(250000)), dec!(0))]);

        assert_eq!(result, Err(SlabTableError::LastSlabBounded(dec!(250000))));
    }

    #[test]
    fn rejects_unbounded_middle_slab() {
        let result = SlabTable::new(vec![
            slab(dec!(0), None, dec!(0)),
            slab(dec!(250000), None, dec!(5)),
        ]);

        assert_eq!(result, Err(SlabTableError::UnboundedBeforeLast(0)));
    }

    #[test]
    fn rejects_inverted_range() {
        let result = SlabTable::new(vec![
            slab(dec!(0), Some(dec!(0)), dec!(0)),
            slab(dec!(0), None, dec!(5)),
        ]);

        assert_eq!(
            result,
            Err(SlabTableError::EmptyRange {
                index: 0,
                lower: dec!(0),
                upper: dec!(0),
            })
        );
    }

    #[test]
    fn rejects_decreasing_rates() {
        let result = SlabTable::new(vec![
            slab(dec!(0), Some(dec!(250000)), dec!(10)),
            slab(dec!(250000), None, dec!(5)),
        ]);

        assert_eq!(
            result,
            Err(SlabTableError::DecreasingRate {
                index: 1,
                rate: dec!(5),
                previous: dec!(10),
            })
        );
    }

    #[test]
    fn rejects_rate_above_hundred() {
        let result = SlabTable::new(vec![slab(dec!(0), None, dec!(101))]);

        assert_eq!(
            result,
            Err(SlabTableError::InvalidRate {
                index: 0,
                rate: dec!(101),
            })
        );
    }
}
