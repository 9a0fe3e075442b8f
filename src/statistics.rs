//! Summary statistics over the distinct numbers in a text.
//!
//! [`Summary`] feeds numbers into a [`RedBlackTree`], so repeated values are
//! counted once and the median falls out of the in-order traversal.

use alloc::format;
use core::fmt;

use log::debug;
use ordered_float::OrderedFloat;

use crate::RedBlackTree;

/// The value the report measures neighbors against.
pub const REPORT_PIVOT: f64 = 42.0;

/// Count, average, median and neighbors of a set of distinct numbers.
///
/// # Examples
///
/// ```
/// use crimson_tree::Summary;
///
/// let summary = Summary::parse("7 3 3 50 1.5");
/// assert_eq!(summary.count(), 4);
/// assert_eq!(summary.median(), Some(5.0));
/// assert_eq!(summary.closest_less(42.0), Some(7.0));
/// assert_eq!(summary.closest_greater(42.0), Some(50.0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Summary {
    values: RedBlackTree<OrderedFloat<f64>>,
}

impl Summary {
    /// Creates an empty summary.
    #[must_use]
    pub const fn new() -> Self {
        Summary {
            values: RedBlackTree::new(),
        }
    }

    /// Reads whitespace-separated numbers from `input`.
    ///
    /// Numbers are read the way a C++ input stream extracts doubles: a token
    /// may hold a number followed by junk, in which case the number counts
    /// and reading stops at the junk. `nan` and `inf` are not numbers, and
    /// neither is a value too large for `f64`. Everything after the first
    /// unreadable text is ignored.
    ///
    /// ```
    /// use crimson_tree::Summary;
    ///
    /// assert_eq!(Summary::parse("1 2 three 4").count(), 2);
    /// assert_eq!(Summary::parse("5 12abc 7").count(), 2);
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut summary = Summary::new();
        'tokens: for token in input.split_whitespace() {
            let mut rest = token;
            while !rest.is_empty() {
                let Some((value, tail)) = split_number(rest) else {
                    debug!("stopped reading at {rest:?}");
                    break 'tokens;
                };
                summary.add(value);
                rest = tail;
            }
        }
        debug!("read {} distinct values", summary.count());
        summary
    }

    /// Adds a value. Returns `false` if it was already present.
    pub fn add(&mut self, value: f64) -> bool {
        self.values.insert(OrderedFloat(value))
    }

    /// Number of distinct values.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.values.len()
    }

    /// Mean of the distinct values, or `None` when there are none.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let sum: f64 = self.values.iter().map(|value| value.0).sum();
        Some(sum / self.count() as f64)
    }

    /// Middle distinct value, or the mean of the two middle values when the
    /// count is even. `None` when there are no values.
    #[must_use]
    pub fn median(&self) -> Option<f64> {
        let count = self.count();
        if count == 0 {
            return None;
        }
        let mut middle = self.values.iter().skip((count - 1) / 2).map(|value| value.0);
        let lower = middle.next()?;
        if count % 2 == 1 {
            Some(lower)
        } else {
            let upper = middle.next()?;
            Some(f64::midpoint(lower, upper))
        }
    }

    /// Largest value strictly below `pivot`.
    #[must_use]
    pub fn closest_less(&self, pivot: f64) -> Option<f64> {
        self.values.closest_less(&OrderedFloat(pivot)).map(|value| value.0)
    }

    /// Smallest value strictly above `pivot`.
    #[must_use]
    pub fn closest_greater(&self, pivot: f64) -> Option<f64> {
        self.values.closest_greater(&OrderedFloat(pivot)).map(|value| value.0)
    }
}

impl Extend<f64> for Summary {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl FromIterator<f64> for Summary {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut summary = Summary::new();
        summary.extend(iter);
        summary
    }
}

/// Writes the report: count, average, median and the neighbors of
/// [`REPORT_PIVOT`], one per line. Values are shown to six significant
/// digits.
///
/// ```
/// use crimson_tree::Summary;
///
/// let report = Summary::parse("40 44 50").to_string();
/// assert_eq!(
///     report,
///     "# of values: 3\naverage: 44.6667\nmedian: 44\nclosest < 42: 40\nclosest > 42: 44\n"
/// );
/// assert_eq!(Summary::parse("").to_string(), "The file is empty.\n");
/// ```
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(average), Some(median)) = (self.average(), self.median()) else {
            return writeln!(f, "The file is empty.");
        };
        let pivot = Significant(REPORT_PIVOT);
        writeln!(f, "# of values: {}", self.count())?;
        writeln!(f, "average: {}", Significant(average))?;
        writeln!(f, "median: {}", Significant(median))?;
        match self.closest_less(REPORT_PIVOT) {
            Some(value) => writeln!(f, "closest < {pivot}: {}", Significant(value))?,
            None => writeln!(f, "closest < {pivot}: None")?,
        }
        match self.closest_greater(REPORT_PIVOT) {
            Some(value) => writeln!(f, "closest > {pivot}: {}", Significant(value)),
            None => writeln!(f, "closest > {pivot}: None"),
        }
    }
}

/// Splits the longest leading decimal number off `text`: an optional sign,
/// digits with an optional fraction, then an optional exponent.
fn split_number(text: &str) -> Option<(f64, &str)> {
    let bytes = text.as_bytes();
    let digits_end = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut end = digits_end(sign);
    let mut mantissa_digits = end - sign;
    if bytes.get(end) == Some(&b'.') {
        let fraction_end = digits_end(end + 1);
        mantissa_digits += fraction_end - end - 1;
        end = fraction_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let digits_start = end + 1 + usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent_end = digits_end(digits_start);
        if exponent_end > digits_start {
            end = exponent_end;
        }
    }

    let value: f64 = text[..end].parse().ok()?;
    value.is_finite().then_some((value, &text[end..]))
}

/// Displays an `f64` like C's `%g`: six significant digits, trailing zeros
/// dropped, scientific notation for very large or small magnitudes.
struct Significant(f64);

impl Significant {
    const DIGITS: i32 = 6;
}

impl fmt::Display for Significant {
    #[allow(clippy::cast_sign_loss)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if !value.is_finite() {
            return write!(f, "{value}");
        }

        // The exponent after rounding to the requested digits picks the notation.
        let scientific = format!("{:.*e}", (Self::DIGITS - 1) as usize, value);
        let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);

        if (-4..Self::DIGITS).contains(&exponent) {
            let fixed = format!("{:.*}", (Self::DIGITS - 1 - exponent) as usize, value);
            f.write_str(trim_fraction(&fixed))
        } else {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(f, "{}e{sign}{:02}", trim_fraction(mantissa), exponent.unsigned_abs())
        }
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn duplicates_count_once() {
        let summary = Summary::parse("5 5 5 1");
        assert_eq!(summary.count(), 2);
        assert_eq!(summary.average(), Some(3.0));
        assert_eq!(summary.median(), Some(3.0));
    }

    #[test]
    fn odd_count_median_is_middle_value() {
        let summary: Summary = [9.0, 1.0, 4.0].into_iter().collect();
        assert_eq!(summary.median(), Some(4.0));
    }

    #[test]
    fn empty_summary_has_no_statistics() {
        let summary = Summary::new();
        assert_eq!(summary.count(), 0);
        assert_eq!(summary.average(), None);
        assert_eq!(summary.median(), None);
        assert_eq!(summary.closest_less(REPORT_PIVOT), None);
    }

    #[test]
    fn numbers_split_off_their_suffix() {
        assert_eq!(split_number("12abc"), Some((12.0, "abc")));
        assert_eq!(split_number("1,2,3"), Some((1.0, ",2,3")));
        assert_eq!(split_number("-.5e2x"), Some((-50.0, "x")));
        assert_eq!(split_number("7e"), Some((7.0, "e")));
        assert_eq!(split_number("1.5.5"), Some((1.5, ".5")));
        assert_eq!(split_number("+"), None);
        assert_eq!(split_number("."), None);
        assert_eq!(split_number("nan"), None);
        assert_eq!(split_number("inf"), None);
        assert_eq!(split_number("1e999"), None);
    }

    #[test]
    fn significant_digits_match_printf_g() {
        let shown = |value: f64| format!("{}", Significant(value));
        assert_eq!(shown(0.0), "0");
        assert_eq!(shown(45.0), "45");
        assert_eq!(shown(1593.4), "1593.4");
        assert_eq!(shown(3.141_592_65), "3.14159");
        assert_eq!(shown(73.722_222_22), "73.7222");
        assert_eq!(shown(-2.5), "-2.5");
        assert_eq!(shown(0.000_1), "0.0001");
        assert_eq!(shown(0.000_012_5), "1.25e-05");
        assert_eq!(shown(1_234_567.0), "1.23457e+06");
        assert_eq!(shown(999_999.7), "1e+06");
    }

    #[test]
    fn pivot_itself_is_not_a_neighbor() {
        let summary = Summary::parse("42");
        assert_eq!(summary.closest_less(42.0), None);
        assert_eq!(summary.closest_greater(42.0), None);
    }
}
