use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::network::LeafCounts;
use crate::series::{format_ohms, RSeries};

/// The resistors on hand: how many units of each nominal value may be used.
///
/// An inventory is read as text with one `value,quantity` pair per line:
/// ```
///     # use resistor_synth::Inventory;
///     let stock: Inventory = "330,2\n1000,5\n150,3\n".parse().unwrap();
///     assert_eq!(stock.total(), 10);
///     assert_eq!(stock.count(1000.0), 5);
///     assert_eq!(format!("{}", stock), "330R x2, 1K x5, 150R x3");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    stock: Vec<(f64, usize)>,
}

impl Inventory {
    /// Builds an inventory from `(value, count)` pairs. Repeated values are merged.
    pub fn new(items: impl IntoIterator<Item = (f64, usize)>) -> Result<Self> {
        let mut stock: Vec<(f64, usize)> = Vec::new();
        for (idx, (value, count)) in items.into_iter().enumerate() {
            if !value.is_finite() || value <= 0.0 || count == 0 {
                return Err(Error::BadInventoryFormat {
                    line: idx + 1,
                    content: format!("{},{}", value, count),
                });
            }
            match stock.iter_mut().find(|(v, _)| *v == value) {
                Some((_, c)) => *c += count,
                None => stock.push((value, count)),
            }
        }
        Ok(Inventory { stock })
    }

    /// `each` units of every value in a standard series.
    pub fn from_series(series: &RSeries, each: usize) -> Result<Self> {
        Self::new(series.iter().map(|v| (v, each)))
    }

    /// Reads an inventory file. A missing file is reported as `InventoryNotFound`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::InventoryNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        text.parse()
    }

    /// Total number of units.
    pub fn total(&self) -> usize {
        self.stock.iter().map(|&(_, n)| n).sum()
    }

    /// Units held of exactly `value`.
    pub fn count(&self, value: f64) -> usize {
        self.stock
            .iter()
            .find(|(v, _)| *v == value)
            .map_or(0, |&(_, n)| n)
    }

    /// Distinct values, in the order they were listed.
    pub fn distinct(&self) -> impl Iterator<Item = f64> + '_ {
        self.stock.iter().map(|&(v, _)| v)
    }

    /// Whether a network built from `leaves` can be assembled from this stock without
    /// using any unit twice.
    /// ```
    ///     # use resistor_synth::{Inventory, Network};
    ///     let stock = Inventory::new(vec![(100.0, 2), (200.0, 1)]).unwrap();
    ///     let twin = Network::leaf(200.0);
    ///     let pair = Network::series(&twin, &twin).unwrap();
    ///     assert!(stock.is_realizable(&twin.leaves()));
    ///     assert!(!stock.is_realizable(&pair.leaves()));
    /// ```
    pub fn is_realizable(&self, leaves: &LeafCounts) -> bool {
        leaves.iter().all(|&(v, n)| self.count(v) >= n)
    }
}

impl FromStr for Inventory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut items = Vec::new();
        for (idx, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let bad = || Error::BadInventoryFormat {
                line: idx + 1,
                content: line.to_string(),
            };
            let mut split = line.split(',');
            let (value, count) = match (split.next(), split.next(), split.next()) {
                (Some(v), Some(c), None) => (v.trim(), c.trim()),
                _ => return Err(bad()),
            };
            let value = value.parse::<f64>().map_err(|_| bad())?;
            let count = count.parse::<usize>().map_err(|_| bad())?;
            if !value.is_finite() || value <= 0.0 || count == 0 {
                return Err(bad());
            }
            items.push((value, count));
        }
        Self::new(items)
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            self.stock
                .iter()
                .map(|&(v, n)| format!("{} x{}", format_ohms(v), n))
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::E3;

    fn stock() -> Inventory {
        Inventory::new(vec![(100.0, 2), (200.0, 1), (4.7, 3)]).unwrap()
    }

    #[test]
    fn merges_repeats() {
        let inv = Inventory::new(vec![(330.0, 1), (150.0, 2), (330.0, 4)]).unwrap();
        assert_eq!(inv.count(330.0), 5);
        assert_eq!(inv.distinct().collect::<Vec<_>>(), vec![330.0, 150.0]);
        assert_eq!(inv.total(), 7);
    }

    #[test]
    fn rejects_empty_classes() {
        assert!(Inventory::new(vec![(100.0, 0)]).is_err());
        assert!(Inventory::new(vec![(-1.0, 3)]).is_err());
    }

    #[test]
    fn realizable_checks_every_value() {
        let inv = stock();
        let mut leaves = LeafCounts::single(100.0);
        assert!(inv.is_realizable(&leaves));
        leaves.add(100.0, 1);
        leaves.add(4.7, 3);
        assert!(inv.is_realizable(&leaves));
        leaves.add(100.0, 1);
        assert!(!inv.is_realizable(&leaves));
        assert!(!inv.is_realizable(&LeafCounts::single(330.0)));
        // the check never consumes stock
        assert_eq!(inv, stock());
    }

    #[test]
    fn realizable_is_monotonic() {
        let inv = stock();
        let full = [(100.0, 2), (200.0, 1), (4.7, 3)];
        for mask in 0..(1 << full.len()) {
            for take in 0..=2 {
                let mut sub = LeafCounts::default();
                for (i, &(v, n)) in full.iter().enumerate() {
                    if mask & (1 << i) != 0 {
                        sub.add(v, n.min(take.max(1)));
                    }
                }
                assert!(inv.is_realizable(&sub));
            }
        }
    }

    #[test]
    fn parses_lines() {
        let inv: Inventory = "  330 , 2 \n\n1e3,5\n".parse().unwrap();
        assert_eq!(inv.count(330.0), 2);
        assert_eq!(inv.count(1000.0), 5);
    }

    #[test]
    fn reports_bad_line() {
        for (text, bad_line) in &[
            ("330,2\n1000\n", 2),
            ("330,2,1\n", 1),
            ("abc,2\n", 1),
            ("330,x\n", 1),
            ("100,1\n\n330,-2\n", 3),
            ("0,4\n", 1),
        ] {
            match text.parse::<Inventory>() {
                Err(Error::BadInventoryFormat { line, .. }) => assert_eq!(line, *bad_line),
                other => panic!("{:?} parsed as {:?}", text, other),
            }
        }
    }

    #[test]
    fn missing_file() {
        match Inventory::load("/nonexistent/myResistors.txt") {
            Err(Error::InventoryNotFound(p)) => assert!(p.ends_with("myResistors.txt")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn series_stock() {
        let inv = Inventory::from_series(&E3, 2).unwrap();
        assert_eq!(inv.total(), 42);
        assert_eq!(inv.count(4700.0), 2);
    }
}
