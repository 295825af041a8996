use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};
use crate::schematic::Schematic;

/// How the two halves of a composite network are wired together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Series,
    Parallel,
}

/// The multiset of nominal values a network is built from.
///
/// Values are compared exactly, they are always copied from the inventory and never
/// computed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeafCounts(Vec<(f64, usize)>);

impl LeafCounts {
    pub fn single(value: f64) -> Self {
        LeafCounts(vec![(value, 1)])
    }

    /// Adds `n` units of `value`.
    pub fn add(&mut self, value: f64, n: usize) {
        match self.0.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += n,
            None => self.0.push((value, n)),
        }
    }

    /// Multiset union, counts of equal values are summed.
    pub fn union(&self, other: &LeafCounts) -> LeafCounts {
        let mut res = self.clone();
        for &(v, n) in other.iter() {
            res.add(v, n);
        }
        res
    }

    pub fn count(&self, value: f64) -> usize {
        self.0
            .iter()
            .find(|(v, _)| *v == value)
            .map_or(0, |&(_, n)| n)
    }

    /// Total number of units.
    pub fn total(&self) -> usize {
        self.0.iter().map(|&(_, n)| n).sum()
    }

    /// Distinct values with their multiplicity, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &(f64, usize)> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    op: Op,
    left: Network,
    right: Network,
    resistance: f64,
    leaves: LeafCounts,
    description: String,
}

impl Composite {
    pub fn op(&self) -> Op {
        self.op
    }

    pub fn children(&self) -> (&Network, &Network) {
        (&self.left, &self.right)
    }
}

/// A two terminal network of resistors nested in series and in parallel.
///
/// ```
///     # use resistor_synth::Network;
///     let r = Network::leaf(330.0);
///     let half = Network::parallel(&r, &r).unwrap();
///     assert_eq!(half.resistance(), 165.0);
///     assert_eq!(half.description(), "(<3.300E+02>;<3.300E+02>)");
///     assert_eq!(half.units(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Network {
    Leaf(f64),
    Composite(Box<Composite>),
}

impl Network {
    pub fn leaf(value: f64) -> Self {
        Network::Leaf(value)
    }

    /// Connects `a` and `b` end to end.
    pub fn series(a: &Network, b: &Network) -> Result<Self> {
        Self::combine(Op::Series, a, b)
    }

    /// Connects `a` and `b` side by side. Fails with `DegenerateNetwork` if either has
    /// zero or infinite resistance.
    pub fn parallel(a: &Network, b: &Network) -> Result<Self> {
        Self::combine(Op::Parallel, a, b)
    }

    /// Builds the composite `a op b`, owning copies of both halves.
    pub fn combine(op: Op, a: &Network, b: &Network) -> Result<Self> {
        let (ra, rb) = (a.resistance(), b.resistance());
        let resistance = match op {
            Op::Series => ra + rb,
            Op::Parallel => {
                if ra == 0.0 || rb == 0.0 || !ra.is_finite() || !rb.is_finite() {
                    return Err(Error::DegenerateNetwork);
                }
                1.0 / (1.0 / ra + 1.0 / rb)
            }
        };
        if !resistance.is_finite() {
            return Err(Error::DegenerateNetwork);
        }
        let description = match op {
            Op::Series => format!("[{},{}]", a.description(), b.description()),
            Op::Parallel => format!("({};{})", a.description(), b.description()),
        };
        Ok(Network::Composite(Box::new(Composite {
            op,
            left: a.clone(),
            right: b.clone(),
            resistance,
            leaves: a.leaves().union(&b.leaves()),
            description,
        })))
    }

    /// Equivalent resistance in ohms.
    pub fn resistance(&self) -> f64 {
        match self {
            Network::Leaf(v) => *v,
            Network::Composite(c) => c.resistance,
        }
    }

    pub fn leaves(&self) -> Cow<LeafCounts> {
        match self {
            Network::Leaf(v) => Cow::Owned(LeafCounts::single(*v)),
            Network::Composite(c) => Cow::Borrowed(&c.leaves),
        }
    }

    /// Number of physical resistors used.
    pub fn units(&self) -> usize {
        match self {
            Network::Leaf(_) => 1,
            Network::Composite(c) => c.leaves.total(),
        }
    }

    /// Bracket notation of the topology: `<value>` for a resistor, `[a,b]` for series
    /// and `(a;b)` for parallel.
    pub fn description(&self) -> Cow<str> {
        match self {
            Network::Leaf(v) => Cow::Owned(format!("<{}>", sci(*v))),
            Network::Composite(c) => Cow::Borrowed(&c.description),
        }
    }

    pub fn schematic(&self) -> Result<Schematic> {
        self.description().parse()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            let schematic = self.schematic().map_err(|_| fmt::Error)?;
            write!(f, "{}", schematic)
        } else {
            write!(f, "{}", self.description())
        }
    }
}

/// Scientific notation with three decimals and a signed two digit exponent: `3.300E+02`.
pub(crate) fn sci(v: f64) -> String {
    let raw = format!("{:.3E}", v);
    match raw.find('E') {
        Some(idx) => {
            let (mantissa, exp) = raw.split_at(idx);
            match exp[1..].parse::<i32>() {
                Ok(e) => format!("{}E{}{:02}", mantissa, if e < 0 { '-' } else { '+' }, e.abs()),
                Err(_) => raw.clone(),
            }
        }
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
    }

    #[test]
    fn leaf_is_exact() {
        for &v in &[1.0, 4.7, 330.0, 1e6, 0.1] {
            let l = Network::leaf(v);
            assert_eq!(l.resistance(), v);
            assert_eq!(l.units(), 1);
            assert_eq!(l.leaves().count(v), 1);
        }
    }

    #[test]
    fn composition_values() {
        let a = Network::leaf(100.0);
        let b = Network::series(&Network::leaf(220.0), &Network::leaf(470.0)).unwrap();
        let s = Network::series(&a, &b).unwrap();
        let p = Network::parallel(&a, &b).unwrap();
        assert!(close(s.resistance(), 790.0));
        assert!(close(p.resistance(), 1.0 / (1.0 / 100.0 + 1.0 / 690.0)));
        assert_eq!(s.units(), 3);
        assert_eq!(p.units(), 3);
    }

    #[test]
    fn leaves_are_union() {
        let a = Network::parallel(&Network::leaf(100.0), &Network::leaf(100.0)).unwrap();
        let b = Network::series(&Network::leaf(100.0), &Network::leaf(220.0)).unwrap();
        let c = Network::series(&a, &b).unwrap();
        assert_eq!(c.leaves().count(100.0), 3);
        assert_eq!(c.leaves().count(220.0), 1);
        assert_eq!(c.leaves().count(330.0), 0);
        assert_eq!(c.leaves().total(), a.units() + b.units());
    }

    #[test]
    fn parallel_rejects_zero() {
        let z = Network::leaf(0.0);
        match Network::parallel(&z, &Network::leaf(10.0)) {
            Err(Error::DegenerateNetwork) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn descriptions() {
        let a = Network::leaf(100.0);
        let b = Network::leaf(0.47);
        let s = Network::series(&a, &b).unwrap();
        assert_eq!(s.description(), "[<1.000E+02>,<4.700E-01>]");
        let p = Network::parallel(&s, &a).unwrap();
        assert_eq!(p.description(), "([<1.000E+02>,<4.700E-01>];<1.000E+02>)");
        assert_eq!(format!("{}", p), p.description());
    }

    #[test]
    fn sci_format() {
        assert_eq!(sci(1.0), "1.000E+00");
        assert_eq!(sci(12346.0), "1.235E+04");
        assert_eq!(sci(0.022), "2.200E-02");
    }
}
