use std::collections::HashSet;

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::inventory::Inventory;
use crate::network::{Network, Op};

/// What to search for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    /// Desired resistance in ohms.
    pub target: f64,
    /// Largest number of resistors a network may use.
    pub max_units: usize,
    /// Stop as soon as a network is within this many percent of the target.
    pub tolerance: f64,
}

impl Params {
    pub fn new(target: f64, max_units: usize, tolerance: f64) -> Self {
        Params {
            target,
            max_units,
            tolerance,
        }
    }

    /// Checks the parameters against the stock they will be searched over.
    pub fn validate(&self, inventory: &Inventory) -> Result<()> {
        if !self.target.is_finite() || self.target <= 0.0 {
            return Err(Error::InvalidTarget(self.target));
        }
        let available = inventory.total();
        if self.max_units < 1 || self.max_units > available {
            return Err(Error::InvalidMaxUnits {
                max_units: self.max_units,
                available,
            });
        }
        if !(0.0..=100.0).contains(&self.tolerance) {
            return Err(Error::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }

    fn accepts(&self, r: f64) -> bool {
        (r - self.target).abs() / self.target * 100.0 <= self.tolerance
    }
}

/// Whether `r` lies within `tolerance` percent of `target`.
/// ```
///     # use resistor_synth::within_tolerance;
///     assert!(within_tolerance(165.0, 165.0, 0.0).unwrap());
///     assert!(within_tolerance(99.5, 100.0, 1.0).unwrap());
///     assert!(!within_tolerance(98.0, 100.0, 1.0).unwrap());
///     assert!(within_tolerance(1.0, 0.0, 1.0).is_err());
/// ```
pub fn within_tolerance(r: f64, target: f64, tolerance: f64) -> Result<bool> {
    if !target.is_finite() || target <= 0.0 {
        return Err(Error::InvalidTarget(target));
    }
    Ok((r - target).abs() / target * 100.0 <= tolerance)
}

/// Signed difference between `r` and `target` as a percentage of `target`.
pub fn percent_diff(r: f64, target: f64) -> f64 {
    100.0 * (r - target) / target
}

/// The network closest to `target`. On a tie the earliest one wins.
pub fn nearest<'a>(target: f64, nets: impl IntoIterator<Item = &'a Network>) -> Option<&'a Network> {
    let mut best: Option<&'a Network> = None;
    for net in nets {
        match best {
            Some(b) if (target - net.resistance()).abs() >= (target - b.resistance()).abs() => {}
            _ => best = Some(net),
        }
    }
    best
}

/// Stores the result of a search.
#[derive(Debug)]
pub struct SynthRes {
    target: f64,
    best: Network,
    locals: Vec<(usize, Network)>,
    early_exit: bool,
}

impl SynthRes {
    /// The overall best network: the first one found within tolerance, or the nearest of
    /// the per-level optima if none was.
    pub fn best(&self) -> &Network {
        &self.best
    }

    /// The nearest network for each completed level, keyed by the number of resistors.
    pub fn locals(&self) -> &[(usize, Network)] {
        &self.locals
    }

    /// True if the search stopped early on a network within tolerance.
    pub fn early_exit(&self) -> bool {
        self.early_exit
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// One line summary of how well `net` hits the target.
    pub fn summary(&self, net: &Network) -> String {
        summary(net, self.target)
    }

    /// Print the schematic and summary of the best network.
    pub fn print_best(&self) {
        print_net(&self.best, self.target);
    }
}

/// One line summary of how well `net` hits `target`.
/// ```
///     # use resistor_synth::{summary, Network};
///     assert_eq!(
///         summary(&Network::leaf(100.0), 150.0),
///         "This resistance = 100.00 ohms (desired = 150.00 ohms), difference = -33.333%"
///     );
/// ```
pub fn summary(net: &Network, target: f64) -> String {
    format!(
        "This resistance = {:.2} ohms (desired = {:.2} ohms), difference = {:.3}%",
        net.resistance(),
        target,
        percent_diff(net.resistance(), target)
    )
}

/// Print the schematic of `net` followed by its summary.
pub fn print_net(net: &Network, target: f64) {
    match net.schematic() {
        Ok(s) => println!("{}", s),
        Err(e) => println!("{}\n({})", net, e),
    }
    println!("{}\n", summary(net, target));
}

/// Main search struct
#[derive(Debug)]
pub struct Synth<'a> {
    inventory: &'a Inventory,
}

impl<'a> Synth<'a> {
    pub fn new(inventory: &'a Inventory) -> Self {
        Synth { inventory }
    }

    /// Searches for the series/parallel network nearest to `params.target`.
    ///
    /// Networks are built level by level: level `n` holds every distinct resistance that
    /// can be made from exactly `n` resistors, by combining each pair of levels `i` and
    /// `n - i` in series and in parallel. Only the first network found for a resistance is
    /// kept, and a network is only kept when the inventory has enough units for it. The
    /// search stops at the first network within `params.tolerance` percent of the target.
    ///
    /// `progress` is called with the nearest network of each level once it is complete.
    /// ```
    ///     # use resistor_synth::{Inventory, Params, Synth};
    ///     let stock = Inventory::new(vec![(330.0, 2)]).unwrap();
    ///     let res = Synth::new(&stock)
    ///         .calc(&Params::new(165.0, 2, 1.0), |_, _| {})
    ///         .unwrap();
    ///     assert!(res.early_exit());
    ///     assert_eq!(res.best().description(), "(<3.300E+02>;<3.300E+02>)");
    /// ```
    pub fn calc(&self, params: &Params, mut progress: impl FnMut(usize, &Network)) -> Result<SynthRes> {
        params.validate(self.inventory)?;

        let mut locals: Vec<(usize, Network)> = Vec::new();
        let early = |net: Network, locals: Vec<(usize, Network)>| SynthRes {
            target: params.target,
            best: net,
            locals,
            early_exit: true,
        };

        let mut seen: HashSet<u64> = HashSet::new();
        let mut levels: Vec<Vec<Network>> = Vec::with_capacity(params.max_units);

        let mut first = Vec::new();
        for leaf in self.inventory.distinct().map(Network::leaf) {
            if params.accepts(leaf.resistance()) {
                return Ok(early(leaf, locals));
            }
            if seen.insert(leaf.resistance().to_bits()) {
                first.push(leaf);
            }
        }
        record(params.target, 1, &first, &mut locals, &mut progress);
        levels.push(first);

        for n in 2..=params.max_units {
            let mut level = Vec::new();
            for i in 1..=n / 2 {
                let pairs = levels[i - 1].iter().cartesian_product(levels[n - i - 1].iter());
                for (a, b) in pairs {
                    if !self.inventory.is_realizable(&a.leaves().union(&b.leaves())) {
                        continue;
                    }
                    for &op in &[Op::Series, Op::Parallel] {
                        let net = match Network::combine(op, a, b) {
                            Ok(net) => net,
                            Err(_) => continue,
                        };
                        if params.accepts(net.resistance()) {
                            return Ok(early(net, locals));
                        }
                        if seen.insert(net.resistance().to_bits()) {
                            level.push(net);
                        }
                    }
                }
            }
            record(params.target, n, &level, &mut locals, &mut progress);
            levels.push(level);
        }

        let best = nearest(params.target, locals.iter().map(|(_, net)| net))
            .cloned()
            .ok_or(Error::InvalidMaxUnits {
                max_units: params.max_units,
                available: self.inventory.total(),
            })?;
        Ok(SynthRes {
            target: params.target,
            best,
            locals,
            early_exit: false,
        })
    }
}

fn record(
    target: f64,
    units: usize,
    level: &[Network],
    locals: &mut Vec<(usize, Network)>,
    progress: &mut impl FnMut(usize, &Network),
) {
    if let Some(net) = nearest(target, level) {
        progress(units, net);
        locals.push((units, net.clone()));
    }
}
