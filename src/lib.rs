//! A resistor network synthesiser for circuit design.
//!
//! When provided with the resistors you actually own and a target value, it combines them
//! in series and in parallel, one resistor at a time, until it finds a network within the
//! requested tolerance of the target, or until the resistor budget runs out. No physical
//! resistor is ever used twice.
//!
//! # Example
//! With two 330R resistors, a 165R resistance can be made by wiring them in parallel:
//! ```rust
//! extern crate resistor_synth;
//!
//! use resistor_synth::*;
//!
//! fn main() {
//!     let stock: Inventory = "330,2\n1000,1\n".parse().unwrap();
//!
//!     let res = Synth::new(&stock)
//!         .calc(&Params::new(165.0, 3, 0.5), |units, best| {
//!             println!("Best with {} resistor(s): {}", units, best);
//!         })
//!         .expect("Error: invalid search parameters");
//!
//!     res.print_best();
//! }
//! ```
//! Running this example produces the results:
//! ```text
//! Best with 1 resistor(s): <3.300E+02>
//! O------<3.300E+02>---
//!     |               |
//!     ---<3.300E+02>------O
//! This resistance = 165.00 ohms (desired = 165.00 ohms), difference = 0.000%
//!```

extern crate itertools;
#[macro_use]
extern crate lazy_static;
extern crate thiserror;

mod error;
mod expr;
mod inventory;
mod network;
mod schematic;
mod series;
mod synth;

pub use error::{Error, Result};
pub use expr::{parse_ohms, parse_target};
pub use inventory::Inventory;
pub use network::{Composite, LeafCounts, Network, Op};
pub use schematic::Schematic;
pub use series::{format_ohms, RSeries, E12, E24, E3, E6};
pub use synth::{nearest, percent_diff, print_net, summary, within_tolerance, Params, Synth, SynthRes};
