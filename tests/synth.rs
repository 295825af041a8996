extern crate resistor_synth;
extern crate tempfile;

use std::io::Write;

use resistor_synth::*;

fn search(stock: &Inventory, target: f64, max_units: usize, tolerance: f64) -> (SynthRes, Vec<usize>) {
    let mut levels = Vec::new();
    let res = Synth::new(stock)
        .calc(&Params::new(target, max_units, tolerance), |n, net| {
            assert_eq!(net.units(), n);
            levels.push(n);
        })
        .unwrap();
    (res, levels)
}

#[test]
fn loads_inventory_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "330,2\n1000,5\n150,3\n").unwrap();
    let stock = Inventory::load(file.path()).unwrap();
    assert_eq!(stock.total(), 10);
    assert_eq!(stock.distinct().collect::<Vec<_>>(), vec![330.0, 1000.0, 150.0]);
}

#[test]
fn malformed_inventory_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "330,2\n1000;5\n").unwrap();
    match Inventory::load(file.path()) {
        Err(Error::BadInventoryFormat { line: 2, ref content }) => assert_eq!(content, "1000;5"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn tie_at_first_level() {
    let stock = Inventory::new(vec![(100.0, 2), (200.0, 1)]).unwrap();
    let (res, levels) = search(&stock, 150.0, 2, 0.0);
    assert_eq!(levels, vec![1, 2]);
    assert_eq!(res.best().description(), "<1.000E+02>");
    assert_eq!(
        res.summary(res.best()),
        "This resistance = 100.00 ohms (desired = 150.00 ohms), difference = -33.333%"
    );
}

#[test]
fn halves_a_pair() {
    let stock = Inventory::new(vec![(330.0, 2)]).unwrap();
    let (res, levels) = search(&stock, 165.0, 2, 1.0);
    assert!(res.early_exit());
    assert_eq!(levels, vec![1]);
    let lines = res.best().schematic().unwrap().lines().to_vec();
    assert_eq!(
        lines,
        vec![
            "O------<3.300E+02>---",
            "    |               |",
            "    ---<3.300E+02>------O",
        ]
    );
    assert_eq!(format!("{:#}", res.best()), lines.join("\n"));
}

#[test]
fn lone_resistor() {
    let stock = Inventory::new(vec![(100.0, 1)]).unwrap();
    let (res, _) = search(&stock, 50.0, 1, 0.0);
    assert_eq!(res.best().resistance(), 100.0);
    assert_eq!(res.best().resistance() - res.target(), 50.0);
    assert_eq!(percent_diff(res.best().resistance(), res.target()), 100.0);
}

#[test]
fn standard_series_stock() {
    let stock = Inventory::from_series(&E12, 2).unwrap();
    let (res, _) = search(&stock, 1234.0, 3, 1.0);
    assert!(res.early_exit());
    assert!(within_tolerance(res.best().resistance(), 1234.0, 1.0).unwrap());
    assert!(res.best().units() <= 3);
    assert!(stock.is_realizable(&res.best().leaves()));
    assert!(res.best().schematic().is_ok());
}

#[test]
fn best_uses_owned_parts_only() {
    let stock: Inventory = "470,1\n220,2\n1000,1\n".parse().unwrap();
    for &target in &[10.0, 150.0, 690.0, 1500.0, 3000.0] {
        let (res, levels) = search(&stock, target, 4, 0.0);
        assert!(!levels.is_empty() || res.early_exit());
        let leaves = res.best().leaves();
        assert!(stock.is_realizable(&leaves));
        assert!(leaves.iter().all(|&(v, _)| stock.count(v) > 0));
        if !res.early_exit() {
            let local = nearest(target, res.locals().iter().map(|(_, n)| n)).unwrap();
            assert_eq!(local, res.best());
        }
    }
}

#[test]
fn expression_target() {
    let target = parse_target("4K7").unwrap();
    let stock = Inventory::new(vec![(4700.0, 1), (1000.0, 1)]).unwrap();
    let (res, _) = search(&stock, target, 2, 0.0);
    assert!(res.early_exit());
    assert_eq!(*res.best(), Network::leaf(4700.0));
}
