use itertools::Itertools;

const POWERS: &[f64] = &[1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6];

lazy_static! {
    /// RSeries constant for the E3 standard series
    pub static ref E3: RSeries = RSeries::new("E3", &[1.0, 2.2, 4.7]);
    /// RSeries constant for the E6 standard series
    pub static ref E6: RSeries = RSeries::extend("E6", &E3, &[1.5, 3.3, 6.8]);
    /// RSeries constant for the E12 standard series
    pub static ref E12: RSeries = RSeries::extend("E12", &E6, &[1.2, 1.8, 2.7, 3.9, 5.6, 8.2]);
    /// RSeries constant for the E24 standard series
    pub static ref E24: RSeries = RSeries::extend(
        "E24",
        &E12,
        &[1.1, 1.3, 1.6, 2.0, 2.4, 3.0, 3.6, 4.3, 5.1, 6.2, 7.5, 9.1]
    );
}

/// A series of standard resistor values spanning 1R to 9M1.
#[derive(Debug)]
pub struct RSeries {
    name: &'static str,
    values: Box<[f64]>,
}

impl RSeries {
    fn new(name: &'static str, series: &[f64]) -> Self {
        RSeries {
            name,
            values: decades(series).collect::<Vec<f64>>().into_boxed_slice(),
        }
    }

    fn extend(name: &'static str, base: &RSeries, add: &[f64]) -> Self {
        RSeries {
            name,
            values: base
                .iter()
                .chain(decades(add))
                .collect::<Vec<f64>>()
                .into_boxed_slice(),
        }
    }

    /// Looks up one of the standard series by name, ignoring case.
    /// ```
    ///     # use resistor_synth::RSeries;
    ///     assert_eq!(RSeries::by_name("e12").unwrap().len(), 12 * 7);
    ///     assert!(RSeries::by_name("E7").is_none());
    /// ```
    pub fn by_name(name: &str) -> Option<&'static RSeries> {
        let series: [&'static RSeries; 4] = [&E3, &E6, &E12, &E24];
        series
            .iter()
            .cloned()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        self.values.iter().cloned()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn decades(base: &[f64]) -> impl Iterator<Item = f64> + '_ {
    base.iter()
        .cartesian_product(POWERS.iter())
        .map(|(val, pow)| val * pow)
}

fn _format_rval(r: f64, unit: &str) -> String {
    let mut val = format!("{}", r);
    if val.contains('.') {
        val.replace(".", unit)
    } else {
        val.push_str(unit);
        val
    }
}

/// Formats a value in ohms the way it is printed on a part list: `330R`, `4K7`, `1M`.
pub fn format_ohms(r: f64) -> String {
    if r < 1000.0 {
        _format_rval(r, "R")
    } else if r < 1_000_000.0 {
        _format_rval(r / 1000.0, "K")
    } else {
        _format_rval(r / 1_000_000.0, "M")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_nest() {
        assert_eq!(E3.len(), 21);
        assert_eq!(E24.len(), 24 * 7);
        assert!(E12.iter().all(|v| E24.iter().any(|w| w == v)));
    }

    #[test]
    fn ohms_labels() {
        assert_eq!(format_ohms(330.0), "330R");
        assert_eq!(format_ohms(4700.0), "4K7");
        assert_eq!(format_ohms(1_000_000.0), "1M");
        assert_eq!(format_ohms(2.2), "2R2");
    }
}
