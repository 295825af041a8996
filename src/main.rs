extern crate clap;
extern crate resistor_synth;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use resistor_synth::*;

#[derive(Parser)]
#[command(name = "resistor-synth")]
#[command(about = "Combine the resistors you own into a network close to a target value")]
#[command(version)]
struct Cli {
    /// Inventory file, one `value,quantity` pair per line
    #[arg(short, long, default_value = "myResistors.txt")]
    inventory: PathBuf,

    /// Use a standard series (E3, E6, E12 or E24) instead of an inventory file
    #[arg(long)]
    series: Option<String>,

    /// Units of every value in the series given with --series
    #[arg(long, default_value = "1")]
    each: usize,

    /// Desired resistance, e.g. 165, 4K7 or 1/(1/330+1/470)
    #[arg(short, long)]
    target: Option<String>,

    /// Largest number of resistors to combine
    #[arg(short, long)]
    max_units: Option<usize>,

    /// Stop once a network is within this many percent of the target
    #[arg(short = 'p', long)]
    tolerance: Option<f64>,

    /// Only print the final result
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        match e {
            Error::BadInventoryFormat { .. } => eprintln!(
                "Every line of the inventory should contain a resistor value followed by its \
                 quantity, separated by a comma, e.g. `330,2`."
            ),
            Error::InventoryNotFound(_) => eprintln!(
                "Name the file myResistors.txt and place it in the current directory, or \
                 pass its path with --inventory."
            ),
            _ => {}
        }
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let stock = match cli.series {
        Some(ref name) => {
            let series = RSeries::by_name(name).ok_or_else(|| Error::UnknownSeries(name.clone()))?;
            Inventory::from_series(series, cli.each)?
        }
        None => Inventory::load(&cli.inventory)?,
    };
    if !cli.quiet {
        println!("Inventory: {}\n", stock);
    }
    let available = stock.total();

    let target = match cli.target {
        Some(ref t) => parse_target(t)?,
        None => ask(
            "Enter your desired resistance: ",
            "(Your desired resistance must be a number and greater than zero.)",
            |s| parse_target(s).ok().filter(|t| *t > 0.0),
        )?,
    };
    let max_units = match cli.max_units {
        Some(n) => n,
        None => ask(
            "Enter the maximum number of resistors that you're willing to use/combine: ",
            &format!(
                "(The number of max resistors must be an integer between 1 and the total \
                 number of all your resistors, i.e. {} in this case.)",
                available
            ),
            |s| s.parse::<usize>().ok().filter(|n| (1..=available).contains(n)),
        )?,
    };
    let tolerance = match cli.tolerance {
        Some(p) => p,
        None => ask(
            "Finally, enter the stopping percentage (the search stops once it finds a \
             resistance within this range): ",
            "(The percentage must be a number between zero and one hundred.)",
            |s| s.parse::<f64>().ok().filter(|p| (0.0..=100.0).contains(p)),
        )?,
    };
    println!();

    let quiet = cli.quiet;
    let res = Synth::new(&stock).calc(&Params::new(target, max_units, tolerance), |units, best| {
        if !quiet {
            println!("Best combination with {} resistor(s):\n", units);
            print_net(best, target);
        }
    })?;

    println!(
        "Search complete. The closest match uses {} resistor(s):\n",
        res.best().units()
    );
    res.print_best();
    Ok(())
}

/// Prompts until `parse` accepts the answer, printing `hint` after every rejection.
fn ask<T>(prompt: &str, hint: &str, parse: impl Fn(&str) -> Option<T>) -> Result<T> {
    let stdin = io::stdin();
    loop {
        print!("{}", prompt);
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no more input").into());
        }
        match parse(line.trim()) {
            Some(v) => return Ok(v),
            None => println!("{}", hint),
        }
    }
}
