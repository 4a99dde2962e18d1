pub mod arith;
pub mod common;
pub mod curve;
pub mod rho;
pub mod walk;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, warn};
use num_bigint::{BigUint, RandBigInt};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Deserialize;
use std::fs;

use curve::{Curve, Point};

/// Pollard's rho discrete-log solver on a twisted Edwards curve.
///
/// Draws random exponents m, builds b = a^m, recovers m again with
/// the rho walk and reports the average number of iterations over all
/// trials. Defaults are the 16-bit demo parameters.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Curve parameter d.
    #[arg(long, default_value = "154")]
    d: String,
    /// Order n of the subgroup generated by the base point.
    #[arg(long, default_value = "16339")]
    n: String,
    /// Prime modulus p.
    #[arg(long, default_value = "65519")]
    p: String,
    /// x coordinate of the base point a.
    #[arg(long, default_value = "12")]
    ax: String,
    /// y coordinate of the base point a.
    #[arg(long, default_value = "61833")]
    ay: String,
    /// Number of random discrete logarithms to solve.
    #[arg(long, default_value_t = 100)]
    trials: u32,
    /// Parameter file (TOML), overrides the individual flags.
    #[arg(short, long)]
    params: Option<String>,
}

/// Same five values as the flags, as decimal strings so parameters
/// larger than the machine word fit.
#[derive(Debug, Clone, Deserialize)]
struct ParamFile {
    d: String,
    n: String,
    p: String,
    ax: String,
    ay: String,
}

/// A trial that fails with a recoverable rho error is redrawn with a
/// fresh exponent up to this many times.
const MAX_REDRAWS: u32 = 8;

fn parse_uint(s: &str) -> Result<BigUint> {
    s.trim()
        .parse::<BigUint>()
        .with_context(|| format!("not a decimal integer: {:?}", s))
}

fn run_trials(a: &Point, curve: &Curve, n: &BigUint, trials: u32) -> Result<BigUint> {
    if trials == 0 {
        bail!("need at least one trial to average over");
    }
    let mut rng = ChaCha20Rng::from_entropy();
    let mut total = BigUint::from(0u32);

    for trial in 1..=trials {
        let mut redraws = 0;
        loop {
            // random m in [1, n]
            let m = rng.gen_biguint_below(n) + 1u32;
            debug!("trial {}: m = {}", trial, m);
            let b = curve.exp(a, &m).context("building the target point")?;

            match rho::solve(a, &b, curve, n) {
                Ok(sol) => {
                    // rho returning a wrong exponent is a logic error,
                    // not an unlucky draw.
                    if sol.m != &m % n {
                        bail!("recovered {} for actual exponent {}", sol.m, m);
                    }
                    debug!("trial {}: recovered m in {} steps", trial, sol.steps);
                    total += sol.steps;
                    break;
                }
                Err(e) => {
                    warn!("trial {}: {}, redrawing", trial, e);
                    redraws += 1;
                    if redraws > MAX_REDRAWS {
                        bail!("trial {} failed {} times in a row: {}", trial, redraws, e);
                    }
                }
            }
        }
    }
    Ok(total / trials)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (d, n, p, ax, ay) = match &args.params {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading parameter file {}", path))?;
            let file: ParamFile = toml::from_str(&raw)
                .with_context(|| format!("parsing parameter file {}", path))?;
            (file.d, file.n, file.p, file.ax, file.ay)
        }
        None => (args.d, args.n, args.p, args.ax, args.ay),
    };

    let curve = Curve::new(parse_uint(&d)?, parse_uint(&p)?);
    let n = parse_uint(&n)?;
    let a = Point {
        x: parse_uint(&ax)?,
        y: parse_uint(&ay)?,
    };

    let avg = run_trials(&a, &curve, &n, args.trials)?;
    println!(
        "average k steps over {} random discrete logarithms: {}",
        args.trials, avg
    );
    Ok(())
}

#[test]
fn test_parse_uint() {
    assert_eq!(parse_uint("65519").unwrap(), BigUint::from(65519u32));
    assert_eq!(
        parse_uint(" 18446744073709551616 ").unwrap(),
        BigUint::from(18446744073709551616u128)
    );
    assert!(parse_uint("0x12").is_err());
}

#[test]
fn test_param_file_format() {
    let raw = "d = \"154\"\nn = \"16339\"\np = \"65519\"\nax = \"12\"\nay = \"61833\"\n";
    let file: ParamFile = toml::from_str(raw).unwrap();
    assert_eq!(parse_uint(&file.p).unwrap(), BigUint::from(65519u32));
}

#[test]
fn test_run_trials_small() {
    let curve = Curve::new(BigUint::from(154u32), BigUint::from(65519u32));
    let a = Point {
        x: BigUint::from(12u32),
        y: BigUint::from(61833u32),
    };
    let n = BigUint::from(16339u32);
    let avg = run_trials(&a, &curve, &n, 5).unwrap();
    assert!(avg <= n);
}

#[test]
fn test_run_trials_rejects_zero() {
    let curve = Curve::new(BigUint::from(154u32), BigUint::from(65519u32));
    let a = Point {
        x: BigUint::from(12u32),
        y: BigUint::from(61833u32),
    };
    let n = BigUint::from(16339u32);
    assert!(run_trials(&a, &curve, &n, 0).is_err());
}
