use std::f64::consts::PI;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{
    error,
    info
};
use tracing_subscriber::EnvFilter;

use tabfunc::configuration::Configuration;
use tabfunc::function::basic::exp::Exp;
use tabfunc::function::basic::log::Log;
use tabfunc::function::basic::trigonometricfunction::{
    Cos,
    Sin
};
use tabfunc::function::function::Function;
use tabfunc::function::functionerror::FunctionError;
use tabfunc::function::functions::{
    composition,
    power,
    sum
};
use tabfunc::tabulated::arraytabulatedfunction::ArrayTabulatedFunction;
use tabfunc::tabulated::io::binaryformat::{
    read_binary_file,
    write_binary_file
};
use tabfunc::tabulated::io::genericformat::{
    read_generic_file,
    write_generic_file
};
use tabfunc::tabulated::io::textformat::{
    read_text_file,
    write_text_file
};
use tabfunc::tabulated::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use tabfunc::tabulated::tabulatedfunction::TabulatedFunction;
use tabfunc::tabulated::tabulatedfunctions::tabulate;

const MATCH_TOLERANCE: f64 = 1e-10;

/// Tabulated function demonstration: sampling, algebra and persistence.
#[derive(Parser)]
#[command(name = "tabfunc", version)]
struct Cli {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving the written tables (overrides the configuration)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => match Configuration::from_reader(path) {
            Ok(config) => config,
            Err(error) => {
                error!(path = %path.display(), %error, "failed to load configuration");
                return ExitCode::FAILURE;
            }
        },
        None => Configuration::new()
    };
    if let Some(output_dir) = cli.output_dir {
        config.set_output_dir(output_dir);
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "demonstration failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Configuration) -> Result<(), FunctionError> {
    fs::create_dir_all(config.output_dir())?;
    info!(output_dir = %config.output_dir().display(), "running demonstration");

    let samples = sample_points(0.0, PI, config.sample_step());

    println!("1. Sin and Cos on [0, pi]");
    for &x in &samples {
        println!("x={:.1}: sin={:.6}, cos={:.6}", x, Sin.evaluate(x), Cos.evaluate(x));
    }

    let first_count = config.sample_counts()[0];
    println!("\n2. Tabulated Sin and Cos ({} points)", first_count);
    let tabulated_sin: ArrayTabulatedFunction = tabulate(&Sin, 0.0, PI, first_count)?;
    let tabulated_cos: ArrayTabulatedFunction = tabulate(&Cos, 0.0, PI, first_count)?;
    for &x in &samples {
        let (sin, tab_sin) = (Sin.evaluate(x), tabulated_sin.evaluate(x));
        let (cos, tab_cos) = (Cos.evaluate(x), tabulated_cos.evaluate(x));
        println!("x={:.1}: sin={:.6} (tab={:.6}, err={:.6}) | cos={:.6} (tab={:.6}, err={:.6})",
                 x, sin, tab_sin, (sin - tab_sin).abs(), cos, tab_cos, (cos - tab_cos).abs());
    }
    println!("sin points: {}", tabulated_sin);
    println!("cos points: {}", tabulated_cos);

    println!("\n3. sin^2 + cos^2 of the tabulated functions");
    let identity = sum(power(&tabulated_sin, 2), power(&tabulated_cos, 2));
    for &x in &samples {
        println!("x={:.1}: {:.8}", x, identity.evaluate(x));
    }
    for &count in config.sample_counts() {
        let sin: ArrayTabulatedFunction = tabulate(&Sin, 0.0, PI, count)?;
        let cos: LinkedListTabulatedFunction = tabulate(&Cos, 0.0, PI, count)?;
        let identity = sum(power(&sin, 2), power(&cos, 2));
        let max_error = samples
            .iter()
            .map(|&x| (identity.evaluate(x) - 1.0).abs())
            .fold(0.0, f64::max);
        println!("points: {}, max deviation from 1: {:.8}", count, max_error);
    }

    println!("\n4. Exp through the text format");
    let tabulated_exp: ArrayTabulatedFunction = tabulate(&Exp, 0.0, 10.0, 11)?;
    let exp_path = config.output_dir().join("exp_function.txt");
    write_text_file(&tabulated_exp, &exp_path)?;
    let read_exp: LinkedListTabulatedFunction = read_text_file(&exp_path)?;
    compare_points(&tabulated_exp, &read_exp)?;

    println!("\n5. Log through the binary format");
    let log = Log::new(config.log_base())?;
    let tabulated_log: LinkedListTabulatedFunction = tabulate(&log, 0.1, 10.0, 11)?;
    let log_path = config.output_dir().join("log_function.bin");
    write_binary_file(&tabulated_log, &log_path)?;
    let read_log: ArrayTabulatedFunction = read_binary_file(&log_path)?;
    compare_points(&tabulated_log, &read_log)?;

    println!("\n6. ln(exp(x)) = x, generic encoding versus binary encoding");
    let identity = composition(Log::natural(), Exp);
    let mut linked = LinkedListTabulatedFunction::with_count(0.0, 10.0, 11)?;
    let mut array = ArrayTabulatedFunction::with_count(0.0, 10.0, 11)?;
    for i in 0..linked.point_count() {
        linked.set_point_y(i, identity.evaluate(linked.point_x(i)?))?;
        array.set_point_y(i, identity.evaluate(array.point_x(i)?))?;
    }

    let generic_path = config.output_dir().join("linked_list.json");
    write_generic_file(&linked, &generic_path)?;
    let restored_linked: LinkedListTabulatedFunction = read_generic_file(&generic_path)?;

    let binary_path = config.output_dir().join("array.bin");
    write_binary_file(&array, &binary_path)?;
    let restored_array: ArrayTabulatedFunction = read_binary_file(&binary_path)?;

    for i in 0..=10 {
        let x = i as f64;
        println!("x={:.1}: linked={:.6} (restored {:.6}) | array={:.6} (restored {:.6})",
                 x,
                 linked.evaluate(x),
                 restored_linked.evaluate(x),
                 array.evaluate(x),
                 restored_array.evaluate(x));
    }

    let generic_size = fs::metadata(&generic_path)?.len();
    let binary_size = fs::metadata(&binary_path)?.len();
    println!("generic encoding (linked list): {} bytes", generic_size);
    println!("binary encoding (array): {} bytes", binary_size);
    info!(generic_size, binary_size, "encoded sizes compared");
    Ok(())
}

/// `left, left + step, ...` 直到 `right`（含），以乘法產生避免累積誤差。
fn sample_points(left: f64, right: f64, step: f64) -> Vec<f64> {
    (0..)
        .map(|i| left + i as f64 * step)
        .take_while(|&x| x <= right + MATCH_TOLERANCE)
        .collect()
}

fn compare_points<F, G>(original: &F, restored: &G) -> Result<(), FunctionError>
    where F: TabulatedFunction,
          G: TabulatedFunction {
    for i in 0..original.point_count() {
        let expected = original.point(i)?;
        let actual = restored.point(i)?;
        let matches = (expected.x() - actual.x()).abs() < MATCH_TOLERANCE
            && (expected.y() - actual.y()).abs() < MATCH_TOLERANCE;
        println!("x={:.1}: original={:.6}, restored={:.6}, match={}",
                 expected.x(), expected.y(), actual.y(), matches);
    }
    Ok(())
}
