#[allow(non_snake_case)]
pub mod Chemkin;
#[allow(non_snake_case)]
pub mod Cti;
#[allow(non_snake_case)]
pub mod Utils;

use log::error;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

use Cti::writer::convert_mechanism;

const USAGE: &str = "\
chemkin2cti - convert a Chemkin-format mechanism to Cantera CTI

usage: chemkin2cti --input MECH [options]

options:
  --input, -i FILE      Chemkin mechanism file (required)
  --thermo FILE         supplementary thermo database file
  --transport FILE      supplementary transport database file
  --id NAME             phase name for the ideal_gas block (default: gas)
  --output, -o FILE     output path (default: input with .cti extension)
  --debug, -d           verbose logging
  --help, -h            show this message
";

pub fn main() {
    let mut input: Option<PathBuf> = None;
    let mut thermo: Option<PathBuf> = None;
    let mut transport: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut phase_name = "gas".to_string();
    let mut level = LevelFilter::Info;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" | "-i" => input = args.next().map(PathBuf::from),
            "--thermo" => thermo = args.next().map(PathBuf::from),
            "--transport" => transport = args.next().map(PathBuf::from),
            "--output" | "-o" => output = args.next().map(PathBuf::from),
            "--id" => {
                if let Some(name) = args.next() {
                    phase_name = name;
                }
            }
            "--debug" | "-d" => level = LevelFilter::Debug,
            "--help" | "-h" => {
                println!("{}", USAGE);
                return;
            }
            other => {
                eprintln!("unknown argument '{}'\n\n{}", other, USAGE);
                std::process::exit(2);
            }
        }
    }

    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let Some(input) = input else {
        eprintln!("no mechanism file given\n\n{}", USAGE);
        std::process::exit(2);
    };

    if let Err(e) = convert_mechanism(
        &input,
        thermo.as_deref(),
        transport.as_deref(),
        &phase_name,
        output.as_deref(),
    ) {
        error!("conversion failed: {}", e);
        std::process::exit(1);
    }
}
