//! File loading helpers shared by the parser and the command line driver.

use crate::Chemkin::errors::ChemkinError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read a mechanism/thermo/transport file into materialized lines. A missing
/// file is reported by path before any open is attempted.
pub fn read_mech_lines(path: &Path) -> Result<Vec<String>, ChemkinError> {
    if !path.exists() {
        return Err(ChemkinError::FileNotFound(path.display().to_string()));
    }
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let lines = reader.lines().collect::<Result<Vec<String>, _>>()?;
    Ok(lines)
}
