//! Lennard-Jones transport property entries (TRAN/TRANSPORT sections).
//!
//! ## Main Data Structures and Logic
//! One line per species: label, geometry flag (0/1/2), well depth,
//! collision diameter, dipole moment, polarizability and rotational
//! relaxation number, all whitespace-delimited. An optional eighth-and-later
//! field run is treated as a trailing comment. Entries for species never
//! declared in a SPECIES section are logged and skipped, never created.

use crate::Chemkin::errors::ChemkinError;
use crate::Chemkin::fortfloat::fort_float;
use crate::Chemkin::substances::SpeciesRegistry;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Molecular geometry of a collider, decoded from the integer flag of a
/// transport entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Geometry {
    Atom,
    Linear,
    Nonlinear,
}

impl Geometry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Geometry::Atom => "atom",
            Geometry::Linear => "linear",
            Geometry::Nonlinear => "nonlinear",
        }
    }

    fn from_flag(flag: &str, line: &str) -> Result<Self, ChemkinError> {
        // the flag is written as a float ("1.0") in some files
        let value = fort_float(flag)? as i64;
        match value {
            0 => Ok(Geometry::Atom),
            1 => Ok(Geometry::Linear),
            2 => Ok(Geometry::Nonlinear),
            _ => Err(ChemkinError::TransportEntry(line.trim().to_string())),
        }
    }
}

/// Lennard-Jones parameters for one species.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportData {
    pub geometry: Geometry,
    /// epsilon/k_B, K
    pub well_depth: f64,
    /// sigma, Angstrom
    pub collision_diameter: f64,
    /// Debye
    pub dipole_moment: f64,
    /// Angstrom^3
    pub polarizability: f64,
    /// rotational relaxation collision number at 298 K
    pub z_rot: f64,
    pub comment: String,
}

/// Parse a buffered run of transport lines into the registry. Blank lines
/// and `!` comment lines are skipped; an END line stops the scan. A line
/// with fewer than 7 fields is an error; fields past the seventh are
/// rejoined into a comment.
pub fn parse_transport_data(
    lines: &[String],
    registry: &mut SpeciesRegistry,
) -> Result<(), ChemkinError> {
    let mut parsed = 0usize;
    for line in lines {
        let line = match line.find('!') {
            Some(pos) => &line[..pos],
            None => line.as_str(),
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.to_uppercase().starts_with("END") {
            break;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() < 7 {
            return Err(ChemkinError::TransportEntry(trimmed.to_string()));
        }
        let label = fields[0];
        let Some(id) = registry.id_of(label) else {
            warn!(
                "transport entry for undeclared species {}, skipping",
                label
            );
            continue;
        };
        let data = TransportData {
            geometry: Geometry::from_flag(fields[1], trimmed)?,
            well_depth: fort_float(fields[2])?,
            collision_diameter: fort_float(fields[3])?,
            dipole_moment: fort_float(fields[4])?,
            polarizability: fort_float(fields[5])?,
            z_rot: fort_float(fields[6])?,
            comment: fields[7..].join(" "),
        };
        registry.get_mut(id).transport = Some(data);
        parsed += 1;
    }
    info!("parsed transport data for {} species", parsed);
    Ok(())
}
