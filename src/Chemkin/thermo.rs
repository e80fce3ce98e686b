//! NASA polynomial thermodynamic models and the two Chemkin thermo entry
//! parsers.
//!
//! ## Overview
//! A species' thermodynamics is a set of temperature-range polynomials
//! ([`MultiNasa`]) with 7 or 9 coefficients per range ([`NasaPoly`]). The
//! legacy Chemkin form packs exactly two 7-coefficient ranges into 4 fixed
//! column lines per species, high-temperature polynomial first; the NASA9
//! form is self-delimited with an arbitrary ordered list of ranges. Both
//! parsers also extract the elemental composition and the free-text note.
//!
//! Ranges of an assembled model are contiguous and non-overlapping, together
//! spanning `[Tmin, Tmax]` of the model.

use crate::Chemkin::errors::ChemkinError;
use crate::Chemkin::fortfloat::{fixed_field, fort_float};
use crate::Chemkin::substances::parse_composition;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single NASA polynomial valid on `[Tmin, Tmax]`, with 7 (legacy) or 9
/// coefficients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct NasaPoly {
    pub Tmin: f64,
    pub Tmax: f64,
    pub coeffs: Vec<f64>,
}

impl NasaPoly {
    pub fn new(tmin: f64, tmax: f64, coeffs: Vec<f64>) -> Self {
        Self {
            Tmin: tmin,
            Tmax: tmax,
            coeffs,
        }
    }
}

/// A composite NASA polynomial thermo model: one polynomial per temperature
/// range, ranges ordered low to high.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct MultiNasa {
    pub Tmin: f64,
    pub Tmax: f64,
    pub polynomials: Vec<NasaPoly>,
}

/// Everything one thermo entry yields for a species.
#[derive(Debug, Clone)]
pub struct ThermoEntry {
    pub species: String,
    pub thermo: MultiNasa,
    pub composition: HashMap<String, usize>,
    pub note: String,
}

fn entry_error(species: &str) -> ChemkinError {
    ChemkinError::ThermoEntry {
        species: species.to_string(),
    }
}

/// Read a legacy thermo entry (4 physical lines, two 7-coefficient NASA
/// polynomials). Line 1 carries label, note, the 4-pair composition table
/// (cols 24-43), Tmin (45-54), Tmax (55-64) and an optional Tint override
/// (65-74); `tint_default` applies when the override field is blank or
/// unparseable. The high-temperature coefficients come first on lines 2-3,
/// the low-temperature ones fill out lines 3-4.
pub fn read_thermo_entry(
    lines: &[String],
    tint_default: f64,
) -> Result<ThermoEntry, ChemkinError> {
    let first = lines.first().ok_or_else(|| entry_error("<unknown>"))?;
    let mut identifier = fixed_field(first, 0, 24).split_whitespace();
    let species = identifier
        .next()
        .ok_or_else(|| entry_error("<unknown>"))?
        .to_string();
    let note = identifier.collect::<Vec<_>>().join("");

    if lines.len() < 4 {
        return Err(entry_error(&species));
    }

    let tmin = fort_float(fixed_field(first, 45, 55)).map_err(|_| entry_error(&species))?;
    let tmax = fort_float(fixed_field(first, 55, 65)).map_err(|_| entry_error(&species))?;
    let tint = fort_float(fixed_field(first, 65, 75)).unwrap_or(tint_default);

    // the high-temperature polynomial comes first in the file
    let high_windows = [
        (1usize, 0usize, 15usize),
        (1, 15, 30),
        (1, 30, 45),
        (1, 45, 60),
        (1, 60, 75),
        (2, 0, 15),
        (2, 15, 30),
    ];
    let low_windows = [
        (2usize, 30usize, 45usize),
        (2, 45, 60),
        (2, 60, 75),
        (3, 0, 15),
        (3, 15, 30),
        (3, 30, 45),
        (3, 45, 60),
    ];
    let read_coeffs = |windows: &[(usize, usize, usize)]| -> Result<Vec<f64>, ChemkinError> {
        windows
            .iter()
            .map(|&(i, j, k)| {
                fort_float(fixed_field(&lines[i], j, k)).map_err(|_| entry_error(&species))
            })
            .collect()
    };
    let coeffs_high = read_coeffs(&high_windows)?;
    let coeffs_low = read_coeffs(&low_windows)?;

    let mut composition = parse_composition(fixed_field(first, 24, 44), 4, 5);

    // non-standard extended composition data may sit beyond column 80 of the
    // first line; duplicate symbols there override the 4-pair table
    if first.len() > 80 {
        let extension = &first[80..];
        let extra = parse_composition(extension, extension.len() / 10, 10);
        composition.extend(extra);
    }

    let thermo = MultiNasa {
        Tmin: tmin,
        Tmax: tmax,
        polynomials: vec![
            NasaPoly::new(tmin, tint, coeffs_low),
            NasaPoly::new(tint, tmax, coeffs_high),
        ],
    };

    Ok(ThermoEntry {
        species,
        thermo,
        composition,
        note,
    })
}

/// Read a 9-coefficient thermo entry in the NASA Reference Publication 1311
/// layout: a label/note line, a range-count line carrying the composition
/// table (5 pairs of width 8 from column 10), then 3 lines per range - a
/// `(Tmin, Tmax)` header and two 16-wide coefficient lines holding the 9
/// coefficients (the two unused trailing fields of the header coefficient
/// line are skipped). Global `Tmin`/`Tmax` are the min/max over all ranges.
pub fn read_nasa9_entry(lines: &[String]) -> Result<ThermoEntry, ChemkinError> {
    let first = lines.first().ok_or_else(|| entry_error("<unknown>"))?;
    let mut tokens = first.split_whitespace();
    let species = tokens
        .next()
        .ok_or_else(|| entry_error("<unknown>"))?
        .to_string();
    let mut note = tokens.collect::<Vec<_>>().join(" ");

    let second = lines.get(1).ok_or_else(|| entry_error(&species))?;
    let n_ranges = fixed_field(second, 0, 2)
        .trim()
        .parse::<usize>()
        .map_err(|_| entry_error(&species))?;
    let note2 = fixed_field(second, 3, 9).trim();
    if !note.is_empty() && !note2.is_empty() {
        note = format!("{} [{}]", note, note2);
    } else if !note2.is_empty() {
        note = note2.to_string();
    }

    let composition = parse_composition(fixed_field(second, 10, 50), 5, 8);

    let mut polynomials = Vec::with_capacity(n_ranges);
    let mut total_tmin = f64::INFINITY;
    let mut total_tmax = f64::NEG_INFINITY;
    for i in 0..n_ranges {
        let header = lines.get(2 + 3 * i).ok_or_else(|| entry_error(&species))?;
        let row_b = lines.get(3 + 3 * i).ok_or_else(|| entry_error(&species))?;
        let row_c = lines.get(4 + 3 * i).ok_or_else(|| entry_error(&species))?;

        let tmin = fort_float(fixed_field(header, 1, 11)).map_err(|_| entry_error(&species))?;
        let tmax = fort_float(fixed_field(header, 11, 21)).map_err(|_| entry_error(&species))?;

        let windows = [
            (row_b, 0usize, 16usize),
            (row_b, 16, 32),
            (row_b, 32, 48),
            (row_b, 48, 64),
            (row_b, 64, 80),
            (row_c, 0, 16),
            (row_c, 16, 32),
            (row_c, 48, 64),
            (row_c, 64, 80),
        ];
        let coeffs = windows
            .iter()
            .map(|&(line, j, k)| {
                fort_float(fixed_field(line, j, k)).map_err(|_| entry_error(&species))
            })
            .collect::<Result<Vec<f64>, _>>()?;

        total_tmin = total_tmin.min(tmin);
        total_tmax = total_tmax.max(tmax);
        polynomials.push(NasaPoly::new(tmin, tmax, coeffs));
    }

    Ok(ThermoEntry {
        species,
        thermo: MultiNasa {
            Tmin: total_tmin,
            Tmax: total_tmax,
            polynomials,
        },
        composition,
        note,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // OH entry from GRI-Mech 3.0, column-exact
    fn oh_entry() -> Vec<String> {
        vec![
            "OH                S 9/01O   1H   1    0    0G   200.000  3500.000  1000.000    1"
                .to_string(),
            " 3.09288767E+00 5.48429716E-04 1.26505228E-07-8.79461556E-11 1.17412376E-14    2"
                .to_string(),
            " 3.85865700E+03 4.47669610E+00 3.99201543E+00-2.40131752E-03 4.61793841E-06    3"
                .to_string(),
            "-3.88113333E-09 1.36411470E-12 3.61508056E+03-1.03925458E-01                   4"
                .to_string(),
        ]
    }

    #[test]
    fn test_read_thermo_entry_ranges() {
        let entry = read_thermo_entry(&oh_entry(), 1000.0).unwrap();
        assert_eq!(entry.species, "OH");
        assert_relative_eq!(entry.thermo.Tmin, 200.0);
        assert_relative_eq!(entry.thermo.Tmax, 3500.0);
        // two ranges split at the per-entry Tint, low range first
        assert_eq!(entry.thermo.polynomials.len(), 2);
        let low = &entry.thermo.polynomials[0];
        let high = &entry.thermo.polynomials[1];
        assert_relative_eq!(low.Tmin, 200.0);
        assert_relative_eq!(low.Tmax, 1000.0);
        assert_relative_eq!(high.Tmin, 1000.0);
        assert_relative_eq!(high.Tmax, 3500.0);
        assert!(entry.thermo.Tmin < low.Tmax && low.Tmax < entry.thermo.Tmax);
        // high-T coefficients came first in the file
        assert_relative_eq!(high.coeffs[0], 3.09288767);
        assert_relative_eq!(low.coeffs[0], 3.99201543);
        assert_relative_eq!(low.coeffs[6], -1.03925458e-1);
        assert_eq!(entry.composition.get("O"), Some(&1));
        assert_eq!(entry.composition.get("H"), Some(&1));
    }

    #[test]
    fn test_tint_default_applies_when_override_blank() {
        let mut lines = oh_entry();
        // blank out the Tint override field (cols 65..75)
        lines[0].replace_range(65..75, "          ");
        let entry = read_thermo_entry(&lines, 1200.0).unwrap();
        assert_relative_eq!(entry.thermo.polynomials[0].Tmax, 1200.0);
        assert_relative_eq!(entry.thermo.polynomials[1].Tmin, 1200.0);
    }

    #[test]
    fn test_short_entry_fails_with_species_context() {
        let lines = oh_entry()[..2].to_vec();
        match read_thermo_entry(&lines, 1000.0) {
            Err(ChemkinError::ThermoEntry { species }) => assert_eq!(species, "OH"),
            other => panic!("expected ThermoEntry error, got {:?}", other),
        }
    }

    #[test]
    fn test_garbled_coefficient_fails() {
        let mut lines = oh_entry();
        lines[1].replace_range(0..15, " not a number  ");
        assert!(matches!(
            read_thermo_entry(&lines, 1000.0),
            Err(ChemkinError::ThermoEntry { .. })
        ));
    }

    fn n2_nasa9_entry() -> Vec<String> {
        vec![
            "N2                Ref-Elm. Gurvich,1978 pt1 p280 pt2 p207.".to_string(),
            " 2 tpis78 N   2.00    0.00    0.00    0.00    0.00 0   28.0134000          0.000"
                .to_string(),
            "    200.000   1000.0007 -2.0   -1.0    0.0    1.0    2.0    3.0    4.0  0.0    1"
                .to_string(),
            " 2.210371497D+04-3.818461820D+02 6.082738360D+00-8.530914410D-03 1.384646189D-05"
                .to_string(),
            "-9.625793620D-09 2.519705809D-12 0.000000000D+00 7.108460860D+02-1.076003744D+01"
                .to_string(),
            "   1000.000   6000.0007 -2.0   -1.0    0.0    1.0    2.0    3.0    4.0  0.0    1"
                .to_string(),
            " 5.877124060D+05-2.239249073D+03 6.066949220D+00-6.139685500D-04 1.491806679D-07"
                .to_string(),
            "-1.923105485D-11 1.061954386D-15 0.000000000D+00 1.283210415D+04-1.586640027D+01"
                .to_string(),
        ]
    }

    #[test]
    fn test_read_nasa9_entry() {
        let entry = read_nasa9_entry(&n2_nasa9_entry()).unwrap();
        assert_eq!(entry.species, "N2");
        assert_eq!(entry.thermo.polynomials.len(), 2);
        assert_relative_eq!(entry.thermo.Tmin, 200.0);
        assert_relative_eq!(entry.thermo.Tmax, 6000.0);
        let first = &entry.thermo.polynomials[0];
        assert_eq!(first.coeffs.len(), 9);
        assert_relative_eq!(first.coeffs[0], 2.210371497e4);
        assert_relative_eq!(first.coeffs[8], -1.076003744e1);
        assert_eq!(entry.composition.get("N"), Some(&2));
        assert!(entry.note.contains("Ref-Elm."));
    }

    #[test]
    fn test_nasa9_range_count_mismatch_fails() {
        let mut lines = n2_nasa9_entry();
        lines[1].replace_range(0..2, " 3");
        assert!(matches!(
            read_nasa9_entry(&lines),
            Err(ChemkinError::ThermoEntry { species }) if species == "N2"
        ));
    }
}
