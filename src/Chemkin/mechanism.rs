//! Section scanner and mechanism assembler.
//!
//! ## Overview
//! The scanner walks materialized file lines with a cursor, strips `!`
//! comments, recognizes the five Chemkin sections (ELEMENTS, SPECIES,
//! THERMO/THERMO ALL/THERMO NASA9, REACTIONS, TRAN/TRANSPORT) by their first
//! token and hands each section body to its reader. Everything accumulates in
//! a [`MechanismParser`], so a base mechanism plus any number of
//! supplementary thermo/transport files can be layered through the same
//! parser before [`MechanismParser::finish`] validates duplicates, assigns
//! 1-based reaction indices and freezes the result into a [`Mechanism`].
//!
//! ## Main Data Structures and Logic
//! - `MechanismParser`: the accumulator; `parse_file`/`parse_text` may be
//!   called repeatedly, later THERMO/TRAN data enriching earlier species
//! - `Mechanism`: the assembled, validated result
//! - legacy THERMO entries are grouped by the '1'..'4' markers in column 80,
//!   NASA9 entries by their self-declared range count
//! - REACTIONS bodies are grouped into records at each `=`-bearing line;
//!   comment runs are re-aligned to the record they describe (both the
//!   comment-precedes and comment-follows conventions are recognized)

use crate::Chemkin::errors::ChemkinError;
use crate::Chemkin::fortfloat::{fixed_field, fort_float};
use crate::Chemkin::reactions::{read_kinetics_entry, Reaction};
use crate::Chemkin::substances::{capitalize_symbol, SpeciesRegistry};
use crate::Chemkin::thermo::{read_nasa9_entry, read_thermo_entry, ThermoEntry};
use crate::Chemkin::transport::parse_transport_data;
use crate::Chemkin::units::ReactionUnits;
use crate::Utils::load_from_file::read_mech_lines;
use log::{info, warn};
use prettytable::{row, Table};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fallback midpoint temperature for legacy thermo entries whose section
/// header carries no temperature range line, K.
const TINT_FALLBACK: f64 = 1000.0;

/// Split a line at its `!` comment marker; returns (content, comment text).
pub fn strip_comment(line: &str) -> (&str, &str) {
    match line.find('!') {
        Some(pos) => (&line[..pos], &line[pos + 1..]),
        None => (line, ""),
    }
}

fn first_token_is_end(content: &str) -> bool {
    content
        .split_whitespace()
        .next()
        .map(|t| t.eq_ignore_ascii_case("END"))
        .unwrap_or(false)
}

/// Incremental mechanism assembler. Feed it one or more files, then call
/// [`finish`](MechanismParser::finish).
#[derive(Debug, Default)]
pub struct MechanismParser {
    elements: Vec<String>,
    registry: SpeciesRegistry,
    reactions: Vec<Reaction>,
    units: ReactionUnits,
}

impl MechanismParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ChemkinError> {
        let path = path.as_ref();
        info!("reading mechanism file {}", path.display());
        let lines = read_mech_lines(path)?;
        self.parse_lines(&lines)
    }

    pub fn parse_text(&mut self, text: &str) -> Result<(), ChemkinError> {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        self.parse_lines(&lines)
    }

    pub fn parse_lines(&mut self, lines: &[String]) -> Result<(), ChemkinError> {
        let mut transport_lines: Vec<String> = Vec::new();
        let mut i = 0;
        while i < lines.len() {
            let (content, _) = strip_comment(&lines[i]);
            let mut tokens = content.split_whitespace();
            let Some(keyword) = tokens.next() else {
                i += 1;
                continue;
            };
            let rest: Vec<&str> = tokens.collect();
            let upper = keyword.to_uppercase();
            if upper.starts_with("ELEM") {
                i = self.scan_elements(lines, i, &rest);
            } else if upper.starts_with("SPEC") {
                i = self.scan_species(lines, i, &rest);
            } else if upper.starts_with("THER") {
                let nasa9 = rest
                    .first()
                    .map(|t| t.eq_ignore_ascii_case("NASA9"))
                    .unwrap_or(false);
                i = if nasa9 {
                    self.scan_thermo_nasa9(lines, i)?
                } else {
                    self.scan_thermo_legacy(lines, i)?
                };
            } else if upper.starts_with("REAC") {
                i = self.scan_reactions(lines, i, &rest)?;
            } else if upper.starts_with("TRAN") {
                i = scan_transport_lines(lines, i, &mut transport_lines);
            } else {
                i += 1;
            }
        }
        if !transport_lines.is_empty() {
            parse_transport_data(&transport_lines, &mut self.registry)?;
        }
        Ok(())
    }

    fn scan_elements(&mut self, lines: &[String], start: usize, header_rest: &[&str]) -> usize {
        for token in header_rest {
            if token.eq_ignore_ascii_case("END") {
                return start + 1;
            }
            self.elements.push(capitalize_symbol(token));
        }
        let mut j = start + 1;
        while j < lines.len() {
            let (content, _) = strip_comment(&lines[j]);
            j += 1;
            for token in content.split_whitespace() {
                if token.eq_ignore_ascii_case("END") {
                    return j;
                }
                self.elements.push(capitalize_symbol(token));
            }
        }
        j
    }

    fn scan_species(&mut self, lines: &[String], start: usize, header_rest: &[&str]) -> usize {
        for token in header_rest {
            if token.eq_ignore_ascii_case("END") {
                return start + 1;
            }
            self.registry.declare(token);
        }
        let mut j = start + 1;
        while j < lines.len() {
            let (content, _) = strip_comment(&lines[j]);
            j += 1;
            for token in content.split_whitespace() {
                if token.eq_ignore_ascii_case("END") {
                    return j;
                }
                self.registry.declare(token);
            }
        }
        j
    }

    fn apply_thermo_entry(&mut self, entry: ThermoEntry) {
        match self.registry.id_of(&entry.species) {
            Some(id) => {
                let species = self.registry.get_mut(id);
                species.thermo = Some(entry.thermo);
                species.composition = entry.composition;
                if !entry.note.is_empty() {
                    species.note = Some(entry.note);
                }
            }
            None => {
                info!(
                    "skipping thermo entry for undeclared species {}",
                    entry.species
                );
            }
        }
    }

    /// Legacy THERMO/THERMO ALL body: a temperature range line (its middle
    /// value is the default midpoint) followed by 4-line entries carried by
    /// the '1'..'4' markers in column 80.
    fn scan_thermo_legacy(
        &mut self,
        lines: &[String],
        start: usize,
    ) -> Result<usize, ChemkinError> {
        let mut j = start + 1;
        let mut tint_default = TINT_FALLBACK;
        while j < lines.len() {
            let (content, _) = strip_comment(&lines[j]);
            if content.trim().is_empty() {
                j += 1;
                continue;
            }
            let tokens: Vec<&str> = content.split_whitespace().collect();
            if tokens.len() == 3 && tokens.iter().all(|t| fort_float(t).is_ok()) {
                tint_default = fort_float(tokens[1])?;
                j += 1;
            } else {
                warn!(
                    "THERMO section carries no temperature range line, \
                     defaulting the polynomial midpoint to {} K",
                    tint_default
                );
            }
            break;
        }

        let mut entry: Vec<String> = Vec::new();
        while j < lines.len() {
            let raw = &lines[j];
            let (content, _) = strip_comment(raw);
            if first_token_is_end(content) {
                j += 1;
                break;
            }
            // the marker check and slicing see the comment-stripped line, so
            // an inline comment cannot bleed into the extended-composition
            // columns past 80
            let bytes = content.as_bytes();
            if bytes.len() >= 80 && (b'1'..=b'4').contains(&bytes[79]) {
                entry.push(content.to_string());
                if bytes[79] == b'4' {
                    let parsed = read_thermo_entry(&entry, tint_default)?;
                    self.apply_thermo_entry(parsed);
                    entry.clear();
                }
            }
            j += 1;
        }
        if !entry.is_empty() {
            warn!("ignoring incomplete thermo entry at the end of a THERMO section");
        }
        Ok(j)
    }

    /// THERMO NASA9 body: entries are self-delimited, 2 header lines plus 3
    /// lines per temperature range. A stray leading temperature range line
    /// before the first entry is tolerated and dropped.
    fn scan_thermo_nasa9(
        &mut self,
        lines: &[String],
        start: usize,
    ) -> Result<usize, ChemkinError> {
        let mut j = start + 1;
        let mut entry: Vec<String> = Vec::new();
        let mut entry_length: Option<usize> = None;
        while j < lines.len() {
            let raw = &lines[j];
            let (content, _) = strip_comment(raw);
            if content.trim().is_empty() {
                j += 1;
                continue;
            }
            if first_token_is_end(content) {
                j += 1;
                break;
            }
            entry.push(raw.clone());
            if entry.len() == 2 {
                match fixed_field(&entry[1], 0, 2).trim().parse::<usize>() {
                    Ok(n_ranges) => entry_length = Some(2 + 3 * n_ranges),
                    Err(_) => {
                        entry.remove(0);
                    }
                }
            }
            if entry_length == Some(entry.len()) {
                let parsed = read_nasa9_entry(&entry)?;
                self.apply_thermo_entry(parsed);
                entry.clear();
                entry_length = None;
            }
            j += 1;
        }
        if !entry.is_empty() {
            warn!("ignoring incomplete thermo entry at the end of a THERMO NASA9 section");
        }
        Ok(j)
    }

    /// REACTIONS body: resolve the header units, group lines into records at
    /// each `=`-bearing non-comment line, re-align the comment runs, then
    /// read every record.
    fn scan_reactions(
        &mut self,
        lines: &[String],
        start: usize,
        header_rest: &[&str],
    ) -> Result<usize, ChemkinError> {
        self.units = ReactionUnits::from_header_tokens(header_rest)?;

        let mut kinetics_list: Vec<String> = Vec::new();
        let mut comments_list: Vec<String> = Vec::new();
        let mut kinetics = String::new();
        let mut comments = String::new();
        let mut j = start + 1;
        while j < lines.len() {
            let raw = &lines[j];
            let is_comment_line = raw.trim_start().starts_with('!');
            let (content, comment) = strip_comment(raw);
            if first_token_is_end(content) {
                j += 1;
                break;
            }
            if content.contains('=') && !is_comment_line {
                kinetics_list.push(std::mem::take(&mut kinetics));
                comments_list.push(std::mem::take(&mut comments));
            }
            if !content.trim().is_empty() {
                kinetics.push_str(content.trim());
                kinetics.push('\n');
            }
            if !comment.trim().is_empty() {
                comments.push_str(comment.trim());
                comments.push('\n');
            }
            j += 1;
        }
        kinetics_list.push(kinetics);
        comments_list.push(comments);

        // the accumulator pushed before the first reaction is always empty;
        // where the trailing comment slot is also empty the comments precede
        // their reaction, otherwise they follow it
        if kinetics_list.first().map(String::is_empty).unwrap_or(false) {
            kinetics_list.remove(0);
            if comments_list.last().map(String::is_empty).unwrap_or(false) {
                comments_list.pop();
            } else {
                comments_list.remove(0);
            }
        }

        for (record, comment) in kinetics_list.iter().zip(comments_list.iter()) {
            if record.trim().is_empty() {
                continue;
            }
            let (reaction, reverse) =
                read_kinetics_entry(record, &self.registry, &self.units, comment)?;
            self.reactions.push(reaction);
            if let Some(rev) = reverse {
                self.reactions.push(rev);
            }
        }
        Ok(j)
    }

    /// Validate duplicates, assign 1-based indices and freeze the result.
    /// Reactions with identical participant multisets must either both carry
    /// the DUP flag or differ in pressure dependence.
    pub fn finish(mut self) -> Result<Mechanism, ChemkinError> {
        for a in 0..self.reactions.len() {
            for b in (a + 1)..self.reactions.len() {
                let (r1, r2) = (&self.reactions[a], &self.reactions[b]);
                if !r1.same_participants(r2) {
                    continue;
                }
                if r1.duplicate && r2.duplicate {
                    continue;
                }
                if r1.kinetics.is_pressure_dependent() != r2.kinetics.is_pressure_dependent() {
                    continue;
                }
                return Err(ChemkinError::UnmarkedDuplicateReaction(
                    r1.equation(&self.registry),
                ));
            }
        }
        for (i, reaction) in self.reactions.iter_mut().enumerate() {
            reaction.index = i + 1;
        }
        info!(
            "assembled mechanism: {} elements, {} species, {} reactions",
            self.elements.len(),
            self.registry.len(),
            self.reactions.len()
        );
        Ok(Mechanism {
            elements: self.elements,
            species: self.registry,
            reactions: self.reactions,
            units: self.units,
        })
    }
}

fn scan_transport_lines(lines: &[String], start: usize, out: &mut Vec<String>) -> usize {
    let mut j = start + 1;
    while j < lines.len() {
        let raw = &lines[j];
        let (content, _) = strip_comment(raw);
        let is_end = first_token_is_end(content);
        out.push(raw.clone());
        j += 1;
        if is_end {
            break;
        }
    }
    j
}

/// An assembled reaction mechanism: element list, species arena, indexed
/// reactions and the units of the last REACTIONS block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mechanism {
    pub elements: Vec<String>,
    pub species: SpeciesRegistry,
    pub reactions: Vec<Reaction>,
    pub units: ReactionUnits,
}

impl Mechanism {
    /// Check that every species is fully defined before serialization:
    /// thermo data present, every composition element declared.
    pub fn validate_for_output(&self) -> Result<(), ChemkinError> {
        for species in self.species.iter() {
            if species.thermo.is_none() {
                return Err(ChemkinError::MissingThermoData(species.label.clone()));
            }
        }
        let mut undefined: Vec<String> = Vec::new();
        for species in self.species.iter() {
            for element in species.composition.keys() {
                if !self.elements.contains(element) && !undefined.contains(element) {
                    undefined.push(element.clone());
                }
            }
        }
        if !undefined.is_empty() {
            undefined.sort();
            return Err(ChemkinError::UndefinedElements(undefined));
        }
        Ok(())
    }

    pub fn reaction_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["#", "reaction", "model", "flags"]);
        for reaction in &self.reactions {
            let mut flags = Vec::new();
            if reaction.duplicate {
                flags.push("DUP");
            }
            if !reaction.fwd_orders.is_empty() {
                flags.push("FORD");
            }
            table.add_row(row![
                reaction.index,
                reaction.equation(&self.species),
                reaction.kinetics.variant_name(),
                flags.join(" ")
            ]);
        }
        table
    }

    pub fn pretty_print_reactions(&self) {
        self.reaction_table().printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Chemkin::kinetics::KineticsModel;
    use crate::Chemkin::transport::Geometry;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // column-exact OH entry from GRI-Mech 3.0
    const OH_THERMO: &str = "\
OH                S 9/01O   1H   1    0    0G   200.000  3500.000  1000.000    1
 3.09288767E+00 5.48429716E-04 1.26505228E-07-8.79461556E-11 1.17412376E-14    2
 3.85865700E+03 4.47669610E+00 3.99201543E+00-2.40131752E-03 4.61793841E-06    3
-3.88113333E-09 1.36411470E-12 3.61508056E+03-1.03925458E-01                   4
";

    fn small_mechanism() -> String {
        format!(
            "! hydrogen oxidation fragment\n\
             ELEMENTS H O AR END\n\
             SPECIES\n\
             H2 O2 OH H2O H O AR\n\
             END\n\
             THERMO\n\
             \u{20}  200.000  1000.000  3500.000\n\
             {OH_THERMO}\
             END\n\
             REACTIONS KCAL/MOLE\n\
             H2+O2=2OH       1.7E13 0.0 47.78\n\
             H+O2=OH+O       1.987E14 0.0 16.44\n\
             END\n\
             TRAN\n\
             AR   0   136.500     3.330     0.000     0.000     0.000\n\
             END\n"
        )
    }

    #[test]
    fn test_full_scan() {
        let mut parser = MechanismParser::new();
        parser.parse_text(&small_mechanism()).unwrap();
        let mech = parser.finish().unwrap();
        assert_eq!(mech.elements, vec!["H", "O", "Ar"]);
        assert_eq!(mech.species.len(), 7);
        assert_eq!(mech.reactions.len(), 2);
        assert_eq!(mech.units.energy, "kcal/mol");
        // indices are 1-based and ordered
        assert_eq!(mech.reactions[0].index, 1);
        assert_eq!(mech.reactions[1].index, 2);
        // thermo landed on OH
        let oh = mech.species.get(mech.species.id_of("OH").unwrap());
        let thermo = oh.thermo.as_ref().unwrap();
        assert_relative_eq!(thermo.Tmin, 200.0);
        assert_relative_eq!(thermo.Tmax, 3500.0);
        assert_eq!(oh.composition.get("O"), Some(&1));
        // transport landed on AR
        let ar = mech.species.get(mech.species.id_of("AR").unwrap());
        assert_eq!(ar.transport.as_ref().unwrap().geometry, Geometry::Atom);
    }

    #[test]
    fn test_parse_file_roundtrip() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", small_mechanism()).unwrap();
        let mut parser = MechanismParser::new();
        parser.parse_file(file.path()).unwrap();
        let mech = parser.finish().unwrap();
        assert_eq!(mech.reactions.len(), 2);
    }

    #[test]
    fn test_supplementary_thermo_file_enriches_species() {
        let mut parser = MechanismParser::new();
        parser
            .parse_text(
                "ELEMENTS H O END\nSPECIES H2 O2 OH END\n\
                 REACTIONS\nH2+O2=2OH 1.0E14 0.0 40000.0\nEND\n",
            )
            .unwrap();
        // a standalone thermo database file, layered afterwards
        let thermo = format!(
            "THERMO ALL\n   200.000  1000.000  3500.000\n{OH_THERMO}END\n"
        );
        parser.parse_text(&thermo).unwrap();
        let mech = parser.finish().unwrap();
        let oh = mech.species.get(mech.species.id_of("OH").unwrap());
        assert!(oh.thermo.is_some());
    }

    #[test]
    fn test_thermo_for_undeclared_species_skipped() {
        let mut parser = MechanismParser::new();
        parser.parse_text("SPECIES H2 END\n").unwrap();
        let thermo = format!(
            "THERMO\n   200.000  1000.000  3500.000\n{OH_THERMO}END\n"
        );
        parser.parse_text(&thermo).unwrap();
        let mech = parser.finish().unwrap();
        // OH was never declared, so no species was created for it
        assert_eq!(mech.species.len(), 1);
    }

    #[test]
    fn test_missing_temperature_range_line_warns_and_defaults() {
        let mut parser = MechanismParser::new();
        parser.parse_text("SPECIES OH END\n").unwrap();
        // no range line between THERMO and the first entry
        let thermo = format!("THERMO\n{OH_THERMO}END\n");
        parser.parse_text(&thermo).unwrap();
        let mech = parser.finish().unwrap();
        let oh = mech.species.get(0).thermo.as_ref().unwrap();
        // the per-entry Tint override still applies
        assert_relative_eq!(oh.polynomials[0].Tmax, 1000.0);
    }

    #[test]
    fn test_inline_comment_on_thermo_entry_line_stripped() {
        let mut parser = MechanismParser::new();
        parser.parse_text("SPECIES OH END\n").unwrap();
        let mut entry_lines: Vec<String> = OH_THERMO.lines().map(str::to_string).collect();
        // a trailing comment past column 80 must not be read as an
        // extended-composition slot
        entry_lines[0].push_str("!C   2");
        let thermo = format!(
            "THERMO\n   200.000  1000.000  3500.000\n{}\nEND\n",
            entry_lines.join("\n")
        );
        parser.parse_text(&thermo).unwrap();
        let mech = parser.finish().unwrap();
        let oh = mech.species.get(0);
        assert!(oh.thermo.is_some());
        assert_eq!(oh.composition.len(), 2);
        assert_eq!(oh.composition.get("O"), Some(&1));
        assert_eq!(oh.composition.get("H"), Some(&1));
    }

    // NASA9 N2 entry, Gurvich reference data
    const N2_NASA9: &str = "\
N2                Ref-Elm. Gurvich,1978 pt1 p280 pt2 p207.
 2 tpis78 N   2.00    0.00    0.00    0.00    0.00 0   28.0134000          0.000
    200.000   1000.0007 -2.0   -1.0    0.0    1.0    2.0    3.0    4.0  0.0    1
 2.210371497D+04-3.818461820D+02 6.082738360D+00-8.530914410D-03 1.384646189D-05
-9.625793620D-09 2.519705809D-12 0.000000000D+00 7.108460860D+02-1.076003744D+01
   1000.000   6000.0007 -2.0   -1.0    0.0    1.0    2.0    3.0    4.0  0.0    1
 5.877124060D+05-2.239249073D+03 6.066949220D+00-6.139685500D-04 1.491806679D-07
-1.923105485D-11 1.061954386D-15 0.000000000D+00 1.283210415D+04-1.586640027D+01
";

    #[test]
    fn test_nasa9_section_with_stray_leading_range_line() {
        let mut parser = MechanismParser::new();
        parser.parse_text("SPECIES N2 END\n").unwrap();
        // a redundant global temperature range line before the first entry
        // is dropped, not parsed as a label line
        let thermo = format!("THERMO NASA9\n    200.000   6000.000\n{N2_NASA9}END\n");
        parser.parse_text(&thermo).unwrap();
        let mech = parser.finish().unwrap();
        let n2 = mech.species.get(0);
        let thermo = n2.thermo.as_ref().unwrap();
        assert_eq!(thermo.polynomials.len(), 2);
        assert_relative_eq!(thermo.Tmin, 200.0);
        assert_relative_eq!(thermo.Tmax, 6000.0);
        assert_eq!(thermo.polynomials[0].coeffs.len(), 9);
        assert_eq!(n2.composition.get("N"), Some(&2));
    }

    #[test]
    fn test_lowercase_unit_token_rejected() {
        let mut parser = MechanismParser::new();
        let err = parser
            .parse_text(
                "SPECIES H2 O2 OH END\nREACTIONS kcal/mole\n\
                 H2+O2=2OH 1.0E14 0.0 40000.0\nEND\n",
            )
            .unwrap_err();
        // unit tokens are case-sensitive, unlike section keywords
        assert!(matches!(err, ChemkinError::UnknownUnit(token) if token == "kcal/mole"));
    }

    #[test]
    fn test_comments_preceding_reactions_attach() {
        let mut parser = MechanismParser::new();
        parser
            .parse_text(
                "SPECIES H2 O2 OH H O END\nREACTIONS\n\
                 ! chain initiation\n\
                 H2+O2=2OH 1.0E14 0.0 40000.0\n\
                 ! chain branching\n\
                 H+O2=OH+O 2.0E14 0.0 16800.0\n\
                 END\n",
            )
            .unwrap();
        let mech = parser.finish().unwrap();
        match &mech.reactions[0].kinetics {
            KineticsModel::Arrhenius(arrh) => {
                assert_eq!(arrh.range.comment, "chain initiation")
            }
            other => panic!("expected Arrhenius, got {}", other.variant_name()),
        }
    }

    #[test]
    fn test_comments_following_reactions_attach() {
        let mut parser = MechanismParser::new();
        parser
            .parse_text(
                "SPECIES H2 O2 OH H O END\nREACTIONS\n\
                 H2+O2=2OH 1.0E14 0.0 40000.0\n\
                 ! chain initiation\n\
                 H+O2=OH+O 2.0E14 0.0 16800.0\n\
                 ! chain branching\n\
                 END\n",
            )
            .unwrap();
        let mech = parser.finish().unwrap();
        match &mech.reactions[0].kinetics {
            KineticsModel::Arrhenius(arrh) => {
                assert_eq!(arrh.range.comment, "chain initiation")
            }
            other => panic!("expected Arrhenius, got {}", other.variant_name()),
        }
    }

    #[test]
    fn test_unmarked_duplicate_rejected() {
        let mut parser = MechanismParser::new();
        parser
            .parse_text(
                "SPECIES H2 O2 OH END\nREACTIONS\n\
                 H2+O2=2OH 1.0E14 0.0 40000.0\n\
                 O2+H2=2OH 3.0E13 0.0 41000.0\n\
                 END\n",
            )
            .unwrap();
        assert!(matches!(
            parser.finish(),
            Err(ChemkinError::UnmarkedDuplicateReaction(_))
        ));
    }

    #[test]
    fn test_marked_duplicates_accepted() {
        let mut parser = MechanismParser::new();
        parser
            .parse_text(
                "SPECIES H2 O2 OH END\nREACTIONS\n\
                 H2+O2=2OH 1.0E14 0.0 40000.0\nDUP\n\
                 O2+H2=2OH 3.0E13 0.0 41000.0\nDUPLICATE\n\
                 END\n",
            )
            .unwrap();
        let mech = parser.finish().unwrap();
        assert_eq!(mech.reactions.len(), 2);
        assert!(mech.reactions.iter().all(|r| r.duplicate));
    }

    #[test]
    fn test_pressure_dependence_distinguishes_duplicates() {
        // same participants, but one reaction is a falloff form: legal
        // without DUP flags
        let mut parser = MechanismParser::new();
        parser
            .parse_text(
                "SPECIES H2 O2 OH END\nREACTIONS\n\
                 H2+O2=2OH 1.0E14 0.0 40000.0\n\
                 H2+O2(+M)=2OH(+M) 1.0E14 0.0 40000.0\nLOW/1.0E18 0.0 0.0/\n\
                 END\n",
            )
            .unwrap();
        let mech = parser.finish().unwrap();
        assert_eq!(mech.reactions.len(), 2);
    }

    #[test]
    fn test_rev_reverse_reaction_indexed_after_parent() {
        let mut parser = MechanismParser::new();
        parser
            .parse_text(
                "SPECIES H2 O2 OH H O END\nREACTIONS\n\
                 H2+O2=2OH 1.0E14 0.0 40000.0\nREV/5.0E11 0.4 29000.0/\n\
                 H+O2=OH+O 2.0E14 0.0 16800.0\n\
                 END\n",
            )
            .unwrap();
        let mech = parser.finish().unwrap();
        assert_eq!(mech.reactions.len(), 3);
        // the synthesized reverse reaction directly follows its parent
        assert_eq!(mech.reactions[1].equation(&mech.species), "2 OH => H2 + O2");
        assert_eq!(mech.reactions[1].index, 2);
    }

    #[test]
    fn test_validate_for_output() {
        let mut parser = MechanismParser::new();
        parser.parse_text(&small_mechanism()).unwrap();
        let mech = parser.finish().unwrap();
        // most species in the fragment carry no thermo data
        match mech.validate_for_output() {
            Err(ChemkinError::MissingThermoData(label)) => assert_eq!(label, "H2"),
            other => panic!("expected MissingThermoData, got {:?}", other),
        }
    }

    #[test]
    fn test_undefined_element_detected() {
        let mut parser = MechanismParser::new();
        parser.parse_text("ELEMENTS H END\nSPECIES OH END\n").unwrap();
        let thermo = format!(
            "THERMO\n   200.000  1000.000  3500.000\n{OH_THERMO}END\n"
        );
        parser.parse_text(&thermo).unwrap();
        let mech = parser.finish().unwrap();
        match mech.validate_for_output() {
            Err(ChemkinError::UndefinedElements(elements)) => {
                assert_eq!(elements, vec!["O"])
            }
            other => panic!("expected UndefinedElements, got {:?}", other),
        }
    }

    #[test]
    fn test_reaction_table_lists_every_reaction() {
        let mut parser = MechanismParser::new();
        parser.parse_text(&small_mechanism()).unwrap();
        let mech = parser.finish().unwrap();
        // header row plus one row per reaction
        assert_eq!(mech.reaction_table().len(), 3);
    }
}
