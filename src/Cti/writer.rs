//! Cantera CTI serializer.
//!
//! ## Overview
//! Renders an assembled [`Mechanism`] as a CTI input file: a units
//! directive, an `ideal_gas` phase block, one `species(...)` block per
//! species and one reaction block per reaction, dispatched exhaustively on
//! the kinetics model variant (`reaction`, `three_body_reaction`,
//! `falloff_reaction` with an optional `Troe(...)`/`SRI(...)` blending
//! function, `chebyshev_reaction`, `pdep_arrhenius`). All map-valued data
//! (compositions, collider efficiencies, forward orders) is emitted in
//! sorted key order so output is deterministic.

use crate::Chemkin::errors::ChemkinError;
use crate::Chemkin::kinetics::{Arrhenius, KineticsModel};
use crate::Chemkin::mechanism::Mechanism;
use crate::Chemkin::reactions::Reaction;
use crate::Chemkin::substances::{Species, SpeciesRegistry};
use crate::Utils::load_from_file::read_mech_lines;
use log::info;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// `key:value` pairs of a map, sorted by key.
fn sorted_pairs(map: &HashMap<String, f64>) -> String {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    keys.iter()
        .map(|k| format!("{}:{}", k, map[*k]))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lay out a CTI call: first argument on the call line, the rest aligned
/// under it.
fn call_block(name: &str, args: &[String]) -> String {
    let indent = " ".repeat(name.len() + 1);
    format!("{}({})", name, args.join(&format!(",\n{}", indent)))
}

fn decorated_equation(reaction: &Reaction, registry: &SpeciesRegistry, suffix: &str) -> String {
    let arrow = if reaction.reversible { " <=> " } else { " => " };
    format!(
        "{}{}{}{}{}",
        reaction.reactant_string(registry),
        suffix,
        arrow,
        reaction.product_string(registry),
        suffix
    )
}

fn shared_options(reaction: &Reaction) -> Vec<String> {
    let mut extras = Vec::new();
    if !reaction.fwd_orders.is_empty() {
        extras.push(format!("order='{}'", sorted_pairs(&reaction.fwd_orders)));
    }
    if reaction.duplicate {
        extras.push("options='duplicate'".to_string());
    }
    extras
}

fn falloff_args(
    reaction: &Reaction,
    registry: &SpeciesRegistry,
    low: &Arrhenius,
    high: &Arrhenius,
    efficiencies: &HashMap<String, f64>,
) -> Vec<String> {
    let mut args = vec![
        format!("'{}'", decorated_equation(reaction, registry, " (+ M)")),
        format!("kf={}", high.rate_str()),
        format!("kf0={}", low.rate_str()),
    ];
    if !efficiencies.is_empty() {
        args.push(format!("efficiencies='{}'", sorted_pairs(efficiencies)));
    }
    args
}

/// Render one reaction as its CTI entry.
pub fn reaction_cti(reaction: &Reaction, registry: &SpeciesRegistry) -> String {
    let extras = shared_options(reaction);
    let (name, mut args) = match &reaction.kinetics {
        KineticsModel::Arrhenius(arrh) => (
            "reaction",
            vec![
                format!("'{}'", decorated_equation(reaction, registry, "")),
                arrh.rate_str(),
            ],
        ),
        KineticsModel::ThirdBody(tb) => {
            let mut args = vec![
                format!("'{}'", decorated_equation(reaction, registry, " + M")),
                tb.arrhenius_high.rate_str(),
            ];
            if !tb.efficiencies.is_empty() {
                args.push(format!("efficiencies='{}'", sorted_pairs(&tb.efficiencies)));
            }
            ("three_body_reaction", args)
        }
        KineticsModel::Lindemann(lind) => (
            "falloff_reaction",
            falloff_args(
                reaction,
                registry,
                &lind.arrhenius_low,
                &lind.arrhenius_high,
                &lind.efficiencies,
            ),
        ),
        KineticsModel::Troe(troe) => {
            let mut args = falloff_args(
                reaction,
                registry,
                &troe.arrhenius_low,
                &troe.arrhenius_high,
                &troe.efficiencies,
            );
            let mut params = format!("A={}, T3={}, T1={}", troe.alpha, troe.T3, troe.T1);
            if let Some(t2) = troe.T2 {
                params.push_str(&format!(", T2={}", t2));
            }
            args.push(format!("falloff=Troe({})", params));
            ("falloff_reaction", args)
        }
        KineticsModel::Sri(sri) => {
            let mut args = falloff_args(
                reaction,
                registry,
                &sri.arrhenius_low,
                &sri.arrhenius_high,
                &sri.efficiencies,
            );
            args.push(format!(
                "falloff=SRI(A={}, B={}, C={}, D={}, E={})",
                sri.A, sri.B, sri.C, sri.D, sri.E
            ));
            ("falloff_reaction", args)
        }
        KineticsModel::Chebyshev(cheb) => {
            let mut args = vec![
                format!("'{}'", decorated_equation(reaction, registry, " (+ M)")),
                format!("Tmin={}", cheb.range.Tmin.unwrap_or_default()),
                format!("Tmax={}", cheb.range.Tmax.unwrap_or_default()),
                format!("Pmin=({}, 'atm')", cheb.range.Pmin.unwrap_or_default()),
                format!("Pmax=({}, 'atm')", cheb.range.Pmax.unwrap_or_default()),
            ];
            let rows: Vec<String> = (0..cheb.degree_T)
                .map(|i| {
                    let row: Vec<String> = (0..cheb.degree_P)
                        .map(|j| format!("{:.6e}", cheb.coeffs[(i, j)]))
                        .collect();
                    format!("[{}]", row.join(", "))
                })
                .collect();
            args.push(format!("coeffs=[{}]", rows.join(", ")));
            ("chebyshev_reaction", args)
        }
        KineticsModel::PDepArrhenius(pdep) => {
            let mut args = vec![format!(
                "'{}'",
                decorated_equation(reaction, registry, "")
            )];
            for (pressure, arrh) in pdep.pressures.iter().zip(pdep.arrhenius.iter()) {
                args.push(format!(
                    "[({}, 'atm'), {:e}, {}, {}]",
                    pressure, arrh.A, arrh.n, arrh.Ea
                ));
            }
            ("pdep_arrhenius", args)
        }
    };
    args.extend(extras);
    call_block(name, &args)
}

/// Render one species block: composition, NASA/NASA9 thermo polynomials,
/// optional transport data, optional note.
pub fn species_cti(species: &Species) -> Result<String, ChemkinError> {
    let thermo = species
        .thermo
        .as_ref()
        .ok_or_else(|| ChemkinError::MissingThermoData(species.label.clone()))?;

    let mut atoms: Vec<(&String, &usize)> = species.composition.iter().collect();
    atoms.sort();
    let atoms = atoms
        .iter()
        .map(|(symbol, count)| format!("{}:{}", symbol, count))
        .collect::<Vec<_>>()
        .join(" ");

    let polys: Vec<String> = thermo
        .polynomials
        .iter()
        .map(|poly| {
            let form = if poly.coeffs.len() == 9 { "NASA9" } else { "NASA" };
            let coeffs = poly
                .coeffs
                .iter()
                .map(|c| format!("{:.8E}", c))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}([{}, {}], [{}])", form, poly.Tmin, poly.Tmax, coeffs)
        })
        .collect();
    let thermo_arg = if polys.len() == 1 {
        format!("thermo={}", polys[0])
    } else {
        format!("thermo=({})", polys.join(",\n                "))
    };

    let mut args = vec![
        format!("name='{}'", species.label),
        format!("atoms='{}'", atoms),
        thermo_arg,
    ];

    if let Some(transport) = &species.transport {
        let mut fields = vec![
            format!("geom='{}'", transport.geometry.as_str()),
            format!("diam={}", transport.collision_diameter),
            format!("well_depth={}", transport.well_depth),
        ];
        if transport.dipole_moment != 0.0 {
            fields.push(format!("dipole={}", transport.dipole_moment));
        }
        if transport.polarizability != 0.0 {
            fields.push(format!("polar={}", transport.polarizability));
        }
        if transport.z_rot != 0.0 {
            fields.push(format!("rot_relax={}", transport.z_rot));
        }
        args.push(format!("transport=gas_transport({})", fields.join(", ")));
    }
    if let Some(note) = &species.note {
        args.push(format!("note='{}'", note.replace('\'', "\\'")));
    }
    Ok(call_block("species", &args))
}

/// Serialize a validated mechanism into CTI text.
pub fn build_cti(mech: &Mechanism, phase_name: &str) -> Result<String, ChemkinError> {
    mech.validate_for_output()?;

    let mut out = String::new();
    out.push_str(&format!(
        "units(length='cm', time='s', quantity='{}', act_energy='{}')\n\n",
        mech.units.quantity, mech.units.energy
    ));

    // species names, 5 per line, inside a triple-quoted string
    let labels: Vec<&str> = mech.species.iter().map(|s| s.label.as_str()).collect();
    let species_lines = labels
        .chunks(5)
        .map(|chunk| chunk.join(" "))
        .collect::<Vec<_>>()
        .join("\n                     ");
    out.push_str(&call_block(
        "ideal_gas",
        &[
            format!("name='{}'", phase_name),
            format!("elements=\"{}\"", mech.elements.join(" ")),
            format!("species=\"\"\"{}\"\"\"", species_lines),
            "reactions='all'".to_string(),
            "initial_state=state(temperature=300.0, pressure=OneAtm)".to_string(),
        ],
    ));
    out.push_str("\n\n");

    out.push_str(
        "#-------------------------------------------------------------------------------\n\
         # Species data\n\
         #-------------------------------------------------------------------------------\n\n",
    );
    for species in mech.species.iter() {
        out.push_str(&species_cti(species)?);
        out.push_str("\n\n");
    }

    out.push_str(
        "#-------------------------------------------------------------------------------\n\
         # Reaction data\n\
         #-------------------------------------------------------------------------------\n\n",
    );
    for reaction in &mech.reactions {
        out.push_str(&format!("# Reaction {}\n", reaction.index));
        out.push_str(&reaction_cti(reaction, &mech.species));
        out.push_str("\n\n");
    }
    Ok(out)
}

/// End-to-end driver: load a mechanism file plus optional supplementary
/// thermo and transport files, assemble, serialize to CTI and write the
/// output file. Returns the path written.
pub fn convert_mechanism(
    input: &Path,
    thermo_file: Option<&Path>,
    transport_file: Option<&Path>,
    phase_name: &str,
    out_name: Option<&Path>,
) -> Result<PathBuf, ChemkinError> {
    use crate::Chemkin::mechanism::MechanismParser;

    let mut parser = MechanismParser::new();
    parser.parse_file(input)?;
    if let Some(thermo) = thermo_file {
        info!("reading supplementary thermo file {}", thermo.display());
        let lines = read_mech_lines(thermo)?;
        parser.parse_lines(&lines)?;
    }
    if let Some(transport) = transport_file {
        info!(
            "reading supplementary transport file {}",
            transport.display()
        );
        let lines = read_mech_lines(transport)?;
        parser.parse_lines(&lines)?;
    }
    let mech = parser.finish()?;

    let mut cti = format!("# Generated from {}\n\n", input.display());
    cti.push_str(&build_cti(&mech, phase_name)?);

    let out_path = match out_name {
        Some(path) => path.to_path_buf(),
        None => input.with_extension("cti"),
    };
    std::fs::write(&out_path, cti)?;
    info!("wrote CTI output to {}", out_path.display());
    Ok(out_path)
}
