//! Reaction entities, the reaction equation parser and the kinetics
//! classifier.
//!
//! ## Overview
//! A REACTIONS record is one equation line (equation text plus the three
//! high-pressure Arrhenius numbers) followed by any number of auxiliary
//! lines in arbitrary order. The equation parser splits the equation into
//! ordered (coefficient, species) terms against the registry; the classifier
//! accumulates the auxiliary keyword blocks (`DUP`, `LOW`, `REV`, `FORD`,
//! `TROE`, `SRI`, `CHEB`, `PLOG`, collider efficiencies) and then selects
//! exactly one kinetics model variant.
//!
//! ## Classifier precedence
//! When several mutually exclusive keyword groups are present the legacy
//! grammar does not reject the input; the classifier deterministically picks
//! one in the order Chebyshev > PLOG > Troe > Sri > Lindemann (LOW present) >
//! ThirdBody (bare M present) > plain Arrhenius. This is an inherited quirk
//! preserved for compatibility with existing mechanism files - do not
//! reorder it without a test corpus proving the change safe.

use crate::Chemkin::errors::ChemkinError;
use crate::Chemkin::fortfloat::fort_float;
use crate::Chemkin::kinetics::{
    Arrhenius, Chebyshev, KineticsModel, Lindemann, PDepArrhenius, RateRange, Sri, ThirdBody,
    Troe,
};
use crate::Chemkin::substances::{SpeciesId, SpeciesRegistry};
use crate::Chemkin::units::ReactionUnits;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A chemical reaction: ordered (stoichiometric coefficient, species) terms
/// for both sides, reversibility and duplicate flags, per-species forward
/// order overrides, and exactly one kinetics model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    /// 1-based position, assigned after the whole mechanism is collected
    pub index: usize,
    pub reactants: Vec<(f64, SpeciesId)>,
    pub products: Vec<(f64, SpeciesId)>,
    pub kinetics: KineticsModel,
    pub reversible: bool,
    pub duplicate: bool,
    /// species label -> forward reaction order, for explicitly
    /// non-elementary kinetics (FORD lines)
    pub fwd_orders: HashMap<String, f64>,
}

fn coeff_string(terms: &[(f64, SpeciesId)], registry: &SpeciesRegistry) -> String {
    terms
        .iter()
        .map(|&(coeff, id)| {
            if coeff == 1.0 {
                registry.label(id).to_string()
            } else if coeff.fract() == 0.0 {
                format!("{} {}", coeff as i64, registry.label(id))
            } else {
                format!("{} {}", coeff, registry.label(id))
            }
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

impl Reaction {
    pub fn reactant_string(&self, registry: &SpeciesRegistry) -> String {
        coeff_string(&self.reactants, registry)
    }

    pub fn product_string(&self, registry: &SpeciesRegistry) -> String {
        coeff_string(&self.products, registry)
    }

    /// Regenerate the equation, `A + B <=> C + D` form, respecting
    /// reversibility.
    pub fn equation(&self, registry: &SpeciesRegistry) -> String {
        let arrow = if self.reversible { " <=> " } else { " => " };
        format!(
            "{}{}{}",
            self.reactant_string(registry),
            arrow,
            self.product_string(registry)
        )
    }

    /// Order-independent, coefficient-including participant key used for
    /// duplicate detection.
    fn participants_key(&self) -> (Vec<(SpeciesId, u64)>, Vec<(SpeciesId, u64)>) {
        let normalize = |terms: &[(f64, SpeciesId)]| {
            let mut key: Vec<(SpeciesId, u64)> =
                terms.iter().map(|&(c, id)| (id, c.to_bits())).collect();
            key.sort_unstable();
            key
        };
        (normalize(&self.reactants), normalize(&self.products))
    }

    /// True when both reactions have identical reactant and product
    /// multisets (coefficients included).
    pub fn same_participants(&self, other: &Reaction) -> bool {
        self.participants_key() == other.participants_key()
    }
}

/// Result of splitting one reaction equation string.
#[derive(Debug, Clone)]
pub struct ParsedEquation {
    pub reactants: Vec<(f64, SpeciesId)>,
    pub products: Vec<(f64, SpeciesId)>,
    pub reversible: bool,
    /// a bare `M`/`m` collider term appeared on the reactant side
    pub third_body: bool,
    /// a `(+M)` falloff marker was stripped from the equation
    pub falloff: bool,
}

fn parse_term<'a>(term: &'a str, equation: &str) -> Result<(f64, &'a str), ChemkinError> {
    let first_alpha = term.chars().position(|c| c.is_alphabetic());
    match first_alpha {
        None => Err(ChemkinError::UnknownSpecies {
            label: term.to_string(),
            reaction: equation.to_string(),
        }),
        Some(0) => Ok((1.0, term)),
        Some(j) => {
            let prefix = &term[..j];
            let coeff = if prefix.chars().all(|c| c.is_ascii_digit()) {
                prefix.parse::<i64>().map(|v| v as f64).map_err(|_| {
                    ChemkinError::MalformedNumber {
                        field: prefix.to_string(),
                    }
                })?
            } else {
                prefix
                    .parse::<f64>()
                    .map_err(|_| ChemkinError::MalformedNumber {
                        field: prefix.to_string(),
                    })?
            };
            Ok((coeff, &term[j..]))
        }
    }
}

fn parse_side(
    side: &str,
    registry: &SpeciesRegistry,
    equation: &str,
) -> Result<(Vec<(f64, SpeciesId)>, bool), ChemkinError> {
    let mut third_body = false;
    let mut terms = Vec::new();
    for term in side.split('+') {
        let term = term.trim();
        if term.is_empty() {
            continue;
        }
        let (coeff, label) = parse_term(term, equation)?;
        if label == "M" || label == "m" {
            third_body = true;
        } else {
            match registry.id_of(label) {
                Some(id) => terms.push((coeff, id)),
                None => {
                    return Err(ChemkinError::UnknownSpecies {
                        label: label.to_string(),
                        reaction: equation.to_string(),
                    });
                }
            }
        }
    }
    Ok((terms, third_body))
}

/// Split a reaction equation into reactant/product terms. Arrow tokens are
/// tried in the order `<=>`, `=>`, `=`; `(+M)` falloff markers are stripped
/// from both sides first and recorded as a pressure-dependence hint, never
/// as a species.
pub fn parse_equation(
    equation: &str,
    registry: &SpeciesRegistry,
) -> Result<ParsedEquation, ChemkinError> {
    let (reversible, lhs, rhs) = if let Some((lhs, rhs)) = equation.split_once("<=>") {
        (true, lhs, rhs)
    } else if let Some((lhs, rhs)) = equation.split_once("=>") {
        (false, lhs, rhs)
    } else if let Some((lhs, rhs)) = equation.split_once('=') {
        (true, lhs, rhs)
    } else {
        return Err(ChemkinError::MissingArrow(equation.to_string()));
    };

    let mut falloff = false;
    let mut strip = |side: &str| -> String {
        let stripped = side.replace("(+M)", "").replace("(+m)", "");
        if stripped.len() != side.len() {
            falloff = true;
        }
        stripped
    };
    let lhs = strip(lhs);
    let rhs = strip(rhs);

    let (reactants, third_body) = parse_side(&lhs, registry, equation)?;
    let (products, _) = parse_side(&rhs, registry, equation)?;

    Ok(ParsedEquation {
        reactants,
        products,
        reversible,
        third_body,
        falloff,
    })
}

/// Rate constant units for the forward rate and the low-pressure-limit rate,
/// decided by the total reactant stoichiometric weight (bare third bodies
/// count as one). Any weight other than 1, 2 or 3 is an error.
fn rate_units(order: f64, equation: &str) -> Result<(&'static str, &'static str), ChemkinError> {
    if order == 3.0 {
        Ok(("cm^6/(mol^2*s)", "cm^9/(mol^3*s)"))
    } else if order == 2.0 {
        Ok(("cm^3/(mol*s)", "cm^6/(mol^2*s)"))
    } else if order == 1.0 {
        Ok(("s^-1", "cm^3/(mol*s)"))
    } else {
        Err(ChemkinError::InvalidReactionOrder {
            order,
            reaction: equation.to_string(),
        })
    }
}

#[derive(Debug, Default)]
struct ChebyshevBuilder {
    t_bounds: Option<(f64, f64)>,
    p_bounds: Option<(f64, f64)>,
    degrees: Option<(usize, usize)>,
    coeffs: Vec<f64>,
}

/// The slash-delimited payload of an auxiliary keyword line, e.g. the
/// `1.0E18 0.0 0.0` of `LOW/1.0E18 0.0 0.0/`.
fn slash_payload<'a>(tokens: &[&'a str], line: &str) -> Result<&'a str, ChemkinError> {
    tokens
        .get(1)
        .copied()
        .ok_or_else(|| ChemkinError::MalformedNumber {
            field: line.trim().to_string(),
        })
}

fn payload_floats(payload: &str, want: usize) -> Result<Vec<f64>, ChemkinError> {
    let values = payload
        .split_whitespace()
        .map(fort_float)
        .collect::<Result<Vec<f64>, _>>()?;
    if values.len() < want {
        return Err(ChemkinError::MalformedNumber {
            field: payload.trim().to_string(),
        });
    }
    Ok(values)
}

/// Read one kinetics record (equation line plus auxiliary lines) and return
/// the reaction, plus the independent reverse reaction a `REV` block
/// synthesizes.
pub fn read_kinetics_entry(
    record: &str,
    registry: &SpeciesRegistry,
    units: &ReactionUnits,
    comment: &str,
) -> Result<(Reaction, Option<Reaction>), ChemkinError> {
    let lines: Vec<&str> = record.trim().lines().collect();
    let first = lines.first().copied().unwrap_or("");

    // equation text plus the three high-pressure Arrhenius numbers
    let tokens: Vec<&str> = first.split_whitespace().collect();
    if tokens.len() < 4 {
        return Err(ChemkinError::MissingArrow(first.trim().to_string()));
    }
    let n = tokens.len();
    let a_high = fort_float(tokens[n - 3])?;
    let n_high = fort_float(tokens[n - 2])?;
    let ea_high = fort_float(tokens[n - 1])?;
    let equation_text = tokens[..n - 3].join("");

    let parsed = parse_equation(&equation_text, registry)?;
    let order: f64 = parsed.reactants.iter().map(|&(c, _)| c).sum::<f64>()
        + if parsed.third_body { 1.0 } else { 0.0 };
    let (k_units, k_low_units) = rate_units(order, &equation_text)?;

    let arrhenius_high = Arrhenius::new(a_high, n_high, ea_high, k_units, &units.energy);

    let mut reversible = parsed.reversible;
    let mut duplicate = false;
    let mut fwd_orders: HashMap<String, f64> = HashMap::new();
    let mut efficiencies: HashMap<String, f64> = HashMap::new();
    let mut arrhenius_low: Option<Arrhenius> = None;
    let mut rev_arrhenius: Option<Arrhenius> = None;
    let mut troe_params: Option<(f64, f64, f64, Option<f64>)> = None;
    let mut sri_params: Option<(f64, f64, f64, f64, f64)> = None;
    let mut chebyshev: Option<ChebyshevBuilder> = None;
    let mut plog: Vec<(f64, Arrhenius)> = Vec::new();

    // auxiliary lines may arrive in any order
    for line in &lines[1..] {
        let tokens: Vec<&str> = line.split('/').collect();
        let lower = line.to_lowercase();

        if lower.contains("dup") {
            duplicate = true;
        } else if lower.contains("low") {
            let vals = payload_floats(slash_payload(&tokens, line)?, 3)?;
            arrhenius_low = Some(Arrhenius::new(
                vals[0],
                vals[1],
                vals[2],
                k_low_units,
                &units.energy,
            ));
        } else if lower.contains("rev") {
            reversible = false;
            let vals = payload_floats(slash_payload(&tokens, line)?, 3)?;
            rev_arrhenius = Some(Arrhenius::new(
                vals[0],
                vals[1],
                vals[2],
                k_low_units,
                &units.energy,
            ));
        } else if lower.contains("ford") {
            let payload = slash_payload(&tokens, line)?;
            let mut parts = payload.split_whitespace();
            let label = parts.next().ok_or_else(|| ChemkinError::MalformedNumber {
                field: payload.trim().to_string(),
            })?;
            let value = fort_float(parts.next().unwrap_or(""))?;
            fwd_orders.insert(label.to_string(), value);
        } else if lower.contains("troe") {
            let vals = payload_floats(slash_payload(&tokens, line)?, 3)?;
            troe_params = Some((vals[0], vals[1], vals[2], vals.get(3).copied()));
        } else if lower.contains("sri") {
            let vals = payload_floats(slash_payload(&tokens, line)?, 3)?;
            let (d, e) = match (vals.get(3), vals.get(4)) {
                (Some(&d), Some(&e)) => (d, e),
                _ => (1.0, 0.0),
            };
            sri_params = Some((vals[0], vals[1], vals[2], d, e));
        } else if lower.contains("cheb") {
            let cheb = chebyshev.get_or_insert_with(ChebyshevBuilder::default);
            let trimmed: Vec<&str> = tokens.iter().map(|t| t.trim()).collect();
            let mut bounds_line = false;
            if let Some(idx) = trimmed.iter().position(|t| t.eq_ignore_ascii_case("TCHEB")) {
                let vals = payload_floats(trimmed.get(idx + 1).copied().unwrap_or(""), 2)?;
                cheb.t_bounds = Some((vals[0], vals[1]));
                bounds_line = true;
            }
            if let Some(idx) = trimmed.iter().position(|t| t.eq_ignore_ascii_case("PCHEB")) {
                let vals = payload_floats(trimmed.get(idx + 1).copied().unwrap_or(""), 2)?;
                cheb.p_bounds = Some((vals[0], vals[1]));
                bounds_line = true;
            }
            if !bounds_line {
                let payload = slash_payload(&tokens, line)?;
                if cheb.degrees.is_none() {
                    let vals = payload_floats(payload, 2)?;
                    cheb.degrees = Some((vals[0] as usize, vals[1] as usize));
                } else {
                    cheb.coeffs.extend(payload_floats(payload, 0)?);
                }
            }
        } else if lower.contains("plog") {
            let vals = payload_floats(slash_payload(&tokens, line)?, 4)?;
            plog.push((
                vals[0],
                Arrhenius::new(vals[1], vals[2], vals[3], k_units, &units.energy),
            ));
        } else {
            // anything else is a list of collider/efficiency pairs; repeats
            // across lines merge, a repeated collider overwrites
            let mut i = 0;
            while i + 1 < tokens.len() {
                let collider = tokens[i].trim();
                let value = tokens[i + 1].trim();
                if !collider.is_empty() {
                    efficiencies.insert(collider.to_string(), fort_float(value)?);
                }
                i += 2;
            }
        }
    }

    let range = RateRange {
        comment: comment.trim().to_string(),
        ..RateRange::default()
    };

    // classifier resolution: exactly one model, highest precedence wins
    let kinetics = if let Some(cheb) = chebyshev {
        let (tmin, tmax) = cheb
            .t_bounds
            .ok_or_else(|| ChemkinError::MissingChebyshevBounds(equation_text.clone()))?;
        let (pmin, pmax) = cheb
            .p_bounds
            .ok_or_else(|| ChemkinError::MissingChebyshevBounds(equation_text.clone()))?;
        let (degree_t, degree_p) = cheb.degrees.unwrap_or((0, 0));
        if cheb.coeffs.len() != degree_t * degree_p {
            return Err(ChemkinError::ChebyshevCoefficientCount {
                expected: degree_t * degree_p,
                found: cheb.coeffs.len(),
                reaction: equation_text.clone(),
            });
        }
        KineticsModel::Chebyshev(Chebyshev {
            coeffs: DMatrix::from_row_slice(degree_t, degree_p, &cheb.coeffs),
            degree_T: degree_t,
            degree_P: degree_p,
            k_units: k_units.to_string(),
            range: RateRange {
                Tmin: Some(tmin),
                Tmax: Some(tmax),
                Pmin: Some(pmin),
                Pmax: Some(pmax),
                comment: range.comment.clone(),
            },
        })
    } else if !plog.is_empty() {
        let (pressures, arrhenius): (Vec<f64>, Vec<Arrhenius>) = plog.into_iter().unzip();
        KineticsModel::PDepArrhenius(PDepArrhenius {
            pressures,
            arrhenius,
            high_p_limit: Some(arrhenius_high),
            range,
        })
    } else if let Some((alpha, t3, t1, t2)) = troe_params {
        let low = arrhenius_low
            .ok_or_else(|| ChemkinError::MissingLowRate(equation_text.clone()))?;
        KineticsModel::Troe(Troe {
            arrhenius_low: low,
            arrhenius_high,
            efficiencies,
            alpha,
            T3: t3,
            T1: t1,
            T2: t2,
            range,
        })
    } else if let Some((a, b, c, d, e)) = sri_params {
        let low = arrhenius_low
            .ok_or_else(|| ChemkinError::MissingLowRate(equation_text.clone()))?;
        KineticsModel::Sri(Sri {
            arrhenius_low: low,
            arrhenius_high,
            efficiencies,
            A: a,
            B: b,
            C: c,
            D: d,
            E: e,
            range,
        })
    } else if let Some(low) = arrhenius_low {
        KineticsModel::Lindemann(Lindemann {
            arrhenius_low: low,
            arrhenius_high,
            efficiencies,
            range,
        })
    } else if parsed.third_body {
        KineticsModel::ThirdBody(ThirdBody {
            arrhenius_high,
            efficiencies,
            range,
        })
    } else {
        let mut arrhenius = arrhenius_high;
        arrhenius.range = range;
        KineticsModel::Arrhenius(arrhenius)
    };

    let reverse = rev_arrhenius.map(|rev| Reaction {
        index: 0,
        reactants: parsed.products.clone(),
        products: parsed.reactants.clone(),
        kinetics: KineticsModel::Arrhenius(rev),
        reversible: false,
        duplicate: false,
        fwd_orders: HashMap::new(),
    });

    let reaction = Reaction {
        index: 0,
        reactants: parsed.reactants,
        products: parsed.products,
        kinetics,
        reversible,
        duplicate,
        fwd_orders,
    };

    Ok((reaction, reverse))
}
