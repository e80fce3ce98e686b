//! Kinetics models: the closed set of rate-law variants a Chemkin reaction
//! can carry.
//!
//! ## Overview
//! The legacy format describes one of seven mutually exclusive rate laws per
//! reaction. Instead of a class hierarchy with virtual overrides they are
//! expressed here as one sum type, [`KineticsModel`], over per-variant
//! structs; dispatch (pressure dependence, serialization) is exhaustive
//! pattern matching. Each variant carries its own parameters plus the shared
//! validity range / comment block ([`RateRange`]).
//!
//! ## Variants
//! - [`Arrhenius`]: plain modified Arrhenius, pressure-independent
//! - [`PDepArrhenius`]: PLOG list of (pressure, Arrhenius) pairs
//! - [`Chebyshev`]: dense (degree_T x degree_P) coefficient matrix
//! - [`ThirdBody`]: Arrhenius scaled by collider concentration
//! - [`Lindemann`]: falloff with blending function F = 1
//! - [`Troe`]: falloff with Troe blending parameters
//! - [`Sri`]: falloff with SRI blending parameters

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Validity range and free-text comment shared by every kinetics variant.
/// The Chemkin grammar only ever populates the bounds for Chebyshev models
/// (via TCHEB/PCHEB); elsewhere they stay `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct RateRange {
    pub Tmin: Option<f64>,
    pub Tmax: Option<f64>,
    /// pressure bounds in atm
    pub Pmin: Option<f64>,
    pub Pmax: Option<f64>,
    pub comment: String,
}

/// Modified Arrhenius expression k(T) = A * (T/T0)^n * exp(-Ea / (R T)).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct Arrhenius {
    pub A: f64,
    pub n: f64,
    pub Ea: f64,
    /// reference temperature, K
    pub T0: f64,
    /// units of A as dictated by the reaction order, e.g. "cm^3/(mol*s)"
    pub k_units: String,
    /// units of Ea as resolved for the REACTIONS block
    pub energy_units: String,
    pub range: RateRange,
}

impl Arrhenius {
    pub fn new(a: f64, n: f64, ea: f64, k_units: &str, energy_units: &str) -> Self {
        Self {
            A: a,
            n,
            Ea: ea,
            T0: 1.0,
            k_units: k_units.to_string(),
            energy_units: energy_units.to_string(),
            range: RateRange::default(),
        }
    }

    /// `[A, n, Ea]` formatted for a CTI rate argument.
    pub fn rate_str(&self) -> String {
        format!("[{:e}, {}, {}]", self.A, self.n, self.Ea)
    }
}

/// PLOG parameterization: Arrhenius fits at discrete pressures, kept in the
/// order encountered in the input (physically increasing, but not required
/// sorted here). The high-pressure-limit fit from the equation line is kept
/// but plays no part in evaluating k(T, P).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PDepArrhenius {
    /// pressures in atm, parallel to `arrhenius`
    pub pressures: Vec<f64>,
    pub arrhenius: Vec<Arrhenius>,
    pub high_p_limit: Option<Arrhenius>,
    pub range: RateRange,
}

/// Chebyshev polynomial fit of log k over reduced temperature and pressure.
/// The coefficient matrix is dense and must be fully populated:
/// `degree_T * degree_P` values, row-major in temperature degree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct Chebyshev {
    pub coeffs: DMatrix<f64>,
    pub degree_T: usize,
    pub degree_P: usize,
    pub k_units: String,
    /// temperature/pressure validity bounds, always populated (TCHEB/PCHEB)
    pub range: RateRange,
}

/// Three-body reaction: an Arrhenius rate scaled by the concentration of a
/// non-reacting collision partner, with per-species efficiencies (unlisted
/// colliders default to 1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThirdBody {
    pub arrhenius_high: Arrhenius,
    pub efficiencies: HashMap<String, f64>,
    pub range: RateRange,
}

/// Falloff reaction blending low- and high-pressure-limit Arrhenius rates
/// with F = 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lindemann {
    pub arrhenius_low: Arrhenius,
    pub arrhenius_high: Arrhenius,
    pub efficiencies: HashMap<String, f64>,
    pub range: RateRange,
}

/// Falloff reaction with the 3- or 4-parameter Troe blending function.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct Troe {
    pub arrhenius_low: Arrhenius,
    pub arrhenius_high: Arrhenius,
    pub efficiencies: HashMap<String, f64>,
    pub alpha: f64,
    pub T3: f64,
    pub T1: f64,
    pub T2: Option<f64>,
    pub range: RateRange,
}

/// Falloff reaction with the SRI blending function; `D` and `E` default to
/// 1 and 0 when the 3-parameter form is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct Sri {
    pub arrhenius_low: Arrhenius,
    pub arrhenius_high: Arrhenius,
    pub efficiencies: HashMap<String, f64>,
    pub A: f64,
    pub B: f64,
    pub C: f64,
    pub D: f64,
    pub E: f64,
    pub range: RateRange,
}

/// The closed set of kinetics model variants. Exactly one is attached to a
/// reaction; the classifier guarantees mutual exclusivity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KineticsModel {
    Arrhenius(Arrhenius),
    PDepArrhenius(PDepArrhenius),
    Chebyshev(Chebyshev),
    ThirdBody(ThirdBody),
    Lindemann(Lindemann),
    Troe(Troe),
    Sri(Sri),
}

impl KineticsModel {
    /// Whether the rate law depends on pressure. Used by the duplicate
    /// validator: identical reactions are legitimately distinct when exactly
    /// one of them is pressure-dependent.
    pub fn is_pressure_dependent(&self) -> bool {
        match self {
            KineticsModel::Arrhenius(_) => false,
            KineticsModel::PDepArrhenius(_) => true,
            KineticsModel::Chebyshev(_) => true,
            KineticsModel::ThirdBody(_) => true,
            KineticsModel::Lindemann(_) => true,
            KineticsModel::Troe(_) => true,
            KineticsModel::Sri(_) => true,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            KineticsModel::Arrhenius(_) => "Arrhenius",
            KineticsModel::PDepArrhenius(_) => "PDepArrhenius",
            KineticsModel::Chebyshev(_) => "Chebyshev",
            KineticsModel::ThirdBody(_) => "ThirdBody",
            KineticsModel::Lindemann(_) => "Lindemann",
            KineticsModel::Troe(_) => "Troe",
            KineticsModel::Sri(_) => "Sri",
        }
    }
}
