//! Unit resolver for the REACTIONS section header.
//!
//! The header may declare at most one energy-unit token and one quantity-unit
//! token, positionally: `REACTIONS KCAL/MOLE MOLECULES`. Tokens come from a
//! closed, case-sensitive table inherited from the Chemkin manual; anything
//! else fails with `UnknownUnit`. When absent the defaults are `cal/mol`
//! energy and `mol` quantity. Resolved units hold for one REACTIONS block and
//! do not persist across loading a second mechanism file.

use crate::Chemkin::errors::ChemkinError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENERGY_UNITS: &str = "cal/mol";
pub const DEFAULT_QUANTITY_UNITS: &str = "mol";

/// Map one unit token from a REACTIONS header to its canonical unit string.
pub fn resolve_unit(token: &str) -> Result<&'static str, ChemkinError> {
    match token {
        "CAL/" | "CAL/MOL" | "CAL/MOLE" => Ok("cal/mol"),
        "EVOL" | "EVOLTS" => Ok("eV"),
        "JOUL" | "JOULES/MOL" | "JOULES/MOLE" => Ok("J/mol"),
        "KCAL" | "KCAL/MOL" | "KCAL/MOLE" => Ok("kcal/mol"),
        "KELV" | "KELVIN" | "KELVINS" => Ok("K"),
        "KJOU" | "KJOULES/MOL" | "KJOULES/MOLE" => Ok("kJ/mol"),
        "MOL" | "MOLE" | "MOLES" => Ok("mol"),
        "MOLEC" | "MOLECULES" => Ok("molec"),
        _ => Err(ChemkinError::UnknownUnit(token.to_string())),
    }
}

/// Canonical units in force for one REACTIONS block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionUnits {
    /// activation energy units, e.g. "cal/mol"
    pub energy: String,
    /// quantity (mole/molecule count) units, e.g. "mol"
    pub quantity: String,
}

impl Default for ReactionUnits {
    fn default() -> Self {
        Self {
            energy: DEFAULT_ENERGY_UNITS.to_string(),
            quantity: DEFAULT_QUANTITY_UNITS.to_string(),
        }
    }
}

impl ReactionUnits {
    /// Resolve the tokens following the REACTIONS keyword: first token (if
    /// any) is the energy unit, second the quantity unit.
    pub fn from_header_tokens(tokens: &[&str]) -> Result<Self, ChemkinError> {
        let mut units = ReactionUnits::default();
        if let Some(token) = tokens.first() {
            units.energy = resolve_unit(token)?.to_string();
        }
        if let Some(token) = tokens.get(1) {
            units.quantity = resolve_unit(token)?.to_string();
        }
        Ok(units)
    }
}
