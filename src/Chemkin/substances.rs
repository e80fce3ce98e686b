//! Species entities and the species registry.
//!
//! ## Main Data Structures and Logic
//! - `Species`: one chemical species with optional thermo model, optional
//!   transport model, optional free-text note and elemental composition
//! - `SpeciesRegistry`: an arena interning species by label into a dense
//!   index space; all downstream references (reaction terms) are stored as
//!   `SpeciesId` indices into it, never as live handles
//! - `parse_composition`: the fixed-slot elemental composition parser shared
//!   by the 2x7 and NASA9 thermo entry forms
//!
//! Species are created during the SPECIES section scan, enriched in place by
//! later THERMO and TRANSPORT sections, and only read after assembly.

use crate::Chemkin::thermo::MultiNasa;
use crate::Chemkin::transport::TransportData;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dense index of a species inside the [`SpeciesRegistry`] arena.
pub type SpeciesId = usize;

/// One chemical species. Labels are case-sensitive; first-seen declaration
/// order is preserved by the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Species {
    pub label: String,
    pub thermo: Option<MultiNasa>,
    pub transport: Option<TransportData>,
    pub note: Option<String>,
    /// element symbol -> atom count; zero counts are dropped at parse time
    pub composition: HashMap<String, usize>,
}

impl Species {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            thermo: None,
            transport: None,
            note: None,
            composition: HashMap::new(),
        }
    }
}

/// Arena of species interned by label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesRegistry {
    pub species: Vec<Species>,
    index_by_label: HashMap<String, SpeciesId>,
}

impl SpeciesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a label, creating the species on first sight. Returns the
    /// dense index either way.
    pub fn declare(&mut self, label: &str) -> SpeciesId {
        if let Some(&id) = self.index_by_label.get(label) {
            return id;
        }
        let id = self.species.len();
        self.species.push(Species::new(label));
        self.index_by_label.insert(label.to_string(), id);
        id
    }

    pub fn id_of(&self, label: &str) -> Option<SpeciesId> {
        self.index_by_label.get(label).copied()
    }

    pub fn get(&self, id: SpeciesId) -> &Species {
        &self.species[id]
    }

    pub fn get_mut(&mut self, id: SpeciesId) -> &mut Species {
        &mut self.species[id]
    }

    pub fn label(&self, id: SpeciesId) -> &str {
        &self.species[id].label
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.species.iter()
    }
}

/// Capitalize an element symbol: first character upper-case, the rest lower.
pub fn capitalize_symbol(symbol: &str) -> String {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Parse the elemental composition table of a thermo entry: `n_slots` fixed
/// slots of `width` characters, symbol in the first 2 characters and atom
/// count in the remainder. A slot with an empty symbol is skipped; a
/// non-numeric count is tolerated (slot ignored) because blank padding is
/// common in real files. Counts are truncated to integers and zero counts
/// dropped.
pub fn parse_composition(
    field: &str,
    n_slots: usize,
    width: usize,
) -> HashMap<String, usize> {
    let mut composition = HashMap::new();
    for i in 0..n_slots {
        let lo = width * i;
        let symbol = crate::Chemkin::fortfloat::fixed_field(field, lo, lo + 2).trim();
        let count = crate::Chemkin::fortfloat::fixed_field(field, lo + 2, lo + width).trim();
        if symbol.is_empty() {
            continue;
        }
        if let Ok(count) = count.parse::<f64>() {
            let count = count as usize;
            if count != 0 {
                composition.insert(capitalize_symbol(symbol), count);
            }
        }
    }
    composition
}
