//! Biome registry: maps [`BiomeId`] to [`BiomeDef`] with name-based lookup.
//!
//! Registration order is significant: it assigns ids and breaks classification
//! ties, so it is part of what a seed means.

use hashbrown::HashMap;

use super::{BiomeDef, standard};

/// Unique identifier for a biome: its index in the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BiomeId(pub u16);

impl BiomeId {
    /// Id reported when the registry is empty. Resolves to the built-in default biome.
    pub const FALLBACK: Self = Self(u16::MAX);
}

/// Errors that can occur when registering biomes.
#[derive(Debug, thiserror::Error)]
pub enum BiomeRegistryError {
    /// A biome with this name is already registered.
    #[error("duplicate biome name: {0}")]
    DuplicateName(String),
    /// The registry cannot hold more biomes.
    #[error("biome registry is full ({0} entries)")]
    Full(usize),
}

/// Stores all registered biome definitions with O(1) lookup by ID.
pub struct BiomeRegistry {
    biomes: Vec<BiomeDef>,
    name_to_id: HashMap<String, BiomeId>,
    fallback: BiomeDef,
}

impl BiomeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            biomes: Vec::new(),
            name_to_id: HashMap::new(),
            fallback: standard::fallback_biome(),
        }
    }

    /// The built-in ordered biome set used by default worlds.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for def in standard::standard_biomes() {
            registry.push(def);
        }
        registry
    }

    /// Registers a new biome definition, returning its assigned [`BiomeId`].
    ///
    /// # Errors
    ///
    /// Returns [`BiomeRegistryError::DuplicateName`] if a biome with the same name exists.
    pub fn register(&mut self, def: BiomeDef) -> Result<BiomeId, BiomeRegistryError> {
        if self.name_to_id.contains_key(&def.name) {
            return Err(BiomeRegistryError::DuplicateName(def.name.clone()));
        }
        if self.biomes.len() >= usize::from(BiomeId::FALLBACK.0) {
            return Err(BiomeRegistryError::Full(self.biomes.len()));
        }
        Ok(self.push(def))
    }

    fn push(&mut self, def: BiomeDef) -> BiomeId {
        let id = BiomeId(self.biomes.len() as u16);
        self.name_to_id.insert(def.name.clone(), id);
        self.biomes.push(def);
        id
    }

    /// Returns the definition for the given biome ID.
    ///
    /// Unknown ids (including [`BiomeId::FALLBACK`]) resolve to the default biome.
    pub fn get(&self, id: BiomeId) -> &BiomeDef {
        self.biomes.get(usize::from(id.0)).unwrap_or(&self.fallback)
    }

    /// The default biome used when nothing is registered.
    pub fn fallback(&self) -> &BiomeDef {
        &self.fallback
    }

    /// Looks up a biome ID by name.
    pub fn lookup_by_name(&self, name: &str) -> Option<BiomeId> {
        self.name_to_id.get(name).copied()
    }

    /// Iterates biomes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (BiomeId, &BiomeDef)> {
        self.biomes
            .iter()
            .enumerate()
            .map(|(i, def)| (BiomeId(i as u16), def))
    }

    /// Returns the number of registered biomes.
    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    /// Returns `true` if no biomes are registered.
    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }
}

impl Default for BiomeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
