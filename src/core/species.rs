use crate::domain::model::{SpeciesCollection, SpeciesRecord};
use crate::utils::error::{EtlError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Reads the species reference file. The top level must be a JSON array of objects.
pub fn load<P: AsRef<Path>>(path: P) -> Result<SpeciesCollection> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(EtlError::NotFound { path: shown });
        }
        Err(e) => return Err(EtlError::IoError(e)),
    };

    let species: SpeciesCollection =
        serde_json::from_str(&content).map_err(|e| EtlError::ParseError {
            path: shown.clone(),
            message: e.to_string(),
        })?;

    tracing::info!("📚 Loaded {} species from {}", species.len(), shown);
    Ok(species)
}

/// First vernacular name of each record, trimmed and lowercased, in record order.
pub fn extract_common_names(species: &[SpeciesRecord]) -> Vec<String> {
    species
        .iter()
        .filter_map(|record| record.vernacular_names.first())
        .map(|vernacular| vernacular.name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

/// First record carrying a vernacular name equal to `name`, ignoring case.
pub fn find_by_common_name<'a>(name: &str, species: &'a [SpeciesRecord]) -> Option<&'a SpeciesRecord> {
    let wanted = name.to_lowercase();
    species.iter().find(|record| {
        record
            .vernacular_names
            .iter()
            .any(|vernacular| vernacular.name.to_lowercase() == wanted)
    })
}

/// Lowercased vernacular name → position of the first record that carries it.
///
/// Answers exactly like [`find_by_common_name`] without rescanning the collection.
#[derive(Debug, Default)]
pub struct CommonNameIndex {
    positions: HashMap<String, usize>,
}

impl CommonNameIndex {
    pub fn build(species: &[SpeciesRecord]) -> Self {
        let mut positions = HashMap::new();
        for (position, record) in species.iter().enumerate() {
            for vernacular in &record.vernacular_names {
                positions
                    .entry(vernacular.name.to_lowercase())
                    .or_insert(position);
            }
        }
        Self { positions }
    }

    pub fn get<'a>(&self, name: &str, species: &'a [SpeciesRecord]) -> Option<&'a SpeciesRecord> {
        self.positions
            .get(&name.to_lowercase())
            .and_then(|&position| species.get(position))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
