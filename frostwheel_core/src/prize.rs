use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{WheelError, WheelResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Prize {
    pub id: String,
    pub label: String,
    pub value: String,
    pub color: String, // hex, e.g. "#38bdf8"
    pub icon: String,
}

impl Prize {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
        color: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: value.into(),
            color: color.into(),
            icon: icon.into(),
        }
    }
}

/// Ordered, validated prize list. Slice `i` of the wheel belongs to `prizes()[i]`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Catalog {
    prizes: Vec<Prize>,
}

impl Catalog {
    /// Rejects an empty list and duplicate ids; the engine relies on both.
    pub fn new(prizes: Vec<Prize>) -> WheelResult<Self> {
        if prizes.is_empty() {
            return Err(WheelError::EmptyCatalog);
        }
        let mut seen = HashSet::with_capacity(prizes.len());
        for prize in &prizes {
            if !seen.insert(prize.id.as_str()) {
                return Err(WheelError::DuplicatePrizeId(prize.id.clone()));
            }
        }
        Ok(Self { prizes })
    }

    pub fn winter() -> Self {
        let prizes = vec![
            Prize::new("1", "Frozen Chest", "chest", "#e0f2fe", "🧊"),
            Prize::new("2", "Snowball x10", "10", "#bae6fd", "❄️"),
            Prize::new("3", "Arctic Gem", "gem", "#7dd3fc", "💎"),
            Prize::new("4", "Hot Cocoa", "cocoa", "#38bdf8", "☕"),
            Prize::new("5", "Yeti Hug", "0", "#0ea5e9", "🐾"),
            Prize::new("6", "Ice Skates", "skates", "#0284c7", "⛸️"),
            Prize::new("7", "Magic Sled", "sled", "#0369a1", "🛷"),
            Prize::new("8", "Jack Frost", "jackpot", "#f8fafc", "☃️"),
        ];
        Self { prizes }
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    pub fn get(&self, index: usize) -> Option<&Prize> {
        self.prizes.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.prizes.iter().position(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.prizes.len()
    }

    // Never true for a constructed catalog; kept for the usual len/is_empty pair.
    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::winter()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let prizes = Vec::<Prize>::deserialize(deserializer)?;
        Catalog::new(prizes).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winter_catalog_is_valid() {
        let catalog = Catalog::winter();
        assert_eq!(catalog.len(), 8);
        assert!(Catalog::new(catalog.prizes().to_vec()).is_ok());
        assert_eq!(catalog.position("6"), Some(5));
    }

    #[test]
    fn rejects_empty_and_duplicates() {
        assert!(matches!(Catalog::new(vec![]), Err(WheelError::EmptyCatalog)));
        let dup = vec![
            Prize::new("a", "A", "1", "#000000", "x"),
            Prize::new("a", "B", "2", "#ffffff", "y"),
        ];
        match Catalog::new(dup) {
            Err(WheelError::DuplicatePrizeId(id)) => assert_eq!(id, "a"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
