//! # Denomination Catalog
//!
//! The catalog is the consumed collaborator: the engine reads denominations
//! from it and never writes back. In production the catalog rows come from
//! the settings service; here the seam is an async trait with an in-memory
//! implementation backed by configuration.

use async_trait::async_trait;

use cashup_core::{validation, Denomination};

use crate::error::RegisterResult;

/// Read-only source of the drawer's denominations.
#[async_trait]
pub trait DenominationCatalog: Send + Sync {
    /// Returns all denominations in display order.
    async fn denominations(&self) -> RegisterResult<Vec<Denomination>>;
}

/// In-memory catalog validated at construction.
///
/// ## Invariants
/// - At least one denomination
/// - Ids unique, values positive, names non-blank
/// - Entries ordered by `(sort_order, id)`
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    denominations: Vec<Denomination>,
}

impl StaticCatalog {
    /// Validates and sorts the given denominations.
    pub fn new(mut denominations: Vec<Denomination>) -> RegisterResult<Self> {
        validation::validate_catalog(&denominations)?;
        denominations.sort_by_key(|d| (d.sort_order, d.id));

        Ok(StaticCatalog { denominations })
    }
}

#[async_trait]
impl DenominationCatalog for StaticCatalog {
    async fn denominations(&self) -> RegisterResult<Vec<Denomination>> {
        Ok(self.denominations.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegisterError;
    use cashup_core::{CatalogError, DenominationKind, Money};

    fn note(id: i64, value: &str, sort_order: i32) -> Denomination {
        Denomination {
            id,
            name: format!("Rs {} note", value),
            value: Money::parse(value).unwrap(),
            kind: DenominationKind::Note,
            sort_order,
        }
    }

    #[test]
    fn test_catalog_sorts_by_sort_order_then_id() {
        let catalog = StaticCatalog::new(vec![
            note(3, "100", 2),
            note(1, "5000", 1),
            note(2, "1000", 2),
        ])
        .unwrap();

        let ids: Vec<i64> = catalog.denominations.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let err = StaticCatalog::new(Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            RegisterError::Catalog(CatalogError::Empty)
        ));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = StaticCatalog::new(vec![note(1, "5000", 1), note(1, "1000", 2)]).unwrap_err();
        assert!(matches!(
            err,
            RegisterError::Catalog(CatalogError::DuplicateId { id: 1 })
        ));
    }

    #[tokio::test]
    async fn test_trait_returns_the_validated_entries() {
        let catalog = StaticCatalog::new(vec![note(2, "1000", 2), note(1, "5000", 1)]).unwrap();

        let denominations = catalog.denominations().await.unwrap();
        assert_eq!(denominations.len(), 2);
        assert_eq!(denominations[0].id, 1);
    }
}
