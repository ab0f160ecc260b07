//! Location classification and the `emplacements` reference list.
//!
//! Location labels are free text chosen by users. What matters to stock logic is
//! which store a label refers to: the central warehouse, a technician's stock, or
//! somewhere outside the managed stock (client site, supplier, scrap).

use crate::{
    config::stock::LocationConfig,
    entities::{Location, location},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Label of the central warehouse, where receptions land.
pub const WAREHOUSE_LOCATION: &str = "Entrepot";

/// Label of the supplier side of a reception.
pub const SUPPLIER_LOCATION: &str = "Fournisseur";

/// Which stock store a location label refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    /// Central warehouse: the article's scalar quantity
    Warehouse,
    /// Technician stock rows
    Technician,
    /// Outside the managed stock
    External,
}

impl LocationKind {
    /// Classifies a label by keyword, ignoring case and French accents.
    ///
    /// "Stock technicien" is `Technician`, "Entrepôt" or "Dépôt central" is
    /// `Warehouse`, anything else is `External`.
    #[must_use]
    pub fn classify(label: &str) -> Self {
        let folded = fold_label(label);
        if folded.contains("technicien") {
            Self::Technician
        } else if folded.contains("entrepot") || folded.contains("depot") {
            Self::Warehouse
        } else {
            Self::External
        }
    }

    /// Whether the label designates technician stock.
    #[must_use]
    pub fn is_technician(label: &str) -> bool {
        Self::classify(label) == Self::Technician
    }
}

/// Lowercases and strips the accents found in French location and type labels.
pub(crate) fn fold_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' => 'i',
            'ô' | 'ö' => 'o',
            'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// Lists the reference locations, ordered by name.
pub async fn list_locations(db: &DatabaseConnection) -> Result<Vec<location::Model>> {
    Location::find()
        .order_by_asc(location::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Inserts configured locations that are not in the database yet.
///
/// Returns the number of locations inserted.
pub async fn seed_locations(db: &DatabaseConnection, locations: &[LocationConfig]) -> Result<usize> {
    let mut inserted = 0;
    for config in locations {
        let existing = Location::find()
            .filter(location::Column::Name.eq(config.name.as_str()))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        location::ActiveModel {
            name: Set(config.name.clone()),
            description: Set(config.description.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        inserted += 1;
    }

    if inserted > 0 {
        info!("Seeded {inserted} locations");
    }
    Ok(inserted)
}
