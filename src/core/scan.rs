//! Scan resolution - Turns a scanned or typed code into one batch line.
//!
//! Codes are tried against serial numbers and MAC addresses first, then against
//! article numbers and EAN barcodes. Units of serial-tracked articles must be
//! scanned one by one; only articles without any serial record may be entered in
//! bulk.

use crate::{
    core::{batch::WorkingBatch, catalog, serial, technician_stock},
    entities::{Article, article, serial_number},
    errors::{Error, Result},
};
use sea_orm::{Condition, QueryOrder, prelude::*};
use tracing::debug;

/// What a code resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanMatch {
    /// A single serial unit and its article
    Serial {
        /// The matched unit
        unit: serial_number::Model,
        /// Its article
        article: article::Model,
    },
    /// A bulk-counted article
    Article(article::Model),
}

/// Flow-specific constraints on scans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanContext {
    /// Source technician of a technician-to-technician transfer; scanned units must
    /// be in their stock
    pub transfer_source: Option<i64>,
}

impl ScanContext {
    /// Constraints for a technician-to-technician transfer out of `technician_id`.
    #[must_use]
    pub const fn transfer_from(technician_id: i64) -> Self {
        Self {
            transfer_source: Some(technician_id),
        }
    }
}

/// Prefers a case-insensitive exact match, else the first candidate.
fn best_match<T>(candidates: Vec<T>, is_exact: impl Fn(&T) -> bool) -> Option<T> {
    let exact = candidates.iter().position(|c| is_exact(c)).unwrap_or(0);
    candidates.into_iter().nth(exact)
}

fn same_code(value: Option<&str>, code: &str) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case(code))
}

/// Resolves `code` to a serial unit or a bulk article.
///
/// # Errors
/// - `NotInSourceStock` when a transfer scans a unit the source technician does not hold
/// - `SerialScanRequired` when an article with serial records is scanned by article code
/// - `UnknownCode` when nothing matches
pub async fn resolve_code<C>(db: &C, code: &str, context: ScanContext) -> Result<ScanMatch>
where
    C: ConnectionTrait,
{
    let code = code.trim();
    if code.is_empty() {
        return Err(Error::UnknownCode {
            code: code.to_string(),
        });
    }

    let units = serial::find_serials_matching(db, code).await?;
    if let Some(unit) = best_match(units, |u| {
        same_code(u.serial.as_deref(), code) || same_code(u.mac_address.as_deref(), code)
    }) {
        if let Some(technician_id) = context.transfer_source {
            let held =
                technician_stock::find_row(db, technician_id, unit.article_id, Some(unit.id))
                    .await?;
            if held.is_none() {
                return Err(Error::NotInSourceStock {
                    serial: unit.label().to_string(),
                    technician_id,
                });
            }
        }

        let article = catalog::require_article(db, unit.article_id).await?;
        debug!("Code '{code}' resolved to serial {}", unit.id);
        return Ok(ScanMatch::Serial { unit, article });
    }

    let articles = Article::find()
        .filter(
            Condition::any()
                .add(article::Column::ArticleNumber.contains(code))
                .add(article::Column::Ean.contains(code)),
        )
        .order_by_asc(article::Column::Id)
        .all(db)
        .await?;
    if let Some(article) = best_match(articles, |a| {
        same_code(Some(&a.article_number), code) || same_code(a.ean.as_deref(), code)
    }) {
        if serial::has_serials(db, article.id).await? {
            return Err(Error::SerialScanRequired {
                article_number: article.article_number,
            });
        }
        debug!("Code '{code}' resolved to article {}", article.id);
        return Ok(ScanMatch::Article(article));
    }

    Err(Error::UnknownCode {
        code: code.to_string(),
    })
}

/// Resolves `code` and returns `batch` with the matching line added.
///
/// `quantity` only applies to bulk articles; a unit always counts as one. Scanning
/// a unit already in the batch is `AlreadyScanned`.
pub async fn scan_into_batch<C>(
    db: &C,
    batch: &WorkingBatch,
    code: &str,
    quantity: i32,
    context: ScanContext,
) -> Result<WorkingBatch>
where
    C: ConnectionTrait,
{
    match resolve_code(db, code, context).await? {
        ScanMatch::Serial { unit, article } => batch.with_serial(article.id, unit.id, unit.label()),
        ScanMatch::Article(article) => {
            batch.with_quantity(article.id, &article.article_number, quantity)
        }
    }
}
