//! Working batch - Lines accumulated before a movement or an inventory is saved.
//!
//! A batch is a plain value. Adding a line returns a new batch and leaves the
//! original untouched, so a rejected scan never corrupts what was entered so far.

use crate::errors::{Error, Result};

/// One line of a batch: either a single serial unit or a bulk quantity of an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchLine {
    /// Article of the line
    pub article_id: i64,
    /// Unit of the line, for serial-tracked articles
    pub serial_number_id: Option<i64>,
    /// Display label (serial, MAC address or article number)
    pub label: String,
    /// Quantity moved or counted (1 for a unit)
    pub quantity: i32,
}

/// Immutable list of lines being prepared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingBatch {
    lines: Vec<BatchLine>,
}

impl WorkingBatch {
    /// An empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in entry order.
    #[must_use]
    pub fn lines(&self) -> &[BatchLine] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the batch has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the unit is already in the batch.
    #[must_use]
    pub fn contains_serial(&self, serial_number_id: i64) -> bool {
        self.lines
            .iter()
            .any(|line| line.serial_number_id == Some(serial_number_id))
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| i64::from(line.quantity)).sum()
    }

    /// Returns a batch with one more serial unit.
    ///
    /// # Errors
    /// `AlreadyScanned` if the unit is already in the batch.
    pub fn with_serial(&self, article_id: i64, serial_number_id: i64, label: &str) -> Result<Self> {
        if self.contains_serial(serial_number_id) {
            return Err(Error::AlreadyScanned {
                serial: label.to_string(),
            });
        }

        let mut lines = self.lines.clone();
        lines.push(BatchLine {
            article_id,
            serial_number_id: Some(serial_number_id),
            label: label.to_string(),
            quantity: 1,
        });
        Ok(Self { lines })
    }

    /// Returns a batch with `quantity` more of a bulk article.
    ///
    /// An existing bulk line for the same article is incremented instead of
    /// duplicated.
    ///
    /// # Errors
    /// `InvalidQuantity` unless `quantity` is positive and the merged line fits.
    pub fn with_quantity(&self, article_id: i64, label: &str, quantity: i32) -> Result<Self> {
        if quantity <= 0 {
            return Err(Error::InvalidQuantity { quantity });
        }

        let mut lines = self.lines.clone();
        if let Some(line) = lines
            .iter_mut()
            .find(|line| line.article_id == article_id && line.serial_number_id.is_none())
        {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or(Error::InvalidQuantity { quantity })?;
        } else {
            lines.push(BatchLine {
                article_id,
                serial_number_id: None,
                label: label.to_string(),
                quantity,
            });
        }
        Ok(Self { lines })
    }

    /// Returns a batch without the line at `index` (unchanged if out of range).
    #[must_use]
    pub fn without_line(&self, index: usize) -> Self {
        let lines = self
            .lines
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, line)| line.clone())
            .collect();
        Self { lines }
    }
}
