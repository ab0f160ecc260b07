//! Catalog business logic - Articles, suppliers and categories.
//!
//! Provides functions for creating, retrieving and updating catalog entries, plus the
//! two primitives every stock flow uses to touch an article's scalar quantity: an
//! atomic delta and an overwrite. Serial-tracked articles keep a scalar quantity of
//! zero; their stock is counted from serial records instead.

use crate::{
    entities::{Article, Category, Supplier, article, category, supplier},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Expr};
use tracing::{debug, warn};

/// Fields required to create an article.
#[derive(Debug, Clone, Default)]
pub struct NewArticle {
    /// Human-readable name
    pub name: String,
    /// Unique article number
    pub article_number: String,
    /// EAN barcode
    pub ean: Option<String>,
    /// Category label
    pub category: Option<String>,
    /// Preferred supplier
    pub supplier_id: Option<i64>,
    /// Initial warehouse quantity (ignored for serial-tracked articles)
    pub stock_quantity: i32,
    /// Minimum stock threshold
    pub stock_minimum: i32,
    /// Maximum stock threshold
    pub stock_maximum: Option<i32>,
    /// Reorder point
    pub reorder_point: i32,
    /// Unit purchase price
    pub purchase_price: Option<f64>,
    /// Unit sale price
    pub sale_price: Option<f64>,
    /// Whether stock is tracked per unit
    pub serial_tracked: bool,
}

fn validate_price(price: Option<f64>, field: &str) -> Result<()> {
    match price {
        Some(value) if !value.is_finite() || value < 0.0 => Err(Error::Config {
            message: format!("Invalid {field}: {value}"),
        }),
        _ => Ok(()),
    }
}

fn validate_thresholds(minimum: i32, maximum: Option<i32>, reorder_point: i32) -> Result<()> {
    for quantity in [minimum, reorder_point, maximum.unwrap_or_default()] {
        if quantity < 0 {
            return Err(Error::InvalidQuantity { quantity });
        }
    }
    if let Some(maximum) = maximum {
        if maximum < minimum {
            return Err(Error::Config {
                message: format!("Maximum stock {maximum} is below minimum stock {minimum}"),
            });
        }
    }
    Ok(())
}

/// Creates an article after validating its fields.
///
/// # Errors
/// Returns an error if:
/// - The name or article number is empty
/// - A quantity or threshold is negative, or a price is negative or not finite
/// - The article number is already used (`DuplicateArticleNumber`)
/// - The database insert fails
pub async fn create_article(db: &DatabaseConnection, new: NewArticle) -> Result<article::Model> {
    if new.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Article name cannot be empty".to_string(),
        });
    }
    if new.article_number.trim().is_empty() {
        return Err(Error::Config {
            message: "Article number cannot be empty".to_string(),
        });
    }
    if new.stock_quantity < 0 {
        return Err(Error::InvalidQuantity {
            quantity: new.stock_quantity,
        });
    }
    validate_thresholds(new.stock_minimum, new.stock_maximum, new.reorder_point)?;
    validate_price(new.purchase_price, "purchase price")?;
    validate_price(new.sale_price, "sale price")?;

    let article_number = new.article_number.trim().to_string();
    if get_article_by_number(db, &article_number).await?.is_some() {
        return Err(Error::DuplicateArticleNumber { article_number });
    }

    let stock_quantity = if new.serial_tracked {
        if new.stock_quantity != 0 {
            warn!(
                "Ignoring initial quantity {} for serial-tracked article {article_number}",
                new.stock_quantity
            );
        }
        0
    } else {
        new.stock_quantity
    };

    let article = article::ActiveModel {
        name: Set(new.name.trim().to_string()),
        article_number: Set(article_number),
        ean: Set(new.ean.map(|ean| ean.trim().to_string())),
        category: Set(new.category),
        supplier_id: Set(new.supplier_id),
        stock_quantity: Set(stock_quantity),
        stock_minimum: Set(new.stock_minimum),
        stock_maximum: Set(new.stock_maximum),
        reorder_point: Set(new.reorder_point),
        purchase_price: Set(new.purchase_price),
        sale_price: Set(new.sale_price),
        serial_tracked: Set(new.serial_tracked),
        ..Default::default()
    };
    article.insert(db).await.map_err(Into::into)
}

/// Finds an article by its unique ID.
pub async fn get_article_by_id<C>(db: &C, article_id: i64) -> Result<Option<article::Model>>
where
    C: ConnectionTrait,
{
    Article::find_by_id(article_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an article by ID, failing with `ArticleNotFound` if it does not exist.
pub async fn require_article<C>(db: &C, article_id: i64) -> Result<article::Model>
where
    C: ConnectionTrait,
{
    get_article_by_id(db, article_id)
        .await?
        .ok_or_else(|| Error::ArticleNotFound {
            reference: article_id.to_string(),
        })
}

/// Finds an article by its exact article number.
pub async fn get_article_by_number<C>(db: &C, article_number: &str) -> Result<Option<article::Model>>
where
    C: ConnectionTrait,
{
    Article::find()
        .filter(article::Column::ArticleNumber.eq(article_number))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all articles, ordered alphabetically by name.
pub async fn list_articles(db: &DatabaseConnection) -> Result<Vec<article::Model>> {
    Article::find()
        .order_by_asc(article::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Updates the stock thresholds of an article.
pub async fn update_article_thresholds(
    db: &DatabaseConnection,
    article_id: i64,
    minimum: i32,
    maximum: Option<i32>,
    reorder_point: i32,
) -> Result<article::Model> {
    validate_thresholds(minimum, maximum, reorder_point)?;

    let mut article: article::ActiveModel = require_article(db, article_id).await?.into();
    article.stock_minimum = Set(minimum);
    article.stock_maximum = Set(maximum);
    article.reorder_point = Set(reorder_point);
    article.update(db).await.map_err(Into::into)
}

/// Adds `delta` to the article's scalar quantity in a single UPDATE statement.
///
/// `UPDATE articles SET quantite_stock = quantite_stock + delta WHERE id = ?`
pub async fn adjust_stock_quantity_atomic<C>(
    db: &C,
    article_id: i64,
    delta: i32,
) -> Result<article::Model>
where
    C: ConnectionTrait,
{
    let current = require_article(db, article_id).await?;
    if current.stock_quantity.checked_add(delta).is_none() {
        return Err(Error::InvalidQuantity { quantity: delta });
    }

    Article::update_many()
        .col_expr(
            article::Column::StockQuantity,
            Expr::col(article::Column::StockQuantity).add(delta),
        )
        .filter(article::Column::Id.eq(article_id))
        .exec(db)
        .await?;

    debug!("Adjusted stock of article {article_id} by {delta}");
    require_article(db, article_id).await
}

/// Overwrites the article's scalar quantity.
pub async fn set_stock_quantity<C>(db: &C, article_id: i64, quantity: i32) -> Result<article::Model>
where
    C: ConnectionTrait,
{
    if quantity < 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let mut article: article::ActiveModel = require_article(db, article_id).await?.into();
    article.stock_quantity = Set(quantity);
    article.update(db).await.map_err(Into::into)
}

/// Creates a supplier.
pub async fn create_supplier(
    db: &DatabaseConnection,
    name: String,
    contact: Option<String>,
    email: Option<String>,
    phone: Option<String>,
) -> Result<supplier::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Supplier name cannot be empty".to_string(),
        });
    }

    supplier::ActiveModel {
        name: Set(name.trim().to_string()),
        contact: Set(contact),
        email: Set(email),
        phone: Set(phone),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves all suppliers, ordered alphabetically by name.
pub async fn list_suppliers(db: &DatabaseConnection) -> Result<Vec<supplier::Model>> {
    Supplier::find()
        .order_by_asc(supplier::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a category.
pub async fn create_category(
    db: &DatabaseConnection,
    name: String,
    description: Option<String>,
) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Category name cannot be empty".to_string(),
        });
    }

    category::ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves all categories, ordered alphabetically by name.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_article_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_article(
            &db,
            NewArticle {
                name: "   ".to_string(),
                article_number: "A-1".to_string(),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = create_article(
            &db,
            NewArticle {
                name: "Cable".to_string(),
                article_number: "A-1".to_string(),
                stock_quantity: -3,
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidQuantity { quantity: -3 })));

        let result = create_article(
            &db,
            NewArticle {
                name: "Cable".to_string(),
                article_number: "A-1".to_string(),
                purchase_price: Some(f64::NAN),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = create_article(
            &db,
            NewArticle {
                name: "Cable".to_string(),
                article_number: "A-1".to_string(),
                stock_minimum: 10,
                stock_maximum: Some(5),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Config { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_article_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let article = create_test_article(&db, "RJ45-CAT6", 20).await?;
        assert_eq!(article.article_number, "RJ45-CAT6");
        assert_eq!(article.stock_quantity, 20);
        assert!(!article.serial_tracked);

        let found = get_article_by_number(&db, "RJ45-CAT6").await?;
        assert_eq!(found.unwrap().id, article.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_article_number_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_article(&db, "RJ45-CAT6", 20).await?;

        let result = create_test_article(&db, "RJ45-CAT6", 5).await;
        assert!(matches!(
            result,
            Err(Error::DuplicateArticleNumber { article_number }) if article_number == "RJ45-CAT6"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_serial_tracked_article_quantity_pinned_to_zero() -> Result<()> {
        let db = setup_test_db().await?;

        let article = create_article(
            &db,
            NewArticle {
                name: "Modem".to_string(),
                article_number: "MODEM-X".to_string(),
                stock_quantity: 12,
                serial_tracked: true,
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(article.stock_quantity, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_stock_quantity_atomic() -> Result<()> {
        let db = setup_test_db().await?;
        let article = create_test_article(&db, "FIBRE-10M", 10).await?;

        let updated = adjust_stock_quantity_atomic(&db, article.id, 5).await?;
        assert_eq!(updated.stock_quantity, 15);

        let updated = adjust_stock_quantity_atomic(&db, article.id, -7).await?;
        assert_eq!(updated.stock_quantity, 8);
        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_stock_quantity_rejects_overflow() -> Result<()> {
        let db = setup_test_db().await?;
        let article = create_test_article(&db, "FIBRE-10M", 10).await?;

        let result = adjust_stock_quantity_atomic(&db, article.id, i32::MAX).await;
        assert!(matches!(result, Err(Error::InvalidQuantity { .. })));
        assert_eq!(require_article(&db, article.id).await?.stock_quantity, 10);
        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_stock_quantity_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = adjust_stock_quantity_atomic(&db, 999, 1).await;
        assert!(matches!(result, Err(Error::ArticleNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_set_stock_quantity_overwrites() -> Result<()> {
        let db = setup_test_db().await?;
        let article = create_test_article(&db, "FIBRE-10M", 10).await?;

        let updated = set_stock_quantity(&db, article.id, 3).await?;
        assert_eq!(updated.stock_quantity, 3);

        let result = set_stock_quantity(&db, article.id, -1).await;
        assert!(matches!(result, Err(Error::InvalidQuantity { quantity: -1 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_article_thresholds() -> Result<()> {
        let db = setup_test_db().await?;
        let article = create_test_article(&db, "FIBRE-10M", 10).await?;

        let updated = update_article_thresholds(&db, article.id, 2, Some(50), 5).await?;
        assert_eq!(updated.stock_minimum, 2);
        assert_eq!(updated.stock_maximum, Some(50));
        assert_eq!(updated.reorder_point, 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_suppliers_and_categories_listed_by_name() -> Result<()> {
        let db = setup_test_db().await?;

        create_supplier(&db, "Zyxel".to_string(), None, None, None).await?;
        create_supplier(&db, "Acome".to_string(), Some("Paul".to_string()), None, None).await?;
        let suppliers = list_suppliers(&db).await?;
        assert_eq!(suppliers.len(), 2);
        assert_eq!(suppliers[0].name, "Acome");

        create_category(&db, "Modems".to_string(), None).await?;
        create_category(&db, "Câbles".to_string(), None).await?;
        let categories = list_categories(&db).await?;
        assert_eq!(categories[0].name, "Câbles");

        let result = create_supplier(&db, String::new(), None, None, None).await;
        assert!(matches!(result, Err(Error::Config { .. })));
        Ok(())
    }
}
