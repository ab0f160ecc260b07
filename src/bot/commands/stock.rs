//! Stock Discord commands - `stock` and `alerts`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{catalog, report},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Shows the real stock, fill level and recent movements of an article.
    #[poise::command(slash_command, prefix_command)]
    pub async fn stock(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Article number"]
        #[autocomplete = "autocomplete::autocomplete_article_number"]
        article: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(found) = catalog::get_article_by_number(db, article.trim()).await? else {
            ctx.say(format!("❌ Article '{article}' not found.")).await?;
            return Ok(());
        };

        let report = report::generate_article_report(db, found.id, Some(5)).await?;
        let article = &report.article;

        let mut response = format!(
            "📦 **{}** ({})\nWarehouse stock: **{}**",
            article.name, article.article_number, report.real_stock
        );
        if article.serial_tracked {
            response.push_str(" (counted by serial number)");
        }
        if let Some(fill) = report.fill_percent {
            let _ = write!(response, "\n{}", report::format_fill_bar(fill, None));
        }
        let _ = write!(
            response,
            "\nMinimum {} · reorder point {}",
            article.stock_minimum, article.reorder_point
        );
        if report.needs_reorder {
            response.push_str("\n⚠️ At or below reorder point");
        }

        if report.recent_movements.is_empty() {
            response.push_str("\n\nNo movements recorded.");
        } else {
            response.push_str("\n\n**Recent movements**");
            for movement in &report.recent_movements {
                let _ = write!(response, "\n• {}", report::format_movement_summary(movement));
            }
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Lists articles whose warehouse stock is at or below the reorder point.
    #[poise::command(slash_command, prefix_command)]
    pub async fn alerts(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let alerts = report::low_stock_alerts(db).await?;

        if alerts.is_empty() {
            ctx.say("✅ No article below its reorder point.").await?;
            return Ok(());
        }

        let mut response = format!("⚠️ **{} article(s) to reorder**", alerts.len());
        for alert in &alerts {
            let _ = write!(
                response,
                "\n• {} ({}): {} in stock, reorder at {}, {} missing to minimum",
                alert.article.name,
                alert.article.article_number,
                alert.real_stock,
                alert.article.reorder_point,
                alert.shortfall()
            );
        }
        ctx.say(response).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
