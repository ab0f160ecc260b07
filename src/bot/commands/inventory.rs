//! Inventory Discord commands - start a count, record counted quantities, validate.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            inventory,
            scan::{self, ScanContext, ScanMatch},
        },
        errors::{Error, Result},
    };

    /// Opens an inventory count session at a location.
    #[poise::command(slash_command, prefix_command)]
    pub async fn inventory_start(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Location being counted"]
        #[autocomplete = "autocomplete::autocomplete_origin"]
        location: String,
        #[description = "Technician whose stock is counted"]
        #[autocomplete = "autocomplete::autocomplete_technician"]
        technician: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let technician_id = autocomplete::technician_choice(technician)?;

        let session = inventory::start_inventory(db, &location, technician_id).await?;
        ctx.say(format!(
            "📝 Inventory {} started at {}. Record counts with `/inventory_count {} <code> <counted>`.",
            session.id, session.location, session.id
        ))
        .await?;
        Ok(())
    }

    /// Records the counted quantity of a serial unit or article.
    #[poise::command(slash_command, prefix_command)]
    pub async fn inventory_count(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Inventory id"] inventory_id: i64,
        #[description = "Serial number, MAC address, article number or EAN"] code: String,
        #[description = "Counted quantity (0 if missing)"] counted: i32,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let (article_id, serial_number_id, label) =
            match scan::resolve_code(db, &code, ScanContext::default()).await? {
                ScanMatch::Serial { unit, article } => {
                    (article.id, Some(unit.id), unit.label().to_string())
                }
                ScanMatch::Article(article) => (article.id, None, article.article_number),
            };

        let line =
            inventory::save_inventory_line(db, inventory_id, article_id, serial_number_id, counted)
                .await?;
        ctx.say(format!(
            "✅ {label}: counted {}, system {} (difference {:+})",
            line.counted_quantity,
            line.system_quantity,
            line.discrepancy()
        ))
        .await?;
        Ok(())
    }

    /// Validates an inventory: counted quantities become the new stock.
    #[poise::command(slash_command, prefix_command)]
    pub async fn inventory_validate(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Inventory id"] inventory_id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let session = inventory::validate_inventory(db, inventory_id).await?;
        let lines = inventory::inventory_lines(db, inventory_id).await?;
        let corrected = lines.iter().filter(|line| line.discrepancy() != 0).count();

        ctx.say(format!(
            "✅ Inventory {} at {} validated: {corrected} of {} line(s) corrected.",
            session.id,
            session.location,
            lines.len()
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
