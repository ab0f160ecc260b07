//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**StockBuddy Help**\n\
        Here is a summary of all available commands.\n\n\
        **Movements**\n\
        • `/scenarios [origin]` - Lists the configured movement scenarios.\n\
        • `/move <origin> <type> <code> [quantity] [source] [destination] [remarks]` - Records a movement for a scanned serial or article.\n\n\
        **Stock**\n\
        • `/stock <article>` - Shows the real stock and recent movements of an article.\n\
        • `/alerts` - Lists articles at or below their reorder point.\n\n\
        **Inventory**\n\
        • `/inventory_start <location> [technician]` - Opens a count session.\n\
        • `/inventory_count <id> <code> <counted>` - Records a counted quantity.\n\
        • `/inventory_validate <id>` - Applies the counted quantities to stock.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
