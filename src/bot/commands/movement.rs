//! Movement Discord commands - `scenarios` and `move`.
//!
//! A movement is entered as one scan: the code is resolved to a serial unit or a
//! bulk article, placed in a one-line batch and committed against the scenario
//! chosen by origin and type.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            batch::WorkingBatch,
            location::LocationKind,
            movement::{self, MovementRequest},
            scan::{self, ScanContext},
            scenario,
        },
        entities::scenario as scenario_entity,
        errors::{Error, Result},
    };
    use std::fmt::Write;

    fn scenario_line(scenario: &scenario_entity::Model) -> String {
        let mut line = format!(
            "• {} → **{}** → {}",
            scenario.origin, scenario.movement_type, scenario.destination
        );
        if let Some(participant) = scenario.participant_type.as_deref() {
            let _ = write!(line, " ({participant})");
        }
        if let Some(summary) = scenario.summary.as_deref() {
            let _ = write!(line, " - {summary}");
        }
        line
    }

    /// Lists the configured movement scenarios, optionally for one origin.
    #[poise::command(slash_command, prefix_command)]
    pub async fn scenarios(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show scenarios starting from this location"]
        #[autocomplete = "autocomplete::autocomplete_origin"]
        origin: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let scenarios = match origin.as_deref().map(str::trim) {
            Some(origin) if !origin.is_empty() => {
                scenario::list_types_for_origin(db, origin).await?
            }
            _ => scenario::get_all_scenarios(db).await?,
        };

        if scenarios.is_empty() {
            ctx.say("📋 No scenarios configured. Add `[[scenarios]]` entries to config.toml.")
                .await?;
            return Ok(());
        }

        let mut response = String::from("📋 **Movement scenarios**\n");
        for scenario in &scenarios {
            response.push_str(&scenario_line(scenario));
            response.push('\n');
        }
        ctx.say(response).await?;
        Ok(())
    }

    /// Records a movement for one scanned serial number or article.
    #[poise::command(slash_command, prefix_command, rename = "move")]
    pub async fn move_stock(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Where the goods come from"]
        #[autocomplete = "autocomplete::autocomplete_origin"]
        origin: String,
        #[description = "Movement type"]
        #[autocomplete = "autocomplete::autocomplete_movement_type"]
        movement_type: String,
        #[description = "Serial number, MAC address, article number or EAN"] code: String,
        #[description = "Quantity for bulk articles (default 1)"] quantity: Option<i32>,
        #[description = "Technician the goods leave from"]
        #[autocomplete = "autocomplete::autocomplete_technician"]
        source: Option<String>,
        #[description = "Technician receiving the goods"]
        #[autocomplete = "autocomplete::autocomplete_technician"]
        destination: Option<String>,
        #[description = "Optional remarks"] remarks: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let resolution = scenario::resolve(db, origin.trim(), movement_type.trim()).await?;
        let source_technician_id = autocomplete::technician_choice(source)?;
        let destination_technician_id = autocomplete::technician_choice(destination)?;

        let is_transfer = LocationKind::is_technician(resolution.origin())
            && LocationKind::is_technician(resolution.destination());
        let context = match source_technician_id {
            Some(technician_id) if is_transfer => ScanContext::transfer_from(technician_id),
            _ => ScanContext::default(),
        };

        let batch = scan::scan_into_batch(
            db,
            &WorkingBatch::new(),
            &code,
            quantity.unwrap_or(1),
            context,
        )
        .await?;

        let request = MovementRequest {
            source_technician_id,
            destination_technician_id,
            remarks,
            batch,
        };
        let receipt = movement::record_movement(db, &resolution, &request).await?;

        let mut response = format!(
            "✅ Recorded `{}`: {} → {}",
            receipt.movement_code,
            resolution.origin(),
            resolution.destination()
        );
        for line in request.batch.lines() {
            let _ = write!(response, "\n• {} x{}", line.label, line.quantity);
        }
        if !resolution.is_resolved() {
            response.push_str("\n⚠️ No scenario configured for this origin and type.");
        }
        ctx.say(response).await?;
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_scenario_line() {
            let scenario = scenario_entity::Model {
                id: 1,
                origin: "Entrepot".to_string(),
                movement_type: "Sortie technicien".to_string(),
                destination: "Stock technicien".to_string(),
                participant_type: Some("technicien".to_string()),
                origin_action: None,
                destination_action: None,
                summary: None,
                stock_effect: None,
            };
            assert_eq!(
                scenario_line(&scenario),
                "• Entrepot → **Sortie technicien** → Stock technicien (technicien)"
            );
        }
    }
}

// Re-export all commands
pub use inner::*;
