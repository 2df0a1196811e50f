//! Shared context inspection commands.

use anyhow::Result;
use console::style;

use sprite_core::context::window::budget_len;

use crate::state::AppState;

/// Print the rendered context window, or the stored turns with `raw`.
pub async fn show_context(state: &AppState, raw: bool, json: bool) -> Result<()> {
    if raw {
        let turns = state.store.recent_turns().await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&turns)?);
            return Ok(());
        }

        if turns.is_empty() {
            println!("\n  {}\n", style("No turns stored yet.").dim());
            return Ok(());
        }

        println!();
        for turn in &turns {
            println!(
                "  {} {}  {}",
                style(format!("#{}", turn.id)).dim(),
                style(&turn.speaker_id).cyan(),
                turn.content
            );
        }
        println!();
        return Ok(());
    }

    let context = state.store.read_context().await?;

    if json {
        let out = serde_json::json!({
            "context": context,
            "chars": budget_len(&context),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if context.is_empty() {
        println!("\n  {}\n", style("The shared context is empty.").dim());
    } else {
        println!("{context}");
    }
    Ok(())
}

/// Print stored turn count, limits, and database location.
pub async fn context_stats(state: &AppState, json: bool) -> Result<()> {
    let stored = state.store.turn_count().await?;
    let rendered = budget_len(&state.store.read_context().await?);
    let limits = state.store.limits();
    let db_path = state.data_dir.join("sprite.db");

    if json {
        let stats = serde_json::json!({
            "stored_turns": stored,
            "max_turns": limits.max_turns,
            "rendered_chars": rendered,
            "max_chars": limits.max_chars,
            "database": db_path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!();
    println!("  {}", style("Shared context").bold());
    println!();
    println!(
        "  {}  {} / {}",
        style("Turns:").bold(),
        stored,
        limits.max_turns
    );
    println!(
        "  {}  {} / {}",
        style("Chars:").bold(),
        rendered,
        limits.max_chars
    );
    println!(
        "  {}  {}",
        style("Database:").bold(),
        style(db_path.display()).dim()
    );
    println!();
    Ok(())
}
