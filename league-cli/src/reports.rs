use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use league_engine::StandingRow;

fn weekly_cell(points: Option<u32>) -> String {
    points.map_or_else(|| "-".to_string(), |p| p.to_string())
}

pub fn generate_console_report(
    out: &mut dyn Write,
    season: &str,
    rows: &[StandingRow],
) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!("🏆 {season} standings").bright_cyan().bold()
    )?;
    writeln!(out, "{}", "=".repeat(season.len() + 13).cyan())?;

    if rows.is_empty() {
        writeln!(out, "No games recorded yet.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:>4}  {:<20} {:>7} {:>6} {:>6} {:>6} {:>6} {:>5}",
        "#", "Player", "Overall", "Games", "Avg", "Bonus", "Low", "Wins"
    )?;
    for row in rows {
        let name = if row.rank == 1 {
            format!("{:<20}", row.name).green().bold()
        } else {
            format!("{:<20}", row.name).normal()
        };
        writeln!(
            out,
            "{:>4}  {} {:>7} {:>6} {:>6.1} {:>6} {:>6} {:>5}",
            row.rank,
            name,
            row.overall,
            row.games_played,
            row.average,
            row.bonus,
            row.lowest,
            row.wins
        )?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, rows: &[StandingRow]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(rows)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(
    out: &mut dyn Write,
    season: &str,
    rows: &[StandingRow],
) -> Result<()> {
    writeln!(out, "# {season} Standings\n")?;
    if rows.is_empty() {
        writeln!(out, "_No games recorded._")?;
        return Ok(());
    }

    let weeks = rows.first().map_or(0, |row| row.weekly.len());
    let week_headers: String = (1..=weeks).map(|w| format!(" G{w} |")).collect();
    let week_rule: String = (1..=weeks).map(|_| " --: |").collect();
    writeln!(
        out,
        "| # | Player | Overall | Games | Avg | Bonus | Low | Wins |{week_headers}"
    )?;
    writeln!(
        out,
        "|--:|--------|--------:|------:|----:|------:|----:|-----:|{week_rule}"
    )?;
    for row in rows {
        let weekly: String = row
            .weekly
            .iter()
            .map(|&points| format!(" {} |", weekly_cell(points)))
            .collect();
        writeln!(
            out,
            "| {} | {} | {} | {} | {:.1} | {} | {} | {} |{weekly}",
            row.rank,
            row.name,
            row.overall,
            row.games_played,
            row.average,
            row.bonus,
            row.lowest,
            row.wins
        )?;
    }
    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, rows: &[StandingRow]) -> Result<()> {
    let weeks = rows.first().map_or(0, |row| row.weekly.len());
    let mut header = String::from("rank,player_id,name,overall,games,average,bonus,lowest,wins");
    for week in 1..=weeks {
        header.push_str(&format!(",g{week}"));
    }
    writeln!(out, "{header}")?;
    for row in rows {
        let weekly: String = row
            .weekly
            .iter()
            .map(|points| format!(",{}", points.map(|p| p.to_string()).unwrap_or_default()))
            .collect();
        writeln!(
            out,
            "{},{},\"{}\",{},{},{:.1},{},{},{}{weekly}",
            row.rank,
            row.player.0,
            row.name.replace('"', "\"\""),
            row.overall,
            row.games_played,
            row.average,
            row.bonus,
            row.lowest,
            row.wins
        )?;
    }
    Ok(())
}
