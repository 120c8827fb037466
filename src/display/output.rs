use crate::analysis::derive::DerivedHeroStat;
use crate::analysis::view::{Page, Truncated};
use crate::snapshot::PlayerAggregateView;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct HeroRow {
    #[tabled(rename = "#")]
    rank: String,
    hero: String,
    games: String,
    winrate: String,
    kda: String,
}

fn winrate_cell(winrate_pct: f64) -> String {
    let text = format!("{:.1}%", winrate_pct);
    if winrate_pct >= 60.0 {
        text.bright_green().to_string()
    } else if winrate_pct >= 55.0 {
        text.green().to_string()
    } else if winrate_pct >= 50.0 {
        text.yellow().to_string()
    } else if winrate_pct >= 40.0 {
        text.red().to_string()
    } else {
        text.bright_red().to_string()
    }
}

fn kda_cell(kda: f64) -> String {
    let text = format!("{:.2}", kda);
    if kda >= 4.0 {
        text.bright_green().to_string()
    } else if kda >= 3.0 {
        text.green().to_string()
    } else if kda >= 2.0 {
        text.yellow().to_string()
    } else if kda >= 1.0 {
        text.red().to_string()
    } else {
        text.bright_red().to_string()
    }
}

fn hero_rows(stats: &[DerivedHeroStat]) -> Vec<HeroRow> {
    stats
        .iter()
        .enumerate()
        .map(|(idx, stat)| HeroRow {
            rank: format!("{}", idx + 1),
            hero: stat.display_name.clone(),
            games: format!("{}", stat.games),
            winrate: winrate_cell(stat.winrate_pct),
            kda: kda_cell(stat.kda),
        })
        .collect()
}

pub fn display_hero_table(view: &Truncated<DerivedHeroStat>) {
    println!("\n{}", "📊 HERO STATISTICS".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if view.rows.is_empty() {
        println!("{}", "No heroes matched the current filter".yellow());
        return;
    }

    let mut table = Table::new(hero_rows(&view.rows));
    table.with(Style::rounded());
    println!("{}", table);

    if view.has_more {
        println!(
            "\nShowing {} of {} heroes ({} to list every hero)",
            view.rows.len(),
            view.total,
            "--all".bold()
        );
    }

    println!();
}

pub fn display_player_page(page: &Page<PlayerAggregateView>) {
    println!("\n{}", "👥 PLAYER STATISTICS".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if page.rows.is_empty() {
        println!("{}", "No players matched the current filter".yellow());
        return;
    }

    for player in &page.rows {
        println!(
            "{}  {}",
            player.display_name.bold(),
            format!("PiD: {}", player.player_id).dimmed()
        );

        let mut table = Table::new(hero_rows(&player.heroes));
        table.with(Style::rounded());
        println!("{}\n", table);
    }

    println!(
        "{}",
        format!("Page {} of {}", page.current_page, page.total_pages).bold()
    );
    println!();
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
