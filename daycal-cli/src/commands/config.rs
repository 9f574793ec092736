use anyhow::Result;
use daycal_core::config::{DaycalConfig, StoreLayout};
use daycal_core::store::DAYS_DIR;
use owo_colors::OwoColorize;

pub fn run(config: &DaycalConfig) -> Result<()> {
    let config_path = DaycalConfig::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "(unavailable)".to_string());

    let days_dir = match config.data_path() {
        Some(root) => root.join(DAYS_DIR).display().to_string(),
        None => "(unavailable, events are not saved)".red().to_string(),
    };

    let layout = match config.layout {
        StoreLayout::Lines => "lines (one file per day)",
        StoreLayout::EventFiles => "event-files (one file per event)",
    };

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path);
    println!("  Calendar:   {}", config.display_path().display());
    println!("  Days:       {}", days_dir);
    println!("  Layout:     {}", layout);

    println!();
    println!("{}", "Categories".bold());
    for category in &config.categories {
        println!("  {:<12} {}", category.name, category.color.dimmed());
    }

    Ok(())
}
