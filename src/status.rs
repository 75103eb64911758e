// System status display: database size and counts, model and word lists.

use anyhow::Result;

use crate::config::Config;
use crate::db::SqliteStatisticsStore;
use crate::db::StatisticsStore;
use crate::lexicon::words;

/// Display system status to the terminal.
pub async fn show(config: &Config) -> Result<()> {
    let db_path = &config.db_path;

    if !db_path.exists() {
        println!("Database: not initialized");
        println!("\nRun `sentiment init` to set up the database.");
    } else {
        let file_size = std::fs::metadata(db_path)
            .map(|m| format_bytes(m.len()))
            .unwrap_or_else(|_| "unknown".to_string());
        println!("Database: {} ({})", db_path.display(), file_size);

        let store = SqliteStatisticsStore::new(db_path, config.busy_timeout);
        let results = store.count_results().await?;
        let days = store.recent(u32::MAX).await;
        println!(
            "Classifications: {} recorded across {} days",
            results,
            days.len()
        );

        match store.recent_results(1).await?.first() {
            Some(last) => println!("Last classification: {} ({})", last.timestamp, last.label),
            None => println!("Last classification: never"),
        }
    }

    if config.model_path.exists() {
        println!("Model: {}", config.model_path.display());
    } else {
        println!("Model: not found at {}", config.model_path.display());
        println!("  Set SENTIMENT_MODEL_PATH to the sentiment_model.onnx artifact");
    }

    for path in words::list_paths(&config.wordlist_dir) {
        if path.exists() {
            println!("Word list: {}", path.display());
        } else {
            println!("Word list: {} (will be created on first run)", path.display());
        }
    }

    println!("Translator: {:?} (working language {})", config.translator, config.working_language);

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
