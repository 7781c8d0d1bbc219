use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use linkup_browser::{BatchRunner, CdpDriver, RunOutcome, SelectorSet};
use linkup_core::{PacingPolicy, ProfileReader, Settings};
use linkup_notegen::OllamaGenerator;
use std::path::Path;
use std::time::Duration;

pub fn execute(
    profiles_path: &Path,
    selectors_path: Option<&Path>,
    headless: bool,
    min_delay: Option<u64>,
    max_delay: Option<u64>,
) -> Result<()> {
    // Configuration is fatal before any automation starts
    let mut settings = Settings::from_env().context("configuration error")?;
    if min_delay.is_some() || max_delay.is_some() {
        settings.pacing = PacingPolicy::new(
            Duration::from_secs(min_delay.unwrap_or(20)),
            Duration::from_secs(max_delay.unwrap_or(40)),
        )?;
    }

    let profiles = ProfileReader::from_file(profiles_path)
        .with_context(|| format!("could not load profiles from {}", profiles_path.display()))?;
    if profiles.is_empty() {
        println!("No profiles to process.");
        return Ok(());
    }
    println!("📋 Loaded {} profiles", profiles.len());

    let selectors = match selectors_path {
        Some(path) => {
            println!("🔧 Using selector overrides from {}", path.display());
            SelectorSet::from_file(path)?
        }
        None => SelectorSet::default(),
    };

    let generator = OllamaGenerator::new(&settings.ollama_url, &settings.model);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let outcomes = runtime.block_on(async {
        println!("🚀 Launching Chrome...");
        let driver = CdpDriver::launch(headless).await?;

        let runner = BatchRunner::new(
            driver,
            settings.credentials.clone(),
            generator,
            selectors,
            settings.pacing,
        );

        let bar = ProgressBar::new(profiles.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}") {
            bar.set_style(style);
        }

        // The runner tears the driver down on every exit path
        let outcomes = runner
            .run_with_progress(&profiles, |outcome| {
                bar.set_message(outcome.name.clone());
                bar.inc(1);
            })
            .await?;
        bar.finish_and_clear();

        Ok::<_, anyhow::Error>(outcomes)
    })?;

    print_summary(&outcomes);

    runtime.shutdown_timeout(Duration::from_millis(100));
    Ok(())
}

fn print_summary(outcomes: &[RunOutcome]) {
    println!();
    for outcome in outcomes {
        if outcome.success {
            println!("  {} {} ({})", style("✓").green(), outcome.name, outcome.url);
        } else {
            println!("  {} {} ({})", style("✗").red(), outcome.name, outcome.url);
        }
    }

    let sent = outcomes.iter().filter(|o| o.success).count();
    println!();
    println!(
        "✅ Sent {} of {} connection requests",
        sent,
        outcomes.len()
    );
}
