use anyhow::{Result, anyhow};
use linkup_core::config::{DEFAULT_MODEL, DEFAULT_OLLAMA_URL, MODEL_VAR, OLLAMA_URL_VAR};
use linkup_core::{ConnectionNote, Profile};
use linkup_notegen::OllamaGenerator;
use std::collections::HashMap;

pub fn execute(
    name: Option<String>,
    position: Option<String>,
    prompt: Option<String>,
    model: Option<String>,
) -> Result<()> {
    let base_url =
        std::env::var(OLLAMA_URL_VAR).unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
    let model = model
        .or_else(|| std::env::var(MODEL_VAR).ok())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let generator = OllamaGenerator::new(&base_url, &model);

        if !generator.is_available().await {
            return Err(anyhow!(
                "Could not connect to Ollama at {}. Start it with: ollama run {}",
                base_url,
                model
            ));
        }

        let output = match (prompt, name) {
            // Raw prompt mode: print the completion untouched
            (Some(prompt), _) => generator.complete(&prompt).await?,
            (None, Some(name)) => {
                let profile = Profile {
                    name,
                    url: String::new(),
                    current_position: position,
                    extra: HashMap::new(),
                };
                let raw = generator
                    .complete(&OllamaGenerator::build_prompt(&profile))
                    .await?;
                let note = ConnectionNote::new(&raw);
                if note.was_truncated() {
                    eprintln!("Warning: generated note exceeded the limit and was truncated");
                }
                note.text().to_string()
            }
            (None, None) => unreachable!("clap enforces --name or --prompt"),
        };

        println!("{}", output);
        Ok(())
    })
}
