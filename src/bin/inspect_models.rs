// Registry inspection utility
//
// Purpose: show what the gateway would load at startup, then run one demo
// prediction per pipeline.
// Usage: MODELS_DIR=models cargo run --bin inspect_models

use std::path::PathBuf;

use farm_advisor_rust::predict::{CropPredictor, FertilizerPredictor, YieldPredictor};
use farm_advisor_rust::registry::{EncoderSlot, ModelRegistry};
use farm_advisor_rust::request::{CropRequest, FertilizerRequest, Flag, YieldRequest};

fn main() -> anyhow::Result<()> {
    let models_dir =
        PathBuf::from(std::env::var("MODELS_DIR").unwrap_or_else(|_| "models".to_string()));

    println!("\n=== MODEL REGISTRY: {} ===\n", models_dir.display());
    let registry = ModelRegistry::load(&models_dir);

    for status in registry.summary() {
        match status.reason {
            None => println!("  [present] {}", status.name),
            Some(reason) => println!("  [absent ] {}  ({})", status.name, reason),
        }
    }

    let (present, total) = registry.presence_counts();
    println!("\n{}/{} artifacts present.", present, total);

    for slot in EncoderSlot::ALL {
        if let Some(encoder) = registry.encoder(slot).as_present() {
            println!(
                "  {} vocabulary: {} classes ({} ...)",
                slot.feature_name(),
                encoder.vocabulary_size(),
                encoder.classes().first().map(String::as_str).unwrap_or("")
            );
        }
    }

    println!("\n=== DEMO PREDICTIONS ===\n");

    let crop_request = CropRequest {
        n: 90.0,
        p: 42.0,
        k: 43.0,
        temperature: 20.8,
        humidity: 82.0,
        ph: 6.5,
        rainfall: 202.9,
    };
    match CropPredictor::new(&registry).predict(&crop_request) {
        Ok(prediction) => println!("  crop:       {}", prediction.label),
        Err(err) => println!("  crop:       no answer ({})", err),
    }

    let fertilizer_request = FertilizerRequest {
        temperature: 26.0,
        humidity: 52.0,
        moisture: 38.0,
        soil: "Loamy".to_string(),
        crop: "Maize".to_string(),
        n: 37.0,
        p: 0.0,
        k: 0.0,
    };
    match FertilizerPredictor::new(&registry).predict(&fertilizer_request) {
        Ok(prediction) => println!("  fertilizer: {}", prediction.label),
        Err(err) => println!("  fertilizer: no answer ({})", err),
    }

    let yield_request = YieldRequest {
        region: "East".to_string(),
        crop: "Wheat".to_string(),
        rainfall_mm: 800.0,
        temperature_celsius: 27.0,
        fertilizer_used: Flag::Yes,
        irrigation_used: Flag::No,
        days_to_harvest: 120,
    };
    match YieldPredictor::new(&registry).predict(&yield_request) {
        Ok(prediction) => println!(
            "  yield:      {:.2} t/ha ({})",
            prediction.value,
            prediction.source.as_str()
        ),
        Err(err) => println!("  yield:      no answer ({})", err),
    }

    println!();
    Ok(())
}
