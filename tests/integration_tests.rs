use anyhow::Result;
use fruit_etl::core::species;
use fruit_etl::{
    BatchWriter, EtlEngine, FruitPipeline, FruitQueryResult, GeminiClient, InformationRetriever,
    LocalStorage,
};
use httpmock::prelude::*;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn write_species(dir: &Path, species: serde_json::Value) -> Result<String> {
    let path = dir.join("species.json");
    std::fs::write(&path, serde_json::to_vec_pretty(&species)?)?;
    Ok(path.to_str().unwrap().to_string())
}

fn gemini_reply(text: String) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

fn answer_for(fruit: &str, scientific: &str) -> String {
    format!(
        "```json\n{}\n```",
        serde_json::json!({
            "fruit": fruit,
            "scientific_name": scientific,
            "etymology": format!("Etymology of {}", fruit),
            "origin": format!("Origin of {}", fruit),
            "cultivation_practices": format!("Cultivation of {}", fruit)
        })
    )
}

fn build_engine(
    server: &MockServer,
    species_file: &str,
    output_path: &str,
) -> Result<EtlEngine<FruitPipeline<LocalStorage, GeminiClient>>> {
    let model = GeminiClient::new(
        &server.base_url(),
        "gemini-2.5-flash",
        "test-key",
        Duration::from_secs(5),
    )?;
    let species = species::load(species_file)?;
    let pipeline = FruitPipeline::new(
        species,
        InformationRetriever::new(model, false),
        BatchWriter::new(LocalStorage::new(output_path.to_string()), "fruit_batch_{index}.json"),
        3,
    );
    Ok(EtlEngine::new(pipeline))
}

fn read_batch(dir: &Path, index: usize) -> Result<Vec<FruitQueryResult>> {
    let content = std::fs::read_to_string(dir.join(format!("fruit_batch_{}.json", index)))?;
    Ok(serde_json::from_str(&content)?)
}

#[tokio::test]
async fn test_end_to_end_four_fruits_make_two_batches() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let species_file = write_species(
        temp_dir.path(),
        serde_json::json!([
            {"scientificName": "Malus domestica", "vernacularNames": [{"name": "Maçã"}]},
            {"scientificName": "Musa acuminata", "vernacularNames": [{"name": "Banana"}]},
            {"scientificName": "Vitis vinifera", "vernacularNames": [{"name": "Uva"}]},
            {"scientificName": "Pyrus communis", "vernacularNames": [{"name": "Pera"}]}
        ]),
    )?;

    let server = MockServer::start();
    let mut mocks = Vec::new();
    for (fruit, scientific) in [
        ("maçã", "Malus domestica"),
        ("banana", "Musa acuminata"),
        ("uva", "Vitis vinifera"),
        ("pera", "Pyrus communis"),
    ] {
        mocks.push(server.mock(|when, then| {
            when.method(POST)
                .path(GENERATE_PATH)
                .header("x-goog-api-key", "test-key")
                .body_contains(scientific);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(gemini_reply(answer_for(fruit, scientific)));
        }));
    }

    let engine = build_engine(&server, &species_file, &output_path)?;
    let report = engine.run().await?;

    for mock in &mocks {
        mock.assert();
    }
    assert_eq!(report.names_extracted, 4);
    assert_eq!(report.batches_written.len(), 2);

    let first = read_batch(temp_dir.path(), 1)?;
    let second = read_batch(temp_dir.path(), 2)?;
    let fruits: Vec<&str> = first.iter().filter_map(|r| r.fruit()).collect();
    assert_eq!(fruits, vec!["maçã", "banana", "uva"]);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].scientific_name(), Some("Pyrus communis"));
    assert!(!temp_dir.path().join("fruit_batch_3.json").exists());

    // Non-ASCII names are stored as UTF-8 rather than \u escapes.
    let raw = std::fs::read_to_string(temp_dir.path().join("fruit_batch_1.json"))?;
    assert!(raw.contains("\"maçã\""));

    Ok(())
}

#[tokio::test]
async fn test_one_model_failure_keeps_the_rest_of_the_group() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let species_file = write_species(
        temp_dir.path(),
        serde_json::json!([
            {"scientificName": "Malus domestica", "vernacularNames": [{"name": "Maçã"}]},
            {"scientificName": "Musa acuminata", "vernacularNames": [{"name": "Banana"}]},
            {"scientificName": "Vitis vinifera", "vernacularNames": [{"name": "Uva"}]}
        ]),
    )?;

    let server = MockServer::start();
    let apple = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH).body_contains("Malus domestica");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(gemini_reply(answer_for("maçã", "Malus domestica")));
    });
    let banana = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH).body_contains("Musa acuminata");
        then.status(500)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"error": {"code": 500, "message": "Internal error"}}));
    });
    let grape = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH).body_contains("Vitis vinifera");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(gemini_reply("I am not sure about this one.".to_string()));
    });

    let engine = build_engine(&server, &species_file, &output_path)?;
    let report = engine.run().await?;

    apple.assert();
    banana.assert();
    grape.assert();
    assert_eq!(report.items_succeeded, 1);
    assert_eq!(report.items_skipped, 2);

    let batch = read_batch(temp_dir.path(), 1)?;
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].fruit(), Some("maçã"));

    Ok(())
}

#[tokio::test]
async fn test_group_where_every_lookup_fails_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().join("out");
    // Lookup works on untrimmed names, so padded vernacular names never resolve.
    let species_file = write_species(
        temp_dir.path(),
        serde_json::json!([
            {"scientificName": "Psidium guajava", "vernacularNames": [{"name": " Goiaba "}]},
            {"scientificName": "Annona muricata", "vernacularNames": [{"name": "Graviola\t"}]},
            {"scientificName": "Theobroma grandiflorum", "vernacularNames": [{"name": " Cupuaçu"}]}
        ]),
    )?;

    let server = MockServer::start();
    let any_call = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(gemini_reply("{}".to_string()));
    });

    let engine = build_engine(&server, &species_file, output_path.to_str().unwrap())?;
    let report = engine.run().await?;

    any_call.assert_hits(0);
    assert_eq!(report.names_extracted, 3);
    assert_eq!(report.items_skipped, 3);
    assert!(report.batches_written.is_empty());
    assert!(!output_path.exists());

    Ok(())
}

#[tokio::test]
async fn test_missing_species_file_is_fatal() {
    let err = species::load("/no/such/dir/species.json").unwrap_err();
    assert!(matches!(err, fruit_etl::EtlError::NotFound { .. }));
}

#[tokio::test]
async fn test_missing_credential_is_fatal() {
    let err = GeminiClient::new(
        "https://generativelanguage.googleapis.com",
        "gemini-2.5-flash",
        "${GOOGLE_API_KEY}",
        Duration::from_secs(5),
    )
    .unwrap_err();

    assert!(matches!(err, fruit_etl::EtlError::MissingConfigError { .. }));
}
