use anyhow::{Context, Result};
use httpmock::prelude::*;
use mtga::config::toml_config::TomlConfig;
use mtga::core::ConfigProvider;
use mtga::{LocalStorage, MtgIoClient, MtgaEngine, MtgaError, ScoringPipeline, SetCache};
use tempfile::TempDir;

fn eldritch_moon_cards() -> serde_json::Value {
    serde_json::json!({
        "cards": [
            {
                "name": "Ascended Lawmage",
                "manaCost": "{2}{W}{U}",
                "cmc": 4,
                "type": "Creature — Vedalken Wizard",
                "types": ["Creature"],
                "rarity": "Uncommon",
                "text": "Flying, hexproof",
                "power": "3",
                "toughness": "2"
            },
            {
                "name": "Subjugator Angel",
                "manaCost": "{4}{W}{W}",
                "cmc": 6,
                "type": "Creature — Angel",
                "types": ["Creature"],
                "rarity": "Uncommon",
                "text": "Flying\nWhen Subjugator Angel enters the battlefield, tap all creatures your opponents control."
            },
            {
                "name": "Take Inventory",
                "manaCost": "{1}{U}",
                "cmc": 2,
                "type": "Sorcery",
                "types": ["Sorcery"],
                "rarity": "Common",
                "text": "Draw a card, then draw cards equal to the number of cards named Take Inventory in your graveyard."
            },
            {
                "name": "Wastes",
                "type": "Basic Land",
                "types": ["Land"],
                "rarity": "Basic Land"
            }
        ]
    })
}

fn config_for(server: &MockServer, cache_dir: &TempDir) -> TomlConfig {
    let mut config = TomlConfig::default();
    config.catalog.host = server.base_url();
    config.catalog.timeout_seconds = 5;
    config.cache.dir = cache_dir.path().to_path_buf();
    config
}

fn engine_for(config: &TomlConfig) -> Result<MtgaEngine<MtgIoClient, LocalStorage>> {
    let client = MtgIoClient::new(config)?;
    let storage = LocalStorage::new(config.cache_dir());
    Ok(MtgaEngine::new(
        SetCache::new(client, storage),
        ScoringPipeline::standard(config.keyword_table()),
        config.report_threshold(),
    ))
}

#[tokio::test]
async fn test_end_to_end_analyse_with_real_http() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/cards").query_param("set", "EMN");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(eldritch_moon_cards());
        })
        .await;

    let config = config_for(&server, &temp_dir);
    let engine = engine_for(&config)?;

    let mut out: Vec<u8> = Vec::new();
    let reported = engine.analyse("EMN", false, &mut out).await?;

    api_mock.assert_async().await;
    // Wastes has no text, so it picks up both trigger points and no more.
    assert_eq!(reported, 1);
    assert_eq!(
        String::from_utf8(out)?,
        "| Name: Ascended Lawmage | Type: Creature — Vedalken Wizard | Rarity Uncommon  | Score 4\n"
    );

    let cache_file = temp_dir.path().join(".mtga_set_EMN.json");
    assert!(cache_file.exists());
    let cached: serde_json::Value = serde_json::from_slice(&std::fs::read(&cache_file)?)?;
    assert_eq!(cached["cards"].as_array().map(|c| c.len()), Some(4));
    assert_eq!(cached["cards"][0]["score"], 0);

    Ok(())
}

#[tokio::test]
async fn test_second_run_reads_from_cache() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/cards");
            then.status(200).json_body(eldritch_moon_cards());
        })
        .await;

    let config = config_for(&server, &temp_dir);

    let mut first: Vec<u8> = Vec::new();
    engine_for(&config)?.analyse("EMN", false, &mut first).await?;
    let mut second: Vec<u8> = Vec::new();
    engine_for(&config)?.analyse("EMN", false, &mut second).await?;

    api_mock.assert_hits_async(1).await;
    assert_eq!(first, second);

    Ok(())
}

#[tokio::test]
async fn test_refresh_pulls_again() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/cards");
            then.status(200).json_body(eldritch_moon_cards());
        })
        .await;

    let config = config_for(&server, &temp_dir);
    let engine = engine_for(&config)?;

    engine.show_set("EMN", false, &mut std::io::sink()).await?;
    engine.show_set("EMN", true, &mut std::io::sink()).await?;

    api_mock.assert_hits_async(2).await;
    Ok(())
}

#[tokio::test]
async fn test_get_sets_lists_and_caches() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/sets");
            then.status(200).json_body(serde_json::json!({
                "sets": [
                    {"code": "SOI", "name": "Shadows over Innistrad", "type": "expansion", "releaseDate": "2016-04-08"},
                    {"code": "EMN", "name": "Eldritch Moon", "type": "expansion", "releaseDate": "2016-07-22"}
                ]
            }));
        })
        .await;

    let config = config_for(&server, &temp_dir);
    let engine = engine_for(&config)?;

    let mut out: Vec<u8> = Vec::new();
    let listed = engine.list_sets(false, &mut out).await?;
    engine.list_sets(false, &mut std::io::sink()).await?;

    api_mock.assert_hits_async(1).await;
    assert_eq!(listed, 2);
    assert_eq!(
        String::from_utf8(out)?,
        "| Name: Shadows over Innistrad | Code: SOI  |\n| Name: Eldritch Moon | Code: EMN  |\n"
    );
    assert!(temp_dir.path().join(".mtga_sets.json").exists());

    Ok(())
}

#[tokio::test]
async fn test_underscore_set_code_is_fetched_and_cached() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/cards").query_param("set", "DD3_DVD");
            then.status(200).json_body(eldritch_moon_cards());
        })
        .await;

    let config = config_for(&server, &temp_dir);
    let engine = engine_for(&config)?;

    let listed = engine.show_set("DD3_DVD", false, &mut std::io::sink()).await?;

    api_mock.assert_async().await;
    assert_eq!(listed, 4);
    assert!(temp_dir.path().join(".mtga_set_DD3_DVD.json").exists());

    Ok(())
}

#[tokio::test]
async fn test_catalog_failure_produces_no_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/cards");
            then.status(500);
        })
        .await;

    let config = config_for(&server, &temp_dir);
    let engine = engine_for(&config)?;

    let mut out: Vec<u8> = Vec::new();
    let err = engine.analyse("EMN", false, &mut out).await.unwrap_err();

    assert!(matches!(err, MtgaError::CatalogStatusError { status: 500, .. }));
    assert_ne!(err.exit_code(), 0);
    assert!(out.is_empty());
    assert!(!temp_dir.path().join(".mtga_set_EMN.json").exists());

    Ok(())
}

#[tokio::test]
async fn test_failure_keeps_exit_code_through_context() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/cards");
            then.status(503);
        })
        .await;

    let config = config_for(&server, &temp_dir);
    let engine = engine_for(&config)?;

    let err = engine
        .analyse("EMN", false, &mut std::io::sink())
        .await
        .context("Analysis of set EMN failed")
        .unwrap_err();

    assert!(format!("{:#}", err).starts_with("Analysis of set EMN failed: "));
    let cause = err.downcast_ref::<MtgaError>().expect("catalog error survives context");
    assert!(matches!(cause, MtgaError::CatalogStatusError { status: 503, .. }));
    assert_eq!(cause.exit_code(), 2);

    Ok(())
}

#[tokio::test]
async fn test_corrupt_cache_file_is_reported() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join(".mtga_set_EMN.json"), b"not json")?;
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/cards");
            then.status(200).json_body(eldritch_moon_cards());
        })
        .await;

    let config = config_for(&server, &temp_dir);
    let engine = engine_for(&config)?;

    let err = engine.analyse("EMN", false, &mut std::io::sink()).await.unwrap_err();
    assert!(matches!(err, MtgaError::CacheCorruptError { .. }));
    api_mock.assert_hits_async(0).await;

    // --refresh repairs it.
    let reported = engine.analyse("EMN", true, &mut std::io::sink()).await?;
    assert_eq!(reported, 1);

    Ok(())
}
