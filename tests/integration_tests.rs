use reel_catalog::{CatalogEngine, CatalogError, LocalStorage, RecordKind, TomlConfig};
use tempfile::TempDir;

const INPUT: &str = "\
PERSON;11111111A;Jane;Doe;+34600000000;jane@example.com;Main street 1;08001;29/07/1980
PERSON;22222222B;John;Roe;+34600000001;john@example.com;Side street 2;08002;01/03/1975
SUBSCRIPTION;1;11111111A;01/01/2025;31/12/2025;Premium;29.95;3
SUBSCRIPTION;2;22222222B;01/02/2025;31/01/2026;Basic;10;1
FILM;Alpha;01:30;5;01/01/2020;7.5;1
FILM;Beta;02:00;3;02/02/2021;8.0;0
FILM;\"Gamma; director's cut\";02:45;5;10/10/2010;6.0;1
";

fn write_input(dir: &TempDir, name: &str, content: &str) {
    std::fs::write(dir.path().join(name), content).unwrap();
}

#[tokio::test]
async fn test_end_to_end_load_and_export() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "catalog.csv", INPUT);

    let mut config = TomlConfig::for_input("catalog.csv");
    config.load.output_path = Some("export".to_string());

    let storage = LocalStorage::new(temp_dir.path());
    let engine = CatalogEngine::new(storage, config);
    let store = engine.run().await.unwrap();

    assert_eq!(store.people_count(), 2);
    assert_eq!(store.subscriptions_count(), 2);
    assert_eq!(store.films_count(), 3);
    assert_eq!(store.free_films_count(), 2);

    let export_dir = temp_dir.path().join("export");
    let films = std::fs::read_to_string(export_dir.join("films.csv")).unwrap();
    assert_eq!(films.lines().count(), 3);
    assert!(films.contains("FILM;\"Gamma; director's cut\";02:45;5;10/10/2010;6.0;1"));

    let free = std::fs::read_to_string(export_dir.join("free_films.csv")).unwrap();
    assert_eq!(free.lines().count(), 2);

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(export_dir.join("summary.json")).unwrap())
            .unwrap();
    assert_eq!(summary["free_film_names"][1], "Gamma; director's cut");
}

#[tokio::test]
async fn test_exported_films_reload_into_an_equal_catalog() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "catalog.csv", INPUT);

    let mut config = TomlConfig::for_input("catalog.csv");
    config.load.output_path = Some("export".to_string());
    config.load.output_formats = vec!["csv".to_string()];
    let original = CatalogEngine::new(LocalStorage::new(temp_dir.path()), config)
        .run()
        .await
        .unwrap();

    let reloaded = CatalogEngine::new(
        LocalStorage::new(temp_dir.path()),
        TomlConfig::for_input("export/films.csv"),
    )
    .run()
    .await
    .unwrap();

    let before: Vec<_> = original.catalog.iter().cloned().collect();
    let after: Vec<_> = reloaded.catalog.iter().cloned().collect();
    assert_eq!(before, after);
    assert_eq!(reloaded.free_films_count(), original.free_films_count());
}

#[tokio::test]
async fn test_no_export_without_output_path() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "catalog.csv", INPUT);

    let engine = CatalogEngine::new(
        LocalStorage::new(temp_dir.path()),
        TomlConfig::for_input("catalog.csv"),
    );
    engine.run().await.unwrap();

    assert!(!temp_dir.path().join("films.csv").exists());
    assert!(!temp_dir.path().join("summary.json").exists());
}

#[tokio::test]
async fn test_missing_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let engine = CatalogEngine::new(
        LocalStorage::new(temp_dir.path()),
        TomlConfig::for_input("missing.csv"),
    );

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, CatalogError::IoError(_)));
}

#[tokio::test]
async fn test_bulk_load_is_fail_fast() {
    let temp_dir = TempDir::new().unwrap();
    let content = "\
PERSON;11111111A;Jane;Doe;+34600000000;jane@example.com;Main street 1;08001;29/07/1980
SUBSCRIPTION;1;99999999Z;01/01/2025;31/12/2025;Premium;29.95;3
FILM;Alpha;01:30;5;01/01/2020;7.5;1
";
    write_input(&temp_dir, "broken.csv", content);

    let engine = CatalogEngine::new(
        LocalStorage::new(temp_dir.path()),
        TomlConfig::for_input("broken.csv"),
    );
    let err = engine.run().await.unwrap_err();

    match &err {
        CatalogError::EntryError { line, .. } => assert_eq!(*line, 2),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(
        err.root(),
        CatalogError::NotFound {
            kind: RecordKind::Person,
            ..
        }
    ));
}

#[tokio::test]
async fn test_custom_delimiter_from_toml() {
    let temp_dir = TempDir::new().unwrap();
    write_input(
        &temp_dir,
        "films.txt",
        "FILM|Alpha|01:30|5|01/01/2020|7.5|1\nFILM|Beta|02:00|3|02/02/2021|8.0|0\n",
    );

    let config = TomlConfig::from_toml_str(
        r#"
[source]
path = "films.txt"
delimiter = "|"
"#,
    )
    .unwrap();

    let store = CatalogEngine::new(LocalStorage::new(temp_dir.path()), config)
        .run()
        .await
        .unwrap();

    assert_eq!(store.films_count(), 2);
    assert_eq!(store.free_films_count(), 1);
}
