use pantry_match::config::CatalogConfig;
use pantry_match::matcher::{Catalog, CatalogRegistry, Recipe};
use pantry_match::Error;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{tempdir, NamedTempFile};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(name)
}

#[test]
fn test_fixture_catalog_loads() {
    let catalog = Catalog::from_path(fixture("tests/fixtures/recipes.csv")).unwrap();
    let stats = catalog.stats();

    assert_eq!(stats.recipes, 8);
    assert_eq!(stats.skipped_rows, 2);
    assert_eq!(
        catalog.all_ingredients(),
        &[
            "Brine",
            "Cabbage",
            "Crème",
            "Flour",
            "Pepper",
            "Salt",
            "Sugar",
            "Sugar Cane",
            "Water",
            "Yeast",
            "creme",
        ]
    );

    // Blank and unparseable quantities fall back to 1
    let ice = catalog.recipes().iter().find(|r| r.output == "Ice").unwrap();
    assert_eq!(ice.qty, 1);
    let kraut = catalog
        .recipes()
        .iter()
        .find(|r| r.output == "Sauerkraut")
        .unwrap();
    assert_eq!(kraut.qty, 1);

    // Quoted cells are unwrapped
    assert_eq!(
        catalog.recipes()[5],
        Recipe {
            inputs: vec!["Sugar Cane".to_string()],
            output: "Sugar".to_string(),
            qty: 3,
        }
    );

    // Rows without an output or without inputs leave no trace
    assert!(catalog.recipes().iter().all(|r| r.output != "Nothing"));
}

#[test]
fn test_fixture_collision_is_reported() {
    let catalog = Catalog::from_path(fixture("tests/fixtures/recipes.csv")).unwrap();

    assert_eq!(catalog.collisions().len(), 1);
    let collision = &catalog.collisions()[0];
    assert_eq!(collision.key, "creme");
    assert_eq!(collision.replaced, "Crème");
    assert_eq!(collision.kept, "creme");
    assert_eq!(catalog.canonical("creme"), Some("creme"));
}

#[test]
fn test_shipped_manifest_loads() {
    let config = CatalogConfig::from_file(fixture("config/catalogs.yaml")).unwrap();
    let registry = CatalogRegistry::load(&config).unwrap();

    assert_eq!(registry.default_name(), "food");
    assert_eq!(registry.len(), 2);

    let food = registry.default_catalog().unwrap();
    assert!(!food.catalog.is_empty());
    assert_eq!(food.catalog.stats().skipped_rows, 1);

    let refiner = registry.get("refiner").unwrap();
    assert_eq!(refiner.title.as_deref(), Some("Refiner"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = Catalog::from_path(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_manifest_with_empty_catalog_is_rejected() {
    let dir = tempdir().unwrap();

    let mut csv = NamedTempFile::new_in(dir.path()).unwrap();
    write!(
        csv,
        "input1_name,input2_name,input3_name,output_name,output_qty\n,,,Nothing,1\n"
    )
    .unwrap();

    let config = CatalogConfig::single("default", csv.path());
    let err = CatalogRegistry::load(&config).unwrap_err();

    match err {
        Error::Format(msg) => assert!(msg.contains("no recipes parsed")),
        other => panic!("expected format error, got {other:?}"),
    }
}
