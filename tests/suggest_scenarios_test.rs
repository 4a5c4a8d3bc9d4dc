// End-to-end matching: raw text -> resolved names -> makeable recipes
use pantry_match::matcher::{resolve, suggest, Catalog, Recipe};
use pantry_match::utils::split_terms;

const HEADER: &str = "input1_name,input2_name,input3_name,output_name,output_qty\n";

fn catalog(rows: &str) -> Catalog {
    Catalog::from_reader(format!("{HEADER}{rows}").as_bytes()).unwrap()
}

fn outputs(recipes: &[&Recipe]) -> Vec<String> {
    recipes.iter().map(|r| r.output.clone()).collect()
}

#[test]
fn test_exact_terms_make_brine() {
    let catalog = catalog("Salt,Water,,Brine,2\n");

    let resolution = resolve(&catalog, &["salt", "water"]);
    assert_eq!(resolution.mapped, vec!["Salt", "Water"]);
    assert!(resolution.unknown.is_empty());

    let recipes = suggest(&catalog, &resolution.mapped);
    assert_eq!(
        recipes,
        vec![&Recipe {
            inputs: vec!["Salt".to_string(), "Water".to_string()],
            output: "Brine".to_string(),
            qty: 2,
        }]
    );
}

#[test]
fn test_typo_resolves_to_nearest_ingredient() {
    let catalog = catalog("Salt,Water,,Brine,2\n");

    let resolution = resolve(&catalog, &["saltt"]);
    assert_eq!(resolution.mapped, vec!["Salt"]);
    assert!(resolution.unknown.is_empty());
}

#[test]
fn test_unrelated_term_is_unknown() {
    let catalog = catalog("Salt,Water,,Brine,2\n");

    let resolution = resolve(&catalog, &["xyz123unrelated"]);
    assert!(resolution.mapped.is_empty());
    assert_eq!(resolution.unknown, vec!["xyz123unrelated"]);
}

#[test]
fn test_empty_query_suggests_nothing() {
    let catalog = catalog("Salt,Water,,Brine,2\n");

    let resolution = resolve::<&str>(&catalog, &[]);
    assert!(resolution.mapped.is_empty());
    assert!(resolution.unknown.is_empty());
    assert!(suggest::<String>(&catalog, &[]).is_empty());
}

#[test]
fn test_partial_ingredients_make_nothing() {
    let catalog = catalog("Salt,Water,,Brine,2\nSalt,Pepper,,Seasoning,1\n");

    let resolution = resolve(&catalog, &["salt"]);
    assert_eq!(resolution.mapped, vec!["Salt"]);
    assert!(suggest(&catalog, &resolution.mapped).is_empty());
}

#[test]
fn test_row_without_output_leaves_no_ingredients() {
    let catalog = catalog("Salt,Water,,Brine,2\nSaffron,Honey,,,1\n");

    assert_eq!(catalog.all_ingredients(), &["Salt", "Water"]);
    assert!(catalog.recipes_using("Saffron").is_empty());

    let resolution = resolve(&catalog, &["saffron", "honey"]);
    assert!(resolution.mapped.is_empty());
    assert_eq!(resolution.unknown, vec!["saffron", "honey"]);
}

#[test]
fn test_free_text_query_against_shipped_food_catalog() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/food.csv");
    let catalog = Catalog::from_path(path).unwrap();

    let terms = split_terms("  MILK; sugar,\ncustrd , jalapeno, water, salt,, unobtainium");
    let resolution = resolve(&catalog, &terms);

    assert_eq!(
        resolution.mapped,
        vec!["Milk", "Sugar", "Custard", "Jalapeño", "Water", "Salt"]
    );
    assert_eq!(resolution.unknown, vec!["unobtainium"]);

    assert_eq!(
        outputs(&suggest(&catalog, &resolution.mapped)),
        vec!["Butter", "Custard", "Cheese", "Crème Brûlée", "Hot Sauce", "Brine", "Ice"]
    );
}
