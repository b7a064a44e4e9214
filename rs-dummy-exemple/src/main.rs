use std::collections::BTreeMap;
use std::sync::Arc;

use rs_dummy_core::{Definition, DefinitionMap, Dummy, LocalizedDefinitions};

#[derive(Debug, Clone, Copy)]
enum Plan {
    Free,
    Pro,
    Enterprise,
}

fn english() -> DefinitionMap {
    let name: Definition = [
        ("first", Definition::from(vec!["Ann", "Bob", "Cecil", "Dana"])),
        ("last", Definition::from(vec!["Smith", "Jones", "Taylor"])),
        // Values can be templates themselves
        ("full", Definition::from("#{name.first} #{name.last}")),
    ]
    .into_iter()
    .collect();

    DefinitionMap::new(
        "en",
        BTreeMap::from([
            ("name".to_owned(), name),
            ("phone".to_owned(), Definition::from(vec!["###-###-####", "(###) ###-####"])),
            ("greeting".to_owned(), Definition::from("Hello")),
        ]),
    )
}

fn french() -> DefinitionMap {
    let name: Definition = [("first", Definition::from(vec!["Amélie", "Benoît"]))]
        .into_iter()
        .collect();

    DefinitionMap::new(
        "fr",
        BTreeMap::from([
            ("name".to_owned(), name),
            ("greeting".to_owned(), Definition::from("Bonjour")),
        ]),
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG=debug to see unresolved keys and generated seeds
    env_logger::init();

    let definitions: Vec<Arc<dyn LocalizedDefinitions>> = vec![english().shared(), french().shared()];

    // Same seed, same data. Drop `.seed(...)` to get a random one
    let mut dummy = Dummy::builder()
        .seed(42)
        .locale(["en", "fr"])
        .build(&definitions)?;

    // '#{key}' uses the first locale having the key
    println!("Greeting: {}", dummy.expression("#{greeting}"));

    // '#{{key}}' pools the values of every locale
    for i in 0..3 {
        println!("Pooled first name {}: {}", i + 1, dummy.expression("#{{name.first}}"));
    }

    // Nested values are expanded, '#' becomes a digit, '\#' stays a '#'
    println!("Contact: {}, {}", dummy.expression("#{name.full}"), dummy.expression("#{phone}"));
    println!("Ticket: {}", dummy.expression("\\#####"));

    // Unknown keys resolve to nothing, broken placeholders are kept as-is
    println!("Unknown: '{}'", dummy.expression("#{name.middle}"));
    println!("Broken: '{}'", dummy.expression("#{name.first"));

    // Convenience helpers share the same random stream
    let names = dummy.list_of(3, |d| d.expression("#{name.first}"));
    println!("Names: {}", names.join(", "));
    let nickname = dummy.chance(1, 3, |d| d.expression("#{name.first}y"))?;
    println!("Nickname: {}", nickname.unwrap_or_else(|| "none".to_owned()));

    // Raw draws for other generators
    let random = dummy.random();
    println!("Id: {}", random.uuid());
    println!("Age: {}", random.next_int_between(18, 80)?);
    println!("Plan: {:?}", random.enum_value(&[Plan::Free, Plan::Pro, Plan::Enterprise]));

    // Unknown locales are rejected when building
    match Dummy::builder().locale(["de"]).build(&definitions) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Expected error: {e}"),
    }

    Ok(())
}
