use miette::Result;
use std::path::Path;

use psqlgml::flavors::FlavorRegistry;
use psqlgml::templating::SchemaGenerator;

pub fn generate_command(registry: &FlavorRegistry, dictionary: &str, output: &Path) -> Result<()> {
    let flavor = psqlgml::resolve_dictionary(registry, dictionary)?;

    let stem = SchemaGenerator::new().write(flavor.dictionary(), flavor.name(), output)?;
    println!("Generated {}.json and {}.yaml", stem.display(), stem.display());
    Ok(())
}
