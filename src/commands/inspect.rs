use miette::Result;
use clap::Subcommand;
use std::path::PathBuf;

use psqlgml::flavors::FlavorRegistry;

#[derive(Debug, Subcommand)]
pub enum InspectTarget {
    /// List the entity types of a dictionary, or the associations of one type
    Dictionary {
        #[arg(short, long, default_value = "GPAS")]
        dictionary: String,

        /// Entity type whose associations to list
        label: Option<String>,
    },

    /// Print the merged content of a data graph
    Graph {
        #[arg(long)]
        data_dir: PathBuf,

        #[arg(short = 'f', long = "file")]
        file: String,
    },
}

pub fn inspect_command(registry: &FlavorRegistry, target: InspectTarget) -> Result<()> {
    match target {
        InspectTarget::Dictionary { dictionary, label } => {
            let flavor = psqlgml::resolve_dictionary(registry, &dictionary)?;
            let dictionary = flavor.dictionary();

            match label {
                Some(label) => {
                    if dictionary.entity(&label).is_none() {
                        miette::bail!(
                            "Entity type not found in {} {}: {}",
                            dictionary.name(),
                            dictionary.version(),
                            label
                        );
                    }
                    for association in dictionary.associations(&label) {
                        println!("{association}");
                    }
                }
                None => {
                    println!("{} {}", dictionary.name(), dictionary.version());
                    for label in dictionary.labels() {
                        println!("  {label}");
                    }
                }
            }
        }
        InspectTarget::Graph { data_dir, file } => {
            let graph = psqlgml::merge_graph(&data_dir, &file)?;
            println!("{graph}");
        }
    }

    Ok(())
}
