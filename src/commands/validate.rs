use miette::{Result, WrapErr};
use colored::Colorize;
use std::path::Path;

use psqlgml::flavors::FlavorRegistry;
use psqlgml::validation::{Severity, ValidationReport, ValidatorSelection};

pub fn validate_command(
    registry: &FlavorRegistry,
    dictionary: &str,
    data_dir: &Path,
    file: &str,
    selection: ValidatorSelection,
) -> Result<()> {
    let flavor = psqlgml::resolve_dictionary(registry, dictionary)?;
    let payload = psqlgml::load_all(data_dir, file)
        .wrap_err_with(|| format!("Failed to load {file} from {}", data_dir.display()))?;

    let report = psqlgml::run_validators(selection, &payload, &flavor);
    print_report(&report, flavor.name());

    if report.has_errors() {
        miette::bail!(
            "Validation failed: {} error(s), {} warning(s), {} failed validator(s)",
            report.error_count(),
            report.warning_count(),
            report.diagnostics.len()
        );
    }

    println!("\n{} All validations passed!", "OK".green().bold());
    Ok(())
}

fn print_report(report: &ValidationReport, flavor: &str) {
    for (resource, violations) in &report.violations {
        let header = format!("{resource}: {flavor}");
        if violations.is_empty() {
            println!("{}", header.green());
        } else {
            println!("{}", header.red());
        }

        for violation in violations {
            let location = format!("\t{} - {}:", violation.validator, violation.path);
            let location = match violation.severity {
                Severity::Error => location.red(),
                Severity::Warning => location.yellow(),
            };
            println!("{location} {}", violation.message.dimmed());
        }
    }

    for diagnostic in &report.diagnostics {
        eprintln!("{}: {diagnostic}", "error".red().bold());
    }
}
