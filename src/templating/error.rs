//! Schema export errors with miette integration

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Template error")]
#[diagnostic(code(psqlgml::export::template))]
pub struct TemplateError {
    #[source_code]
    src: NamedSource<String>,

    #[label("{}", self.reason)]
    span: Option<SourceSpan>,

    reason: String,

    #[help]
    help: Option<String>,

    #[source]
    source: Option<minijinja::Error>,
}

impl TemplateError {
    pub fn from_minijinja_error(error: minijinja::Error, source: String, name: &str) -> Self {
        let (span, reason, help) = Self::extract_error_info(&error, &source);

        Self {
            src: NamedSource::new(name, source),
            span,
            reason,
            help,
            source: Some(error),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    fn extract_error_info(
        error: &minijinja::Error,
        source: &str,
    ) -> (Option<SourceSpan>, String, Option<String>) {
        let span = match (error.range(), error.line()) {
            (Some(range), _) => Some(SourceSpan::from(range)),
            (None, Some(line)) => Some(SourceSpan::from(Self::line_to_offset(
                source,
                line.saturating_sub(1),
            ))),
            (None, None) => None,
        };

        let detail = error.detail().unwrap_or("unknown");
        let reason = match error.kind() {
            minijinja::ErrorKind::UndefinedError => format!("undefined value: {detail}"),
            minijinja::ErrorKind::SyntaxError => format!("syntax error: {detail}"),
            minijinja::ErrorKind::InvalidOperation => format!("invalid operation: {detail}"),
            minijinja::ErrorKind::UnknownFilter => format!("unknown filter: {detail}"),
            minijinja::ErrorKind::UnknownFunction => format!("unknown function: {detail}"),
            _ => error.to_string(),
        };

        let help = match error.kind() {
            minijinja::ErrorKind::UndefinedError => Some(
                "The schema template is rendered with: name, version, url, description, \
                 entities and links"
                    .to_string(),
            ),
            minijinja::ErrorKind::SyntaxError => Some(
                "Check the MiniJinja template syntax at https://docs.rs/minijinja/".to_string(),
            ),
            _ => None,
        };

        (span, reason, help)
    }

    fn line_to_offset(source: &str, target_line: usize) -> usize {
        source
            .split_inclusive('\n')
            .take(target_line)
            .map(str::len)
            .sum::<usize>()
            .min(source.len())
    }
}

#[derive(Error, Debug, Diagnostic)]
pub enum ExportError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] TemplateError),

    #[error("rendered schema is not valid JSON")]
    #[diagnostic(
        code(psqlgml::export::json),
        help("template output must be a single JSON document")
    )]
    Json(#[source] serde_json::Error),

    #[error("failed to serialize schema as YAML")]
    #[diagnostic(code(psqlgml::export::yaml))]
    Yaml(#[source] serde_yaml::Error),

    #[error("failed to write {path:?}")]
    #[diagnostic(code(psqlgml::export::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
