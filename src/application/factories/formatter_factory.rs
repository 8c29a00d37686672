use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::NetworkFormatter;

/// Selects the network formatter for a run
///
/// The JSON shape is fixed: packages without vulnerability data simply carry
/// none. The Markdown report is prose, so it needs to know whether the
/// vulnerability lookup ran at all.
pub struct FormatterFactory;

impl FormatterFactory {
    /// # Examples
    /// ```
    /// use package_network::application::dto::OutputFormat;
    /// use package_network::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Markdown, false);
    /// ```
    pub fn create(format: OutputFormat, vulnerabilities_checked: bool) -> Box<dyn NetworkFormatter> {
        match (format, vulnerabilities_checked) {
            (OutputFormat::Json, _) => Box::new(JsonFormatter::new()),
            (OutputFormat::Markdown, true) => Box::new(MarkdownFormatter::new()),
            (OutputFormat::Markdown, false) => Box::new(MarkdownFormatter::without_vulnerability_check()),
        }
    }

    pub fn progress_message(format: OutputFormat) -> String {
        format!("📝 Generating {} format output...", format.label())
    }
}
