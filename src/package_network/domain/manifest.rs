/// Manifest value object: a dependency file as handed to the parsers
///
/// The file name selects the parser; the content is parsed as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    file_name: String,
    content: String,
}

impl Manifest {
    pub fn new(file_name: String, content: String) -> Self {
        Self { file_name, content }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
