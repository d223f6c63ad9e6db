/// First line of every stored template.
pub const DESCRIPTION_HEADER: &str = "# Description:";

/// A named, described body of starter content for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRecord {
    /// Lowercased; unique within a language.
    pub name: String,
    pub language_id: String,
    pub description: String,
    /// Content lines with their line endings, header stripped.
    pub body: Vec<String>,
}

impl TemplateRecord {
    /// Parse stored content. Files without the description header are
    /// treated as all body with an empty description.
    pub fn parse(name: &str, language_id: &str, content: &str) -> Self {
        let mut lines = content.split_inclusive('\n').peekable();

        let mut description = String::new();
        if lines
            .peek()
            .is_some_and(|first| first.trim_end() == DESCRIPTION_HEADER)
        {
            lines.next();
            if let Some(desc_line) = lines.next() {
                description = desc_line
                    .trim_end()
                    .trim_start_matches('#')
                    .trim()
                    .to_string();
            }
        }

        Self {
            name: name.to_lowercase(),
            language_id: language_id.to_string(),
            description,
            body: lines.map(str::to_string).collect(),
        }
    }

    /// The on-disk form: two header lines, then the body verbatim.
    pub fn to_stored(&self) -> String {
        let mut out = format!("{DESCRIPTION_HEADER}\n# {}\n", self.description);
        out.push_str(&self.body_text());
        out
    }

    pub fn body_text(&self) -> String {
        self.body.concat()
    }
}

/// Descriptions are stored on a single line.
pub fn single_line(description: &str) -> String {
    description.split_whitespace().collect::<Vec<_>>().join(" ")
}
