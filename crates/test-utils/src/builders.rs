#![allow(dead_code)]

use simple_analysis::config::{Configuration, Projection};

/// Builder for `Configuration` to simplify test setup.
pub struct ConfigurationBuilder {
    config: Configuration,
}

impl ConfigurationBuilder {
    pub fn new(output: &str) -> Self {
        let mut config = Configuration::new("<builder>");
        config.output_artifact_path = output.to_string();
        Self { config }
    }

    pub fn dataset(mut self, name: &str) -> Self {
        self.config.dataset_name = name.to_string();
        self
    }

    pub fn input(mut self, file: &str) -> Self {
        self.config.input_files.push(file.to_string());
        self
    }

    pub fn projection(self, name: &str, expression: &str) -> Self {
        self.filtered_projection(name, expression, "")
    }

    pub fn filtered_projection(mut self, name: &str, expression: &str, filter: &str) -> Self {
        self.config
            .projections
            .insert(Projection {
                name: name.to_string(),
                expression: expression.to_string(),
                filter: filter.to_string(),
            })
            .expect("builder projection names must be unique");
        self
    }

    pub fn build(self) -> Configuration {
        self.config
    }
}

/// Render configuration-file text from parts, one item per line.
pub struct ConfigTextBuilder {
    lines: Vec<String>,
}

impl ConfigTextBuilder {
    pub fn new(output: &str) -> Self {
        Self {
            lines: vec![output.to_string()],
        }
    }

    pub fn line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn blank(self) -> Self {
        self.line("")
    }

    pub fn comment(self, text: &str) -> Self {
        self.line(&format!("# {text}"))
    }

    pub fn build(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}
