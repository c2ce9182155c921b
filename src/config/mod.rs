#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, FileOverrides};
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
impl TomlConfig {
    /// Command-line paths take precedence over the file.
    pub fn apply_overrides(&mut self, overrides: &FileOverrides) {
        if let Some(products) = &overrides.products {
            self.products.input_path = products.clone();
        }
        if let Some(output) = &overrides.output {
            self.products.output_path = output.clone();
        }
    }
}
