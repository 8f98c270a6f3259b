use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "bechdel-scan")]
#[command(about = "Extract screenplay dialogue and run the Bechdel test over a corpus")]
pub struct CliConfig {
    #[arg(long, default_value = "scripts_html")]
    pub scripts_dir: String,

    #[arg(long, default_value = "male.txt")]
    pub male_names: String,

    #[arg(long, default_value = "female.txt")]
    pub female_names: String,

    #[arg(short = 'n', long, default_value = "10")]
    pub num_scripts: usize,

    #[arg(long, default_value = "0.6")]
    pub name_tolerance_ratio: f64,

    #[arg(long, default_value = "50")]
    pub minimum_interactions: usize,

    #[arg(long, help = "Seed for reproducible sampling")]
    pub seed: Option<u64>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "json,csv")]
    pub output_formats: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub extra_male_tags: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub extra_female_tags: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log phase timings and memory usage")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn scripts_dir(&self) -> &str {
        &self.scripts_dir
    }

    fn male_names_path(&self) -> &str {
        &self.male_names
    }

    fn female_names_path(&self) -> &str {
        &self.female_names
    }

    fn num_scripts(&self) -> usize {
        self.num_scripts
    }

    fn name_tolerance_ratio(&self) -> f64 {
        self.name_tolerance_ratio
    }

    fn minimum_interactions(&self) -> usize {
        self.minimum_interactions
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn extra_male_tags(&self) -> &[String] {
        &self.extra_male_tags
    }

    fn extra_female_tags(&self) -> &[String] {
        &self.extra_female_tags
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("scripts_dir", &self.scripts_dir)?;
        validation::validate_path("male_names", &self.male_names)?;
        validation::validate_path("female_names", &self.female_names)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_positive_number("num_scripts", self.num_scripts, 1)?;
        validation::validate_range("name_tolerance_ratio", self.name_tolerance_ratio, 0.0, 1.0)?;
        validation::validate_output_formats("output_formats", &self.output_formats)?;
        Ok(())
    }
}
