use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "esmfix")]
#[command(about = "Resolve relative module specifiers in ESM import/export statements")]
pub struct Config {
    /// Files to process: literal paths, directories, or glob patterns
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Working directory applied before file enumeration
    #[arg(short = 'c', long, default_value = "./")]
    pub cwd: PathBuf,

    /// Filename suffix used to filter files when expanding directories
    /// (e.g. ".js")
    #[arg(long)]
    pub filter: Option<String>,
}

impl Config {
    /// Canonicalize the working directory so every enumerated path is
    /// absolute before any file is touched
    pub fn initialize(&mut self) -> Result<()> {
        debug!("Using working directory: {:?}", self.cwd);
        self.cwd = self
            .cwd
            .canonicalize()
            .with_context(|| format!("invalid working directory {:?}", self.cwd))?;
        Ok(())
    }
}
