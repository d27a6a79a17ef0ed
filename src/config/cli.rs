use crate::config::layout::{MissingRoomPolicy, ReconLayout, StatusPolicy};
use crate::config::RunConfig;
use crate::domain::ports::OutputFormat;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "port-recon")]
#[command(about = "Reconcile splitter port records against the system export")]
pub struct CliConfig {
    /// Workbook to check: a local .xlsx/.xls/.ods path or an http(s) URL
    pub workbook: String,

    /// TOML file overriding sheet names, column letters and policies
    #[arg(short, long)]
    pub layout: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Keep comparing after a reference room is missing from the export
    #[arg(long)]
    pub skip_missing_rooms: bool,

    /// Report the worst room verdict instead of the last one
    #[arg(long)]
    pub worst_status: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads the layout file (if any) and applies command-line overrides.
    pub fn resolve(&self) -> Result<RunConfig> {
        let mut layout = match &self.layout {
            Some(path) => {
                tracing::debug!("Loading layout from {}", path);
                ReconLayout::from_file(path)?
            }
            None => ReconLayout::default(),
        };

        if self.skip_missing_rooms {
            layout.policy.missing_room = MissingRoomPolicy::Skip;
        }
        if self.worst_status {
            layout.policy.status = StatusPolicy::Worst;
        }

        Ok(RunConfig::new(self.workbook.clone())
            .with_layout(layout)
            .with_format(self.format))
    }
}
