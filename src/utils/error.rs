use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconError {
    #[error("Workbook decoding failed: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP request to {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("CSV rendering error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Required sheet '{sheet}' is missing from the workbook")]
    MissingSheet { sheet: String },

    #[error("Sheet '{sheet}' has no occupied cells")]
    EmptySheet { sheet: String },

    #[error("Invalid column identifier: '{value}'")]
    InvalidColumn { value: String },

    #[error("Invalid cell range: '{value}'")]
    InvalidRange { value: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Source,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ReconError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Workbook(_) | Self::MissingSheet { .. } | Self::EmptySheet { .. } => {
                ErrorCategory::Input
            }
            Self::Http(_) | Self::HttpStatus { .. } | Self::Io(_) => ErrorCategory::Source,
            Self::InvalidColumn { .. }
            | Self::InvalidRange { .. }
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::Csv(_) | Self::Serialization(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路錯誤可重試
            Self::Http(_) | Self::HttpStatus { .. } => ErrorSeverity::Medium,
            Self::Io(_) | Self::Csv(_) | Self::Serialization(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// Message shown to the person who uploaded the workbook.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingSheet { .. } => "上传的数据表数据格式有误，请检查！".to_string(),
            Self::EmptySheet { sheet } => format!("上传的{}数据表数据异常，请检查", sheet),
            Self::Workbook(_) => "无法读取上传的工作簿，请确认文件格式".to_string(),
            Self::Http(_) | Self::HttpStatus { .. } => "下载工作簿失败，请稍后重试".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::MissingSheet { sheet } => format!(
                "Make sure the workbook contains a sheet named '{}' (check --layout)",
                sheet
            ),
            Self::EmptySheet { sheet } => format!("Fill in sheet '{}' before uploading", sheet),
            Self::Workbook(_) => "Save the file as .xlsx, .xls or .ods and retry".to_string(),
            Self::Http(_) | Self::HttpStatus { .. } => {
                "Check the URL and network connectivity, then retry".to_string()
            }
            Self::Io(_) => "Check that the workbook path exists and is readable".to_string(),
            Self::InvalidColumn { .. } | Self::InvalidRange { .. } => {
                "Use spreadsheet column letters such as 'C' or 'AB'".to_string()
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the layout TOML file".to_string()
            }
            Self::Csv(_) | Self::Serialization(_) => {
                "Retry with --format text".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ReconError>;
