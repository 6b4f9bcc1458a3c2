use thiserror::Error;

#[derive(Error, Debug)]
pub enum Md2TextError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive is corrupted or invalid: {path}")]
    ArchiveCorrupt { path: String },

    #[error("Archive or extraction path not found: {path}")]
    ArchiveNotFound { path: String },

    #[error("Archive operation failed: {message}")]
    Archive {
        message: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Permission denied: {path}")]
    Permission { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to create output directory: {path}")]
    OutputDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file: {path}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for Md2TextError {
    fn user_message(&self) -> String {
        match self {
            Md2TextError::ArchiveCorrupt { path } => {
                format!("The ZIP file is corrupted or invalid: {}", path)
            }
            Md2TextError::ArchiveNotFound { path } => {
                format!("The ZIP file or extract path was not found: {}", path)
            }
            Md2TextError::Archive { message, .. } => {
                format!("Archive operation failed: {}", message)
            }
            Md2TextError::Permission { path } => {
                format!("Permission denied accessing: {}", path)
            }
            Md2TextError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            Md2TextError::OutputDirectory { path, source } => {
                format!("Error creating output directory {}: {}", path, source)
            }
            Md2TextError::OutputWrite { path, source } => {
                format!("Error writing to output file {}: {}", path, source)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Md2TextError::ArchiveCorrupt { .. } => Some(
                "Verify the archive opens in a zip tool, or re-download it if it was truncated."
                    .to_string(),
            ),
            Md2TextError::ArchiveNotFound { .. } => Some(
                "Check that the path exists and points to a .zip file.".to_string(),
            ),
            Md2TextError::Permission { .. } => Some(
                "Ensure you have read permission on the input and write permission on the output directory."
                    .to_string(),
            ),
            Md2TextError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present."
                    .to_string(),
            ),
            Md2TextError::OutputDirectory { .. } | Md2TextError::OutputWrite { .. } => Some(
                "Choose a different --output path or free up space/permissions on the target directory."
                    .to_string(),
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for Md2TextError {
    fn from(error: toml::de::Error) -> Self {
        Md2TextError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Md2TextError>;
