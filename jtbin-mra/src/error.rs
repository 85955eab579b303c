/// Errors that can occur while reading MRA descriptors or decoding keys.
#[derive(Debug, thiserror::Error)]
pub enum MraError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Invalid MRA file: {0}")]
    InvalidMra(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl MraError {
    pub fn invalid_mra(msg: impl Into<String>) -> Self {
        Self::InvalidMra(msg.into())
    }

    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKey(msg.into())
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}
