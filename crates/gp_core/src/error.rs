use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The generative source could not be reached or refused the credentials.
    #[error("Uplink failure: {0}")]
    Uplink(String),

    /// The generative source answered with data that could not be repaired.
    #[error("Corrupt response: {0}")]
    CorruptResponse(String),

    /// Writing a freshly fetched list back to the persisted store failed.
    #[error("Sync failure: {0}")]
    Sync(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A newer load cycle started before this one completed.
    #[error("Load cycle {0} was superseded by a newer one")]
    Superseded(u64),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// True when the load cycle produced no article list at all.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Uplink(_) | Error::CorruptResponse(_))
    }

    /// The single message shown to the reader when a load cycle fails.
    pub fn user_message(&self) -> String {
        let detail = match self {
            Error::Uplink(msg)
            | Error::CorruptResponse(msg)
            | Error::Sync(msg)
            | Error::Storage(msg) => msg.clone(),
            other => other.to_string(),
        };
        if detail.trim().is_empty() {
            "SATELLITE INTERRUPT: Signal lost.".to_string()
        } else {
            format!("SATELLITE INTERRUPT: {}", detail)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(Error::Uplink("down".to_string()).is_fatal());
        assert!(Error::CorruptResponse("bad".to_string()).is_fatal());
        assert!(!Error::Sync("write failed".to_string()).is_fatal());
        assert!(!Error::Superseded(3).is_fatal());
    }

    #[test]
    fn test_user_message_keeps_detail() {
        let msg = Error::Uplink("Signal lost.".to_string()).user_message();
        assert_eq!(msg, "SATELLITE INTERRUPT: Signal lost.");

        let msg = Error::CorruptResponse(String::new()).user_message();
        assert!(msg.contains("Signal lost."));
    }
}
