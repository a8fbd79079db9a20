use std::borrow::Borrow;
use std::fmt;

/// Lower-cased device name, the only key the registry accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceId(String);

impl DeviceId {
    /// Folds `raw` into canonical form. Blank names are not devices.
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for DeviceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::DeviceId;

    #[test]
    fn normalize_folds_case_and_trims() {
        let id = DeviceId::normalize("  Backup-NAS ").unwrap();
        assert_eq!(id.as_str(), "backup-nas");
        assert_eq!(id, DeviceId::normalize("BACKUP-nas").unwrap());
    }

    #[test]
    fn normalize_rejects_blank_names() {
        assert!(DeviceId::normalize("").is_none());
        assert!(DeviceId::normalize("   ").is_none());
    }
}
