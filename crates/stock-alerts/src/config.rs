use serde::Deserialize;

/// Alert wording and presentation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Subject of the chatter notes.
    pub subject: String,
    /// Title of the real-time notification.
    pub title: String,
    /// Whether the notification stays on screen until dismissed.
    pub sticky: bool,
}

impl AlertConfig {
    pub const DEFAULT_SUBJECT: &'static str = "Minimum Stock Alert";
    pub const DEFAULT_TITLE: &'static str = "Minimum Stock Reached";
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            subject: Self::DEFAULT_SUBJECT.to_string(),
            title: Self::DEFAULT_TITLE.to_string(),
            sticky: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: AlertConfig = serde_json::from_str(r#"{ "sticky": true }"#).unwrap();
        assert!(cfg.sticky);
        assert_eq!(cfg.subject, "Minimum Stock Alert");
        assert_eq!(cfg.title, "Minimum Stock Reached");
    }

    #[test]
    fn empty_object_is_the_default() {
        let cfg: AlertConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, AlertConfig::default());
    }
}
