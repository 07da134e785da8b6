use crate::i18n::I18n;
use crate::model::AttributeName;
use thiserror::Error;

/// Errors raised by board actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardActionError {
    #[error("attribute '{attribute}' is not writable")]
    NotWritable {
        attribute: AttributeName,
        /// Human readable name taken from the work package schema
        human_name: String,
    },

    #[error("failed to load available values for '{attribute}': {reason}")]
    LoadFailed {
        attribute: AttributeName,
        reason: String,
    },
}

impl BoardActionError {
    pub fn not_writable(attribute: impl Into<AttributeName>, human_name: impl Into<String>) -> Self {
        BoardActionError::NotWritable {
            attribute: attribute.into(),
            human_name: human_name.into(),
        }
    }

    /// Message shown to the user
    pub fn localized(&self, i18n: &I18n) -> String {
        match self {
            BoardActionError::NotWritable { human_name, .. } => i18n.translate(
                "js.boards.error_attribute_not_writable",
                &[("attribute", human_name.as_str())],
            ),
            BoardActionError::LoadFailed { .. } => {
                i18n.translate("js.boards.error_loading_the_list", &[("error_message", &self.to_string())])
            }
        }
    }
}

/// Errors raised while loading default data
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("some configuration data is already loaded")]
    AlreadyLoaded,

    #[error("no default data available for language '{0}'")]
    UnsupportedLanguage(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_writable_is_localized_at_the_boundary() {
        let err = BoardActionError::not_writable("status", "Status");
        assert_eq!(err.to_string(), "attribute 'status' is not writable");

        let en = I18n::new("en");
        assert_eq!(
            err.localized(&en),
            "The work package cannot be moved to this list. The attribute Status is not writable."
        );

        let de = I18n::new("de");
        assert!(err.localized(&de).contains("Status"));
        assert_ne!(err.localized(&de), err.localized(&en));
    }
}
