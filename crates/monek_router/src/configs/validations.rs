use masking::PeekInterface;
use monek_connector::types::CompletionMode;

use crate::errors::ApplicationError;

impl super::settings::Settings {
    /// Validates the configuration values for the application.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        when(self.server.host.is_empty(), || {
            Err(ApplicationError::InvalidConfigurationValueError(
                "server host must not be empty".into(),
            ))
        })?;

        when(
            !self.monek.api_base_url.starts_with("http://")
                && !self.monek.api_base_url.starts_with("https://"),
            || {
                Err(ApplicationError::InvalidConfigurationValueError(
                    "Monek API base URL must be an http(s) URL".into(),
                ))
            },
        )?;

        when(self.monek.secret_key.peek().is_empty(), || {
            Err(ApplicationError::InvalidConfigurationValueError(
                "Monek secret key must not be empty".into(),
            ))
        })?;

        match self.monek.completion_mode {
            CompletionMode::Embedded => when(self.monek.api_key.peek().is_empty(), || {
                Err(ApplicationError::InvalidConfigurationValueError(
                    "Monek API key must not be empty in embedded mode".into(),
                ))
            })?,
            CompletionMode::Server => when(self.monek.merchant_id.is_empty(), || {
                Err(ApplicationError::InvalidConfigurationValueError(
                    "Monek merchant id must not be empty in server completion mode".into(),
                ))
            })?,
        }

        when(self.store.country_code.len() != 2, || {
            Err(ApplicationError::InvalidConfigurationValueError(
                "store country code must be an alpha-2 code".into(),
            ))
        })
    }
}

fn when<F>(predicate: bool, f: F) -> Result<(), ApplicationError>
where
    F: FnOnce() -> Result<(), ApplicationError>,
{
    if predicate {
        f()
    } else {
        Ok(())
    }
}
