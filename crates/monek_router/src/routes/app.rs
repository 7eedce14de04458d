//! Shared application state.

use std::sync::Arc;

use monek_connector::{
    codes::NumericCodes, transformers::StoreContext, types::CompletionMode, MonekAuthType,
    MonekClient, MonekPayApi,
};

use crate::{
    configs::settings::{MonekSettings, Settings},
    db::{InMemoryOrderStore, OrderStore},
    errors::ApplicationError,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OrderStore>,
    pub gateway: Arc<dyn MonekPayApi>,
    pub monek: MonekSettings,
    pub store_context: StoreContext,
}

impl AppState {
    /// Wires the live vendor client and a fresh in-memory store from
    /// validated settings.
    pub fn new(settings: &Settings) -> Result<Self, ApplicationError> {
        let auth = match settings.monek.completion_mode {
            CompletionMode::Embedded => MonekAuthType::HeaderKeys {
                api_key: settings.monek.api_key.clone(),
                secret_key: settings.monek.secret_key.clone(),
            },
            CompletionMode::Server => MonekAuthType::BearerToken {
                secret_key: settings.monek.secret_key.clone(),
            },
        };
        let gateway = MonekClient::new(settings.monek.api_base_url.clone(), auth).map_err(
            |error| {
                ApplicationError::InvalidConfigurationValueError(format!(
                    "could not construct the vendor client: {error}"
                ))
            },
        )?;

        Ok(Self::with_parts(
            Arc::new(InMemoryOrderStore::new()),
            Arc::new(gateway),
            settings.monek.clone(),
            store_context_from(settings),
        ))
    }

    /// Assembles state from explicit collaborators; tests inject a stub
    /// gateway and a pre-seeded store through here.
    pub fn with_parts(
        store: Arc<dyn OrderStore>,
        gateway: Arc<dyn MonekPayApi>,
        monek: MonekSettings,
        store_context: StoreContext,
    ) -> Self {
        Self {
            store,
            gateway,
            monek,
            store_context,
        }
    }
}

fn store_context_from(settings: &Settings) -> StoreContext {
    StoreContext {
        codes: NumericCodes::new()
            .with_currency_overrides(settings.codes.currency.clone())
            .with_country_overrides(settings.codes.country.clone()),
        country_code: settings.store.country_code.clone(),
        site_url: settings.store.site_url.clone(),
        basket_summary: settings.store.basket_summary.clone(),
    }
}
