//! Remote translation fetch with LocalStorage caching
//!
//! One operation: switch the UI language. The base language ships with the
//! game and needs no network; any other language is fetched once from the
//! translation endpoint, parsed, persisted, and cached in memory. No retry,
//! no timeout; a failed fetch simply leaves the base strings in place.
//!
//! Split into a pure planning/completion layer (testable anywhere) and a
//! wasm-only `refresh` that performs the actual network call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::platform::KeyValueStore;

/// Translation project identifier on the remote service
pub const PROJECT_ID: &str = "cm22i5ee40001fah01iuyeqdp";

const ENDPOINT: &str = "https://traducila.vercel.app/api/translations";
const STORAGE_KEY: &str = "translations";

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    /// Base language; its strings ship with the game
    #[default]
    #[serde(rename = "es_AR")]
    EsAr,
    #[serde(rename = "en_US")]
    EnUs,
    #[serde(rename = "de_DE")]
    DeDe,
    #[serde(rename = "pt_BR")]
    PtBr,
}

impl Language {
    pub fn as_code(&self) -> &'static str {
        match self {
            Language::EsAr => "es_AR",
            Language::EnUs => "en_US",
            Language::DeDe => "de_DE",
            Language::PtBr => "pt_BR",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "es_AR" => Some(Language::EsAr),
            "en_US" => Some(Language::EnUs),
            "de_DE" => Some(Language::DeDe),
            "pt_BR" => Some(Language::PtBr),
            _ => None,
        }
    }
}

/// What a language switch requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPlan {
    /// Base language: nothing to fetch
    CachedBase,
    /// One GET against this URL
    Remote(String),
}

/// Owns the translation cache and its backing store.
///
/// Replaces the module-level `translations`/`language` globals of a typical
/// fetch helper with an explicitly scoped service the shell constructs once.
pub struct TranslationService {
    language: Language,
    store: KeyValueStore,
    cache: Option<Value>,
}

impl TranslationService {
    pub fn new(store: KeyValueStore) -> Self {
        Self {
            language: Language::default(),
            store,
            cache: None,
        }
    }

    /// Currently selected language
    pub fn language(&self) -> Language {
        self.language
    }

    /// In-memory translation payload, if a fetch has completed
    pub fn translations(&self) -> Option<&Value> {
        self.cache.as_ref()
    }

    /// Endpoint URL for a language
    pub fn translation_url(language: Language) -> String {
        format!("{ENDPOINT}/{PROJECT_ID}/{}", language.as_code())
    }

    /// Begin a language switch: bust the entire store (the cache key and
    /// everything else in it, matching the original service's behavior),
    /// record the language, and report whether a network call is needed.
    pub fn prepare(&mut self, language: Language) -> FetchPlan {
        self.store.clear();
        self.cache = None;
        self.language = language;

        if language == Language::default() {
            log::info!("base language selected, using bundled strings");
            FetchPlan::CachedBase
        } else {
            FetchPlan::Remote(Self::translation_url(language))
        }
    }

    /// Finish a language switch with the fetched response body: parse it,
    /// persist it, and cache it
    pub fn complete(&mut self, body: &str) -> Result<(), serde_json::Error> {
        let data: Value = serde_json::from_str(body)?;
        self.store.set(STORAGE_KEY, &serde_json::to_string(&data)?);
        self.cache = Some(data);
        Ok(())
    }

    /// Switch languages, fetching from the remote endpoint when needed.
    /// Returns whether a network call was made. Errors are the raw rejected
    /// operation; there is no retry or timeout.
    #[cfg(target_arch = "wasm32")]
    pub async fn refresh(&mut self, language: Language) -> Result<bool, wasm_bindgen::JsValue> {
        use wasm_bindgen::{JsCast, JsValue};
        use wasm_bindgen_futures::JsFuture;

        let url = match self.prepare(language) {
            FetchPlan::CachedBase => return Ok(false),
            FetchPlan::Remote(url) => url,
        };

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let response: web_sys::Response =
            JsFuture::from(window.fetch_with_str(&url)).await?.dyn_into()?;
        let body = JsFuture::from(response.text()?)
            .await?
            .as_string()
            .ok_or_else(|| JsValue::from_str("response body is not text"))?;

        self.complete(&body)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("translations loaded for {}", self.language.as_code());
        Ok(true)
    }
}
