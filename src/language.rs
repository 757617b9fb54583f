//! Page languages and external translate links.

use crate::error::{Error, Result};
use serde::Serialize;
use url::Url;

pub const DEFAULT_LANGUAGE: &str = "en";

const TRANSLATE_ENDPOINT: &str = "https://translate.google.com/translate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English", native: "English" },
    Language { code: "zh-CN", name: "Chinese (Simplified)", native: "中文（简体）" },
    Language { code: "ar", name: "Arabic", native: "العربية" },
    Language { code: "vi", name: "Vietnamese", native: "Tiếng Việt" },
    Language { code: "el", name: "Greek", native: "Ελληνικά" },
    Language { code: "it", name: "Italian", native: "Italiano" },
    Language { code: "pa", name: "Punjabi", native: "ਪੰਜਾਬੀ" },
    Language { code: "hi", name: "Hindi", native: "हिन्दी" },
    Language { code: "es", name: "Spanish", native: "Español" },
    Language { code: "tr", name: "Turkish", native: "Türkçe" },
];

/// The page's own language
pub fn default_language() -> &'static Language {
    &LANGUAGES[0]
}

/// Supported language for a code, matched case-insensitively
pub fn find_language(code: &str) -> Result<&'static Language> {
    let code = code.trim();
    LANGUAGES
        .iter()
        .find(|lang| lang.code.eq_ignore_ascii_case(code))
        .ok_or_else(|| Error::UnsupportedLanguage(code.to_string()))
}

impl Language {
    /// Link that opens `page_url` machine-translated into this language.
    ///
    /// English pages need no translation, so `None` is returned for `en`.
    pub fn translate_url(&self, page_url: &str) -> Result<Option<Url>> {
        let page = Url::parse(page_url)
            .map_err(|e| Error::Validation(format!("Invalid page URL '{}': {}", page_url, e)))?;
        if self.code == DEFAULT_LANGUAGE {
            return Ok(None);
        }

        let url = Url::parse_with_params(
            TRANSLATE_ENDPOINT,
            &[("sl", "auto"), ("tl", self.code), ("u", page.as_str())],
        )
        .map_err(|e| Error::Validation(format!("Could not build translate link: {}", e)))?;
        Ok(Some(url))
    }
}
