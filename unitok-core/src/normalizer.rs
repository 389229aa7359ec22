//! Unicode normalization applied to every input line before scanning.

use unicode_normalization::UnicodeNormalization;

/// Supported normal forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalForm {
    #[default]
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
}

impl NormalForm {
    /// Parse a form name as written in configuration (`NFC`, `nfkd`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "NFC" => Some(NormalForm::Nfc),
            "NFD" => Some(NormalForm::Nfd),
            "NFKC" => Some(NormalForm::Nfkc),
            "NFKD" => Some(NormalForm::Nfkd),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    form: NormalForm,
}

impl Normalizer {
    pub fn new(form: NormalForm) -> Self {
        Normalizer { form }
    }

    pub fn normalize(&self, input: &str) -> String {
        match self.form {
            NormalForm::Nfc => input.nfc().collect(),
            NormalForm::Nfd => input.nfd().collect(),
            NormalForm::Nfkc => input.nfkc().collect(),
            NormalForm::Nfkd => input.nfkd().collect(),
        }
    }
}
