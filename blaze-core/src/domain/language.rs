//! Supported languages
//!
//! Fixed table mapping the language names used by the Blaze front end to
//! Judge0 language ids.

use serde::{Deserialize, Serialize};

/// A language the execution service can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    C,
    #[serde(rename = "C++")]
    Cpp,
    Python,
    Java,
    JavaScript,
    #[serde(rename = "PHP")]
    Php,
    Go,
    Swift,
    Ruby,
    Rust,
}

impl Language {
    /// Every supported language, in display order
    pub const ALL: [Language; 10] = [
        Language::C,
        Language::Cpp,
        Language::Python,
        Language::Java,
        Language::JavaScript,
        Language::Php,
        Language::Go,
        Language::Swift,
        Language::Ruby,
        Language::Rust,
    ];

    /// Resolve a language from its display name
    ///
    /// Matching is exact: `"Python"` resolves, `"python"` does not.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.name() == name)
    }

    /// Resolve a language from a source file extension (without the dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }

    /// Display name, as sent by callers
    pub fn name(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::JavaScript => "JavaScript",
            Language::Php => "PHP",
            Language::Go => "Go",
            Language::Swift => "Swift",
            Language::Ruby => "Ruby",
            Language::Rust => "Rust",
        }
    }

    /// Judge0 language id
    pub fn judge0_id(&self) -> u32 {
        match self {
            Language::C => 50,
            Language::Cpp => 54,
            // Python 3
            Language::Python => 71,
            Language::Java => 62,
            Language::JavaScript => 63,
            Language::Php => 55,
            Language::Go => 36,
            Language::Swift => 43,
            Language::Ruby => 72,
            Language::Rust => 40,
        }
    }

    /// Usual source file extensions
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::C => &["c", "h"],
            Language::Cpp => &["cpp", "cc", "cxx", "hpp"],
            Language::Python => &["py"],
            Language::Java => &["java"],
            Language::JavaScript => &["js", "mjs", "cjs"],
            Language::Php => &["php"],
            Language::Go => &["go"],
            Language::Swift => &["swift"],
            Language::Ruby => &["rb"],
            Language::Rust => &["rs"],
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
