use serde::{Deserialize, Serialize};

/// Top-level document: every test description file wraps its test in a `test` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestFile {
    pub test: Test,
}

/// A declarative browser UI test.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Test {
    /// Display name, also used to derive the generated test function name
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// URL the generated test navigates to before running any step
    pub base_url: String,

    /// Default implicit wait (seconds) applied before navigation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_wait: Option<u64>,

    /// Ordered steps; order is preserved in the generated call sequence
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A single abstract step. Variant-specific payload lives in the flat optional fields,
/// mirroring the input format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    #[serde(rename = "type")]
    pub kind: StepKind,

    #[serde(default)]
    pub description: String,

    /// Fallback locators, tried in order
    #[serde(default)]
    pub locators: Vec<Locator>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<StepConfig>,

    /// Wait title or expected assertion text
    #[serde(default)]
    pub value: String,

    /// Text sent by an input step
    #[serde(default, rename = "text")]
    pub input_text: String,

    #[serde(default, rename = "until", skip_serializing_if = "Option::is_none")]
    pub wait_until: Option<WaitUntil>,

    /// Maximum seconds a wait step blocks
    #[serde(default)]
    pub max_wait: u64,

    #[serde(default, rename = "assertionType", skip_serializing_if = "Option::is_none")]
    pub assertion_type: Option<AssertionKind>,
}

/// A way to find the element a step acts on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Locator {
    #[serde(rename = "type")]
    pub kind: LocatorKind,

    /// Raw xpath, raw css selector, or the attribute value to match
    #[serde(default)]
    pub value: String,

    /// 1-based index disambiguating multiple matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,

    /// Attribute name, required for `attribute` locators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Locator {
    pub fn xpath(value: impl Into<String>) -> Self {
        Self {
            kind: LocatorKind::XPath,
            value: value.into(),
            position: None,
            key: None,
        }
    }

    pub fn css(value: impl Into<String>) -> Self {
        Self {
            kind: LocatorKind::CssSelector,
            value: value.into(),
            position: None,
            key: None,
        }
    }

    pub fn attribute(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: LocatorKind::Attribute,
            value: value.into(),
            position: None,
            key: Some(key.into()),
        }
    }

    pub fn at(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }
}

/// Per-step overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StepConfig {
    /// Implicit wait (seconds) emitted after the step's action; falls back
    /// to the test's `step_wait`, then 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_wait: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_type: Option<ClickType>,
}

// ============================================================================
// Tag enums
// ============================================================================
//
// Tags decode from plain strings. Unknown tags land in `Other` and are
// rejected during translation.

macro_rules! string_tag {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $text,)+
                    $name::Other(s) => s.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                let known = match s.as_str() {
                    $($text => Some($name::$variant),)+
                    _ => None,
                };
                known.unwrap_or_else(|| $name::Other(s))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name::from(s.to_string())
            }
        }

        impl From<$name> for String {
            fn from(tag: $name) -> String {
                match tag {
                    $name::Other(s) => s,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_tag! {
    /// Step type tag
    StepKind {
        Input => "input",
        Click => "click",
        Wait => "wait",
        Assertion => "assertion",
    }
}

string_tag! {
    /// Locator type tag
    LocatorKind {
        XPath => "xpath",
        CssSelector => "css_selector",
        Attribute => "attribute",
    }
}

string_tag! {
    /// Condition a wait step blocks on
    WaitUntil {
        UrlChanged => "url_changed",
        TitleIs => "title_is",
        TitleContains => "title_contains",
    }
}

string_tag! {
    /// What an assertion step checks
    AssertionKind {
        ElementNotExists => "elementNotExists",
        TextExists => "textExists",
    }
}

string_tag! {
    /// Explicit click mode
    ClickType {
        Submit => "submit",
        Click => "click",
    }
}
