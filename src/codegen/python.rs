//! Target-language conventions for the generated Selenium (Python) scripts.

use serde::{Deserialize, Serialize};

/// Which element-lookup call syntax the generated script uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LookupApi {
    /// `driver.find_element_by_xpath(...)` (Selenium 3)
    #[default]
    Legacy,
    /// `driver.find_element(By.XPATH, ...)` (Selenium 4, template must import `By`)
    By,
}

/// How an element is looked up by the generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    XPath,
    CssSelector,
}

impl LookupApi {
    /// Single-element lookup call, e.g. `driver.find_element_by_xpath("//a")`.
    pub fn find_element(self, strategy: Strategy, query: &str) -> String {
        self.call("find_element", strategy, query)
    }

    /// Multi-element lookup call, e.g. `driver.find_elements_by_css_selector("a")`.
    pub fn find_elements(self, strategy: Strategy, query: &str) -> String {
        self.call("find_elements", strategy, query)
    }

    fn call(self, method: &str, strategy: Strategy, query: &str) -> String {
        match self {
            LookupApi::Legacy => {
                let suffix = match strategy {
                    Strategy::XPath => "xpath",
                    Strategy::CssSelector => "css_selector",
                };
                format!("driver.{}_by_{}({})", method, suffix, string_literal(query))
            }
            LookupApi::By => {
                let by = match strategy {
                    Strategy::XPath => "By.XPATH",
                    Strategy::CssSelector => "By.CSS_SELECTOR",
                };
                format!("driver.{}({}, {})", method, by, string_literal(query))
            }
        }
    }
}

/// Quote `value` as a double-quoted Python string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Derive a function name suffix from a display name: lower-cased, with every
/// character that is neither ASCII alphanumeric nor `_` replaced by `_`.
pub fn identifier(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .to_lowercase()
}
