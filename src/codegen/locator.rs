use std::io::Write;

use super::emitter::Emitter;
use super::error::{Result, TranslateError};
use super::python::{LookupApi, Strategy};
use crate::spec::spec_model::{Locator, LocatorKind};

/// Name of the local the lookup chain assigns.
pub const RESULT_VAR: &str = "elem";

/// A concrete element-finding expression derived from one locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Single-element XPath lookup. Quotes are already normalized.
    XPath(String),
    /// Single-element CSS lookup.
    Css(String),
    /// Multi-element CSS lookup indexed by a 1-based position, `None` when out of range.
    CssNth { selector: String, position: u64 },
}

/// One step in the fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// Only run when every earlier attempt left the result unset.
    pub guarded: bool,
    pub lookup: Lookup,
}

/// Ordered fallback chain: attempt 0 first, attempt i only if attempts 0..i all failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupChain {
    pub attempts: Vec<Attempt>,
}

impl LookupChain {
    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }
}

/// Resolve locators into a lookup chain, in input order.
///
/// Fails on the first malformed locator; nothing is emitted at this stage.
pub fn plan_lookups(locators: &[Locator]) -> Result<LookupChain> {
    let attempts = locators
        .iter()
        .enumerate()
        .map(|(index, loc)| {
            Ok(Attempt {
                guarded: index > 0,
                lookup: resolve(index, loc)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LookupChain { attempts })
}

/// Resolve a single locator into its lookup expression.
pub fn resolve(index: usize, loc: &Locator) -> Result<Lookup> {
    if let Some(position) = loc.position {
        if position < 0 {
            return Err(TranslateError::LocatorInvalidPosition { index, position });
        }
    }

    match &loc.kind {
        LocatorKind::XPath => {
            let mut xpath = loc.value.clone();
            if let Some(position) = loc.position {
                xpath.push_str(&position_predicate(position));
            }
            Ok(Lookup::XPath(normalize_quotes(&xpath)))
        }
        LocatorKind::Attribute => {
            let xpath = attribute_xpath(loc).ok_or(TranslateError::AttributeMissingKey { index })?;
            Ok(Lookup::XPath(xpath))
        }
        LocatorKind::CssSelector => match loc.position {
            None => Ok(Lookup::Css(loc.value.clone())),
            Some(0) => Err(TranslateError::LocatorInvalidPosition { index, position: 0 }),
            Some(position) => Ok(Lookup::CssNth {
                selector: loc.value.clone(),
                position: position as u64,
            }),
        },
        LocatorKind::Other(kind) => Err(TranslateError::LocatorInvalidType {
            index,
            kind: kind.clone(),
        }),
    }
}

/// `//*[@key='value']`, with a position predicate when the locator has one.
/// `None` when the key is absent or empty.
fn attribute_xpath(loc: &Locator) -> Option<String> {
    let key = loc.key.as_deref().filter(|k| !k.is_empty())?;
    let value = normalize_quotes(&loc.value);
    let mut xpath = format!("//*[@{}={}]", normalize_quotes(key), xpath_literal(&value));
    if let Some(position) = loc.position {
        xpath.push_str(&position_predicate(position));
    }
    Some(xpath)
}

fn position_predicate(position: i64) -> String {
    format!("[position()={}]", position)
}

/// The lookup call wraps xpath expressions in double quotes.
pub fn normalize_quotes(xpath: &str) -> String {
    xpath.replace('"', "'")
}

/// XPath string literal for an already normalized value. Single quotes are
/// the delimiter unless the value contains one; normalized values never
/// contain `"`, so the double-quoted form is always well formed.
pub fn xpath_literal(value: &str) -> String {
    if value.contains('\'') {
        format!("\"{}\"", value)
    } else {
        format!("'{}'", value)
    }
}

/// Render a chain as try/except blocks, each later attempt nested one level
/// deeper under `if not elem:`.
pub fn render_chain<W: Write>(
    emitter: &mut Emitter<W>,
    chain: &LookupChain,
    api: LookupApi,
) -> Result<()> {
    render_from(emitter, &chain.attempts, api)
}

fn render_from<W: Write>(emitter: &mut Emitter<W>, attempts: &[Attempt], api: LookupApi) -> Result<()> {
    let Some((first, rest)) = attempts.split_first() else {
        return Ok(());
    };

    if first.guarded {
        emitter.block(&format!("if not {}:", RESULT_VAR), |e| {
            render_attempt(e, &first.lookup, api)?;
            render_from(e, rest, api)
        })
    } else {
        render_attempt(emitter, &first.lookup, api)?;
        render_from(emitter, rest, api)
    }
}

fn render_attempt<W: Write>(emitter: &mut Emitter<W>, lookup: &Lookup, api: LookupApi) -> Result<()> {
    emitter.block("try:", |e| {
        for line in lookup_lines(lookup, api) {
            e.write_line(&line)?;
        }
        Ok::<(), TranslateError>(())
    })?;
    emitter.block("except NoSuchElementException:", |e| {
        e.write_line(&format!("{} = None", RESULT_VAR))?;
        Ok::<(), TranslateError>(())
    })
}

/// Statements performing one lookup and assigning the result.
pub fn lookup_lines(lookup: &Lookup, api: LookupApi) -> Vec<String> {
    match lookup {
        Lookup::XPath(xpath) => vec![format!(
            "{} = {}",
            RESULT_VAR,
            api.find_element(Strategy::XPath, xpath)
        )],
        Lookup::Css(selector) => vec![format!(
            "{} = {}",
            RESULT_VAR,
            api.find_element(Strategy::CssSelector, selector)
        )],
        Lookup::CssNth { selector, position } => vec![
            format!("elems = {}", api.find_elements(Strategy::CssSelector, selector)),
            format!(
                "{} = elems[{}] if len(elems) >= {} else None",
                RESULT_VAR,
                position - 1,
                position
            ),
        ],
    }
}
