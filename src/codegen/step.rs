use std::io::Write;

use super::emitter::Emitter;
use super::error::{Result, TranslateError};
use super::locator::{plan_lookups, render_chain, LookupChain, RESULT_VAR};
use super::python::{string_literal, LookupApi};
use crate::spec::spec_model::{AssertionKind, ClickType, Step, StepKind, WaitUntil};

/// Whether the step's action needs the lookup chain to have found something.
///
/// Neither value inserts a null check into the generated code: non-assertion
/// actions are attempted on a best-effort basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// The single imperative operation a step performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SendKeys(String),
    /// Submit when the element's `type` attribute is `submit`, click otherwise
    ClickByType,
    Submit,
    Click,
    WaitUrlChanged { max_wait: u64 },
    WaitTitleIs { max_wait: u64, title: String },
    WaitTitleContains { max_wait: u64, title: String },
    AssertAbsent,
    AssertTextContains(String),
}

/// A fully validated step, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPlan {
    pub name: String,
    pub lookups: LookupChain,
    pub presence: Presence,
    pub action: Action,
    /// Implicit wait emitted after the action, present when the step has a config
    pub implicit_wait: Option<u64>,
}

/// Validate a step and lower it into a plan. Nothing is written, so a
/// failing step leaves no trace in the output.
///
/// `default_wait` is the test-level implicit wait, used when the step's
/// config does not set its own.
pub fn plan_step(step: &Step, name: &str, default_wait: Option<u64>) -> Result<StepPlan> {
    let lookups = plan_lookups(&step.locators).map_err(|e| e.in_step(name))?;
    let action = plan_action(step, name)?;

    if lookups.is_empty() && !matches!(step.kind, StepKind::Wait) {
        return Err(TranslateError::StepMissingLocators {
            step: name.to_string(),
            kind: step.kind.to_string(),
        });
    }

    let presence = match step.kind {
        StepKind::Assertion => Presence::Optional,
        _ => Presence::Required,
    };

    Ok(StepPlan {
        name: name.to_string(),
        lookups,
        presence,
        action,
        implicit_wait: step
            .config
            .as_ref()
            .map(|c| c.step_wait.or(default_wait).unwrap_or(0)),
    })
}

fn plan_action(step: &Step, name: &str) -> Result<Action> {
    match &step.kind {
        StepKind::Input => Ok(Action::SendKeys(step.input_text.clone())),

        StepKind::Click => {
            let click_type = step.config.as_ref().and_then(|c| c.click_type.as_ref());
            match click_type {
                None => Ok(Action::ClickByType),
                Some(ClickType::Other(kind)) if kind.is_empty() => Ok(Action::ClickByType),
                Some(ClickType::Submit) => Ok(Action::Submit),
                Some(ClickType::Click) => Ok(Action::Click),
                Some(ClickType::Other(kind)) => Err(TranslateError::ClickTypeInvalid {
                    step: name.to_string(),
                    kind: kind.clone(),
                }),
            }
        }

        StepKind::Wait => {
            let max_wait = step.max_wait;
            match &step.wait_until {
                Some(WaitUntil::UrlChanged) => Ok(Action::WaitUrlChanged { max_wait }),
                Some(WaitUntil::TitleIs) => Ok(Action::WaitTitleIs {
                    max_wait,
                    title: step.value.clone(),
                }),
                Some(WaitUntil::TitleContains) => Ok(Action::WaitTitleContains {
                    max_wait,
                    title: step.value.clone(),
                }),
                Some(WaitUntil::Other(until)) => Err(TranslateError::StepUntilInvalid {
                    step: name.to_string(),
                    until: until.clone(),
                }),
                None => Err(TranslateError::StepUntilInvalid {
                    step: name.to_string(),
                    until: String::new(),
                }),
            }
        }

        StepKind::Assertion => match &step.assertion_type {
            Some(AssertionKind::ElementNotExists) => Ok(Action::AssertAbsent),
            Some(AssertionKind::TextExists) => Ok(Action::AssertTextContains(step.value.clone())),
            Some(AssertionKind::Other(kind)) => Err(TranslateError::AssertTypeInvalid {
                step: name.to_string(),
                kind: kind.clone(),
            }),
            None => Err(TranslateError::AssertTypeInvalid {
                step: name.to_string(),
                kind: String::new(),
            }),
        },

        StepKind::Other(kind) => Err(TranslateError::StepTypeInvalid {
            step: name.to_string(),
            kind: kind.clone(),
        }),
    }
}

/// Emit the step as `def <name>(driver):` with lookups, action, optional
/// implicit wait and a success print.
pub fn render_step<W: Write>(emitter: &mut Emitter<W>, plan: &StepPlan, api: LookupApi) -> Result<()> {
    emitter.block(&format!("def {}(driver):", plan.name), |e| {
        render_chain(e, &plan.lookups, api)?;
        render_action(e, &plan.action)?;

        if let Some(wait) = plan.implicit_wait {
            e.write_line(&format!("driver.implicitly_wait({})", wait))?;
        }
        e.write_line(&format!(
            "print({})",
            string_literal(&format!("{} successful", plan.name))
        ))?;
        e.blank_line()?;
        Ok(())
    })
}

fn render_action<W: Write>(emitter: &mut Emitter<W>, action: &Action) -> Result<()> {
    match action {
        Action::SendKeys(text) => {
            emitter.write_line(&format!("{}.send_keys({})", RESULT_VAR, string_literal(text)))?;
        }
        Action::ClickByType => {
            emitter.write_line(&format!(
                "{}_type = {}.get_attribute(\"type\")",
                RESULT_VAR, RESULT_VAR
            ))?;
            emitter.block(&format!("if {}_type == \"submit\":", RESULT_VAR), |e| {
                e.write_line(&format!("{}.submit()", RESULT_VAR))
            })?;
            emitter.block("else:", |e| e.write_line(&format!("{}.click()", RESULT_VAR)))?;
        }
        Action::Submit => emitter.write_line(&format!("{}.submit()", RESULT_VAR))?,
        Action::Click => emitter.write_line(&format!("{}.click()", RESULT_VAR))?,
        Action::WaitUrlChanged { max_wait } => emitter.write_line(&format!(
            "WebDriverWait(driver, {}).until(EC.url_changes(driver.current_url))",
            max_wait
        ))?,
        Action::WaitTitleIs { max_wait, title } => emitter.write_line(&format!(
            "WebDriverWait(driver, {}).until(EC.title_is({}))",
            max_wait,
            string_literal(title)
        ))?,
        Action::WaitTitleContains { max_wait, title } => emitter.write_line(&format!(
            "WebDriverWait(driver, {}).until(EC.title_contains({}))",
            max_wait,
            string_literal(title)
        ))?,
        Action::AssertAbsent => emitter.write_line(&format!("assert not {}", RESULT_VAR))?,
        Action::AssertTextContains(text) => emitter.write_line(&format!(
            "assert {} in {}.text",
            string_literal(text),
            RESULT_VAR
        ))?,
    }
    Ok(())
}
