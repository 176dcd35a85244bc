use std::io::Write;

use tracing::debug;

use super::emitter::Emitter;
use super::error::Result;
use super::python::{identifier, string_literal, LookupApi};
use super::step::{plan_step, render_step, StepPlan};
use crate::spec::spec_model::{Step, Test};

/// Lowers a test model into a Selenium script through an [`Emitter`].
pub struct Translator<W: Write> {
    emitter: Emitter<W>,
    api: LookupApi,
    /// Test-level implicit wait, restored by steps whose config has none
    default_wait: Option<u64>,
}

impl<W: Write> Translator<W> {
    pub fn new(sink: W) -> Self {
        Self::with_api(sink, LookupApi::default())
    }

    pub fn with_api(sink: W, api: LookupApi) -> Self {
        Self {
            emitter: Emitter::new(sink),
            api,
            default_wait: None,
        }
    }

    /// Emit `step_0 .. step_{n-1}` followed by the `test_<name>` function that
    /// navigates to the base URL and calls them in order.
    ///
    /// On error the sink may hold a partial script and should be discarded.
    pub fn translate_test(&mut self, test: &Test) -> Result<()> {
        let names: Vec<String> = (0..test.steps.len()).map(step_name).collect();
        self.default_wait = test.step_wait;

        for (step, name) in test.steps.iter().zip(&names) {
            self.translate_step(step, name)?;
        }

        let header = format!("def test_{}(driver):", identifier(&test.name));
        self.emitter.block(&header, |e| {
            if let Some(wait) = test.step_wait {
                e.write_line(&format!("driver.implicitly_wait({})", wait))?;
            }
            e.write_line(&format!("driver.get({})", string_literal(&test.base_url)))?;
            for name in &names {
                e.write_line(&format!("{}(driver)", name))?;
            }
            Ok(())
        })
    }

    /// Emit one step as a function called `name`.
    pub fn translate_step(&mut self, step: &Step, name: &str) -> Result<StepPlan> {
        let plan = plan_step(step, name, self.default_wait)?;
        debug!(
            step = name,
            kind = %step.kind,
            lookups = plan.lookups.len(),
            presence = ?plan.presence,
            "lowering step"
        );
        render_step(&mut self.emitter, &plan, self.api)?;
        Ok(plan)
    }

    pub fn into_inner(self) -> W {
        self.emitter.into_inner()
    }
}

/// Name of the generated function for the step at `index`.
pub fn step_name(index: usize) -> String {
    format!("step_{}", index)
}

/// Translate a whole test into a string, discarding any partial output on error.
pub fn translate(test: &Test, api: LookupApi) -> Result<String> {
    let mut translator = Translator::with_api(Vec::new(), api);
    translator.translate_test(test)?;
    Ok(String::from_utf8_lossy(&translator.into_inner()).into_owned())
}
