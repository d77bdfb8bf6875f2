//! Scenario files
//!
//! A scenario describes a page (viewport, stacked elements), the hooks
//! registered on it and a list of steps to drive it:
//!
//! ```toml
//! [page]
//! viewport_height = 600
//!
//! [[elements]]
//! id = "card"
//! height = 400
//! classes = ["hidden"]
//!
//! [[hooks]]
//! element = "card"
//! initialStates = "hidden"
//! finalStates = "shown"
//!
//! [[steps]]
//! action = "scroll_bottom"
//! bottom = 1008
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use scrollhook_core::{HookConfig, Page, RegisterOptions, States};
use scrollhook_headless::{HeadlessDocument, HeadlessWindow, DEFAULT_BODY_MARGIN};
use scrollhook_platform::{Element, EventTarget, Window};
use tracing::debug;

/// A complete scenario
#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub hook: HookConfig,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub hooks: Vec<HookSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Viewport and layout settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub viewport_height: i64,
    pub margin: i64,
    /// Call `start` before the first step
    pub autostart: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            viewport_height: 800,
            margin: DEFAULT_BODY_MARGIN,
            autostart: true,
        }
    }
}

/// A block element in the document column
#[derive(Debug, Deserialize)]
pub struct ElementSpec {
    pub id: String,
    pub height: i64,
    #[serde(default)]
    pub classes: Vec<String>,
}

/// A registration on one element
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpec {
    pub element: String,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub initial_states: States,
    #[serde(default)]
    pub final_states: States,
}

impl HookSpec {
    fn options(&self) -> RegisterOptions {
        RegisterOptions {
            position: self.position,
            initial_states: self.initial_states.clone(),
            final_states: self.final_states.clone(),
        }
    }
}

/// One action against the page
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Install listeners
    Start,
    /// Remove listeners
    Stop,
    /// Fire the document ready event
    Load,
    /// Scroll to an offset, firing the configured raw scroll event
    ScrollTo { y: i64 },
    /// Put the viewport bottom at a position and fire the configured
    /// synthetic event
    ScrollBottom { bottom: i64 },
    /// Advance the clock
    Wait { ms: u64 },
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Start => f.write_str("start"),
            Step::Stop => f.write_str("stop"),
            Step::Load => f.write_str("load"),
            Step::ScrollTo { y } => write!(f, "scroll_to y={y}"),
            Step::ScrollBottom { bottom } => write!(f, "scroll_bottom bottom={bottom}"),
            Step::Wait { ms } => write!(f, "wait {ms}ms"),
        }
    }
}

/// Classes of one element after a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementState {
    pub id: String,
    pub offset_top: i64,
    pub classes: Vec<String>,
}

/// Page state after a step
#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: Step,
    pub at: Duration,
    pub view_bottom: i64,
    pub pending: Vec<i64>,
    pub listening: bool,
    pub elements: Vec<ElementState>,
}

impl Scenario {
    /// Load a scenario file
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    /// Parse and validate a scenario
    pub fn parse(source: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(source).context("Failed to parse scenario")?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check references and geometry
    pub fn validate(&self) -> Result<()> {
        self.hook.validate()?;

        if self.page.viewport_height < 0 {
            bail!("viewport_height must not be negative");
        }

        for hook in &self.hooks {
            if !self.elements.iter().any(|el| el.id == hook.element) {
                bail!("hook references unknown element `{}`", hook.element);
            }
        }

        Ok(())
    }

    /// Build the page and run every step
    pub fn run(&self) -> Result<Vec<StepReport>> {
        let window = Rc::new(HeadlessWindow::new(self.page.viewport_height));
        let mut doc = HeadlessDocument::with_margin(self.page.margin);

        for spec in &self.elements {
            doc.append(&spec.id, spec.height)?.classes(&spec.classes);
        }

        let mut page = Page::with_config(Rc::clone(&window), self.hook.clone())?;
        for hook in &self.hooks {
            let element = doc
                .get(&hook.element)
                .with_context(|| format!("Failed to register hook on `{}`", hook.element))?;
            page.register(element, hook.options());
        }

        if self.page.autostart {
            page.start();
        }

        let mut reports = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            debug!(%step, "running step");
            match *step {
                Step::Start => {
                    page.start();
                }
                Step::Stop => {
                    page.stop();
                }
                Step::Load => window.load(),
                Step::ScrollTo { y } => {
                    window.set_scroll_y(y);
                    window.dispatch(EventTarget::Window, &self.hook.scroll_event);
                }
                Step::ScrollBottom { bottom } => {
                    window.set_scroll_y(bottom - window.inner_height());
                    window.dispatch(EventTarget::Window, &self.hook.synthetic_event);
                }
                Step::Wait { ms } => window.advance(Duration::from_millis(ms)),
            }

            reports.push(StepReport {
                step: step.clone(),
                at: window.now(),
                view_bottom: window.viewport().bottom(),
                pending: page.pending_positions(),
                listening: page.is_listening(),
                elements: snapshot(&doc),
            });
        }

        Ok(reports)
    }
}

fn snapshot(doc: &HeadlessDocument) -> Vec<ElementState> {
    doc.elements()
        .iter()
        .map(|el| ElementState {
            id: el.id().to_string(),
            offset_top: el.offset_top(),
            classes: el.class_names(),
        })
        .collect()
}
