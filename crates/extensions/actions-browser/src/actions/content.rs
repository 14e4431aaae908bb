//! Content actions: extraction, scrolling, completion.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use pagepilot_core::Action;
use pagepilot_protocols::{ActionContext, ActionError, ActionResult, ScrollDirection};

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ExtractContentParams {
    /// Keep link targets in the extracted text.
    pub include_links: Option<bool>,
}

pub struct ExtractContentAction;

#[async_trait]
impl Action for ExtractContentAction {
    type Params = ExtractContentParams;

    fn name(&self) -> &str {
        "extract_content"
    }

    fn description(&self) -> &str {
        "Extract page content to get the text or markdown, with links if requested"
    }

    async fn run(&self, params: ExtractContentParams, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionError> {
        let content = ctx
            .browser
            .page_content(params.include_links.unwrap_or(false))
            .await?;
        Ok(ActionResult::success(format!("Extracted page content:\n{}", content)))
    }
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ScrollParams {
    /// Pixels to scroll. One page when omitted.
    pub amount: Option<i64>,
}

/// `scroll_down` or `scroll_up`, depending on the direction.
pub struct ScrollAction {
    direction: ScrollDirection,
}

impl ScrollAction {
    pub fn down() -> Self {
        Self {
            direction: ScrollDirection::Down,
        }
    }

    pub fn up() -> Self {
        Self {
            direction: ScrollDirection::Up,
        }
    }
}

#[async_trait]
impl Action for ScrollAction {
    type Params = ScrollParams;

    fn name(&self) -> &str {
        match self.direction {
            ScrollDirection::Down => "scroll_down",
            ScrollDirection::Up => "scroll_up",
        }
    }

    fn description(&self) -> &str {
        match self.direction {
            ScrollDirection::Down => "Scroll down the page by pixel amount - if no amount is specified, scroll down one page",
            ScrollDirection::Up => "Scroll up the page by pixel amount - if no amount is specified, scroll up one page",
        }
    }

    async fn run(&self, params: ScrollParams, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionError> {
        ctx.browser.scroll(self.direction, params.amount).await?;

        let word = match self.direction {
            ScrollDirection::Down => "down",
            ScrollDirection::Up => "up",
        };
        let amount = match params.amount {
            Some(pixels) => format!("{} pixels", pixels),
            None => "one page".to_string(),
        };
        Ok(ActionResult::success(format!("Scrolled {} the page by {}", word, amount)))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DoneParams {
    /// Final answer for the task.
    pub text: String,
}

pub struct DoneAction;

#[async_trait]
impl Action for DoneAction {
    type Params = DoneParams;

    fn name(&self) -> &str {
        "done"
    }

    fn description(&self) -> &str {
        "Complete task"
    }

    async fn run(&self, params: DoneParams, _ctx: &ActionContext<'_>) -> Result<ActionResult, ActionError> {
        Ok(ActionResult::done(params.text))
    }
}
