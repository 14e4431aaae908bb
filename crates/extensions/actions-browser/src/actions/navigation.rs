//! Navigation actions: search, go to url, back, tabs.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use pagepilot_core::{Action, NoParams};
use pagepilot_protocols::{ActionContext, ActionError, ActionResult};

const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";

// ============================================================================
// Search / Go To Url
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchGoogleParams {
    /// Search query.
    pub query: String,
}

pub struct SearchGoogleAction;

/// Google search URL for a query.
pub fn google_search_url(query: &str) -> Result<Url, ActionError> {
    Url::parse_with_params(GOOGLE_SEARCH_URL, &[("q", query)])
        .map_err(|e| ActionError::ExecutionFailed(format!("Invalid search url: {}", e)))
}

#[async_trait]
impl Action for SearchGoogleAction {
    type Params = SearchGoogleParams;

    fn name(&self) -> &str {
        "search_google"
    }

    fn description(&self) -> &str {
        "Search the query in Google in the current tab"
    }

    async fn run(&self, params: SearchGoogleParams, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionError> {
        let url = google_search_url(&params.query)?;
        ctx.browser.navigate(url.as_str()).await?;
        debug!("Searched for {:?}", params.query);
        Ok(ActionResult::success(format!("Searched for \"{}\" in Google", params.query)))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GoToUrlParams {
    /// URL to open in the current tab.
    pub url: String,
}

pub struct GoToUrlAction;

#[async_trait]
impl Action for GoToUrlAction {
    type Params = GoToUrlParams;

    fn name(&self) -> &str {
        "go_to_url"
    }

    fn description(&self) -> &str {
        "Navigate to URL in the current tab"
    }

    async fn run(&self, params: GoToUrlParams, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionError> {
        ctx.browser.navigate(&params.url).await?;
        Ok(ActionResult::success(format!("Navigated to {}", params.url)))
    }
}

pub struct GoBackAction;

#[async_trait]
impl Action for GoBackAction {
    type Params = NoParams;

    fn name(&self) -> &str {
        "go_back"
    }

    fn description(&self) -> &str {
        "Go back"
    }

    async fn run(&self, _params: NoParams, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionError> {
        ctx.browser.go_back().await?;
        Ok(ActionResult::success("Navigated back"))
    }
}

// ============================================================================
// Tabs
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SwitchTabParams {
    /// Id of the tab to switch to.
    pub page_id: u32,
}

pub struct SwitchTabAction;

#[async_trait]
impl Action for SwitchTabAction {
    type Params = SwitchTabParams;

    fn name(&self) -> &str {
        "switch_tab"
    }

    fn description(&self) -> &str {
        "Switch tab"
    }

    async fn run(&self, params: SwitchTabParams, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionError> {
        ctx.browser.switch_tab(params.page_id).await?;
        Ok(ActionResult::success(format!("Switched to tab {}", params.page_id)))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct OpenTabParams {
    /// URL to open in the new tab.
    pub url: String,
}

pub struct OpenTabAction;

#[async_trait]
impl Action for OpenTabAction {
    type Params = OpenTabParams;

    fn name(&self) -> &str {
        "open_tab"
    }

    fn description(&self) -> &str {
        "Open url in new tab"
    }

    async fn run(&self, params: OpenTabParams, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionError> {
        ctx.browser.open_tab(&params.url).await?;
        Ok(ActionResult::success(format!("Opened new tab with {}", params.url)))
    }
}
