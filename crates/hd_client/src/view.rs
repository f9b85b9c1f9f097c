use crate::render::Rendered;

pub const START_LABEL: &str = "Generate Digest";
pub const REFRESH_LABEL: &str = "Refresh Digest";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

/// Everything a page shows: which widgets are visible and what they hold.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub phase: Phase,
    pub trigger_visible: bool,
    pub trigger_label: String,
    pub loading_visible: bool,
    pub results_visible: bool,
    pub error_visible: bool,
    pub error_message: String,
    pub rendered: Rendered,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            trigger_visible: true,
            trigger_label: START_LABEL.to_string(),
            loading_visible: false,
            results_visible: false,
            error_visible: false,
            error_message: String::new(),
            rendered: Rendered::default(),
        }
    }
}

impl ViewState {
    pub fn loading(&mut self) {
        self.phase = Phase::Loading;
        self.trigger_visible = false;
        self.loading_visible = true;
        self.results_visible = false;
        self.error_visible = false;
    }

    pub fn success(&mut self, rendered: Rendered) {
        self.phase = Phase::Success;
        self.rendered = rendered;
        self.loading_visible = false;
        self.error_visible = false;
        self.results_visible = true;
        self.trigger_visible = true;
        self.trigger_label = REFRESH_LABEL.to_string();
    }

    /// The label is left as it was.
    pub fn failure(&mut self, message: String) {
        self.phase = Phase::Error;
        self.loading_visible = false;
        self.error_visible = true;
        self.error_message = message;
        self.trigger_visible = true;
    }
}
