use crate::formatters::View;

// 按钮和输出区的固定文案
pub const RUN_LABEL: &str = "Run";
pub const LOADING_LABEL: &str = "Loading...";
pub const LOADING_OUTPUT: &str = "Loading data...";

/// 输出区域的内容，每次都整体覆盖
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Output {
    /// 空白
    #[default]
    Cleared,
    /// 请求进行中，显示 "Loading data..."
    Loading,
    View(View),
}

impl Output {
    pub fn to_html(&self) -> String {
        match self {
            Output::Cleared => String::new(),
            Output::Loading => LOADING_OUTPUT.to_string(),
            Output::View(view) => view.to_html(),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Output::Cleared => String::new(),
            Output::Loading => LOADING_OUTPUT.to_string(),
            Output::View(view) => view.to_text(),
        }
    }
}

/// 查询按钮的状态：是否可用以及显示的文字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerState {
    pub enabled: bool,
    pub label: String,
}

impl TriggerState {
    /// 空闲：可点击，显示 "Run"
    pub fn ready() -> Self {
        Self {
            enabled: true,
            label: RUN_LABEL.to_string(),
        }
    }

    /// 请求中：禁用，显示 "Loading..."
    pub fn loading() -> Self {
        Self {
            enabled: false,
            label: LOADING_LABEL.to_string(),
        }
    }
}

impl Default for TriggerState {
    fn default() -> Self {
        Self::ready()
    }
}

/// 控制器写入的显示区域：输出区、描述区、错误区、查询按钮和周期选择框
pub trait DisplaySink {
    fn show_output(&mut self, output: Output);
    fn show_description(&mut self, text: &str);
    fn show_error(&mut self, text: &str);
    fn set_trigger(&mut self, trigger: TriggerState);
    fn set_period_visible(&mut self, visible: bool);
}

/// 内存中的显示状态，同时记录按钮状态的变化历史
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    pub output: Output,
    pub description: String,
    pub error: String,
    pub trigger: TriggerState,
    pub period_visible: bool,
    pub trigger_history: Vec<TriggerState>,
    pub output_history: Vec<Output>,
}

impl DisplaySink for DisplayState {
    fn show_output(&mut self, output: Output) {
        self.output_history.push(output.clone());
        self.output = output;
    }

    fn show_description(&mut self, text: &str) {
        self.description = text.to_string();
    }

    fn show_error(&mut self, text: &str) {
        self.error = text.to_string();
    }

    fn set_trigger(&mut self, trigger: TriggerState) {
        self.trigger_history.push(trigger.clone());
        self.trigger = trigger;
    }

    fn set_period_visible(&mut self, visible: bool) {
        self.period_visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_state_tracks_history() {
        let mut state = DisplayState::default();
        assert_eq!(state.trigger, TriggerState::ready());
        state.set_trigger(TriggerState::loading());
        state.show_output(Output::Loading);
        state.set_trigger(TriggerState::ready());
        assert_eq!(state.trigger_history.len(), 2);
        assert!(!state.trigger_history[0].enabled);
        assert_eq!(state.output.to_text(), "Loading data...");
        assert_eq!(Output::Cleared.to_html(), "");
    }
}
