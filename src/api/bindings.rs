//! UI binding table: page element ids and the action each one triggers

use serde::Deserialize;

/// Something the user can do on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    StartPrayer,
    BeginTimer,
    PauseTimer,
    ResetTimer,
    EditReflection,
    SendReflection,
    CopyInvite,
}

/// Element id → action, built once and shared by the router
pub const BINDINGS: [(&str, UiAction); 7] = [
    ("start-prayer-btn", UiAction::StartPrayer),
    ("begin-timer-btn", UiAction::BeginTimer),
    ("pause-timer-btn", UiAction::PauseTimer),
    ("reset-timer-btn", UiAction::ResetTimer),
    ("reflection-text", UiAction::EditReflection),
    ("send-reflection-btn", UiAction::SendReflection),
    ("copy-invite-btn", UiAction::CopyInvite),
];

impl UiAction {
    /// Look up the action bound to an element id
    pub fn from_element_id(element_id: &str) -> Option<Self> {
        BINDINGS
            .iter()
            .find(|(id, _)| *id == element_id)
            .map(|(_, action)| *action)
    }

    pub fn element_id(self) -> &'static str {
        BINDINGS
            .iter()
            .find(|(_, action)| *action == self)
            .map(|(id, _)| *id)
            .unwrap_or("unknown")
    }
}

/// Optional body of a UI event: the element's current value, as the page reports it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClickPayload {
    #[serde(default)]
    pub value: Option<String>,
}
