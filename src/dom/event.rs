use crate::dom::ElementId;
use std::fmt;

/// MIME type carried by the drag payload
pub const PLAIN_TEXT: &str = "text/plain";

/// Events the board listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Submit,
    DragStart,
    DragEnd,
    DragOver,
    Drop,
    DragLeave,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submit => write!(f, "submit"),
            Self::DragStart => write!(f, "dragstart"),
            Self::DragEnd => write!(f, "dragend"),
            Self::DragOver => write!(f, "dragover"),
            Self::Drop => write!(f, "drop"),
            Self::DragLeave => write!(f, "dragleave"),
        }
    }
}

/// Operations a drag source allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    #[default]
    Uninitialized,
    None,
    Copy,
    Move,
    Link,
    All,
}

/// Access level of a [`DataTransfer`] during the drag lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferMode {
    /// dragstart: payload can be written and read
    #[default]
    ReadWrite,
    /// dragover / dragleave / dragend: only the payload types are visible
    Protected,
    /// drop: payload can be read
    ReadOnly,
}

/// Payload attached to a drag gesture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTransfer {
    entries: Vec<(String, String)>,
    effect_allowed: DropEffect,
    mode: TransferMode,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    fn normalize(format: &str) -> String {
        let format = format.trim().to_ascii_lowercase();
        if format == "text" {
            PLAIN_TEXT.to_string()
        } else {
            format
        }
    }

    /// Stores `data` under `format`. Ignored outside of dragstart.
    pub fn set_data(&mut self, format: &str, data: impl Into<String>) {
        if self.mode != TransferMode::ReadWrite {
            return;
        }
        let format = Self::normalize(format);
        let data = data.into();
        match self.entries.iter_mut().find(|(f, _)| *f == format) {
            Some(entry) => entry.1 = data,
            None => self.entries.push((format, data)),
        }
    }

    /// Reads the data stored under `format`, or `""` when it is absent or
    /// the transfer is protected
    pub fn get_data(&self, format: &str) -> String {
        if self.mode == TransferMode::Protected {
            return String::new();
        }
        let format = Self::normalize(format);
        self.entries
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, data)| data.clone())
            .unwrap_or_default()
    }

    /// Formats present in the payload, in the order they were set
    pub fn types(&self) -> Vec<&str> {
        self.entries.iter().map(|(f, _)| f.as_str()).collect()
    }

    pub fn effect_allowed(&self) -> DropEffect {
        self.effect_allowed
    }

    pub fn set_effect_allowed(&mut self, effect: DropEffect) {
        if self.mode == TransferMode::ReadWrite {
            self.effect_allowed = effect;
        }
    }

    pub fn mode(&self) -> TransferMode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: TransferMode) {
        self.mode = mode;
    }
}

/// An event travelling from its target up through the ancestors
#[derive(Debug, Clone)]
pub struct Event {
    kind: EventType,
    target: Option<ElementId>,
    current_target: Option<ElementId>,
    default_prevented: bool,
    data_transfer: Option<DataTransfer>,
}

impl Event {
    pub fn new(kind: EventType) -> Self {
        Self {
            kind,
            target: None,
            current_target: None,
            default_prevented: false,
            data_transfer: None,
        }
    }

    pub fn with_data_transfer(mut self, data_transfer: DataTransfer) -> Self {
        self.data_transfer = Some(data_transfer);
        self
    }

    pub fn kind(&self) -> EventType {
        self.kind
    }

    /// Element the event was dispatched to
    pub fn target(&self) -> Option<ElementId> {
        self.target
    }

    /// Element whose listener is currently running
    pub fn current_target(&self) -> Option<ElementId> {
        self.current_target
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn data_transfer(&self) -> Option<&DataTransfer> {
        self.data_transfer.as_ref()
    }

    pub fn data_transfer_mut(&mut self) -> Option<&mut DataTransfer> {
        self.data_transfer.as_mut()
    }

    pub fn into_data_transfer(self) -> Option<DataTransfer> {
        self.data_transfer
    }

    pub(crate) fn set_target(&mut self, target: ElementId) {
        self.target = Some(target);
    }

    pub(crate) fn set_current_target(&mut self, current: ElementId) {
        self.current_target = Some(current);
    }
}

/// Result of a full drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// The target accepted the drag and received a drop
    Dropped,
    /// The target did not accept the drag; it got a dragleave instead
    Rejected,
    /// The source cancelled the gesture in its dragstart handler
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_data() {
        let mut dt = DataTransfer::new();
        dt.set_data("text/plain", "p1");
        assert_eq!(dt.get_data("text/plain"), "p1");
        assert_eq!(dt.types(), vec!["text/plain"]);
    }

    #[test]
    fn test_format_normalization() {
        let mut dt = DataTransfer::new();
        dt.set_data("Text", "p1");
        assert_eq!(dt.get_data("TEXT/PLAIN"), "p1");
        assert_eq!(dt.types(), vec![PLAIN_TEXT]);
    }

    #[test]
    fn test_set_data_replaces_existing_format() {
        let mut dt = DataTransfer::new();
        dt.set_data(PLAIN_TEXT, "one");
        dt.set_data(PLAIN_TEXT, "two");
        assert_eq!(dt.get_data(PLAIN_TEXT), "two");
        assert_eq!(dt.types().len(), 1);
    }

    #[test]
    fn test_protected_mode_hides_data() {
        let mut dt = DataTransfer::new();
        dt.set_data(PLAIN_TEXT, "p1");
        dt.set_mode(TransferMode::Protected);

        assert_eq!(dt.get_data(PLAIN_TEXT), "");
        assert_eq!(dt.types(), vec![PLAIN_TEXT]);

        dt.set_data(PLAIN_TEXT, "other");
        dt.set_mode(TransferMode::ReadOnly);
        assert_eq!(dt.get_data(PLAIN_TEXT), "p1");
    }

    #[test]
    fn test_effect_allowed_only_writable_during_dragstart() {
        let mut dt = DataTransfer::new();
        assert_eq!(dt.effect_allowed(), DropEffect::Uninitialized);
        dt.set_effect_allowed(DropEffect::Move);
        dt.set_mode(TransferMode::ReadOnly);
        dt.set_effect_allowed(DropEffect::Copy);
        assert_eq!(dt.effect_allowed(), DropEffect::Move);
    }

    #[test]
    fn test_missing_format_reads_empty() {
        let dt = DataTransfer::new();
        assert_eq!(dt.get_data(PLAIN_TEXT), "");
    }

    #[test]
    fn test_prevent_default() {
        let mut event = Event::new(EventType::DragOver);
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }
}
