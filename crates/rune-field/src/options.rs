use std::fmt;

use rune_config::{InputConfig, InputType, TextareaConfig};

use crate::host::ControlKind;
use crate::style::StyleOverrides;

/// Handle of a field inside an [`crate::Overlay`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub(crate) u32);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    SingleLine {
        input_type: InputType,
        max_length: Option<usize>,
    },
    MultiLine,
}

impl FieldKind {
    pub fn control_kind(&self) -> ControlKind {
        match self {
            FieldKind::SingleLine { .. } => ControlKind::SingleLine,
            FieldKind::MultiLine => ControlKind::MultiLine,
        }
    }

    pub fn is_password(&self) -> bool {
        matches!(
            self,
            FieldKind::SingleLine {
                input_type: InputType::Password,
                ..
            }
        )
    }

    pub fn is_multi_line(&self) -> bool {
        matches!(self, FieldKind::MultiLine)
    }
}

pub type FieldCallback = Box<dyn FnMut(FieldId)>;
pub type InputCallback = Box<dyn FnMut(FieldId, &str)>;

/// Focus, blur and input notifications. Missing callbacks are no-ops.
#[derive(Default)]
pub struct Callbacks {
    on_focus: Option<FieldCallback>,
    on_blur: Option<FieldCallback>,
    on_input: Option<InputCallback>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_focus(mut self, f: impl FnMut(FieldId) + 'static) -> Self {
        self.on_focus = Some(Box::new(f));
        self
    }

    pub fn on_blur(mut self, f: impl FnMut(FieldId) + 'static) -> Self {
        self.on_blur = Some(Box::new(f));
        self
    }

    pub fn on_input(mut self, f: impl FnMut(FieldId, &str) + 'static) -> Self {
        self.on_input = Some(Box::new(f));
        self
    }

    pub(crate) fn focused(&mut self, id: FieldId) {
        if let Some(f) = self.on_focus.as_mut() {
            f(id);
        }
    }

    pub(crate) fn blurred(&mut self, id: FieldId) {
        if let Some(f) = self.on_blur.as_mut() {
            f(id);
        }
    }

    pub(crate) fn input(&mut self, id: FieldId, value: &str) {
        if let Some(f) = self.on_input.as_mut() {
            f(id, value);
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_focus", &self.on_focus.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .field("on_input", &self.on_input.is_some())
            .finish()
    }
}

/// Options of a single-line field; unset values come from [`InputConfig`].
#[derive(Debug, Default)]
pub struct InputOptions {
    pub input_type: Option<InputType>,
    pub value: Option<String>,
    pub placeholder: Option<String>,
    pub placeholder_color: Option<String>,
    pub readonly: Option<bool>,
    pub max_length: Option<usize>,
    pub style: StyleOverrides,
    pub callbacks: Callbacks,
}

/// Options of a multi-line field; unset values come from [`TextareaConfig`].
#[derive(Debug, Default)]
pub struct TextareaOptions {
    pub value: Option<String>,
    pub placeholder: Option<String>,
    pub placeholder_color: Option<String>,
    pub readonly: Option<bool>,
    pub style: StyleOverrides,
    pub callbacks: Callbacks,
}

/// Options after merging over the configured defaults.
#[derive(Debug)]
pub(crate) struct ResolvedOptions {
    pub kind: FieldKind,
    pub value: String,
    pub placeholder: String,
    pub placeholder_color: String,
    pub readonly: bool,
    pub callbacks: Callbacks,
}

impl InputOptions {
    pub(crate) fn resolve(self, defaults: &InputConfig) -> (ResolvedOptions, StyleOverrides) {
        let resolved = ResolvedOptions {
            kind: FieldKind::SingleLine {
                input_type: self.input_type.unwrap_or(defaults.input_type),
                max_length: self.max_length.or(defaults.max_length),
            },
            value: self.value.unwrap_or_else(|| defaults.value.clone()),
            placeholder: self.placeholder.unwrap_or_else(|| defaults.placeholder.clone()),
            placeholder_color: self
                .placeholder_color
                .unwrap_or_else(|| defaults.placeholder_color.clone()),
            readonly: self.readonly.unwrap_or(defaults.readonly),
            callbacks: self.callbacks,
        };
        (resolved, self.style)
    }
}

impl TextareaOptions {
    pub(crate) fn resolve(self, defaults: &TextareaConfig) -> (ResolvedOptions, StyleOverrides) {
        let resolved = ResolvedOptions {
            kind: FieldKind::MultiLine,
            value: self.value.unwrap_or_else(|| defaults.value.clone()),
            placeholder: self.placeholder.unwrap_or_else(|| defaults.placeholder.clone()),
            placeholder_color: self
                .placeholder_color
                .unwrap_or_else(|| defaults.placeholder_color.clone()),
            readonly: self.readonly.unwrap_or(defaults.readonly),
            callbacks: self.callbacks,
        };
        (resolved, self.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_input_defaults() {
        let (resolved, _) = InputOptions::default().resolve(&InputConfig::default());
        assert_eq!(
            resolved.kind,
            FieldKind::SingleLine {
                input_type: InputType::Text,
                max_length: None
            }
        );
        assert_eq!(resolved.value, "");
        assert_eq!(resolved.placeholder_color, "#999");
        assert!(!resolved.readonly);
    }

    #[test]
    fn test_input_overrides() {
        let options = InputOptions {
            input_type: Some(InputType::Password),
            max_length: Some(4),
            placeholder: Some("PIN".into()),
            ..InputOptions::default()
        };
        let (resolved, _) = options.resolve(&InputConfig::default());
        assert!(resolved.kind.is_password());
        assert_eq!(resolved.placeholder, "PIN");
        assert_eq!(resolved.kind.control_kind(), ControlKind::SingleLine);
    }

    #[test]
    fn test_textarea_kind() {
        let (resolved, _) = TextareaOptions::default().resolve(&TextareaConfig::default());
        assert!(resolved.kind.is_multi_line());
        assert!(!resolved.kind.is_password());
        assert_eq!(resolved.kind.control_kind(), ControlKind::MultiLine);
    }

    #[test]
    fn test_callbacks_fire() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let mut callbacks = Callbacks::new().on_input(move |id, v| {
            log.borrow_mut().push(format!("{id} {v}"));
        });
        callbacks.input(FieldId(7), "abc");
        callbacks.focused(FieldId(7));
        assert_eq!(*seen.borrow(), vec!["field#7 abc".to_string()]);
    }
}
