use crate::{
    dom::{Document, ElementId, Event, EventType, InsertPosition},
    domain::{validate, BoardConfig, Validatable},
    error::{BoardError, Result},
    store::ProjectStore,
    view::{Component, ComponentSpec, Host},
};
use std::rc::Rc;
use tracing::{debug, error};

/// Validated form contents
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub effort: f64,
}

/// The "add project" form
pub struct ProjectInput {
    doc: Document,
    store: ProjectStore,
    component: Component,
    title_input: ElementId,
    description_input: ElementId,
    effort_input: ElementId,
    invalid_input_message: String,
}

impl ProjectInput {
    pub fn new(doc: &Document, store: &ProjectStore, config: &BoardConfig) -> Result<Rc<Self>> {
        let component = Component::mount(
            doc,
            ComponentSpec {
                template_id: &config.templates.input,
                host: Host::Id(&config.host_id),
                position: InsertPosition::AfterBegin,
                element_id: Some(config.fields.form.clone()),
            },
        )?;
        let root = component.element;
        let field = |id: &str| doc.require_selector(root, &format!("#{}", id));

        let input = Rc::new(Self {
            doc: doc.clone(),
            store: store.clone(),
            component,
            title_input: field(&config.fields.title)?,
            description_input: field(&config.fields.description)?,
            effort_input: field(&config.fields.effort)?,
            invalid_input_message: config.invalid_input_message.clone(),
        });

        let weak = Rc::downgrade(&input);
        doc.add_event_listener(root, EventType::Submit, move |event| {
            if let Some(input) = weak.upgrade() {
                input.submit_handler(event);
            }
        })?;

        Ok(input)
    }

    pub fn element(&self) -> ElementId {
        self.component.element
    }

    pub fn title_input(&self) -> ElementId {
        self.title_input
    }

    pub fn description_input(&self) -> ElementId {
        self.description_input
    }

    pub fn effort_input(&self) -> ElementId {
        self.effort_input
    }

    /// Reads and validates the three fields
    pub fn gather_user_input(&self) -> Result<ProjectDraft> {
        let title = self.doc.value(self.title_input).unwrap_or_default();
        let description = self.doc.value(self.description_input).unwrap_or_default();
        let effort = parse_number(&self.doc.value(self.effort_input).unwrap_or_default());

        if !validate(&Validatable::new(title.as_str()).required()) {
            return Err(BoardError::InvalidInput("title is required".to_string()));
        }
        if !validate(&Validatable::new(description.as_str()).required().min_length(5)) {
            return Err(BoardError::InvalidInput(
                "description needs at least 5 characters".to_string(),
            ));
        }
        if !validate(&Validatable::new(effort).required().min(1.0).max(1000.0)) {
            return Err(BoardError::InvalidInput(
                "effort must be between 1 and 1000".to_string(),
            ));
        }

        Ok(ProjectDraft {
            title,
            description,
            effort,
        })
    }

    fn clear_inputs(&self) -> Result<()> {
        self.doc.set_value(self.title_input, "")?;
        self.doc.set_value(self.description_input, "")?;
        self.doc.set_value(self.effort_input, "")
    }

    fn submit_handler(&self, event: &mut Event) {
        event.prevent_default();

        match self.gather_user_input() {
            Ok(draft) => {
                self.store.add(draft.title, draft.description, draft.effort);
                if let Err(err) = self.clear_inputs() {
                    error!(%err, "failed to clear form");
                }
            }
            Err(err) => {
                debug!(%err, "rejected form input");
                self.doc.alert(self.invalid_input_message.as_str());
            }
        }
    }
}

/// Reads a form field as a number the way a browser coerces one.
///
/// Surrounding whitespace is ignored and an empty field is 0. Unsigned
/// `0x`/`0o`/`0b` literals are integers in their radix. Infinity must be
/// spelled `Infinity`; `inf` and `nan` are NaN like anything else unparsable.
fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some((radix, digits)) = radix_literal(trimmed) {
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }
        return u64::from_str_radix(digits, radix).map_or(f64::NAN, |n| n as f64);
    }

    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    // f64::from_str would accept inf, infinity and nan
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// Splits `0x1f` style literals into their radix and digits. No sign allowed.
fn radix_literal(s: &str) -> Option<(u32, &str)> {
    let radix = match s.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    Some((radix, &s[2..]))
}
