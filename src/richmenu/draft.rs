use serde::Deserialize;
use thiserror::Error;
use url::Url;

use super::model::{chat_bar_text, Action, Area, RichMenu};
use super::template::{self, Template};

/// LINE's limit for action text, postback data and menu names.
const MAX_FIELD_CHARS: usize = 300;

#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("Menu name is required")]
    EmptyName,

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Template {template} has {expected} areas but {got} actions were given")]
    ActionCount {
        template: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Area {area}: invalid link '{url}'")]
    InvalidLink { area: usize, url: String },

    #[error("Area {area}: {field} must not be empty")]
    EmptyField { area: usize, field: &'static str },

    #[error("Invalid actions JSON: {0}")]
    InvalidActions(String),
}

/// Per-area action chosen in the menu editor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionBinding {
    Link {
        url: String,
    },
    Text {
        text: String,
    },
    Api {
        data: String,
        #[serde(rename = "displayText", default)]
        display_text: Option<String>,
    },
}

fn check_len(value: &str, field: &'static str) -> Result<(), DraftError> {
    if value.chars().count() > MAX_FIELD_CHARS {
        return Err(DraftError::TooLong { field, max: MAX_FIELD_CHARS });
    }
    Ok(())
}

fn require(value: &str, area: usize, field: &'static str) -> Result<(), DraftError> {
    if value.trim().is_empty() {
        return Err(DraftError::EmptyField { area, field });
    }
    check_len(value, field)
}

impl ActionBinding {
    /// Parse the `actions` form field: a JSON array with one binding per area.
    pub fn parse_list(input: &str) -> Result<Vec<ActionBinding>, DraftError> {
        serde_json::from_str(input).map_err(|e| DraftError::InvalidActions(e.to_string()))
    }

    pub fn into_action(self, area: usize) -> Result<Action, DraftError> {
        match self {
            ActionBinding::Link { url } => {
                let valid = Url::parse(url.trim())
                    .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
                    .unwrap_or(false);
                if !valid {
                    return Err(DraftError::InvalidLink { area, url });
                }
                check_len(&url, "link")?;
                Ok(Action::Uri { label: None, uri: url.trim().to_string() })
            }
            ActionBinding::Text { text } => {
                require(&text, area, "text")?;
                Ok(Action::Message { label: None, text })
            }
            ActionBinding::Api { data, display_text } => {
                require(&data, area, "data")?;
                let display_text = display_text.filter(|t| !t.trim().is_empty());
                if let Some(text) = &display_text {
                    check_len(text, "displayText")?;
                }
                Ok(Action::Postback { label: None, data, display_text })
            }
        }
    }
}

/// Inputs for a new rich menu before it is sent to LINE.
#[derive(Debug, Clone, Default)]
pub struct MenuDraft {
    pub name: String,
    pub template: Option<String>,
    pub bindings: Vec<ActionBinding>,
}

impl MenuDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_template(mut self, template: impl Into<String>, bindings: Vec<ActionBinding>) -> Self {
        self.template = Some(template.into());
        self.bindings = bindings;
        self
    }

    /// Produce the create-call body.
    ///
    /// Without a template the menu is one full-canvas area that sends the
    /// menu name as a message. With a template every area needs a binding.
    pub fn build(self) -> Result<RichMenu, DraftError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DraftError::EmptyName);
        }
        check_len(&name, "name")?;

        let layout: Template = match &self.template {
            Some(id) => template::find(id).ok_or_else(|| DraftError::UnknownTemplate(id.clone()))?,
            None => template::default_template(),
        };

        let bindings = if self.template.is_none() && self.bindings.is_empty() {
            vec![ActionBinding::Text { text: name.clone() }]
        } else {
            self.bindings
        };

        if bindings.len() != layout.areas.len() {
            return Err(DraftError::ActionCount {
                template: layout.id,
                expected: layout.areas.len(),
                got: bindings.len(),
            });
        }

        let areas = layout
            .areas
            .iter()
            .zip(bindings)
            .enumerate()
            .map(|(i, (bounds, binding))| {
                Ok(Area {
                    bounds: *bounds,
                    action: binding.into_action(i + 1)?,
                })
            })
            .collect::<Result<Vec<_>, DraftError>>()?;

        Ok(RichMenu {
            size: layout.size,
            selected: false,
            chat_bar_text: chat_bar_text(&name),
            name,
            areas,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::richmenu::model::{Bounds, Size};

    #[test]
    fn default_menu_is_single_message_area() {
        let menu = MenuDraft::new("Promo").build().unwrap();
        assert_eq!(menu.size, Size::LARGE);
        assert_eq!(menu.chat_bar_text, "Promo");
        assert!(!menu.selected);
        assert_eq!(
            menu.areas,
            vec![Area {
                bounds: Bounds::new(0, 0, 2500, 1686),
                action: Action::Message { label: None, text: "Promo".into() },
            }]
        );
    }

    #[test]
    fn template_bindings_map_to_line_actions() {
        let bindings = ActionBinding::parse_list(
            r#"[
                {"type": "link", "url": "https://traffy.in.th/report"},
                {"type": "api", "data": "action=status", "displayText": "Check status"}
            ]"#,
        )
        .unwrap();

        let menu = MenuDraft::new("Traffy Fondue Main Menu")
            .with_template("compact-2", bindings)
            .build()
            .unwrap();

        assert_eq!(menu.size, Size::COMPACT);
        assert_eq!(menu.chat_bar_text, "Traffy Fondue ");
        assert_eq!(
            menu.areas[0].action,
            Action::Uri { label: None, uri: "https://traffy.in.th/report".into() }
        );
        assert_eq!(
            menu.areas[1].action,
            Action::Postback {
                label: None,
                data: "action=status".into(),
                display_text: Some("Check status".into())
            }
        );
        assert_eq!(menu.areas[1].bounds, Bounds::new(1250, 0, 1250, 843));
    }

    #[test]
    fn binding_count_must_match_template() {
        let err = MenuDraft::new("Promo")
            .with_template("large-6", vec![ActionBinding::Text { text: "hi".into() }])
            .build()
            .unwrap_err();
        assert_eq!(err, DraftError::ActionCount { template: "large-6", expected: 6, got: 1 });
    }

    #[test]
    fn rejects_bad_inputs() {
        assert_eq!(MenuDraft::new("  ").build().unwrap_err(), DraftError::EmptyName);

        assert!(matches!(
            MenuDraft::new("x").with_template("nope", vec![]).build(),
            Err(DraftError::UnknownTemplate(t)) if t == "nope"
        ));

        let bad_link = ActionBinding::Link { url: "javascript:alert(1)".into() };
        assert!(matches!(bad_link.into_action(1), Err(DraftError::InvalidLink { area: 1, .. })));

        let empty_text = ActionBinding::Text { text: " ".into() };
        assert_eq!(
            empty_text.into_action(2).unwrap_err(),
            DraftError::EmptyField { area: 2, field: "text" }
        );

        let long = ActionBinding::Api { data: "x".repeat(301), display_text: None };
        assert!(matches!(long.into_action(1), Err(DraftError::TooLong { field: "data", .. })));

        assert!(matches!(
            ActionBinding::parse_list("{not json"),
            Err(DraftError::InvalidActions(_))
        ));
    }
}
