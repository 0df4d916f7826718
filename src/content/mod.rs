//! Content records shown on the site and edited in admin mode.

pub mod defaults;
pub mod forms;

use serde::{Deserialize, Serialize};

use crate::sync::Item;

/// An icon is either one of the built-in glyphs or an image URL.
///
/// Stored as `{"kind": "builtin", "ref": ..}` or `{"kind": "url", "href": ..}`.
/// Older documents hold a bare string; it is resolved here, once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", from = "IconRepr")]
pub enum Icon {
    Builtin {
        #[serde(rename = "ref")]
        name: String,
    },
    Url {
        href: String,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IconRepr {
    Tagged(TaggedIcon),
    Bare(String),
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum TaggedIcon {
    Builtin {
        #[serde(rename = "ref")]
        name: String,
    },
    Url {
        href: String,
    },
}

impl From<IconRepr> for Icon {
    fn from(repr: IconRepr) -> Self {
        match repr {
            IconRepr::Tagged(TaggedIcon::Builtin { name }) => Icon::Builtin { name },
            IconRepr::Tagged(TaggedIcon::Url { href }) => Icon::Url { href },
            IconRepr::Bare(s) => Icon::parse(&s),
        }
    }
}

impl Icon {
    pub fn builtin(name: &str) -> Self {
        Icon::Builtin {
            name: name.to_string(),
        }
    }

    /// Resolve a free-form icon string: links become `Url`, anything else is
    /// taken as a built-in glyph name.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let is_link = ["http://", "https://", "/", "data:"]
            .iter()
            .any(|prefix| raw.starts_with(prefix));
        if is_link {
            Icon::Url {
                href: raw.to_string(),
            }
        } else {
            Icon::builtin(raw)
        }
    }

    /// The string an admin would type to get this icon back.
    pub fn as_input(&self) -> &str {
        match self {
            Icon::Builtin { name } => name,
            Icon::Url { href } => href,
        }
    }
}

impl Default for Icon {
    fn default() -> Self {
        Icon::builtin("")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: String,
    pub title: String,
    /// Short label shown next to the title, e.g. "Capstone Project".
    pub tag: String,
    pub desc: String,
    pub tags: Vec<String>,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JourneyEntry {
    pub id: String,
    pub role: String,
    pub period: String,
    pub company: String,
    pub description: String,
    pub color: String,
    pub icon: Icon,
}

/// A group of skills in the "Technical Arsenal" panel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillGroup {
    pub id: String,
    pub title: String,
    pub icon: Icon,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Concept {
    pub title: String,
    pub desc: String,
    pub icon: Icon,
}

/// A category tab created by the admin at runtime.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomCategory {
    pub title: String,
    pub description: String,
    pub icon: Icon,
    pub color_theme: String,
    pub storage_key: String,
    pub concepts: Vec<Concept>,
}

macro_rules! impl_item {
    ($($ty:ty),*) => {
        $(impl Item for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        })*
    };
}

impl_item!(Project, JourneyEntry, SkillGroup);

/// Split a comma-separated form value into trimmed, non-empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`split_list`] for pre-filling edit forms.
pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_trims_and_drops_empties() {
        assert_eq!(
            split_list(" React ,, Node.js,  ,Maps API"),
            vec!["React", "Node.js", "Maps API"]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn join_then_split_round_trips() {
        let tags = vec!["Neo4j".to_string(), "Python".into(), "AI as a Service".into()];
        assert_eq!(split_list(&join_list(&tags)), tags);
    }

    #[test]
    fn bare_icon_strings_resolve_once() {
        let url: Icon =
            serde_json::from_value(json!("https://img.icons8.com/color/48/cloud.png")).unwrap();
        assert_eq!(
            url,
            Icon::Url {
                href: "https://img.icons8.com/color/48/cloud.png".into()
            }
        );

        let glyph: Icon = serde_json::from_value(json!("briefcase")).unwrap();
        assert_eq!(glyph, Icon::builtin("briefcase"));
    }

    #[test]
    fn icons_serialize_tagged() {
        let value = serde_json::to_value(Icon::builtin("graduation")).unwrap();
        assert_eq!(value, json!({ "kind": "builtin", "ref": "graduation" }));

        let back: Icon = serde_json::from_value(value).unwrap();
        assert_eq!(back, Icon::builtin("graduation"));
    }

    #[test]
    fn legacy_category_documents_load() {
        let doc = json!({
            "title": "UI / UX Design!",
            "description": "Interfaces",
            "icon": "",
            "colorTheme": "orange",
            "storageKey": "ui___ux_design__projects",
            "concepts": [{ "title": "Figma", "icon": "✨", "desc": "" }],
            "initialProjects": []
        });
        let cat: CustomCategory = serde_json::from_value(doc).unwrap();
        assert_eq!(cat.color_theme, "orange");
        assert_eq!(cat.storage_key, "ui___ux_design__projects");
        assert_eq!(cat.concepts[0].icon, Icon::builtin("✨"));
    }
}
