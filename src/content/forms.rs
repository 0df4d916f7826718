//! Admin edit forms.
//!
//! Each form is the flat, string-only shape a browser posts. Multi-value
//! fields travel as one comma-separated string (see [`split_list`]).
//! A form missing a required field builds nothing, and saving it is a no-op.

use serde::{Deserialize, de::DeserializeOwned};

use super::{
    Concept, CustomCategory, Icon, JourneyEntry, Project, SkillGroup, join_list, split_list,
};
use crate::sync::{Item, SyncedList, WriteTicket};
use crate::tabs::derive_storage_key;

pub const JOURNEY_COLORS: &[&str] = &["cyan", "purple", "rose", "yellow", "emerald"];
pub const JOURNEY_ICONS: &[&str] = &["briefcase", "graduation"];
pub const CATEGORY_COLORS: &[&str] = &["cyan", "blue", "purple", "red", "emerald", "orange"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Select(&'static [&'static str]),
}

/// One input of a rendered form.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    pub kind: FieldKind,
}

impl Field {
    fn text(name: &'static str, placeholder: &'static str, value: &str) -> Self {
        Self {
            name,
            placeholder,
            value: value.to_string(),
            kind: FieldKind::Text,
        }
    }

    fn area(name: &'static str, placeholder: &'static str, value: &str) -> Self {
        Self {
            kind: FieldKind::TextArea,
            ..Self::text(name, placeholder, value)
        }
    }

    fn select(name: &'static str, options: &'static [&'static str], value: &str) -> Self {
        Self {
            kind: FieldKind::Select(options),
            ..Self::text(name, "", value)
        }
    }
}

pub trait ItemForm: DeserializeOwned + Default + Clone + Send + 'static {
    type Item: Item;

    /// Singular noun used in headings, e.g. "project".
    const NOUN: &'static str;

    fn from_item(item: &Self::Item) -> Self;

    /// The record this form describes, or `None` if a required field is empty.
    fn build(self) -> Option<Self::Item>;

    fn fields(&self) -> Vec<Field>;
}

/// Add (no `editing` id) or edit an item from a submitted form.
///
/// Returns `None` without touching state or store when the form is rejected.
pub fn save<F: ItemForm>(
    list: &SyncedList<F::Item>,
    editing: Option<&str>,
    form: F,
) -> Option<WriteTicket> {
    let item = form.build()?;
    let ticket = match editing {
        Some(id) => list.edit_item(id, item),
        None => list.add_item(item).1,
    };
    Some(ticket)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    pub title: String,
    pub tag: String,
    pub desc: String,
    pub tags: String,
    pub link: String,
}

impl ItemForm for ProjectForm {
    type Item = Project;
    const NOUN: &'static str = "project";

    fn from_item(item: &Project) -> Self {
        Self {
            title: item.title.clone(),
            tag: item.tag.clone(),
            desc: item.desc.clone(),
            tags: join_list(&item.tags),
            link: item.link.clone(),
        }
    }

    fn build(self) -> Option<Project> {
        if self.title.is_empty() || self.desc.is_empty() {
            return None;
        }
        Some(Project {
            id: String::new(),
            title: self.title,
            tag: self.tag,
            desc: self.desc,
            tags: split_list(&self.tags),
            link: self.link,
        })
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::text("title", "Project Title", &self.title),
            Field::text("tag", "Project Tag (e.g. Capstone, Enterprise App)", &self.tag),
            Field::area("desc", "Description", &self.desc),
            Field::text("tags", "Tech Tags (comma separated)", &self.tags),
            Field::text("link", "Project Link (URL)", &self.link),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JourneyForm {
    pub role: String,
    pub period: String,
    pub company: String,
    pub description: String,
    pub color: String,
    pub icon: String,
}

impl Default for JourneyForm {
    fn default() -> Self {
        Self {
            role: String::new(),
            period: String::new(),
            company: String::new(),
            description: String::new(),
            color: "cyan".to_string(),
            icon: "briefcase".to_string(),
        }
    }
}

impl ItemForm for JourneyForm {
    type Item = JourneyEntry;
    const NOUN: &'static str = "journey entry";

    fn from_item(item: &JourneyEntry) -> Self {
        Self {
            role: item.role.clone(),
            period: item.period.clone(),
            company: item.company.clone(),
            description: item.description.clone(),
            color: item.color.clone(),
            icon: item.icon.as_input().to_string(),
        }
    }

    fn build(self) -> Option<JourneyEntry> {
        if self.role.is_empty() || self.company.is_empty() {
            return None;
        }
        Some(JourneyEntry {
            id: String::new(),
            role: self.role,
            period: self.period,
            company: self.company,
            description: self.description,
            color: self.color,
            icon: Icon::parse(&self.icon),
        })
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::text("role", "Role (e.g. SDE)", &self.role),
            Field::text("period", "Period (e.g. 2023 - 2024)", &self.period),
            Field::text("company", "Company/School", &self.company),
            Field::select("color", JOURNEY_COLORS, &self.color),
            Field::select("icon", JOURNEY_ICONS, &self.icon),
            Field::area("description", "Description", &self.description),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SkillGroupForm {
    pub title: String,
    pub icon: String,
    pub skills: String,
}

impl ItemForm for SkillGroupForm {
    type Item = SkillGroup;
    const NOUN: &'static str = "skill group";

    fn from_item(item: &SkillGroup) -> Self {
        Self {
            title: item.title.clone(),
            icon: item.icon.as_input().to_string(),
            skills: join_list(&item.skills),
        }
    }

    fn build(self) -> Option<SkillGroup> {
        if self.title.is_empty() {
            return None;
        }
        Some(SkillGroup {
            id: String::new(),
            title: self.title,
            icon: Icon::parse(&self.icon),
            skills: split_list(&self.skills),
        })
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::text("title", "Category Title", &self.title),
            Field::text("icon", "Icon URL (e.g. https://img.icons8.com/...)", &self.icon),
            Field::area("skills", "Skills (comma separated)", &self.skills),
        ]
    }
}

/// The "add domain tab" form.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CategoryForm {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color_theme: String,
    pub concepts: String,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            icon: String::new(),
            color_theme: "cyan".to_string(),
            concepts: String::new(),
        }
    }
}

impl CategoryForm {
    pub fn build(self) -> Option<CustomCategory> {
        if self.title.is_empty() {
            return None;
        }
        let concepts = split_list(&self.concepts)
            .into_iter()
            .map(|title| Concept {
                title,
                desc: String::new(),
                icon: Icon::builtin("sparkles"),
            })
            .collect();
        Some(CustomCategory {
            storage_key: derive_storage_key(&self.title),
            title: self.title,
            description: self.description,
            icon: Icon::parse(&self.icon),
            color_theme: self.color_theme,
            concepts,
        })
    }

    pub fn fields(&self) -> Vec<Field> {
        vec![
            Field::text("title", "Tab Title (e.g. Design)", &self.title),
            Field::area("description", "Description", &self.description),
            Field::text("icon", "Icon URL (e.g. https://img.icons8.com/...)", &self.icon),
            Field::select("color_theme", CATEGORY_COLORS, &self.color_theme),
            Field::text("concepts", "Concepts (Comma separated)", &self.concepts),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResumeForm {
    pub link: String,
}

impl ResumeForm {
    pub fn fields(&self) -> Vec<Field> {
        vec![Field::text(
            "link",
            "Paste Google Drive / Dropbox link here",
            &self.link,
        )]
    }
}
