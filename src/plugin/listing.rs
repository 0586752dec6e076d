use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::{Local, TimeZone};
use serde::Serialize;

use super::url::plugin_url;
use crate::catalog::Program;
use crate::config::AddonInfo;

pub const ADD_LABEL: &str = "Add New Program";
pub const CONTENT_VIDEOS: &str = "videos";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingDirective {
    pub items: Vec<DirectoryItem>,
    pub content: String,
    pub sort_method: SortMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMethod {
    LastPlayed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryItem {
    pub url: String,
    pub item: ListItem,
    pub is_folder: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub label: String,
    pub art: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<InfoLabels>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub context_menu: Vec<ContextAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoLabels {
    pub title: String,
    pub year: String,
    pub plot: String,
    pub lastplayed: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextAction {
    pub label: String,
    pub url: String,
}

impl ListItem {
    pub fn context_action(&self, label: &str) -> Option<&ContextAction> {
        self.context_menu.iter().find(|action| action.label == label)
    }
}

pub fn sort_by_last_played(programs: &mut [Program]) {
    programs.sort_by_key(|program| Reverse(program.lastplayed));
}

pub fn format_lastplayed(timestamp: i64) -> String {
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|time| time.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

pub fn render(mut programs: Vec<Program>, addon: &AddonInfo, is_widget: bool) -> ListingDirective {
    sort_by_last_played(&mut programs);

    let mut items = Vec::with_capacity(programs.len() + 1);

    if !is_widget {
        items.push(DirectoryItem {
            url: plugin_url(&addon.id, &[("action", "add")]),
            item: ListItem {
                label: ADD_LABEL.to_string(),
                art: BTreeMap::new(),
                info: None,
                context_menu: Vec::new(),
            },
            is_folder: true,
        });
    }

    items.extend(
        programs
            .iter()
            .enumerate()
            .map(|(position, program)| DirectoryItem {
                url: plugin_url(
                    &addon.id,
                    &[("action", "launch"), ("path", program.path.as_str())],
                ),
                item: program_item(program, position, addon, is_widget),
                is_folder: false,
            }),
    );

    ListingDirective {
        items,
        content: CONTENT_VIDEOS.to_string(),
        sort_method: SortMethod::LastPlayed,
    }
}

fn program_item(
    program: &Program,
    position: usize,
    addon: &AddonInfo,
    is_widget: bool,
) -> ListItem {
    let mut art: BTreeMap<String, String> = ["thumb", "icon", "poster", "landscape"]
        .into_iter()
        .map(|key| (key.to_string(), program.image.clone()))
        .collect();
    art.insert("fanart".to_string(), program.fanart.clone());
    if let Some(logo) = program.clearlogo() {
        art.insert("clearlogo".to_string(), logo.to_string());
    }

    // Records without an id yet are addressed by their place in this listing.
    let position = position.to_string();
    let key = if program.id.is_empty() {
        ("index", position.as_str())
    } else {
        ("id", program.id.as_str())
    };

    let context_menu = if is_widget {
        Vec::new()
    } else {
        ["edit", "remove"]
            .into_iter()
            .zip(["Edit", "Remove"])
            .map(|(action, label)| ContextAction {
                label: label.to_string(),
                url: plugin_url(&addon.id, &[("action", action), key]),
            })
            .collect()
    };

    ListItem {
        label: program.title.clone(),
        art,
        info: Some(InfoLabels {
            title: program.title.clone(),
            year: program.year.to_string(),
            plot: program.description.clone(),
            lastplayed: format_lastplayed(program.lastplayed),
        }),
        context_menu,
    }
}
