use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub year: Year,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub fanart: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clearlogo: Option<String>,
    pub path: String,
    #[serde(default)]
    pub lastplayed: i64,
    /// Keys written by other tools; kept so a save never drops them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
}

impl Default for Year {
    fn default() -> Self {
        Year::Text(String::new())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{n}"),
            Year::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramFields {
    pub title: String,
    pub year: String,
    pub description: String,
    pub image: String,
    pub fanart: String,
    pub clearlogo: String,
    pub path: String,
}

impl ProgramFields {
    pub fn from_program(program: &Program) -> Self {
        Self {
            title: program.title.clone(),
            year: program.year.to_string(),
            description: program.description.clone(),
            image: program.image.clone(),
            fanart: program.fanart.clone(),
            clearlogo: program.clearlogo.clone().unwrap_or_default(),
            path: program.path.clone(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.path.is_empty()
    }
}

impl Program {
    pub fn new(fields: ProgramFields) -> Self {
        Self {
            id: new_id(),
            title: fields.title,
            year: Year::Text(fields.year),
            description: fields.description,
            image: fields.image,
            fanart: fields.fanart,
            clearlogo: Some(fields.clearlogo),
            path: fields.path,
            lastplayed: 0,
            extra: Map::new(),
        }
    }

    /// Overwrites the editable fields. `id`, `lastplayed` and unknown keys
    /// are untouched; values equal to what is already stored keep their
    /// on-disk representation.
    pub fn apply(&mut self, fields: ProgramFields) {
        if fields.year != self.year.to_string() {
            self.year = Year::Text(fields.year);
        }
        if self.clearlogo.is_some() || !fields.clearlogo.is_empty() {
            self.clearlogo = Some(fields.clearlogo);
        }
        self.title = fields.title;
        self.description = fields.description;
        self.image = fields.image;
        self.fanart = fields.fanart;
        self.path = fields.path;
    }

    pub fn clearlogo(&self) -> Option<&str> {
        self.clearlogo.as_deref().filter(|logo| !logo.is_empty())
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, path: &str) -> ProgramFields {
        ProgramFields {
            title: title.to_string(),
            path: path.to_string(),
            ..ProgramFields::default()
        }
    }

    #[test]
    fn legacy_record_without_optional_keys_parses() {
        let json = r#"{"title":"Doom","path":"/games/doom","year":1993}"#;
        let program: Program = serde_json::from_str(json).unwrap();
        assert_eq!(program.id, "");
        assert_eq!(program.year, Year::Number(1993));
        assert_eq!(program.image, "");
        assert_eq!(program.clearlogo, None);
        assert_eq!(program.lastplayed, 0);
    }

    #[test]
    fn absent_clearlogo_stays_absent_on_write() {
        let json = r#"{"title":"Doom","path":"/games/doom"}"#;
        let program: Program = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&program).unwrap();
        assert!(out.get("clearlogo").is_none());
    }

    #[test]
    fn unknown_keys_survive_serialization() {
        let json = r#"{"title":"Doom","path":"/games/doom","rating":5}"#;
        let program: Program = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&program).unwrap();
        assert_eq!(out["rating"], 5);
    }

    #[test]
    fn missing_title_is_rejected() {
        let json = r#"{"path":"/games/doom"}"#;
        assert!(serde_json::from_str::<Program>(json).is_err());
    }

    #[test]
    fn new_program_has_fresh_id_and_zero_lastplayed() {
        let a = Program::new(fields("A", "/a"));
        let b = Program::new(fields("B", "/b"));
        assert_eq!(a.lastplayed, 0);
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn apply_unchanged_fields_is_identity() {
        let json = r#"{"id":"k","title":"Doom","path":"/d","year":1993,"lastplayed":42}"#;
        let original: Program = serde_json::from_str(json).unwrap();
        let mut edited = original.clone();
        edited.apply(ProgramFields::from_program(&original));
        assert_eq!(edited, original);
    }

    #[test]
    fn apply_keeps_lastplayed_and_id() {
        let mut program = Program::new(fields("A", "/a"));
        program.lastplayed = 77;
        let id = program.id.clone();
        program.apply(fields("Renamed", "/b"));
        assert_eq!(program.title, "Renamed");
        assert_eq!(program.path, "/b");
        assert_eq!(program.lastplayed, 77);
        assert_eq!(program.id, id);
    }

    #[test]
    fn completeness_requires_title_and_path() {
        assert!(fields("A", "/a").is_complete());
        assert!(!fields("", "/a").is_complete());
        assert!(!fields("A", "").is_complete());
    }

    #[test]
    fn empty_clearlogo_is_ignored() {
        let mut program = Program::new(fields("A", "/a"));
        assert_eq!(program.clearlogo(), None);
        program.clearlogo = Some("/art/logo.png".to_string());
        assert_eq!(program.clearlogo(), Some("/art/logo.png"));
    }
}
