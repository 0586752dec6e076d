use std::collections::BTreeMap;

use url::{form_urlencoded, Url};

use super::DispatchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Id(String),
    /// Position in the last-played ordering the listing shows. Kept for
    /// URLs produced before records had ids.
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Add,
    Edit(Target),
    Remove(Target),
    Launch { path: String },
}

/// Splits an invocation into its parameters. Accepts a full
/// `plugin://<id>/?...` URL, a bare `?query`, or the query alone; values are
/// percent-decoded once. Repeated names keep the last value.
pub fn parse_query(invocation: &str) -> BTreeMap<String, String> {
    let invocation = invocation.trim();
    let query = if invocation.contains("://") {
        match Url::parse(invocation) {
            Ok(url) => url.query().unwrap_or_default().to_string(),
            Err(_) => invocation
                .split_once('?')
                .map(|(_, query)| query.to_string())
                .unwrap_or_default(),
        }
    } else {
        invocation.trim_start_matches('?').to_string()
    };

    form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

pub fn plugin_url(addon_id: &str, params: &[(&str, &str)]) -> String {
    let base = format!("plugin://{addon_id}/");
    if params.is_empty() {
        return base;
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{base}?{query}")
}

impl Action {
    pub fn from_params(params: &BTreeMap<String, String>) -> Result<Self, DispatchError> {
        match params.get("action").map(String::as_str) {
            Some("add") => Ok(Action::Add),
            Some("edit") => Ok(Action::Edit(target(params)?)),
            Some("remove") => Ok(Action::Remove(target(params)?)),
            Some("launch") => {
                let path = params
                    .get("path")
                    .ok_or(DispatchError::MissingParam("path"))?;
                Ok(Action::Launch { path: path.clone() })
            }
            _ => Ok(Action::List),
        }
    }

    pub fn parse(invocation: &str) -> Result<Self, DispatchError> {
        Self::from_params(&parse_query(invocation))
    }
}

fn target(params: &BTreeMap<String, String>) -> Result<Target, DispatchError> {
    if let Some(id) = params.get("id").filter(|id| !id.is_empty()) {
        return Ok(Target::Id(id.clone()));
    }
    let index = params.get("index").ok_or(DispatchError::MissingParam("id"))?;
    index
        .trim()
        .parse()
        .map(Target::Index)
        .map_err(|_| DispatchError::InvalidParam {
            name: "index",
            value: index.clone(),
        })
}
