//! Navigation targets of the front-end.
//!
//! The list lives at `/restaurantes`, the create form at
//! `/restaurantes/nuevo`, the edit form at `/restaurantes/editar/{id}`.
//! Anything else redirects to the list.

use std::fmt;

pub const BASE_PATH: &str = "/restaurantes";

/// Values a host passes when it has no identifier at all.
pub const MISSING_ID_VALUES: [&str; 3] = ["", "undefined", "null"];

/// Route parameter values that ask for the create form.
pub const CREATE_MARKERS: [&str; 2] = ["nuevo", "new"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    New,
    Edit { id: String },
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["restaurantes", "nuevo"] => Route::New,
            ["restaurantes", "editar", id] => Route::Edit {
                id: (*id).to_string(),
            },
            _ => Route::List,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => BASE_PATH.to_string(),
            Route::New => format!("{BASE_PATH}/nuevo"),
            Route::Edit { id } => format!("{BASE_PATH}/editar/{id}"),
        }
    }

    /// The `:id` parameter the form reads, if this route carries one.
    pub fn id_param(&self) -> Option<&str> {
        match self {
            Route::Edit { id } => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Where the record form works: a fresh record or an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

impl FormMode {
    /// `Edit` only for a real identifier; missing and sentinel values
    /// open the create form.
    pub fn from_route_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            Some(id) if !is_absent_id(id) => FormMode::Edit { id: id.to_string() },
            _ => FormMode::Create,
        }
    }
}

/// No identifier at all. Create markers are not missing ids.
pub fn is_missing_id(id: &str) -> bool {
    MISSING_ID_VALUES.contains(&id.trim())
}

/// Missing, or a create marker: either way the form opens empty.
pub fn is_absent_id(id: &str) -> bool {
    is_missing_id(id) || CREATE_MARKERS.contains(&id.trim())
}
