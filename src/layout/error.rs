use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("route '{route}' references unknown place '{place}'")]
    UnknownPlace { route: String, place: String },
}
