use std::path::PathBuf;
use strum::Display;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FeatureKind {
    Pad,
    Hole,
}

#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("The {element} '{name}' requires a drill width but none was given")]
    MissingDrill { element: FeatureKind, name: String },

    #[error("The mechanical hole '{name}' has neither a size nor a drill")]
    MissingHoleDiameter { name: String },
}

#[derive(Error, Debug)]
pub enum StyleError {
    #[error("Could not read style file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid style file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
