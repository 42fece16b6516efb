//! Error types for game actions and catalog loading.

use std::path::PathBuf;

/// A player action that could not be applied. All of these are recoverable: the
/// session state is unchanged and the player is simply told why.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("there is no planet called {0}")]
    UnknownPlanet(String),
    #[error("{0} is already part of your empire")]
    AlreadyConquered(String),
    #[error("not enough coins for {item}: need {needed}, have {available}")]
    InsufficientFunds { item: String, needed: u32, available: u32 },
    #[error("{0} is not a free starting planet")]
    NotFree(String),
    #[error("your empire has already started on {0}")]
    AlreadyStarted(String),
    #[error("an invasion is underway; defend, pay tribute or surrender first")]
    InvasionInProgress,
    #[error("no invasion is underway")]
    NoActiveInvasion,
    #[error("the defense has failed; choose tribute or surrender")]
    DefenseClosed,
    #[error("tribute and surrender are only offered after a failed defense")]
    ChoiceNotAvailable,
}

/// A planet catalog that could not be loaded or failed validation.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog has no planets")]
    Empty,
    #[error("planet names must not be blank")]
    BlankName,
    #[error("duplicate planet name {0}")]
    DuplicateName(String),
    #[error("more than one starting planet ({0} and {1})")]
    MultipleStartingPlanets(String, String),
    #[error("starting planet {0} must cost 0 coins")]
    StartingPlanetNotFree(String),
    #[error("could not read catalog {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog file")]
    Parse(#[from] ron::error::SpannedError),
}
