//! JSON envelope for trained statistical models.
//!
//! A model is stored as `{"class": <kind name>, "statmodel": <native JSON>}`.
//! The native payload is opaque here: a [`StatModel`] writes it and a
//! [`ModelBackend`] reads it back once the kind is known.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RoiBridgeError;

/// The closed set of model kinds the envelope can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelKind {
    RTrees,
    DTrees,
    Boost,
    Em,
    LogisticRegression,
    Svm,
    SvmSgd,
    NormalBayesClassifier,
    KNearest,
    AnnMlp,
}

impl ModelKind {
    pub const ALL: [ModelKind; 10] = [
        ModelKind::RTrees,
        ModelKind::DTrees,
        ModelKind::Boost,
        ModelKind::Em,
        ModelKind::LogisticRegression,
        ModelKind::Svm,
        ModelKind::SvmSgd,
        ModelKind::NormalBayesClassifier,
        ModelKind::KNearest,
        ModelKind::AnnMlp,
    ];

    /// Name written to the `class` field.
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::RTrees => "RTrees",
            ModelKind::DTrees => "DTrees",
            ModelKind::Boost => "Boost",
            ModelKind::Em => "EM",
            ModelKind::LogisticRegression => "LogisticRegression",
            ModelKind::Svm => "SVM",
            ModelKind::SvmSgd => "SVMSGD",
            ModelKind::NormalBayesClassifier => "NormalBayesClassifier",
            ModelKind::KNearest => "KNearest",
            ModelKind::AnnMlp => "ANN_MLP",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = RoiBridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| RoiBridgeError::UnknownKind(s.to_string()))
    }
}

/// A trained model that can serialize its own parameters.
pub trait StatModel {
    fn kind(&self) -> ModelKind;

    /// The model's native JSON representation.
    fn write_native(&self) -> Result<Value, RoiBridgeError>;
}

/// Rebuilds models of a known kind from their native JSON.
pub trait ModelBackend {
    type Model;

    fn read_native(&self, kind: ModelKind, native: &Value) -> Result<Self::Model, RoiBridgeError>;
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    class: String,
    statmodel: Value,
}

/// Wraps a model's native JSON in the class envelope.
pub fn model_to_json<M: StatModel + ?Sized>(model: &M) -> Result<String, RoiBridgeError> {
    let envelope = Envelope {
        class: model.kind().name().to_string(),
        statmodel: model.write_native()?,
    };
    serde_json::to_string_pretty(&envelope).map_err(|e| RoiBridgeError::ModelJson(e.to_string()))
}

/// Reads an envelope and hands the payload to `backend` for the kind it names.
///
/// # Errors
/// Returns [`RoiBridgeError::UnknownKind`] if `class` is not a known model kind,
/// and [`RoiBridgeError::ModelJson`] if the envelope itself is malformed.
pub fn model_from_json<B: ModelBackend>(
    json: &str,
    backend: &B,
) -> Result<B::Model, RoiBridgeError> {
    let (kind, native) = parse_envelope(json)?;
    backend.read_native(kind, &native)
}

/// Like [`model_from_json`], but fails unless the envelope names `expected`.
pub fn model_from_json_as<B: ModelBackend>(
    json: &str,
    expected: ModelKind,
    backend: &B,
) -> Result<B::Model, RoiBridgeError> {
    let (kind, native) = parse_envelope(json)?;
    if kind != expected {
        return Err(RoiBridgeError::ModelJson(format!(
            "expected a {expected} model but found {kind}"
        )));
    }
    backend.read_native(kind, &native)
}

fn parse_envelope(json: &str) -> Result<(ModelKind, Value), RoiBridgeError> {
    let envelope: Envelope = serde_json::from_str(json.trim())
        .map_err(|e| RoiBridgeError::ModelJson(e.to_string()))?;
    let kind = envelope.class.parse::<ModelKind>()?;
    tracing::debug!(%kind, "read model envelope");
    Ok((kind, envelope.statmodel))
}
