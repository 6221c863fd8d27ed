use super::scalar;
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

/// A single instruction in a `steps` or `steps_alt` list.
///
/// Most steps are plain strings, but YAML turns `- optional: brush with oil` into a
/// one-entry mapping, which is kept as a qualified step and displayed as
/// `"optional: brush with oil"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Plain(String),
    Qualified { qualifier: String, text: String },
}

impl Step {
    pub fn text(&self) -> String {
        match self {
            Step::Plain(text) => text.clone(),
            Step::Qualified { qualifier, text } => format!("{qualifier}: {text}"),
        }
    }
}

impl<'de> Deserialize<'de> for Step {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Mapping(map) => {
                // multi-entry mappings keep their last entry
                let (qualifier, text) = map
                    .iter()
                    .last()
                    .ok_or_else(|| D::Error::custom("step is an empty mapping"))?;
                let qualifier = scalar::to_display(qualifier)
                    .ok_or_else(|| D::Error::custom("step qualifier must be text"))?;
                let text = scalar::to_display(text)
                    .ok_or_else(|| D::Error::custom("step text must be text"))?;
                Ok(Step::Qualified { qualifier, text })
            }
            other => scalar::to_display(other)
                .map(Step::Plain)
                .ok_or_else(|| D::Error::custom("step must be text or a `qualifier: text` entry")),
        }
    }
}
