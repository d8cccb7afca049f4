use serde_derive::Deserialize;
use serde_derive::Serialize;

/// A previously submitted premise and conclusion pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub premise: String,
    pub conclusion: String,
}

impl HistoryEntry {
    pub fn new(premise: &str, conclusion: &str) -> HistoryEntry {
        return HistoryEntry {
            premise: premise.to_string(),
            conclusion: conclusion.to_string(),
        };
    }

    pub fn label(&self) -> String {
        if self.conclusion.is_empty() {
            return self.premise.to_string();
        }

        return format!("{}  ⊨  {}", self.premise, self.conclusion);
    }
}
