use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum Focus {
    #[default]
    None,
    Premise,
    Conclusion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum Field {
    Premise,
    Conclusion,
}

impl From<Field> for Focus {
    fn from(field: Field) -> Focus {
        match field {
            Field::Premise => return Focus::Premise,
            Field::Conclusion => return Focus::Conclusion,
        }
    }
}

impl Focus {
    pub fn field(&self) -> Option<Field> {
        match self {
            Focus::None => return None,
            Focus::Premise => return Some(Field::Premise),
            Focus::Conclusion => return Some(Field::Conclusion),
        }
    }
}

/// The in-progress premise and conclusion pair. Cursor offsets are counted
/// in characters of the focused field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaDraft {
    pub premise: String,
    pub conclusion: String,
    pub focus: Focus,
    pub cursor_start: usize,
    pub cursor_end: usize,
}

impl FormulaDraft {
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Premise => return &self.premise,
            Field::Conclusion => return &self.conclusion,
        }
    }

    pub fn text_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Premise => return &mut self.premise,
            Field::Conclusion => return &mut self.conclusion,
        }
    }

    pub fn char_len(&self, field: Field) -> usize {
        return self.text(field).chars().count();
    }
}
