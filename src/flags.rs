use std::cmp::Ordering;


/// Outcome of the most recent comparison. Exactly one condition holds once `CMP` has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Equal,
    Less,
    Greater,
}


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// `None` until the first comparison.
    condition: Option<Condition>,
}

impl Flags {

    pub fn set_compare(&mut self, a: u8, b: u8) {
        self.condition = Some(match a.cmp(&b) {
            Ordering::Equal => Condition::Equal,
            Ordering::Less => Condition::Less,
            Ordering::Greater => Condition::Greater,
        });
    }


    pub fn condition(&self) -> Option<Condition> {
        self.condition
    }


    pub fn is_equal(&self) -> bool {
        self.condition == Some(Condition::Equal)
    }


    pub fn is_less(&self) -> bool {
        self.condition == Some(Condition::Less)
    }


    pub fn is_greater(&self) -> bool {
        self.condition == Some(Condition::Greater)
    }

}
