//! Ordered inline style declarations.

use std::fmt;

/// An ordered set of CSS declarations. Setting a property twice keeps its
/// original position and replaces the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    declarations: Vec<(String, String)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: &str, value: &str) {
        match self.declarations.iter_mut().find(|(p, _)| p == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self
                .declarations
                .push((property.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(p, v)| (p.as_str(), v.as_str()))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}: {};", property, value)?;
        }
        Ok(())
    }
}
