//! The output of one render call

use crate::value::Value;
use std::fmt;
use std::ops::Index;

/// One structured `(name, value)` pair bound by a render call
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: Value,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Render the pair itself, e.g. `(b, 2)`
    pub fn to_log_string(&self) -> String {
        format!("({}, {})", self.name, self.value.to_log_string())
    }
}

impl<N: Into<String>, V: Into<Value>> From<(N, V)> for Property {
    fn from((name, value): (N, V)) -> Self {
        Property::new(name, value)
    }
}

/// Rendered message text plus the ordered structured properties
///
/// Built once per render and never mutated afterwards. `Display` yields the
/// rendered text.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatResult {
    text: String,
    properties: Vec<Property>,
}

impl FormatResult {
    pub(crate) fn new(text: String, properties: Vec<Property>) -> Self {
        Self { text, properties }
    }

    /// The rendered message
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Structured pairs in binding order
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Property> {
        self.properties.get(index)
    }

    /// First property with the given name
    pub fn find(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.properties.iter()
    }

    pub fn into_parts(self) -> (String, Vec<Property>) {
        (self.text, self.properties)
    }
}

impl fmt::Display for FormatResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Index<usize> for FormatResult {
    type Output = Property;

    fn index(&self, index: usize) -> &Property {
        &self.properties[index]
    }
}

impl<'a> IntoIterator for &'a FormatResult {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FormatResult {
        FormatResult::new(
            "hello 1".to_string(),
            vec![Property::new("a", 1), Property::new("arg1", "x")],
        )
    }

    #[test]
    fn test_display_is_rendered_text() {
        assert_eq!(sample().to_string(), "hello 1");
    }

    #[test]
    fn test_indexed_and_enumerable_access() {
        let result = sample();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "a");
        assert_eq!(result.get(1).map(|p| p.name.as_str()), Some("arg1"));
        assert!(result.get(2).is_none());

        let names: Vec<&str> = (&result).into_iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "arg1"]);
    }

    #[test]
    fn test_find_by_name() {
        let result = sample();
        assert_eq!(result.find("a"), Some(&Value::Int(1)));
        assert_eq!(result.find("missing"), None);
    }

    #[test]
    fn test_pair_rendering() {
        assert_eq!(Property::new("b", 2).to_log_string(), "(b, 2)");
        assert_eq!(Property::new("c", Value::Null).to_log_string(), "(c, null)");
    }
}
