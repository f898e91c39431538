//! Raw test-case records as read from a result file, before classification.

/// A `<failure>`, `<error>` or `<skipped>` child of a test case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Marker {
    /// Text content of the element, if any.
    pub text: Option<String>,
}

impl Marker {
    /// Creates a marker with body text.
    #[cfg(any(test, feature = "test-helpers"))]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Returns true if the body text contains `needle`.
    pub fn text_contains(&self, needle: &str) -> bool {
        self.text.as_deref().is_some_and(|t| t.contains(needle))
    }
}

/// One `<testcase>` element with everything the classifier looks at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTestCase {
    /// `classname` attribute.
    pub classname: String,
    /// `name` attribute.
    pub name: String,
    /// `time` attribute, unparsed.
    pub time: Option<String>,
    /// `<failure>` child.
    pub failure: Option<Marker>,
    /// `<error>` child.
    pub error: Option<Marker>,
    /// `<skipped>` child.
    pub skipped: Option<Marker>,
    /// `<property name=".." value=".."/>` entries in document order.
    pub properties: Vec<(String, String)>,
}

impl RawTestCase {
    /// Creates a record with no markers or properties.
    pub fn new(classname: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            classname: classname.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the value of the first property named `name`.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Builders for constructing records in tests without going through XML.
#[cfg(any(test, feature = "test-helpers"))]
impl RawTestCase {
    /// Sets the `time` attribute.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Attaches a `<failure>` child with the given text.
    pub fn with_failure(mut self, text: impl Into<String>) -> Self {
        self.failure = Some(Marker::with_text(text));
        self
    }

    /// Attaches an empty `<error>` child.
    pub fn with_error(mut self) -> Self {
        self.error = Some(Marker::default());
        self
    }

    /// Attaches an empty `<skipped>` child.
    pub fn with_skipped(mut self) -> Self {
        self.skipped = Some(Marker::default());
        self
    }

    /// Appends a property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((name.into(), value.into()));
        self
    }
}
