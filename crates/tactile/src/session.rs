//! Session - the seam between action composition and a remote end
//!
//! Everything the interaction suite needs from a browser goes through the
//! [`Session`] trait: element lookup, element state, script evaluation and
//! action dispatch. The HTTP implementation lives in [`crate::remote`], the
//! recording implementation for unit tests in [`crate::mock`].
//!
//! ```text
//! ┌──────────────┐   encode()   ┌────────────────┐  perform_actions  ┌──────────────┐
//! │ ActionBuilder│─────────────►│ ActionsPayload │──────────────────►│ dyn Session  │
//! └──────────────┘              └────────────────┘                   └──────┬───────┘
//!                                                       ┌────────────────────┼──────────────┐
//!                                                       ▼                                   ▼
//!                                               RemoteSession (reqwest)          MockSession (tests)
//! ```

use crate::actions::ActionsPayload;
use crate::geometry::Rect;
use crate::result::InteractionResult;
use async_trait::async_trait;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON key identifying a web element reference on the wire
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Element location strategy
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum By {
    /// Match the `id` attribute
    Id(String),
    /// CSS selector
    CssSelector(String),
    /// Element tag name
    TagName(String),
    /// Match the `name` attribute
    Name(String),
    /// Single class name
    ClassName(String),
    /// XPath expression
    XPath(String),
    /// Exact link text
    LinkText(String),
}

impl By {
    /// Locate by id
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Locate by CSS selector
    pub fn css(selector: impl Into<String>) -> Self {
        Self::CssSelector(selector.into())
    }

    /// Locate by tag name
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::TagName(tag.into())
    }

    /// Translate to the `(using, value)` pair of the W3C "find element" command.
    ///
    /// Only five strategies exist on the wire, so id, name and class name are
    /// rewritten as CSS selectors.
    #[must_use]
    pub fn to_w3c(&self) -> (&'static str, String) {
        match self {
            Self::Id(id) => ("css selector", format!("[id=\"{}\"]", escape_css(id))),
            Self::Name(name) => ("css selector", format!("[name=\"{}\"]", escape_css(name))),
            Self::ClassName(class) => ("css selector", format!(".{class}")),
            Self::CssSelector(css) => ("css selector", css.clone()),
            Self::TagName(tag) => ("tag name", tag.clone()),
            Self::XPath(xpath) => ("xpath", xpath.clone()),
            Self::LinkText(text) => ("link text", text.clone()),
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::CssSelector(css) => write!(f, "css={css}"),
            Self::TagName(tag) => write!(f, "<{tag}>"),
            Self::Name(name) => write!(f, "name={name}"),
            Self::ClassName(class) => write!(f, ".{class}"),
            Self::XPath(xpath) => write!(f, "xpath={xpath}"),
            Self::LinkText(text) => write!(f, "link={text}"),
        }
    }
}

fn escape_css(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Reference to an element owned by the remote end
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WebElement {
    /// Opaque element id assigned by the remote end
    pub id: String,
}

impl WebElement {
    /// Wrap a remote element id
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Serialize for WebElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(ELEMENT_KEY, &self.id)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for WebElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ElementVisitor;

        impl<'de> Visitor<'de> for ElementVisitor {
            type Value = WebElement;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a web element reference object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<WebElement, A::Error> {
                let mut id = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key == ELEMENT_KEY {
                        id = Some(map.next_value::<String>()?);
                    } else {
                        map.next_value::<de::IgnoredAny>()?;
                    }
                }
                id.map(WebElement::new)
                    .ok_or_else(|| de::Error::missing_field(ELEMENT_KEY))
            }
        }

        deserializer.deserialize_map(ElementVisitor)
    }
}

/// A live automation session
///
/// Implementations must be safe to share across the tasks a test runtime
/// spawns; all methods take `&self`.
#[async_trait]
pub trait Session: Send + Sync {
    /// Browser name reported by the remote end (e.g. "chrome")
    fn browser_name(&self) -> &str;

    /// Navigate to URL and wait for the load to finish
    async fn navigate(&self, url: &str) -> InteractionResult<()>;

    /// Find the first element matching the locator
    async fn find_element(&self, by: &By) -> InteractionResult<WebElement>;

    /// Find all elements matching the locator
    async fn find_elements(&self, by: &By) -> InteractionResult<Vec<WebElement>>;

    /// Find the first descendant of `parent` matching the locator
    async fn find_child_element(
        &self,
        parent: &WebElement,
        by: &By,
    ) -> InteractionResult<WebElement>;

    /// Find all descendants of `parent` matching the locator
    async fn find_child_elements(
        &self,
        parent: &WebElement,
        by: &By,
    ) -> InteractionResult<Vec<WebElement>>;

    /// Click element via the element click command
    async fn element_click(&self, element: &WebElement) -> InteractionResult<()>;

    /// Rendered text of the element
    async fn element_text(&self, element: &WebElement) -> InteractionResult<String>;

    /// DOM property of the element (`value` reflects typed input, unlike the attribute)
    async fn element_property(
        &self,
        element: &WebElement,
        name: &str,
    ) -> InteractionResult<serde_json::Value>;

    /// Bounding rectangle of the element
    async fn element_rect(&self, element: &WebElement) -> InteractionResult<Rect>;

    /// Execute a synchronous script in the page
    async fn execute_script(
        &self,
        script: &str,
        args: Vec<serde_json::Value>,
    ) -> InteractionResult<serde_json::Value>;

    /// Dispatch an encoded action sequence and wait for it to complete
    async fn perform_actions(&self, payload: &ActionsPayload) -> InteractionResult<()>;

    /// Release every key and button held by previous actions
    async fn release_actions(&self) -> InteractionResult<()>;
}

/// Read a DOM property and render it as a string (`null` becomes `None`)
pub async fn property_string<S: Session + ?Sized>(
    session: &S,
    element: &WebElement,
    name: &str,
) -> InteractionResult<Option<String>> {
    let value = session.element_property(element, name).await?;
    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod by_tests {
        use super::*;

        #[test]
        fn test_id_becomes_css() {
            assert_eq!(
                By::id("clickField").to_w3c(),
                ("css selector", "[id=\"clickField\"]".to_string())
            );
        }

        #[test]
        fn test_id_is_escaped() {
            let (_, value) = By::id("a\"b").to_w3c();
            assert_eq!(value, "[id=\"a\\\"b\"]");
        }

        #[test]
        fn test_tag_name_is_native() {
            assert_eq!(By::tag("li").to_w3c(), ("tag name", "li".to_string()));
        }

        #[test]
        fn test_display() {
            assert_eq!(By::id("draggable").to_string(), "#draggable");
            assert_eq!(By::css("#pointerArea").to_string(), "css=#pointerArea");
        }
    }

    mod web_element_tests {
        use super::*;

        #[test]
        fn test_serializes_as_reference() {
            let json = serde_json::to_value(WebElement::new("abc-123")).unwrap();
            assert_eq!(json, serde_json::json!({ ELEMENT_KEY: "abc-123" }));
        }

        #[test]
        fn test_deserializes_ignoring_legacy_keys() {
            let element: WebElement = serde_json::from_value(serde_json::json!({
                "ELEMENT": "legacy",
                ELEMENT_KEY: "w3c-id",
            }))
            .unwrap();
            assert_eq!(element.id, "w3c-id");
        }

        #[test]
        fn test_deserialize_rejects_missing_key() {
            let result: Result<WebElement, _> =
                serde_json::from_value(serde_json::json!({ "ELEMENT": "legacy" }));
            assert!(result.is_err());
        }
    }
}
