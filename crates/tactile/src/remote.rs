//! W3C WebDriver HTTP client.
//!
//! `RemoteSession` speaks the JSON wire protocol to chromedriver,
//! geckodriver, safaridriver or a Selenium grid. Only the endpoints the
//! [`Session`] trait needs are covered.

use crate::actions::ActionsPayload;
use crate::config::SuiteConfig;
use crate::geometry::Rect;
use crate::result::{InteractionError, InteractionResult};
use crate::session::{By, Session, WebElement};
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info};

/// W3C error codes that mean the locator matched nothing
const NO_SUCH_ELEMENT: &str = "no such element";

/// Map a W3C error body (`{"value": {"error", "message"}}`) to an error
pub(crate) fn map_w3c_error(status: u16, body: &Value) -> InteractionError {
    let value = body.get("value").unwrap_or(body);
    let error = value
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown error");
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .map_or_else(|| format!("HTTP {status}"), str::to_string);

    match error {
        NO_SUCH_ELEMENT => InteractionError::ElementNotFound { message },
        "session not created" => InteractionError::SessionNotCreated { message },
        _ => InteractionError::WebDriver {
            error: error.to_string(),
            message,
        },
    }
}

/// Session on a W3C WebDriver endpoint
#[derive(Debug, Clone)]
pub struct RemoteSession {
    base_url: String,
    session_id: String,
    browser_name: String,
    client: reqwest::Client,
}

impl RemoteSession {
    /// Start a new session with capabilities derived from `config`
    pub async fn connect(config: &SuiteConfig) -> InteractionResult<Self> {
        let base_url = config
            .require_webdriver_url()?
            .trim_end_matches('/')
            .to_string();
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let body = json!({
            "capabilities": {
                "alwaysMatch": config.browser.capabilities(config.headless),
            }
        });
        debug!(url = %base_url, browser = %config.browser, "creating session");
        let resp = client
            .post(format!("{base_url}/session"))
            .json(&body)
            .send()
            .await?;
        let value = read_value(resp).await.map_err(|e| match e {
            InteractionError::WebDriver { error, message } => InteractionError::SessionNotCreated {
                message: format!("{error}: {message}"),
            },
            other => other,
        })?;

        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| InteractionError::SessionNotCreated {
                message: "response carried no sessionId".to_string(),
            })?
            .to_string();
        let browser_name = value
            .pointer("/capabilities/browserName")
            .and_then(Value::as_str)
            .unwrap_or_else(|| config.browser.as_str())
            .to_string();

        info!(session = %session_id, browser = %browser_name, "session created");
        Ok(Self {
            base_url,
            session_id,
            browser_name,
            client,
        })
    }

    /// Attach to an existing session
    pub fn with_client(
        base_url: impl Into<String>,
        session_id: impl Into<String>,
        browser_name: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_id: session_id.into(),
            browser_name: browser_name.into(),
            client,
        }
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the session id.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// End the session
    pub async fn quit(&self) -> InteractionResult<()> {
        self.command(Method::DELETE, "", None).await?;
        info!(session = %self.session_id, "session closed");
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/session/{}{path}", self.base_url, self.session_id)
    }

    async fn command(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> InteractionResult<Value> {
        debug!(%method, path, "webdriver command");
        let mut request = self.client.request(method.clone(), self.url(path));
        if method == Method::POST {
            request = request.json(&body.unwrap_or_else(|| json!({})));
        }
        read_value(request.send().await?).await
    }

    async fn command_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> InteractionResult<T> {
        let value = self.command(method, path, body).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Read the `value` member of a response, mapping error bodies
async fn read_value(resp: reqwest::Response) -> InteractionResult<Value> {
    let status = resp.status();
    let text = resp.text().await?;
    let body: Value = match serde_json::from_str(&text) {
        Ok(body) => body,
        Err(_) if !status.is_success() => {
            return Err(InteractionError::Http {
                message: format!("HTTP {}: {text}", status.as_u16()),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let is_error = body.pointer("/value/error").is_some();
    if !status.is_success() || is_error {
        return Err(map_w3c_error(status.as_u16(), &body));
    }
    Ok(body.get("value").cloned().unwrap_or(Value::Null))
}

fn locator_body(by: &By) -> Value {
    let (using, value) = by.to_w3c();
    json!({ "using": using, "value": value })
}

#[async_trait]
impl Session for RemoteSession {
    fn browser_name(&self) -> &str {
        &self.browser_name
    }

    async fn navigate(&self, url: &str) -> InteractionResult<()> {
        self.command(Method::POST, "/url", Some(json!({ "url": url })))
            .await?;
        Ok(())
    }

    async fn find_element(&self, by: &By) -> InteractionResult<WebElement> {
        self.command_as(Method::POST, "/element", Some(locator_body(by)))
            .await
    }

    async fn find_elements(&self, by: &By) -> InteractionResult<Vec<WebElement>> {
        self.command_as(Method::POST, "/elements", Some(locator_body(by)))
            .await
    }

    async fn find_child_element(
        &self,
        parent: &WebElement,
        by: &By,
    ) -> InteractionResult<WebElement> {
        let path = format!("/element/{}/element", parent.id);
        self.command_as(Method::POST, &path, Some(locator_body(by)))
            .await
    }

    async fn find_child_elements(
        &self,
        parent: &WebElement,
        by: &By,
    ) -> InteractionResult<Vec<WebElement>> {
        let path = format!("/element/{}/elements", parent.id);
        self.command_as(Method::POST, &path, Some(locator_body(by)))
            .await
    }

    async fn element_click(&self, element: &WebElement) -> InteractionResult<()> {
        let path = format!("/element/{}/click", element.id);
        self.command(Method::POST, &path, None).await?;
        Ok(())
    }

    async fn element_text(&self, element: &WebElement) -> InteractionResult<String> {
        let path = format!("/element/{}/text", element.id);
        self.command_as(Method::GET, &path, None).await
    }

    async fn element_property(
        &self,
        element: &WebElement,
        name: &str,
    ) -> InteractionResult<Value> {
        let path = format!("/element/{}/property/{name}", element.id);
        self.command(Method::GET, &path, None).await
    }

    async fn element_rect(&self, element: &WebElement) -> InteractionResult<Rect> {
        let path = format!("/element/{}/rect", element.id);
        self.command_as(Method::GET, &path, None).await
    }

    async fn execute_script(&self, script: &str, args: Vec<Value>) -> InteractionResult<Value> {
        self.command(
            Method::POST,
            "/execute/sync",
            Some(json!({ "script": script, "args": args })),
        )
        .await
    }

    async fn perform_actions(&self, payload: &ActionsPayload) -> InteractionResult<()> {
        let body = serde_json::to_value(payload)?;
        self.command(Method::POST, "/actions", Some(body)).await?;
        Ok(())
    }

    async fn release_actions(&self) -> InteractionResult<()> {
        self.command(Method::DELETE, "/actions", None).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod error_mapping_tests {
        use super::*;

        #[test]
        fn test_no_such_element() {
            let body = json!({"value": {"error": "no such element", "message": "#nope"}});
            let err = map_w3c_error(404, &body);
            assert!(err.is_no_such_element());
            assert_eq!(err.to_string(), "No such element: #nope");
        }

        #[test]
        fn test_generic_error_keeps_code() {
            let body = json!({"value": {"error": "invalid argument", "message": "bad origin"}});
            match map_w3c_error(400, &body) {
                InteractionError::WebDriver { error, message } => {
                    assert_eq!(error, "invalid argument");
                    assert_eq!(message, "bad origin");
                }
                other => panic!("unexpected {other:?}"),
            }
        }

        #[test]
        fn test_session_not_created() {
            let body = json!({"value": {"error": "session not created", "message": "no chrome"}});
            assert!(matches!(
                map_w3c_error(500, &body),
                InteractionError::SessionNotCreated { .. }
            ));
        }

        #[test]
        fn test_missing_fields_fall_back() {
            match map_w3c_error(502, &json!({})) {
                InteractionError::WebDriver { error, message } => {
                    assert_eq!(error, "unknown error");
                    assert_eq!(message, "HTTP 502");
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    mod request_tests {
        use super::*;

        #[test]
        fn test_locator_body() {
            assert_eq!(
                locator_body(&By::id("working")),
                json!({"using": "css selector", "value": "[id=\"working\"]"})
            );
            assert_eq!(
                locator_body(&By::tag("li")),
                json!({"using": "tag name", "value": "li"})
            );
        }

        #[test]
        fn test_url_building() {
            let session = RemoteSession::with_client(
                "http://localhost:4444/",
                "abc",
                "chrome",
                reqwest::Client::new(),
            );
            assert_eq!(session.base_url(), "http://localhost:4444");
            assert_eq!(session.url("/actions"), "http://localhost:4444/session/abc/actions");
            assert_eq!(session.url(""), "http://localhost:4444/session/abc");
            assert_eq!(session.browser_name(), "chrome");
        }

        #[tokio::test]
        async fn test_connect_requires_url() {
            let err = RemoteSession::connect(&SuiteConfig::default()).await.unwrap_err();
            assert!(matches!(err, InteractionError::Config { .. }));
        }
    }
}
