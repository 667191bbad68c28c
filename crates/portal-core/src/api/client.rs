use super::types::{NewTool, Tool};
use crate::error::{describe_status, PortalError};
use crate::identity::provider::AccessToken;
use reqwest::Client;

/// Authenticated client for the portal backend. Holds one connection pool;
/// the bearer token is supplied per call because tokens are acquired anew
/// for every request.
pub struct PortalApi {
    client: Client,
    base_url: String,
}

impl PortalApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tools_endpoint(&self) -> String {
        format!("{}/api/tools", self.base_url.trim_end_matches('/'))
    }

    pub async fn list_tools(&self, token: &AccessToken) -> Result<Vec<Tool>, PortalError> {
        let resp = self
            .client
            .get(self.tools_endpoint())
            .bearer_auth(&token.secret)
            .send()
            .await
            .map_err(|e| PortalError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "tool list request failed");
            return Err(PortalError::Api(describe_status(status)));
        }

        resp.json::<Vec<Tool>>()
            .await
            .map_err(|e| PortalError::Malformed(e.to_string()))
    }

    pub async fn create_tool(&self, token: &AccessToken, tool: &NewTool) -> Result<(), PortalError> {
        let resp = self
            .client
            .post(self.tools_endpoint())
            .bearer_auth(&token.secret)
            .json(tool)
            .send()
            .await
            .map_err(|e| PortalError::Network(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            tracing::info!(name = %tool.name, "tool created");
            return Ok(());
        }

        // Error bodies carry the message in a `detail` field when the
        // backend has one to give; otherwise fall back to the bare status.
        let detail = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v["detail"].as_str().map(str::to_string));

        match detail {
            Some(message) => Err(PortalError::Rejected(message)),
            None => Err(PortalError::Api(status.as_u16().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::serve;
    use http_body_util::{BodyExt, Full};
    use hyper::body::Bytes;
    use hyper::Response;
    use std::convert::Infallible;

    fn token() -> AccessToken {
        AccessToken {
            secret: "test-token".to_string(),
        }
    }

    // --- list ---

    #[tokio::test]
    async fn list_parses_tool_array() {
        let addr = serve(|req| async move {
            assert_eq!(
                req.headers()
                    .get("authorization")
                    .and_then(|v| v.to_str().ok()),
                Some("Bearer test-token")
            );
            let body = r#"[
                {"id": 1, "name": "Wiki", "description": "Internal wiki", "target_path": "https://wiki.internal"},
                {"id": 2, "name": "Uploader", "description": "Data uploader", "target_path": "/uploader"}
            ]"#;
            Ok::<_, Infallible>(Response::new(Full::new(Bytes::from(body))))
        })
        .await;

        let api = PortalApi::new(format!("http://{addr}"));
        let tools = api.list_tools(&token()).await.unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].name, "Wiki");
        assert_eq!(tools[1].target_path, "/uploader");
    }

    #[tokio::test]
    async fn list_403_surfaces_status_and_reason() {
        let addr = serve(|_req| async {
            Ok::<_, Infallible>(
                Response::builder()
                    .status(403)
                    .body(Full::new(Bytes::from("denied")))
                    .unwrap(),
            )
        })
        .await;

        let api = PortalApi::new(format!("http://{addr}"));
        let err = api.list_tools(&token()).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("403"), "unexpected: {msg}");
        assert_eq!(msg, "API Error: 403 Forbidden");
    }

    #[tokio::test]
    async fn list_garbage_body_is_malformed() {
        let addr = serve(|_req| async {
            Ok::<_, Infallible>(Response::new(Full::new(Bytes::from("not json"))))
        })
        .await;

        let api = PortalApi::new(format!("http://{addr}"));
        let err = api.list_tools(&token()).await.unwrap_err();
        assert!(matches!(err, PortalError::Malformed(_)));
    }

    #[tokio::test]
    async fn list_unreachable_host_is_network_error() {
        // Port from an ephemeral bind that is immediately dropped.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = PortalApi::new(format!("http://{addr}"));
        let err = api.list_tools(&token()).await.unwrap_err();
        assert!(matches!(err, PortalError::Network(_)));
    }

    // --- create ---

    #[tokio::test]
    async fn create_posts_json_payload() {
        let addr = serve(|req| async move {
            assert_eq!(req.method(), hyper::Method::POST);
            assert_eq!(
                req.headers()
                    .get("content-type")
                    .and_then(|v| v.to_str().ok()),
                Some("application/json")
            );
            let body = req.collect().await.unwrap().to_bytes();
            let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(v["name"], "Wiki");
            assert_eq!(v["target_path"], "https://wiki.internal");
            Ok::<_, Infallible>(
                Response::builder()
                    .status(201)
                    .body(Full::new(Bytes::from("{}")))
                    .unwrap(),
            )
        })
        .await;

        let api = PortalApi::new(format!("http://{addr}"));
        let tool = NewTool {
            name: "Wiki".to_string(),
            description: "Internal wiki".to_string(),
            target_path: "https://wiki.internal".to_string(),
        };
        api.create_tool(&token(), &tool).await.unwrap();
    }

    #[tokio::test]
    async fn create_uses_detail_field_verbatim() {
        let addr = serve(|_req| async {
            Ok::<_, Infallible>(
                Response::builder()
                    .status(400)
                    .body(Full::new(Bytes::from(r#"{"detail":"name already exists"}"#)))
                    .unwrap(),
            )
        })
        .await;

        let api = PortalApi::new(format!("http://{addr}"));
        let tool = NewTool {
            name: "Wiki".to_string(),
            description: "dup".to_string(),
            target_path: "https://wiki.internal".to_string(),
        };
        let err = api.create_tool(&token(), &tool).await.unwrap_err();
        assert_eq!(err.to_string(), "name already exists");
    }

    #[tokio::test]
    async fn create_without_detail_is_generic() {
        let addr = serve(|_req| async {
            Ok::<_, Infallible>(
                Response::builder()
                    .status(400)
                    .body(Full::new(Bytes::from("nope")))
                    .unwrap(),
            )
        })
        .await;

        let api = PortalApi::new(format!("http://{addr}"));
        let tool = NewTool {
            name: "Wiki".to_string(),
            description: "d".to_string(),
            target_path: "https://wiki.internal".to_string(),
        };
        let err = api.create_tool(&token(), &tool).await.unwrap_err();
        assert_eq!(err.to_string(), "API Error: 400");
    }
}
