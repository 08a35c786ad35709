//! HTTP implementation of the remote store.

use api_types::{ClientRecord, InvoiceRecord, RateRecord, TransactionRecord};
use reqwest::Url;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{GatewayError, RemoteStore, ResultGateway};

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
pub struct HttpStore {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpStore {
    pub fn new(base_url: &str) -> ResultGateway<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| GatewayError::Server(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> ResultGateway<Url> {
        self.base_url
            .join(path)
            .map_err(|err| GatewayError::Server(format!("invalid base_url: {err}")))
    }

    async fn fail(res: reqwest::Response) -> GatewayError {
        let status = res.status();
        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());

        match status.as_u16() {
            401 => GatewayError::Unauthorized,
            404 => GatewayError::NotFound(body),
            422 => GatewayError::Validation(body),
            _ => GatewayError::Server(body),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ResultGateway<T> {
        let res = self
            .http
            .get(self.endpoint(path)?)
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        if res.status().is_success() {
            return res.json::<T>().await.map_err(GatewayError::Transport);
        }
        Err(Self::fail(res).await)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ResultGateway<()> {
        let res = self
            .http
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(Self::fail(res).await)
    }
}

#[async_trait::async_trait]
impl RemoteStore for HttpStore {
    async fn test_connection(&self) -> ResultGateway<()> {
        let res = self
            .http
            .get(self.endpoint("health")?)
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(Self::fail(res).await)
    }

    async fn fetch_transactions(&self) -> ResultGateway<Vec<TransactionRecord>> {
        self.get_json("transactions").await
    }

    async fn fetch_clients(&self) -> ResultGateway<Vec<ClientRecord>> {
        self.get_json("clients").await
    }

    async fn fetch_invoices(&self) -> ResultGateway<Vec<InvoiceRecord>> {
        self.get_json("invoices").await
    }

    async fn fetch_rates(&self) -> ResultGateway<Vec<RateRecord>> {
        self.get_json("exchange-rates").await
    }

    async fn upsert_transaction(&self, record: &TransactionRecord) -> ResultGateway<()> {
        self.post_json("transactions/upsert", record).await
    }

    async fn upsert_client(&self, record: &ClientRecord) -> ResultGateway<()> {
        self.post_json("clients/upsert", record).await
    }

    async fn upsert_invoice(&self, record: &InvoiceRecord) -> ResultGateway<()> {
        self.post_json("invoices/upsert", record).await
    }

    async fn upsert_rate(&self, record: &RateRecord) -> ResultGateway<()> {
        self.post_json("exchange-rates/upsert", record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_unparseable_urls() {
        assert!(HttpStore::new("not a url").is_err());
        assert!(HttpStore::new("http://127.0.0.1:8000/").is_ok());
    }

    fn response(status: u16, body: &'static str) -> reqwest::Response {
        let inner = http::Response::builder()
            .status(status)
            .body(body)
            .unwrap();
        reqwest::Response::from(inner)
    }

    #[tokio::test]
    async fn statuses_map_to_their_error_variants() {
        let err = HttpStore::fail(response(401, r#"{"error":"bad token"}"#)).await;
        assert!(matches!(err, GatewayError::Unauthorized));

        let err = HttpStore::fail(response(404, r#"{"error":"no such client"}"#)).await;
        assert!(matches!(err, GatewayError::NotFound(body) if body == "no such client"));

        let err = HttpStore::fail(response(422, r#"{"error":"amount out of range"}"#)).await;
        assert!(matches!(err, GatewayError::Validation(body) if body == "amount out of range"));

        let err = HttpStore::fail(response(500, r#"{"error":"db down"}"#)).await;
        assert!(matches!(err, GatewayError::Server(body) if body == "db down"));
    }

    #[tokio::test]
    async fn unparseable_error_bodies_fall_back_to_a_generic_message() {
        let err = HttpStore::fail(response(503, "<html>gateway timeout</html>")).await;
        assert!(matches!(err, GatewayError::Server(body) if body == "unknown error"));
    }
}
