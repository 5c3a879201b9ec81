//! Typed endpoints of the expense REST API.

use serde::Deserialize;
use std::rc::Rc;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::filters::{endpoint_with_query, DashboardFilter, TransactionFilter};
use crate::http::{HttpClient, RequestOptions, Transport};
use crate::session::SessionStore;
use crate::{
    AuthResponse, Category, Dashboard, EntityId, LoginRequest, RegisterRequest, Transaction,
    TransactionPayload,
};

pub const SIGN_IN_PATH: &str = "/auth/signin";
pub const REGISTER_PATH: &str = "/auth/register";
pub const CATEGORIES_PATH: &str = "/api/transactions/category";
pub const TRANSACTIONS_PATH: &str = "/api/transactions";
pub const DASHBOARD_PATH: &str = "/api/dashboard";

/// Most list endpoints wrap their payload as `{ "data": ... }`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

/// Client for the expense API
#[derive(Clone)]
pub struct ExpenseApi {
    http: HttpClient,
}

impl ExpenseApi {
    pub fn new(config: ApiConfig, transport: Rc<dyn Transport>, session: Rc<dyn SessionStore>) -> Self {
        Self {
            http: HttpClient::new(config, transport, session),
        }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn is_authenticated(&self) -> bool {
        self.http.session().is_authenticated()
    }

    /// Sign in and keep the returned token for later requests
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let options = RequestOptions::post().json(credentials)?;
        let response = self
            .http
            .request_json::<AuthResponse>(SIGN_IN_PATH, options)
            .await?
            .unwrap_or_default();

        if let Some(token) = response.token.as_deref().filter(|token| !token.is_empty()) {
            self.http.session().set_token(token);
        }
        Ok(response)
    }

    pub async fn register(&self, account: &RegisterRequest) -> Result<(), ApiError> {
        let options = RequestOptions::post().json(account)?;
        self.http.request(REGISTER_PATH, options).await?;
        Ok(())
    }

    pub fn logout(&self) {
        self.http.session().remove_token();
    }

    /// All categories. Failures are logged and yield an empty list so that the
    /// category picker degrades instead of blocking the page.
    pub async fn categories(&self) -> Vec<Category> {
        match self
            .http
            .request_json::<Envelope<Vec<Category>>>(CATEGORIES_PATH, RequestOptions::get())
            .await
        {
            Ok(envelope) => envelope.and_then(|e| e.data).unwrap_or_default(),
            Err(err) => {
                log::error!("Failed to fetch categories: {err}");
                Vec::new()
            }
        }
    }

    pub async fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, ApiError> {
        let endpoint = endpoint_with_query(TRANSACTIONS_PATH, &filter.query_pairs());
        let envelope = self
            .http
            .request_json::<Envelope<Vec<Transaction>>>(&endpoint, RequestOptions::get())
            .await?;
        Ok(envelope.and_then(|e| e.data).unwrap_or_default())
    }

    pub async fn create_transaction(&self, payload: &TransactionPayload) -> Result<(), ApiError> {
        let options = RequestOptions::post().json(payload)?;
        self.http.request(TRANSACTIONS_PATH, options).await?;
        Ok(())
    }

    pub async fn update_transaction(&self, id: &EntityId, payload: &TransactionPayload) -> Result<(), ApiError> {
        let options = RequestOptions::put().json(payload)?;
        self.http.request(&transaction_path(id), options).await?;
        Ok(())
    }

    pub async fn delete_transaction(&self, id: &EntityId) -> Result<(), ApiError> {
        self.http
            .request(&transaction_path(id), RequestOptions::delete())
            .await?;
        Ok(())
    }

    pub async fn dashboard(&self, filter: &DashboardFilter) -> Result<Dashboard, ApiError> {
        let endpoint = endpoint_with_query(DASHBOARD_PATH, &filter.query_pairs());
        let envelope = self
            .http
            .request_json::<Envelope<Dashboard>>(&endpoint, RequestOptions::get())
            .await?;
        Ok(envelope.and_then(|e| e.data).unwrap_or_default())
    }
}

fn transaction_path(id: &EntityId) -> String {
    format!("{TRANSACTIONS_PATH}/{}", urlencoding::encode(id.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterEvent;
    use crate::http::testing::FakeTransport;
    use crate::http::Method;
    use crate::session::MemorySessionStore;
    use crate::TransactionType;
    use chrono::NaiveDate;

    fn api(transport: &Rc<FakeTransport>, session: &Rc<MemorySessionStore>) -> ExpenseApi {
        ExpenseApi::new(
            ApiConfig::with_base_url("http://api.test"),
            transport.clone(),
            session.clone(),
        )
    }

    fn payload() -> TransactionPayload {
        TransactionPayload {
            title: "Groceries".to_string(),
            amount: 42.5,
            kind: TransactionType::Expense,
            category_name: "Food".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            note: String::new(),
        }
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let transport = Rc::new(FakeTransport::new().respond(200, "OK", r#"{"token":"jwt-123"}"#));
        let session = Rc::new(MemorySessionStore::new());
        let api = api(&transport, &session);

        let credentials = LoginRequest {
            username: "alice".to_string(),
            password: "secret1".to_string(),
        };
        let response = api.login(&credentials).await.unwrap();

        assert_eq!(response.token.as_deref(), Some("jwt-123"));
        assert_eq!(session.token().as_deref(), Some("jwt-123"));
        assert!(api.is_authenticated());

        let sent = transport.sent();
        assert_eq!(sent[0].url, "http://api.test/auth/signin");
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(
            sent[0].body.as_deref(),
            Some(r#"{"username":"alice","password":"secret1"}"#)
        );
    }

    #[tokio::test]
    async fn test_failed_login_keeps_signed_out() {
        let transport = Rc::new(FakeTransport::new().respond(401, "Unauthorized", r#"{"message":"Invalid credentials"}"#));
        let session = Rc::new(MemorySessionStore::new());
        let api = api(&transport, &session);

        let credentials = LoginRequest {
            username: "alice".to_string(),
            password: "wrongpw".to_string(),
        };
        let err = api.login(&credentials).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(err.is_unauthorized());
        assert!(!api.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_removes_token() {
        let transport = Rc::new(FakeTransport::new());
        let session = Rc::new(MemorySessionStore::with_token("jwt"));
        let api = api(&transport, &session);

        api.logout();

        assert!(!api.is_authenticated());
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_register_accepts_empty_success() {
        let transport = Rc::new(FakeTransport::new().respond(201, "Created", ""));
        let session = Rc::new(MemorySessionStore::new());
        let api = api(&transport, &session);

        let account = RegisterRequest {
            username: "alice".to_string(),
            password: "secret1".to_string(),
            name: "Alice".to_string(),
        };
        assert_eq!(api.register(&account).await, Ok(()));
        assert_eq!(transport.sent()[0].url, "http://api.test/auth/register");
    }

    #[tokio::test]
    async fn test_categories_failure_yields_empty_list() {
        let transport = Rc::new(
            FakeTransport::new()
                .respond(500, "Internal Server Error", "boom")
                .fail("offline"),
        );
        let session = Rc::new(MemorySessionStore::with_token("jwt"));
        let api = api(&transport, &session);

        assert!(api.categories().await.is_empty());
        assert!(api.categories().await.is_empty());
    }

    #[tokio::test]
    async fn test_categories_parses_envelope() {
        let transport = Rc::new(FakeTransport::new().respond(
            200,
            "OK",
            r#"{"data":[{"id":1,"name":"Food","type":"EXPENSE"},{"id":2,"name":"Salary","type":"INCOME"}]}"#,
        ));
        let session = Rc::new(MemorySessionStore::with_token("jwt"));
        let api = api(&transport, &session);

        let categories = api.categories().await;
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].kind, Some(TransactionType::Income));
        assert_eq!(
            transport.sent()[0].url,
            "http://api.test/api/transactions/category"
        );
    }

    #[tokio::test]
    async fn test_transactions_query_and_missing_data() {
        let transport = Rc::new(FakeTransport::new().respond(200, "OK", r#"{"message":"ok"}"#));
        let session = Rc::new(MemorySessionStore::with_token("jwt"));
        let api = api(&transport, &session);

        let mut filter = TransactionFilter::default();
        filter.handle(FilterEvent::SetType("INCOME".parse().unwrap()));
        filter.handle(FilterEvent::ToggleCategory(EntityId::from("3")));

        let list = api.transactions(&filter).await.unwrap();

        assert!(list.is_empty());
        assert_eq!(
            transport.sent()[0].url,
            "http://api.test/api/transactions?type=INCOME&categoryId=3"
        );
    }

    #[tokio::test]
    async fn test_transactions_plain_text_failure() {
        let transport = Rc::new(FakeTransport::new().respond(500, "Internal Server Error", "Internal Server Error"));
        let session = Rc::new(MemorySessionStore::with_token("jwt"));
        let api = api(&transport, &session);

        let err = api.transactions(&TransactionFilter::default()).await.unwrap_err();

        assert_eq!(err.to_string(), "Internal Server Error");
        assert_eq!(transport.sent()[0].url, "http://api.test/api/transactions");
    }

    #[tokio::test]
    async fn test_create_update_delete_paths() {
        let transport = Rc::new(
            FakeTransport::new()
                .respond(201, "Created", r#"{"data":{"id":9}}"#)
                .respond(200, "OK", r#"{"data":{"id":9}}"#)
                .respond(204, "No Content", ""),
        );
        let session = Rc::new(MemorySessionStore::with_token("jwt"));
        let api = api(&transport, &session);
        let id = EntityId::from("9");

        api.create_transaction(&payload()).await.unwrap();
        api.update_transaction(&id, &payload()).await.unwrap();
        api.delete_transaction(&id).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].url, "http://api.test/api/transactions");
        assert_eq!(sent[1].method, Method::Put);
        assert_eq!(sent[1].url, "http://api.test/api/transactions/9");
        assert!(sent[1].body.as_deref().unwrap().contains(r#""categoryName":"Food""#));
        assert_eq!(sent[2].method, Method::Delete);
        assert_eq!(sent[2].url, "http://api.test/api/transactions/9");
        assert_eq!(sent[2].body, None);
    }

    #[tokio::test]
    async fn test_dashboard_query_and_shape() {
        let transport = Rc::new(FakeTransport::new().respond(
            200,
            "OK",
            r#"{"data":{"summary":{"totalIncome":500,"totalExpense":200,"balance":300},"pieChartData":[{"category":"Food","total":200}]}}"#,
        ));
        let session = Rc::new(MemorySessionStore::with_token("jwt"));
        let api = api(&transport, &session);

        let mut filter = DashboardFilter::default();
        filter.handle(FilterEvent::ToggleCategory(EntityId::from("3")));
        filter.handle(FilterEvent::ToggleCategory(EntityId::from("7")));

        let dashboard = api.dashboard(&filter).await.unwrap();

        assert_eq!(dashboard.summary.balance, 300.0);
        assert_eq!(dashboard.breakdown.len(), 1);
        assert_eq!(
            transport.sent()[0].url,
            "http://api.test/api/dashboard?type=EXPENSE&categoryId=3,7"
        );
    }

    #[tokio::test]
    async fn test_dashboard_refresh_after_create_keeps_filters() {
        let body = r#"{"data":{"summary":{"totalIncome":0,"totalExpense":42.5,"balance":-42.5},"pieChartData":[]}}"#;
        let transport = Rc::new(
            FakeTransport::new()
                .respond(200, "OK", body)
                .respond(201, "Created", r#"{"data":{"id":9}}"#)
                .respond(200, "OK", body),
        );
        let session = Rc::new(MemorySessionStore::with_token("jwt"));
        let api = api(&transport, &session);

        let mut filter = DashboardFilter::default();
        filter.handle(FilterEvent::ToggleCategory(EntityId::from("3")));

        api.dashboard(&filter).await.unwrap();
        api.create_transaction(&payload()).await.unwrap();
        let refreshed = api.dashboard(&filter).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[1].method, Method::Post);
        assert_eq!(sent[2].url, sent[0].url);
        assert_eq!(sent[2].url, "http://api.test/api/dashboard?type=EXPENSE&categoryId=3");
        assert_eq!(refreshed.summary.total_expense, 42.5);
    }
}
