use api_types::{
    expense::{Expense, ExpenseNew},
    predefined::{ApplyMonthRequest, ApplyMonthResponse, ApplyOptions, PredefinedExpense, PredefinedExpenseNew},
    salary::Salary,
};
use engine::Month;
use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};

#[derive(Debug)]
pub enum ClientError {
    NotFound,
    Validation(String),
    Server(String),
    Transport(reqwest::Error),
}

/// Non-2xx responses carry `{"message": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        // `Url::join` drops the last path segment unless the base ends with
        // a slash, so normalize here once.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid endpoint: {err}")))
    }

    /// Decodes a success body, or maps the error payload into a
    /// [`ClientError`].
    async fn read_json<T: DeserializeOwned>(
        res: Response,
    ) -> std::result::Result<T, ClientError> {
        if res.status().is_success() {
            return res.json::<T>().await.map_err(ClientError::Transport);
        }
        Err(Self::read_error(res).await)
    }

    /// Discards the body, keeping only success/failure.
    async fn read_unit(res: Response) -> std::result::Result<(), ClientError> {
        if res.status().is_success() {
            return Ok(());
        }
        Err(Self::read_error(res).await)
    }

    async fn read_error(res: Response) -> ClientError {
        let status = res.status();
        let message = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.message)
            .unwrap_or_else(|_| "An error occurred".to_string());
        tracing::warn!(%status, message, "request failed");

        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            _ => ClientError::Server(message),
        }
    }

    pub async fn expenses_for_month(
        &self,
        month: Month,
    ) -> std::result::Result<Vec<Expense>, ClientError> {
        let endpoint = self.endpoint(&format!("expenses/month/{month}"))?;
        tracing::debug!(%month, "loading expenses");
        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::read_json(res).await
    }

    pub async fn expense_create(
        &self,
        payload: &ExpenseNew,
    ) -> std::result::Result<Expense, ClientError> {
        let endpoint = self.endpoint("expenses")?;
        let res = self
            .http
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::read_json(res).await
    }

    pub async fn expense_update(
        &self,
        id: &str,
        payload: &ExpenseNew,
    ) -> std::result::Result<Expense, ClientError> {
        let endpoint = self.endpoint(&format!("expenses/{id}"))?;
        let res = self
            .http
            .put(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::read_json(res).await
    }

    pub async fn expense_delete(&self, id: &str) -> std::result::Result<(), ClientError> {
        let endpoint = self.endpoint(&format!("expenses/{id}"))?;
        let res = self
            .http
            .delete(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::read_unit(res).await
    }

    /// Salary for a month; absence is `None`, not an error.
    pub async fn salary_for_month(
        &self,
        month: Month,
    ) -> std::result::Result<Option<Salary>, ClientError> {
        let endpoint = self.endpoint(&format!("salaries/{month}"))?;
        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        match Self::read_json::<Salary>(res).await {
            Ok(salary) => Ok(Some(salary)),
            Err(ClientError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Create-or-update: the backend upserts on month.
    pub async fn salary_set(
        &self,
        month: Month,
        amount: f64,
    ) -> std::result::Result<Salary, ClientError> {
        let endpoint = self.endpoint("salaries")?;
        let payload = Salary {
            month: month.to_string(),
            amount,
        };
        let res = self
            .http
            .post(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::read_json(res).await
    }

    pub async fn salary_delete(&self, month: Month) -> std::result::Result<(), ClientError> {
        let endpoint = self.endpoint(&format!("salaries/{month}"))?;
        let res = self
            .http
            .delete(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::read_unit(res).await
    }

    pub async fn predefined_list(
        &self,
    ) -> std::result::Result<Vec<PredefinedExpense>, ClientError> {
        let endpoint = self.endpoint("predefined-expenses")?;
        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::read_json(res).await
    }

    pub async fn predefined_create(
        &self,
        payload: &PredefinedExpenseNew,
    ) -> std::result::Result<PredefinedExpense, ClientError> {
        let endpoint = self.endpoint("predefined-expenses")?;
        let res = self
            .http
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::read_json(res).await
    }

    pub async fn predefined_update(
        &self,
        id: &str,
        payload: &PredefinedExpenseNew,
    ) -> std::result::Result<PredefinedExpense, ClientError> {
        let endpoint = self.endpoint(&format!("predefined-expenses/{id}"))?;
        let res = self
            .http
            .put(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::read_json(res).await
    }

    pub async fn predefined_delete(&self, id: &str) -> std::result::Result<(), ClientError> {
        let endpoint = self.endpoint(&format!("predefined-expenses/{id}"))?;
        let res = self
            .http
            .delete(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::read_unit(res).await
    }

    /// Materializes templates into the target month.
    ///
    /// `ids: None` applies every active template. Created records are tagged
    /// predefined-origin via the options flag.
    pub async fn apply_to_month(
        &self,
        month: Month,
        ids: Option<&[String]>,
    ) -> std::result::Result<ApplyMonthResponse, ClientError> {
        let endpoint = self.endpoint(&format!("predefined-expenses/apply/{month}"))?;
        let payload = ApplyMonthRequest {
            predefined_expense_ids: ids.map(<[String]>::to_vec),
            options: Some(ApplyOptions {
                is_predefined: true,
            }),
        };
        tracing::debug!(%month, ids = ?payload.predefined_expense_ids, "applying templates");
        let res = self
            .http
            .post(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::read_json(res).await
    }

    pub async fn health(&self) -> std::result::Result<(), ClientError> {
        let endpoint = self.endpoint("health")?;
        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::read_unit(res).await
    }
}
