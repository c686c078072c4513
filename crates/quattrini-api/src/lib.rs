// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use quattrini_app::{ApiCall, ApiOutcome, Category, NewTransaction, RemoteError, Transaction};
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Blocking client for the finance tracker backend. One request per call,
/// no retries; failures are reported through `RemoteError`.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("server.base_url must not be empty");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run one call to completion and wrap the result in its outcome
    /// variant. Every request is traced so the logs screen shows client
    /// traffic.
    pub fn execute(&self, token: &str, call: &ApiCall) -> ApiOutcome {
        match call {
            ApiCall::Login { email, password } => {
                tracing::info!("POST /login");
                ApiOutcome::LoggedIn(self.login(email, password).inspect_err(log_failure))
            }
            ApiCall::Register { email, password } => {
                tracing::info!("POST /register");
                ApiOutcome::Registered(self.register(email, password).inspect_err(log_failure))
            }
            ApiCall::ListCategories => {
                tracing::info!("GET /category");
                ApiOutcome::Categories(self.list_categories(token).inspect_err(log_failure))
            }
            ApiCall::CreateCategory { name } => {
                tracing::info!(name = %name, "POST /category");
                ApiOutcome::CategorySaved(self.create_category(token, name).inspect_err(log_failure))
            }
            ApiCall::DeleteCategory { id } => {
                tracing::info!(id = *id, "DELETE /category");
                ApiOutcome::CategoryRemoved(
                    self.delete_category(token, *id).inspect_err(log_failure),
                )
            }
            ApiCall::ListTransactions => {
                tracing::info!("GET /transaction");
                ApiOutcome::Transactions(self.list_transactions(token).inspect_err(log_failure))
            }
            ApiCall::SearchTransactions { name } => {
                tracing::info!(name = %name, "GET /transaction");
                ApiOutcome::TransactionsFiltered(
                    self.search_transactions(token, name).inspect_err(log_failure),
                )
            }
            ApiCall::CreateTransaction(payload) => {
                tracing::info!("POST /transaction");
                ApiOutcome::TransactionSaved(
                    self.create_transaction(token, payload).inspect_err(log_failure),
                )
            }
            ApiCall::DeleteTransaction { id } => {
                tracing::info!(id = *id, "DELETE /transaction");
                ApiOutcome::TransactionRemoved(
                    self.delete_transaction(token, *id).inspect_err(log_failure),
                )
            }
        }
    }

    pub fn login(&self, email: &str, password: &str) -> Result<String, RemoteError> {
        let response = self.send(
            self.http
                .post(format!("{}/login", self.base_url))
                .json(&AuthRequest { email, password }),
        )?;
        let parsed: AuthResponse = decode(response)?;
        Ok(parsed.token)
    }

    pub fn register(&self, email: &str, password: &str) -> Result<(), RemoteError> {
        self.send(
            self.http
                .post(format!("{}/register", self.base_url))
                .json(&AuthRequest { email, password }),
        )?;
        Ok(())
    }

    pub fn list_categories(&self, token: &str) -> Result<Vec<Category>, RemoteError> {
        let response = self.send(
            self.http
                .get(format!("{}/category", self.base_url))
                .bearer_auth(token),
        )?;
        decode(response)
    }

    pub fn create_category(&self, token: &str, name: &str) -> Result<(), RemoteError> {
        self.send(
            self.http
                .post(format!("{}/category", self.base_url))
                .bearer_auth(token)
                .json(&CategoryRequest { name }),
        )?;
        Ok(())
    }

    pub fn delete_category(&self, token: &str, id: i64) -> Result<(), RemoteError> {
        self.send(
            self.http
                .delete(format!("{}/category", self.base_url))
                .query(&[("id", id)])
                .bearer_auth(token),
        )?;
        Ok(())
    }

    pub fn list_transactions(&self, token: &str) -> Result<Vec<Transaction>, RemoteError> {
        let response = self.send(
            self.http
                .get(format!("{}/transaction", self.base_url))
                .bearer_auth(token),
        )?;
        decode(response)
    }

    pub fn search_transactions(
        &self,
        token: &str,
        name: &str,
    ) -> Result<Vec<Transaction>, RemoteError> {
        let response = self.send(
            self.http
                .get(format!("{}/transaction", self.base_url))
                .query(&[("name", name)])
                .bearer_auth(token),
        )?;
        decode(response)
    }

    pub fn create_transaction(
        &self,
        token: &str,
        payload: &NewTransaction,
    ) -> Result<(), RemoteError> {
        self.send(
            self.http
                .post(format!("{}/transaction", self.base_url))
                .bearer_auth(token)
                .json(&TransactionRequest::new(payload)),
        )?;
        Ok(())
    }

    pub fn delete_transaction(&self, token: &str, id: i64) -> Result<(), RemoteError> {
        self.send(
            self.http
                .delete(format!("{}/transaction", self.base_url))
                .query(&[("id", id)])
                .bearer_auth(token),
        )?;
        Ok(())
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, RemoteError> {
        let response = request
            .send()
            .map_err(|error| RemoteError::Transport(error.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(RemoteError::Status(status.as_u16()))
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    response
        .json()
        .map_err(|error| RemoteError::Decode(error.to_string()))
}

fn log_failure(error: &RemoteError) {
    tracing::error!("request failed: {error}");
}

#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
}

#[derive(Debug, Serialize)]
struct CategoryRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct TransactionRequest<'a> {
    name: &'a str,
    cost: f64,
    date: String,
    categoriesid: i64,
}

impl<'a> TransactionRequest<'a> {
    fn new(payload: &'a NewTransaction) -> Self {
        Self {
            name: &payload.name,
            cost: payload.cost,
            // The server stores RFC 3339; dates entered in the client are
            // sent as midnight UTC.
            date: format!("{}T00:00:00Z", payload.date),
            categoriesid: payload.category_id,
        }
    }
}
