//! Typed request builders and calls for the order and payment services.
//!
//! # Design
//! Each operation is split into a `build_*` function that produces an
//! `HttpRequest` (pure, no I/O) and an async method that builds and sends it
//! through the `Dispatcher`. The async methods return the raw `HttpResponse`;
//! interpreting status and body is up to the caller.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::dispatch::{Dispatcher, HttpTransport, Transport};
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateAccount, CreateOrder, Deposit};

pub const ORDERS_PATH: &str = "/api/v1/orders";
pub const ACCOUNTS_PATH: &str = "/api/v1/payment/accounts";

/// Bytes `encodeURIComponent` leaves alone besides ASCII alphanumerics.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode one path segment or query value.
///
/// Leaves ASCII alphanumerics and `- _ . ! ~ * ' ( )` alone and encodes
/// everything else as UTF-8, with space as `%20`.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Client for the goshop gateway.
#[derive(Debug)]
pub struct GoshopClient<T = HttpTransport> {
    dispatcher: Dispatcher<T>,
}

impl<T: Transport> GoshopClient<T> {
    pub fn new(dispatcher: Dispatcher<T>) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    pub fn build_create_order(input: &CreateOrder) -> Result<HttpRequest, ClientError> {
        HttpRequest::json(HttpMethod::Post, ORDERS_PATH, input)
    }

    pub fn build_list_orders(user_id: &str) -> HttpRequest {
        HttpRequest::get(format!("{ORDERS_PATH}?user_id={}", encode_component(user_id)))
    }

    pub fn build_order_status(order_id: &str) -> HttpRequest {
        HttpRequest::get(format!("{ORDERS_PATH}/{}/status", encode_component(order_id)))
    }

    pub fn build_create_account(input: &CreateAccount) -> Result<HttpRequest, ClientError> {
        HttpRequest::json(HttpMethod::Post, ACCOUNTS_PATH, input)
    }

    pub fn build_deposit(input: &Deposit) -> Result<HttpRequest, ClientError> {
        let path = format!("{ACCOUNTS_PATH}/{}/deposit", encode_component(&input.user_id));
        HttpRequest::json(HttpMethod::Post, path, input)
    }

    pub fn build_balance(user_id: &str) -> HttpRequest {
        HttpRequest::get(format!("{ACCOUNTS_PATH}/{}/balance", encode_component(user_id)))
    }

    pub async fn create_order(&self, input: &CreateOrder) -> Result<HttpResponse, ClientError> {
        let request = Self::build_create_order(input)?;
        Ok(self.dispatcher.dispatch(&request).await?)
    }

    pub async fn list_orders(&self, user_id: &str) -> Result<HttpResponse, ClientError> {
        Ok(self.dispatcher.dispatch(&Self::build_list_orders(user_id)).await?)
    }

    pub async fn order_status(&self, order_id: &str) -> Result<HttpResponse, ClientError> {
        Ok(self.dispatcher.dispatch(&Self::build_order_status(order_id)).await?)
    }

    pub async fn create_account(&self, input: &CreateAccount) -> Result<HttpResponse, ClientError> {
        let request = Self::build_create_account(input)?;
        Ok(self.dispatcher.dispatch(&request).await?)
    }

    pub async fn deposit(&self, input: &Deposit) -> Result<HttpResponse, ClientError> {
        let request = Self::build_deposit(input)?;
        Ok(self.dispatcher.dispatch(&request).await?)
    }

    pub async fn balance(&self, user_id: &str) -> Result<HttpResponse, ClientError> {
        Ok(self.dispatcher.dispatch(&Self::build_balance(user_id)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Amount;

    type Client = GoshopClient<HttpTransport>;

    fn json_header() -> Vec<(String, String)> {
        vec![("content-type".to_string(), "application/json".to_string())]
    }

    #[test]
    fn encode_component_matches_uri_component_rules() {
        assert_eq!(encode_component("u1"), "u1");
        assert_eq!(encode_component("u/2"), "u%2F2");
        assert_eq!(encode_component("a b+c"), "a%20b%2Bc");
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_component("?&=#%"), "%3F%26%3D%23%25");
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn encode_component_escapes_every_other_printable_ascii() {
        for b in 0x20u8..0x7f {
            let c = b as char;
            let expected = if c.is_ascii_alphanumeric() || "-_.!~*'()".contains(c) {
                c.to_string()
            } else {
                format!("%{b:02X}")
            };
            assert_eq!(encode_component(&c.to_string()), expected, "byte {b:#04x}");
        }
    }

    #[test]
    fn build_create_order_produces_correct_request() {
        let input = CreateOrder {
            user_id: "u1".to_string(),
            description: "widget".to_string(),
            amount: Amount::new(9.99),
        };
        let req = Client::build_create_order(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/api/v1/orders");
        assert_eq!(req.headers, json_header());
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["user_id"], "u1");
        assert_eq!(body["description"], "widget");
        assert_eq!(body["amount"], 9.99);
    }

    #[test]
    fn build_list_orders_puts_user_in_query() {
        let req = Client::build_list_orders("u1");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "/api/v1/orders?user_id=u1");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_list_orders_encodes_query_value() {
        let req = Client::build_list_orders("a&b=c");
        assert_eq!(req.path, "/api/v1/orders?user_id=a%26b%3Dc");
    }

    #[test]
    fn build_order_status_embeds_id_in_path() {
        let req = Client::build_order_status("00000000-0000-0000-0000-000000000001");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "/api/v1/orders/00000000-0000-0000-0000-000000000001/status");
    }

    #[test]
    fn build_create_account_produces_correct_request() {
        let req = Client::build_create_account(&CreateAccount { user_id: "u2".to_string() }).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/api/v1/payment/accounts");
        assert_eq!(req.headers, json_header());
        assert_eq!(req.body.as_deref(), Some(r#"{"user_id":"u2"}"#));
    }

    #[test]
    fn build_deposit_addresses_user_and_repeats_it_in_body() {
        let input = Deposit {
            user_id: "u2".to_string(),
            amount: Amount::parse("50"),
        };
        let req = Client::build_deposit(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/api/v1/payment/accounts/u2/deposit");
        assert_eq!(req.headers, json_header());
        assert_eq!(req.body.as_deref(), Some(r#"{"user_id":"u2","amount":50}"#));
    }

    #[test]
    fn build_deposit_encodes_path_but_not_body() {
        let input = Deposit {
            user_id: "u/2".to_string(),
            amount: Amount::new(1.5),
        };
        let req = Client::build_deposit(&input).unwrap();
        assert_eq!(req.path, "/api/v1/payment/accounts/u%2F2/deposit");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["user_id"], "u/2");
    }

    #[test]
    fn build_balance_encodes_reserved_characters() {
        let req = Client::build_balance("u/2");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "/api/v1/payment/accounts/u%2F2/balance");
        assert!(req.body.is_none());
    }
}
