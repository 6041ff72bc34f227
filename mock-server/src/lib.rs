use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const STATUS_NEW: &str = "new";

// gateway error codes
const CODE_INVALID_ARGUMENT: u16 = 3;
const CODE_NOT_FOUND: u16 = 5;
const CODE_ALREADY_EXISTS: u16 = 6;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub user_id: String,
    pub description: String,
    pub amount: f64,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub user_id: String,
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListOrders {
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderStatus {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
}

#[derive(Deserialize)]
pub struct CreateOrder {
    pub user_id: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
}

#[derive(Deserialize)]
pub struct CreateAccount {
    pub user_id: String,
}

#[derive(Deserialize)]
pub struct Deposit {
    pub user_id: Option<String>,
    pub amount: f64,
}

#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}

#[derive(Default)]
pub struct Store {
    orders: HashMap<Uuid, Order>,
    accounts: HashMap<String, Account>,
}

pub type Db = Arc<RwLock<Store>>;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn api_error(status: StatusCode, code: u16, message: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (
        status,
        Json(ApiError {
            code,
            message: message.into(),
        }),
    )
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/v1/orders", get(list_orders).post(create_order))
        .route("/api/v1/orders/{order_id}/status", get(order_status))
        .route("/api/v1/payment/accounts", post(create_account))
        .route("/api/v1/payment/accounts/{user_id}/deposit", post(deposit))
        .route("/api/v1/payment/accounts/{user_id}/balance", get(balance))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn create_order(State(db): State<Db>, Json(input): Json<CreateOrder>) -> Json<Order> {
    let order = Order {
        id: Uuid::new_v4(),
        user_id: input.user_id,
        description: input.description,
        amount: input.amount,
        status: STATUS_NEW.to_string(),
    };
    tracing::info!(order_id = %order.id, user_id = %order.user_id, "order created");
    db.write().await.orders.insert(order.id, order.clone());
    Json(order)
}

async fn list_orders(State(db): State<Db>, Query(query): Query<UserQuery>) -> Json<ListOrders> {
    let store = db.read().await;
    let orders = store
        .orders
        .values()
        .filter(|o| o.user_id == query.user_id)
        .cloned()
        .collect();
    Json(ListOrders { orders })
}

async fn order_status(State(db): State<Db>, Path(order_id): Path<String>) -> ApiResult<OrderStatus> {
    let id = Uuid::parse_str(&order_id).map_err(|_| {
        api_error(
            StatusCode::BAD_REQUEST,
            CODE_INVALID_ARGUMENT,
            format!("invalid order id: {order_id}"),
        )
    })?;
    let store = db.read().await;
    store
        .orders
        .get(&id)
        .map(|o| {
            Json(OrderStatus {
                status: o.status.clone(),
            })
        })
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, CODE_NOT_FOUND, "order not found"))
}

async fn create_account(State(db): State<Db>, Json(input): Json<CreateAccount>) -> ApiResult<Account> {
    let mut store = db.write().await;
    if store.accounts.contains_key(&input.user_id) {
        return Err(api_error(
            StatusCode::CONFLICT,
            CODE_ALREADY_EXISTS,
            "account already exists",
        ));
    }
    let account = Account {
        user_id: input.user_id,
        amount: 0.0,
    };
    tracing::info!(user_id = %account.user_id, "account created");
    store.accounts.insert(account.user_id.clone(), account.clone());
    Ok(Json(account))
}

/// The path parameter wins over `user_id` in the body, as on the gateway.
async fn deposit(
    State(db): State<Db>,
    Path(user_id): Path<String>,
    Json(input): Json<Deposit>,
) -> ApiResult<Account> {
    let mut store = db.write().await;
    let account = store
        .accounts
        .get_mut(&user_id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, CODE_NOT_FOUND, "account not found"))?;
    account.amount += input.amount;
    tracing::info!(user_id = %user_id, amount = input.amount, "balance changed");
    Ok(Json(account.clone()))
}

async fn balance(State(db): State<Db>, Path(user_id): Path<String>) -> ApiResult<Account> {
    let store = db.read().await;
    store
        .accounts
        .get(&user_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, CODE_NOT_FOUND, "account not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_serializes_to_json() {
        let order = Order {
            id: Uuid::nil(),
            user_id: "u1".to_string(),
            description: "widget".to_string(),
            amount: 9.99,
            status: STATUS_NEW.to_string(),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["user_id"], "u1");
        assert_eq!(json["amount"], 9.99);
        assert_eq!(json["status"], "new");
    }

    #[test]
    fn create_order_defaults_description_to_empty() {
        let input: CreateOrder = serde_json::from_str(r#"{"user_id":"u1","amount":1}"#).unwrap();
        assert_eq!(input.description, "");
        assert_eq!(input.amount, 1.0);
    }

    #[test]
    fn create_order_rejects_missing_amount() {
        let result: Result<CreateOrder, _> = serde_json::from_str(r#"{"user_id":"u1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn deposit_body_user_is_optional() {
        let input: Deposit = serde_json::from_str(r#"{"amount":50}"#).unwrap();
        assert!(input.user_id.is_none());
        assert_eq!(input.amount, 50.0);
    }
}
