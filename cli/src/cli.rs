//! Command-line surface of the `goshop` console.
//!
//! One subcommand per gateway operation plus `request` for arbitrary calls.
//! Every command sends exactly one request and prints the raw response.

use std::io::Write;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use goshop_core::{
    Amount, CreateAccount, CreateOrder, Deposit, GoshopClient, HttpMethod, HttpRequest,
    HttpResponse, Origin, Transport,
};

#[derive(Debug, Parser)]
#[command(name = "goshop", version, about = "Issue requests to the goshop order and payment services")]
pub struct Cli {
    /// Service base URL. Falls back to GOSHOP_API_URL, then to no prefix.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Print the status line and response headers before the body.
    #[arg(short, long, global = true)]
    pub include: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an order
    CreateOrder {
        #[arg(long)]
        user_id: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
    },
    /// List a user's orders
    ListOrders {
        #[arg(long)]
        user_id: String,
    },
    /// Show the status of an order
    OrderStatus {
        #[arg(long)]
        order_id: String,
    },
    /// Create a payment account
    CreateAccount {
        #[arg(long)]
        user_id: String,
    },
    /// Deposit funds into an account
    Deposit {
        #[arg(long)]
        user_id: String,
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
    },
    /// Show an account balance
    Balance {
        #[arg(long)]
        user_id: String,
    },
    /// Send an arbitrary request; PATH is appended to the origin as-is
    Request {
        path: String,
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,
        /// Header as NAME:VALUE, repeatable
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
        #[arg(short, long)]
        data: Option<String>,
    },
}

impl Cli {
    /// Origin from `--api-url`, else from the environment.
    pub fn origin(&self) -> Origin {
        match &self.api_url {
            Some(url) => Origin::new(url.clone()),
            None => Origin::from_env(),
        }
    }
}

fn parse_header(raw: &str) -> anyhow::Result<(String, String)> {
    let Some((name, value)) = raw.split_once(':') else {
        bail!("invalid header {raw:?}, expected NAME:VALUE");
    };
    Ok((name.trim().to_string(), value.trim().to_string()))
}

/// Build the ad-hoc request for `goshop request`.
pub fn build_request(
    path: &str,
    method: &str,
    headers: &[String],
    data: Option<&str>,
) -> anyhow::Result<HttpRequest> {
    let method: HttpMethod = method.parse()?;
    let mut request = HttpRequest::new(path).method(method);
    for raw in headers {
        let (name, value) = parse_header(raw)?;
        request = request.header(name, value);
    }
    if let Some(data) = data {
        request = request.body(data);
    }
    Ok(request)
}

/// Execute `command` and return the raw response.
pub async fn execute<T: Transport>(
    client: &GoshopClient<T>,
    command: &Command,
) -> anyhow::Result<HttpResponse> {
    let response = match command {
        Command::CreateOrder {
            user_id,
            description,
            amount,
        } => {
            let input = CreateOrder {
                user_id: user_id.clone(),
                description: description.clone(),
                amount: Amount::parse(amount),
            };
            client.create_order(&input).await?
        }
        Command::ListOrders { user_id } => client.list_orders(user_id).await?,
        Command::OrderStatus { order_id } => client.order_status(order_id).await?,
        Command::CreateAccount { user_id } => {
            client
                .create_account(&CreateAccount {
                    user_id: user_id.clone(),
                })
                .await?
        }
        Command::Deposit { user_id, amount } => {
            let input = Deposit {
                user_id: user_id.clone(),
                amount: Amount::parse(amount),
            };
            client.deposit(&input).await?
        }
        Command::Balance { user_id } => client.balance(user_id).await?,
        Command::Request {
            path,
            method,
            headers,
            data,
        } => {
            let request = build_request(path, method, headers, data.as_deref())?;
            client.dispatcher().dispatch(&request).await?
        }
    };
    Ok(response)
}

/// Write the response body byte-for-byte. With `include`, the status line
/// and headers come first, curl-style, followed by a blank line.
pub fn render(out: &mut impl Write, response: &HttpResponse, include: bool) -> anyhow::Result<()> {
    if include {
        writeln!(out, "HTTP {}", response.status)?;
        for (name, value) in &response.headers {
            writeln!(out, "{name}: {value}")?;
        }
        writeln!(out)?;
    }
    out.write_all(response.body.as_bytes())
        .context("failed to write response body")?;
    out.flush().context("failed to flush output")?;
    Ok(())
}
