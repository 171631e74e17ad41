use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier assigned by the product service. Immutable once created and
/// treated as opaque beyond equality and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

/// Product entity as served by the remote catalog.
///
/// The wire field names (`nome`, `preco`, `quantidadeEstoque`) are the
/// backend's contract and must not drift; `preco` travels as a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Primary key, assigned by the server on create
    pub id: ProductId,

    /// Product name
    #[serde(rename = "nome")]
    pub name: String,

    /// Unit price
    #[serde(rename = "preco", with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Units currently in stock
    #[serde(rename = "quantidadeEstoque")]
    pub stock_quantity: i64,
}

/// Write body for create and update requests. The id is server-owned and
/// never part of the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "preco", with = "rust_decimal::serde::float")]
    pub price: Decimal,

    #[serde(rename = "quantidadeEstoque")]
    pub stock_quantity: i64,
}
