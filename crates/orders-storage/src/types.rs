//! Row types for the three backed relations.
//!
//! Field names are serialized upper-case to match the column names, so a
//! listed row reads `{"AGENT_CODE": "A001", ...}`.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Field};

/// A sales agent, addressed by `AGENT_CODE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Agent {
    pub agent_code: String,
    pub agent_name: Option<String>,
    pub working_area: Option<String>,
    pub commission: Option<f64>,
    pub phone_no: Option<String>,
    pub country: Option<String>,
}

impl Entity for Agent {
    const TABLE: &'static str = "agents";
    const NAME: &'static str = "Agent";
    const KEY: Field = Field::text("AGENT_CODE");
    const FIELDS: &'static [Field] = &[
        Field::text("AGENT_CODE"),
        Field::text("AGENT_NAME"),
        Field::text("WORKING_AREA"),
        Field::decimal("COMMISSION"),
        Field::text("PHONE_NO"),
        Field::text("COUNTRY"),
    ];

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Agent {
            agent_code: row.get(0)?,
            agent_name: row.get(1)?,
            working_area: row.get(2)?,
            commission: row.get(3)?,
            phone_no: row.get(4)?,
            country: row.get(5)?,
        })
    }
}

/// A customer, addressed by `CUST_CODE`. `AGENT_CODE` refers to an
/// [`Agent`] but is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Customer {
    pub cust_code: String,
    pub cust_name: Option<String>,
    pub working_area: Option<String>,
    pub cust_country: Option<String>,
    pub grade: Option<i64>,
    pub opening_amt: Option<f64>,
    pub receive_amt: Option<f64>,
    pub payment_amt: Option<f64>,
    pub outstanding_amt: Option<f64>,
    pub phone_no: Option<String>,
    pub agent_code: Option<String>,
}

impl Entity for Customer {
    const TABLE: &'static str = "customer";
    const NAME: &'static str = "Customer";
    const KEY: Field = Field::text("CUST_CODE");
    const FIELDS: &'static [Field] = &[
        Field::text("CUST_CODE"),
        Field::text("CUST_NAME"),
        Field::text("WORKING_AREA"),
        Field::text("CUST_COUNTRY"),
        Field::integer("GRADE"),
        Field::decimal("OPENING_AMT"),
        Field::decimal("RECEIVE_AMT"),
        Field::decimal("PAYMENT_AMT"),
        Field::decimal("OUTSTANDING_AMT"),
        Field::text("PHONE_NO"),
        Field::text("AGENT_CODE"),
    ];

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Customer {
            cust_code: row.get(0)?,
            cust_name: row.get(1)?,
            working_area: row.get(2)?,
            cust_country: row.get(3)?,
            grade: row.get(4)?,
            opening_amt: row.get(5)?,
            receive_amt: row.get(6)?,
            payment_amt: row.get(7)?,
            outstanding_amt: row.get(8)?,
            phone_no: row.get(9)?,
            agent_code: row.get(10)?,
        })
    }
}

/// An order, addressed by the integer `ORD_NUM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Order {
    pub ord_num: i64,
    pub ord_amount: Option<f64>,
    pub advance_amount: Option<f64>,
    /// ISO `YYYY-MM-DD`.
    pub ord_date: Option<String>,
    pub cust_code: Option<String>,
    pub agent_code: Option<String>,
    pub ord_description: Option<String>,
}

impl Entity for Order {
    const TABLE: &'static str = "orders";
    const NAME: &'static str = "Order";
    const KEY: Field = Field::integer("ORD_NUM");
    const FIELDS: &'static [Field] = &[
        Field::integer("ORD_NUM"),
        Field::decimal("ORD_AMOUNT"),
        Field::decimal("ADVANCE_AMOUNT"),
        Field::date("ORD_DATE"),
        Field::text("CUST_CODE"),
        Field::text("AGENT_CODE"),
        Field::text("ORD_DESCRIPTION"),
    ];

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Order {
            ord_num: row.get(0)?,
            ord_amount: row.get(1)?,
            advance_amount: row.get(2)?,
            ord_date: row.get(3)?,
            cust_code: row.get(4)?,
            agent_code: row.get(5)?,
            ord_description: row.get(6)?,
        })
    }
}
