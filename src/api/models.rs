use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

use super::decode::{lenient_f64, lenient_string, lenient_text};

/// One stock as returned by either the listing or the screening endpoint. Listing
/// rows carry the quote fields; screening rows add `score` and `reason`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Stock {
    #[serde(default, deserialize_with = "lenient_text")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub change_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub turnover_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pe_dynamic: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pb: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reason: Option<String>,
}

/// Body of `POST /api/screen`. Integer fields that failed to parse serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenRequest {
    pub criteria: String,
    pub max_results: Option<i64>,
    pub max_stocks_to_analyze: Option<i64>,
}

/// A successful screening reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenResults {
    pub analysis: String,
    pub stocks: Vec<Stock>,
    pub risk_warning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub api_configured: bool,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub stock_code: String,
    pub question: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatAnswer {
    pub stock_code: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScreenResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    analysis: Option<String>,
    #[serde(default)]
    stocks: Option<Vec<Stock>>,
    #[serde(default)]
    risk_warning: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ScreenResponse {
    pub(crate) fn into_result(self) -> Result<ScreenResults> {
        if !self.success {
            return Err(AppError::Rejected(non_blank(self.error)));
        }
        Ok(ScreenResults {
            analysis: self.analysis.unwrap_or_default(),
            stocks: self.stocks.unwrap_or_default(),
            risk_warning: self.risk_warning.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StockListResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    stocks: Option<Vec<Stock>>,
    #[serde(default)]
    error: Option<String>,
}

impl StockListResponse {
    pub(crate) fn into_result(self) -> Result<Vec<Stock>> {
        if !self.success {
            return Err(AppError::Rejected(non_blank(self.error)));
        }
        Ok(self.stocks.unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    stock_code: Option<String>,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ChatResponse {
    pub(crate) fn into_result(self, request: &ChatRequest) -> Result<ChatAnswer> {
        if !self.success {
            return Err(AppError::Rejected(non_blank(self.error)));
        }
        Ok(ChatAnswer {
            stock_code: self
                .stock_code
                .unwrap_or_else(|| request.stock_code.clone()),
            question: self.question.unwrap_or_else(|| request.question.clone()),
            answer: self.answer.unwrap_or_default(),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_screen_reply_becomes_rejection() {
        let raw: ScreenResponse =
            serde_json::from_str(r#"{"success":false,"error":"AI筛选失败","analysis":"x"}"#)
                .unwrap();
        match raw.into_result() {
            Err(AppError::Rejected(Some(message))) => assert_eq!(message, "AI筛选失败"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn successful_screen_reply_keeps_stock_order() {
        let raw: ScreenResponse = serde_json::from_str(
            r#"{
                "success": true,
                "analysis": "ok",
                "stocks": [
                    {"code": "600036", "name": "招商银行", "score": 88, "reason": "低估值"},
                    {"code": "000001", "name": "平安银行", "score": "91.5", "reason": "高分红"}
                ],
                "risk_warning": "r"
            }"#,
        )
        .unwrap();
        let results = raw.into_result().unwrap();
        let codes: Vec<&str> = results.stocks.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, ["600036", "000001"]);
        assert_eq!(results.stocks[1].score, Some(91.5));
        assert_eq!(results.risk_warning, "r");
    }

    #[test]
    fn loosely_typed_text_fields_keep_the_reply() {
        let raw: ScreenResponse = serde_json::from_str(
            r#"{
                "success": true,
                "analysis": "ok",
                "stocks": [
                    {"code": 600036, "name": "招商银行", "score": 88, "reason": "r"},
                    {"code": "000001", "name": null, "score": 70, "reason": ["a"]}
                ],
                "risk_warning": "r"
            }"#,
        )
        .unwrap();
        let results = raw.into_result().unwrap();

        assert_eq!(results.stocks[0].code, "600036");
        assert_eq!(results.stocks[0].reason.as_deref(), Some("r"));
        assert_eq!(results.stocks[1].name, "");
        assert_eq!(results.stocks[1].reason, None);
    }

    #[test]
    fn listing_rows_decode_nulls_and_strings() {
        let stock: Stock = serde_json::from_str(
            r#"{"code":"600000","name":"X","price":10.005,"change_pct":-3.333,
                "turnover_rate":null,"pe_dynamic":0,"pb":"1.2"}"#,
        )
        .unwrap();
        assert_eq!(stock.price, Some(10.005));
        assert_eq!(stock.turnover_rate, None);
        assert_eq!(stock.pe_dynamic, Some(0.0));
        assert_eq!(stock.pb, Some(1.2));
        assert_eq!(stock.score, None);
    }

    #[test]
    fn unparseable_limits_serialize_as_null() {
        let request = ScreenRequest {
            criteria: "banks".into(),
            max_results: None,
            max_stocks_to_analyze: Some(100),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert!(body["max_results"].is_null());
        assert_eq!(body["max_stocks_to_analyze"], 100);
    }

    #[test]
    fn health_requires_configured_flag() {
        assert!(serde_json::from_str::<HealthStatus>(r#"{"status":"healthy"}"#).is_err());
        let status: HealthStatus =
            serde_json::from_str(r#"{"status":"healthy","api_configured":true}"#).unwrap();
        assert!(status.api_configured);
    }
}
