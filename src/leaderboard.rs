//! Remote leaderboard client
//!
//! The leaderboard service is a plain JSON key-value store over HTTP:
//! `GET /` returns the persisted entries, `POST /` appends one, re-sorts by
//! kills descending, keeps the top 100 and answers with the 1-based rank.
//! The store semantics are mirrored here so they stay testable offline; the
//! wasm client is fire-and-forget and never blocks the frame path.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of persisted entries
pub const MAX_ENTRIES: usize = 100;

/// A single leaderboard entry, as it travels on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub kills: u32,
    /// Epoch milliseconds, stamped at submission time
    pub date: f64,
}

/// Service response to a score submission
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Validate an incoming submission payload the way the service does:
/// `name` must be a non-empty string and `kills` a JSON number (a string
/// "12" is rejected). Mirrors the service's 400 response.
pub fn validate_payload(payload: &Value) -> Result<(String, u32), &'static str> {
    let name = payload
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if name.is_empty() {
        return Err("Invalid data");
    }
    let kills = payload
        .get("kills")
        .and_then(Value::as_u64)
        .ok_or("Invalid data")?;
    Ok((name.to_string(), kills as u32))
}

/// The persisted score list with the service's ordering semantics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub entries: Vec<ScoreEntry>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry, re-sort by kills descending (stable, so earlier
    /// submissions rank ahead on ties), truncate to the top 100, and return
    /// the new entry's 1-based rank. `None` if it fell off the end.
    pub fn submit(&mut self, name: impl Into<String>, kills: u32, date: f64) -> Option<usize> {
        self.entries.push(ScoreEntry {
            name: name.into(),
            kills,
            date,
        });
        self.entries.sort_by(|a, b| b.kills.cmp(&a.kills));
        self.entries.truncate(MAX_ENTRIES);
        self.entries
            .iter()
            .position(|e| e.date == date && e.kills == kills)
            .map(|i| i + 1)
    }

    pub fn top(&self) -> Option<&ScoreEntry> {
        self.entries.first()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }
}

/// Browser-side HTTP client (WASM only)
#[cfg(target_arch = "wasm32")]
pub mod client {
    use super::{ScoreEntry, SubmitResponse};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::{JsFuture, spawn_local};
    use web_sys::{Request, RequestInit, RequestMode, Response};

    /// Fetch the current top scores
    pub async fn fetch_top(url: &str) -> Result<Vec<ScoreEntry>, JsValue> {
        let text = request(url, "GET", None).await?;
        serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Submit a final score without blocking the caller. Failures are
    /// logged and swallowed - the local game state is never affected.
    pub fn submit_score(url: &str, name: &str, kills: u32) {
        let url = url.to_string();
        let body = serde_json::json!({ "name": name, "kills": kills }).to_string();
        spawn_local(async move {
            match post_score(&url, &body).await {
                Ok(resp) if resp.success => {
                    log::info!("score submitted, rank {:?}", resp.rank);
                }
                Ok(resp) => {
                    log::warn!("score rejected: {:?}", resp.error);
                }
                Err(err) => {
                    log::warn!("score submission failed: {:?}", err);
                }
            }
        });
    }

    async fn post_score(url: &str, body: &str) -> Result<SubmitResponse, JsValue> {
        let text = request(url, "POST", Some(body)).await?;
        serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    async fn request(url: &str, method: &str, body: Option<&str>) -> Result<String, JsValue> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        if let Some(body) = body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(url, &opts)?;
        if body.is_some() {
            request.headers().set("Content-Type", "application/json")?;
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let resp: Response = JsFuture::from(window.fetch_with_request(&request))
            .await?
            .dyn_into()?;
        if !resp.ok() {
            return Err(JsValue::from_str(&format!(
                "leaderboard {} {} -> {}",
                method,
                url,
                resp.status()
            )));
        }
        let text = JsFuture::from(resp.text()?).await?;
        Ok(text.as_string().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_accepts_well_formed() {
        let payload = json!({ "name": "ada", "kills": 42 });
        assert_eq!(validate_payload(&payload), Ok(("ada".to_string(), 42)));
    }

    #[test]
    fn test_validate_rejects_string_kills() {
        let payload = json!({ "name": "ada", "kills": "42" });
        assert_eq!(validate_payload(&payload), Err("Invalid data"));
    }

    #[test]
    fn test_validate_rejects_missing_name() {
        assert!(validate_payload(&json!({ "kills": 3 })).is_err());
        assert!(validate_payload(&json!({ "name": "", "kills": 3 })).is_err());
    }

    #[test]
    fn test_submit_sorts_descending_and_ranks() {
        let mut board = ScoreBoard::new();
        assert_eq!(board.submit("a", 10, 1.0), Some(1));
        assert_eq!(board.submit("b", 30, 2.0), Some(1));
        assert_eq!(board.submit("c", 20, 3.0), Some(2));

        let kills: Vec<u32> = board.entries.iter().map(|e| e.kills).collect();
        assert_eq!(kills, vec![30, 20, 10]);

        // Stable sort: ties rank behind earlier submissions
        assert_eq!(board.submit("d", 20, 4.0), Some(3));
    }

    #[test]
    fn test_board_caps_at_100() {
        let mut board = ScoreBoard::new();
        for i in 0..110u32 {
            board.submit(format!("p{i}"), i, i as f64);
        }
        assert_eq!(board.entries.len(), MAX_ENTRIES);
        assert_eq!(board.top().unwrap().kills, 109);
        // A submission that falls off the end reports no rank
        assert_eq!(board.submit("late", 0, 999.0), None);
    }

    #[test]
    fn test_wire_roundtrip() {
        let mut board = ScoreBoard::new();
        board.submit("ada", 42, 1700000000000.0);
        let json = board.to_json().unwrap();
        let restored = ScoreBoard::from_json(&json).unwrap();
        assert_eq!(restored.entries, board.entries);

        // Malformed JSON surfaces as an error, not a panic
        assert!(ScoreBoard::from_json("not json").is_err());
    }
}
