use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use donut_domain::{EventRecord, EventStore, EventType, NewEvent, StoreConfig, StoreError};

/// Airtable table accessed through its REST API.
pub struct AirtableStore {
    client: Client,
    config: StoreConfig,
}

#[derive(Debug, Deserialize)]
struct RecordPage {
    #[serde(default)]
    records: Vec<AirtableRecord>,
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AirtableRecord {
    id: String,
    #[serde(rename = "createdTime")]
    created_time: DateTime<Utc>,
    #[serde(default)]
    fields: AirtableFields,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct AirtableFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    donut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    event_type: Option<String>,
    #[serde(default, skip_serializing)]
    display_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreatePayload {
    records: Vec<CreateRecord>,
}

#[derive(Debug, Serialize)]
struct CreateRecord {
    fields: AirtableFields,
}

impl AirtableStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds.max(3)))
            .build()?;
        Ok(Self { client, config })
    }

    async fn fetch_page(&self, offset: Option<&str>) -> Result<RecordPage, StoreError> {
        let mut request = self
            .client
            .get(&self.config.base_url)
            .bearer_auth(&self.config.token)
            .query(&[("view", self.config.view.as_str())]);
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }
        let response = request.send().await.map_err(transport_error)?;
        let response = check_status(response).await?;
        response
            .json::<RecordPage>()
            .await
            .map_err(|err| StoreError::Unavailable(format!("invalid response: {}", err)))
    }
}

#[async_trait]
impl EventStore for AirtableStore {
    async fn fetch_all(&self) -> Result<Vec<EventRecord>, StoreError> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let page = self.fetch_page(offset.as_deref()).await?;
            for record in page.records {
                if let Some(event) = to_event_record(record)? {
                    records.push(event);
                }
            }
            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }
        debug!("fetched {} donut records", records.len());
        Ok(records)
    }

    async fn append(&self, event: &NewEvent) -> Result<EventRecord, StoreError> {
        let payload = CreatePayload {
            records: vec![CreateRecord {
                fields: AirtableFields {
                    donut: Some(event.donut_target.clone()),
                    user_name: Some(event.user_name.clone()),
                    event_type: Some(event.event_type.as_str().to_string()),
                    display_name: None,
                },
            }],
        };
        let response = self
            .client
            .post(&self.config.base_url)
            .bearer_auth(&self.config.token)
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response).await?;
        let page = response
            .json::<RecordPage>()
            .await
            .map_err(|err| StoreError::Unavailable(format!("invalid response: {}", err)))?;
        let created = match page.records.into_iter().next() {
            Some(record) => to_event_record(record)?,
            None => None,
        };
        created.ok_or_else(|| StoreError::Rejected("store returned no created record".to_string()))
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            Err(StoreError::Rejected(format!("{}: {}", status, body)))
        }
        _ => Err(StoreError::Unavailable(format!("{}: {}", status, body))),
    }
}

/// Rows without a target are skipped. An unknown event type fails the
/// whole snapshot: dropping the row would promote an older row for the
/// same target to its latest status.
fn to_event_record(record: AirtableRecord) -> Result<Option<EventRecord>, StoreError> {
    let fields = record.fields;
    let Some(donut_target) = fields.donut.filter(|value| !value.trim().is_empty()) else {
        warn!("skipping record {} without donut field", record.id);
        return Ok(None);
    };
    // Rows written before event types existed count as donuts.
    let event_type = match fields.event_type.as_deref() {
        None => EventType::Donutted,
        Some(raw) => raw.parse::<EventType>().map_err(|err| {
            warn!("record {} has unusable event type: {}", record.id, err);
            StoreError::Rejected(format!("record {}: {}", record.id, err))
        })?,
    };
    let display_name = fields
        .display_name
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| donut_target.clone());
    Ok(Some(EventRecord {
        donut_target,
        user_name: fields.user_name.unwrap_or_default(),
        event_type,
        created_at: record.created_time,
        display_name,
    }))
}
