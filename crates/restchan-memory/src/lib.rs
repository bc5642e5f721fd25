//! In-memory `ChannelService`.
//!
//! Keeps channels and messages in process memory so a `RestClient` can be used
//! without a network. Every modify/delete is appended to an audit log together
//! with the reason exactly as it was passed.

use std::{collections::HashMap, path::Path};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use restchan_core::{
    config::Config,
    domain::{ChannelId, MessageId},
    errors::Error,
    json::{AttachmentData, ChannelData, ChannelModifyRequest, MessageData},
    multipart::MultipartRequest,
    service::ChannelService,
    Result,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditAction {
    ChannelUpdate,
    ChannelDelete,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditEntry {
    pub channel_id: ChannelId,
    pub action: AuditAction,
    pub reason: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    channels: HashMap<ChannelId, ChannelData>,
    messages: HashMap<ChannelId, Vec<MessageData>>,
    audit: Vec<AuditEntry>,
    next_message_id: u64,
}

#[derive(Debug, Default)]
pub struct MemoryChannelService {
    state: Mutex<State>,
}

impl MemoryChannelService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channels(channels: impl IntoIterator<Item = ChannelData>) -> Self {
        let channels = channels.into_iter().map(|c| (c.id, c)).collect();
        Self {
            state: Mutex::new(State {
                channels,
                ..Default::default()
            }),
        }
    }

    /// Loads channels from a JSON array of channel objects.
    pub async fn from_seed_file(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let channels: Vec<ChannelData> = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.display(), count = channels.len(), "seeded channels");
        Ok(Self::with_channels(channels))
    }

    /// Seeds from `Config::seed_file` when set, otherwise starts empty.
    pub async fn from_config(cfg: &Config) -> Result<Self> {
        match &cfg.seed_file {
            Some(path) => Self::from_seed_file(path).await,
            None => Ok(Self::new()),
        }
    }

    /// Inserts or replaces a channel.
    pub async fn insert_channel(&self, data: ChannelData) {
        self.state.lock().await.channels.insert(data.id, data);
    }

    pub async fn messages(&self, channel_id: ChannelId) -> Vec<MessageData> {
        self.state
            .lock()
            .await
            .messages
            .get(&channel_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn audit_log(&self) -> Vec<AuditEntry> {
        self.state.lock().await.audit.clone()
    }
}

fn not_found(channel_id: ChannelId) -> Error {
    Error::NotFound(format!("unknown channel {channel_id}"))
}

fn apply(channel: &mut ChannelData, req: ChannelModifyRequest) {
    if let Some(v) = req.name {
        channel.name = Some(v);
    }
    if let Some(v) = req.kind {
        channel.kind = v;
    }
    if let Some(v) = req.position {
        channel.position = Some(v);
    }
    if let Some(v) = req.topic {
        channel.topic = Some(v);
    }
    if let Some(v) = req.nsfw {
        channel.nsfw = Some(v);
    }
    if let Some(v) = req.rate_limit_per_user {
        channel.rate_limit_per_user = Some(v);
    }
    if let Some(v) = req.bitrate {
        channel.bitrate = Some(v);
    }
    if let Some(v) = req.user_limit {
        channel.user_limit = Some(v);
    }
    if let Some(v) = req.parent_id {
        channel.parent_id = Some(v);
    }
}

#[async_trait]
impl ChannelService for MemoryChannelService {
    async fn get_channel(&self, channel_id: ChannelId) -> Result<ChannelData> {
        let state = self.state.lock().await;
        state
            .channels
            .get(&channel_id)
            .cloned()
            .ok_or_else(|| not_found(channel_id))
    }

    async fn create_message(
        &self,
        channel_id: ChannelId,
        request: MultipartRequest,
    ) -> Result<MessageData> {
        let mut state = self.state.lock().await;
        if !state.channels.contains_key(&channel_id) {
            return Err(not_found(channel_id));
        }

        state.next_message_id += 1;
        let id = MessageId(state.next_message_id);

        let MultipartRequest { request, files } = request;
        let message = MessageData {
            id,
            channel_id,
            content: request.content.unwrap_or_default(),
            timestamp: Utc::now(),
            edited_timestamp: None,
            tts: request.tts.unwrap_or(false),
            embeds: request.embeds,
            attachments: files
                .iter()
                .map(|f| AttachmentData {
                    filename: f.file_name.clone(),
                    size: f.content.len() as u64,
                })
                .collect(),
            nonce: request.nonce,
        };

        if let Some(channel) = state.channels.get_mut(&channel_id) {
            channel.last_message_id = Some(id);
        }
        state
            .messages
            .entry(channel_id)
            .or_default()
            .push(message.clone());

        tracing::debug!(%channel_id, message_id = %id, files = files.len(), "message created");
        Ok(message)
    }

    async fn modify_channel(
        &self,
        channel_id: ChannelId,
        request: ChannelModifyRequest,
        reason: Option<&str>,
    ) -> Result<ChannelData> {
        let mut state = self.state.lock().await;
        let channel = state
            .channels
            .get_mut(&channel_id)
            .ok_or_else(|| not_found(channel_id))?;
        apply(channel, request);
        let updated = channel.clone();

        state.audit.push(AuditEntry {
            channel_id,
            action: AuditAction::ChannelUpdate,
            reason: reason.map(str::to_string),
        });

        tracing::debug!(%channel_id, reason, "channel modified");
        Ok(updated)
    }

    async fn delete_channel(
        &self,
        channel_id: ChannelId,
        reason: Option<&str>,
    ) -> Result<ChannelData> {
        let mut state = self.state.lock().await;
        let removed = state
            .channels
            .remove(&channel_id)
            .ok_or_else(|| not_found(channel_id))?;
        state.messages.remove(&channel_id);

        state.audit.push(AuditEntry {
            channel_id,
            action: AuditAction::ChannelDelete,
            reason: reason.map(str::to_string),
        });

        tracing::debug!(%channel_id, reason, "channel deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restchan_core::{
        json::MessageCreateRequest,
        multipart::{Attachment, MultipartRequest},
        RestClient,
    };
    use std::sync::Arc;

    const GENERAL: ChannelId = ChannelId(123_456_789_012_345_678);

    fn general() -> ChannelData {
        ChannelData {
            id: GENERAL,
            name: Some("general".to_string()),
            topic: Some("chit chat".to_string()),
            position: Some(0),
            ..Default::default()
        }
    }

    fn client() -> (Arc<MemoryChannelService>, RestClient) {
        let svc = Arc::new(MemoryChannelService::with_channels([general()]));
        let client = RestClient::new(svc.clone());
        (svc, client)
    }

    #[tokio::test]
    async fn fetch_known_and_unknown_channels() {
        let (_svc, client) = client();

        let data = client.channel(GENERAL).get_data().await.unwrap();
        assert_eq!(data, general());

        let err = client.channel(ChannelId(7)).get_data().await.unwrap_err();
        assert!(matches!(err, Error::NotFound(m) if m == "unknown channel 7"));
    }

    #[tokio::test]
    async fn create_message_tracks_last_message_and_attachments() {
        let (svc, client) = client();
        let channel = client.channel(GENERAL);

        let first = channel
            .create_message(MessageCreateRequest::text("hello"))
            .await
            .unwrap();
        let second = channel
            .create_message(
                MultipartRequest::new(MessageCreateRequest::text("report"))
                    .add_file(Attachment::new("report.csv", b"a,b\n1,2\n".to_vec())),
            )
            .await
            .unwrap();

        assert_eq!(first.content, "hello");
        assert!(first.attachments.is_empty());
        assert!(second.id > first.id);
        assert_eq!(second.attachments.len(), 1);
        assert_eq!(second.attachments[0].filename, "report.csv");
        assert_eq!(second.attachments[0].size, 8);

        let data = channel.get_data().await.unwrap();
        assert_eq!(data.last_message_id, Some(second.id));
        assert_eq!(svc.messages(GENERAL).await, vec![first, second]);
    }

    #[tokio::test]
    async fn create_message_in_unknown_channel_fails() {
        let (svc, client) = client();
        let err = client
            .channel(ChannelId(9))
            .create_message(MessageCreateRequest::text("lost"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(svc.messages(ChannelId(9)).await.is_empty());
    }

    #[tokio::test]
    async fn edit_applies_only_present_fields() {
        let (_svc, client) = client();
        let edited = client
            .channel(GENERAL)
            .edit(
                ChannelModifyRequest {
                    name: Some("announcements".to_string()),
                    nsfw: Some(false),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();

        assert_eq!(edited.name.as_deref(), Some("announcements"));
        assert_eq!(edited.nsfw, Some(false));
        assert_eq!(edited.topic.as_deref(), Some("chit chat"));
        assert_eq!(edited.position, Some(0));
    }

    #[tokio::test]
    async fn audit_log_keeps_absent_and_empty_reasons_apart() {
        let (svc, client) = client();
        let channel = client.channel(GENERAL);

        channel
            .edit(ChannelModifyRequest::default(), None)
            .await
            .unwrap();
        channel
            .edit(ChannelModifyRequest::default(), Some(""))
            .await
            .unwrap();
        channel.delete(Some("spam")).await.unwrap();

        assert_eq!(
            svc.audit_log().await,
            vec![
                AuditEntry {
                    channel_id: GENERAL,
                    action: AuditAction::ChannelUpdate,
                    reason: None,
                },
                AuditEntry {
                    channel_id: GENERAL,
                    action: AuditAction::ChannelUpdate,
                    reason: Some(String::new()),
                },
                AuditEntry {
                    channel_id: GENERAL,
                    action: AuditAction::ChannelDelete,
                    reason: Some("spam".to_string()),
                },
            ]
        );
    }

    #[tokio::test]
    async fn delete_removes_channel_and_messages() {
        let (svc, client) = client();
        let channel = client.channel(GENERAL);
        channel
            .create_message(MessageCreateRequest::text("bye"))
            .await
            .unwrap();

        channel.delete(None).await.unwrap();

        assert!(matches!(channel.get_data().await, Err(Error::NotFound(_))));
        assert!(svc.messages(GENERAL).await.is_empty());
        assert!(matches!(channel.delete(None).await, Err(Error::NotFound(_))));
        // Failed delete leaves no audit entry.
        assert_eq!(svc.audit_log().await.len(), 1);
    }

    #[tokio::test]
    async fn seeds_from_file_via_config() {
        let dir = std::env::temp_dir().join(format!("restchan-seed-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("channels.json");
        tokio::fs::write(
            &path,
            r#"[{"id":"1","type":0,"name":"one"},{"id":2,"type":2,"name":"voice","bitrate":64000}]"#,
        )
        .await
        .unwrap();

        let cfg = Config {
            seed_file: Some(path.clone()),
            ..Default::default()
        };
        let svc = MemoryChannelService::from_config(&cfg).await.unwrap();

        let voice = svc.get_channel(ChannelId(2)).await.unwrap();
        assert_eq!(voice.kind, 2);
        assert_eq!(voice.bitrate, Some(64_000));
        assert_eq!(
            svc.get_channel(ChannelId(1)).await.unwrap().name.as_deref(),
            Some("one")
        );

        tokio::fs::write(&path, "not json").await.unwrap();
        assert!(matches!(
            MemoryChannelService::from_seed_file(&path).await,
            Err(Error::Json(_))
        ));

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn empty_config_and_missing_file() {
        let svc = MemoryChannelService::from_config(&Config::default())
            .await
            .unwrap();
        assert!(svc.get_channel(GENERAL).await.is_err());

        svc.insert_channel(general()).await;
        assert_eq!(svc.get_channel(GENERAL).await.unwrap(), general());

        let missing = std::env::temp_dir().join("restchan-definitely-missing.json");
        assert!(matches!(
            MemoryChannelService::from_seed_file(&missing).await,
            Err(Error::Io(_))
        ));
    }
}
