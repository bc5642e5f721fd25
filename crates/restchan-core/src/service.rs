use async_trait::async_trait;

use crate::{
    domain::ChannelId,
    json::{ChannelData, ChannelModifyRequest, MessageData},
    multipart::MultipartRequest,
    Result,
};

/// Channel family of REST endpoints.
///
/// Implementations own transport, rate limiting, retries and body encoding.
/// `reason` is the optional audit log reason; `None` means no reason was given
/// and must not be conflated with `Some("")`.
#[async_trait]
pub trait ChannelService: Send + Sync {
    async fn get_channel(&self, channel_id: ChannelId) -> Result<ChannelData>;

    async fn create_message(
        &self,
        channel_id: ChannelId,
        request: MultipartRequest,
    ) -> Result<MessageData>;

    async fn modify_channel(
        &self,
        channel_id: ChannelId,
        request: ChannelModifyRequest,
        reason: Option<&str>,
    ) -> Result<ChannelData>;

    /// Returns the deleted channel.
    async fn delete_channel(&self, channel_id: ChannelId, reason: Option<&str>)
        -> Result<ChannelData>;
}
