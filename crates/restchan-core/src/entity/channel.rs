use crate::{
    client::RestClient,
    domain::ChannelId,
    json::{ChannelData, ChannelModifyRequest, MessageData},
    multipart::MessagePayload,
    Result,
};

/// A channel id bound to a shared [`RestClient`].
///
/// Every method is a single call into the client's `ChannelService` with the
/// id filled in. Nothing is cached and errors come back exactly as the service
/// produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RestChannel<'a> {
    client: &'a RestClient,
    id: ChannelId,
}

impl<'a> RestChannel<'a> {
    pub fn new(client: &'a RestClient, id: ChannelId) -> Self {
        Self { client, id }
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    pub fn client(&self) -> &'a RestClient {
        self.client
    }

    /// Current representation of this channel.
    pub async fn get_data(&self) -> Result<ChannelData> {
        tracing::trace!(channel_id = %self.id, "get channel");
        self.client.channel_service().get_channel(self.id).await
    }

    /// Posts a message in this channel.
    ///
    /// Accepts either a plain `MessageCreateRequest` or a `MultipartRequest`
    /// carrying attachments; a plain body is sent as a multipart request with
    /// no files.
    pub async fn create_message(&self, payload: impl Into<MessagePayload>) -> Result<MessageData> {
        let request = payload.into().into_multipart();
        tracing::trace!(channel_id = %self.id, files = request.files.len(), "create message");
        self.client
            .channel_service()
            .create_message(self.id, request)
            .await
    }

    /// Edits this channel. `reason` ends up in the audit log; `None` sends no reason.
    pub async fn edit(
        &self,
        request: ChannelModifyRequest,
        reason: Option<&str>,
    ) -> Result<ChannelData> {
        tracing::trace!(channel_id = %self.id, "modify channel");
        self.client
            .channel_service()
            .modify_channel(self.id, request, reason)
            .await
    }

    /// Deletes this channel. The deleted channel returned by the service is dropped.
    pub async fn delete(&self, reason: Option<&str>) -> Result<()> {
        tracing::trace!(channel_id = %self.id, "delete channel");
        self.client
            .channel_service()
            .delete_channel(self.id, reason)
            .await?;
        Ok(())
    }
}
