use std::{fmt, sync::Arc};

use crate::{
    config::Config, domain::ChannelId, entity::channel::RestChannel, service::ChannelService,
};

/// Shared REST client. Clones share the same underlying services.
#[derive(Clone)]
pub struct RestClient {
    channels: Arc<dyn ChannelService>,
}

impl RestClient {
    pub fn new(channels: Arc<dyn ChannelService>) -> Self {
        Self { channels }
    }

    pub fn channel_service(&self) -> &dyn ChannelService {
        self.channels.as_ref()
    }

    /// Handle for the channel with `id`. No request is made.
    pub fn channel(&self, id: ChannelId) -> RestChannel<'_> {
        RestChannel::new(self, id)
    }

    /// Handle for `Config::default_channel`, if one is configured.
    pub fn default_channel(&self, cfg: &Config) -> Option<RestChannel<'_>> {
        cfg.default_channel.map(|id| self.channel(id))
    }
}

// Clones of one client compare equal; separately built clients never do.
impl PartialEq for RestClient {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.channels) as *const (),
            Arc::as_ptr(&other.channels) as *const (),
        )
    }
}

impl Eq for RestClient {}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient").finish_non_exhaustive()
    }
}
