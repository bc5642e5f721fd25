use crate::json::MessageCreateRequest;

/// A file sent alongside a message body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

/// Message body plus zero or more attachments, sent as one multipart request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultipartRequest {
    pub request: MessageCreateRequest,
    pub files: Vec<Attachment>,
}

impl MultipartRequest {
    /// Body only, no files.
    pub fn new(request: MessageCreateRequest) -> Self {
        Self {
            request,
            files: Vec::new(),
        }
    }

    pub fn with_files(request: MessageCreateRequest, files: Vec<Attachment>) -> Self {
        Self { request, files }
    }

    pub fn add_file(mut self, file: Attachment) -> Self {
        self.files.push(file);
        self
    }
}

impl From<MessageCreateRequest> for MultipartRequest {
    fn from(request: MessageCreateRequest) -> Self {
        Self::new(request)
    }
}

/// What a caller can hand to `RestChannel::create_message`.
#[derive(Clone, Debug, PartialEq)]
pub enum MessagePayload {
    Structured(MessageCreateRequest),
    Multipart(MultipartRequest),
}

impl MessagePayload {
    /// The multipart form every payload is sent as. A structured body becomes
    /// a multipart request with no files.
    pub fn into_multipart(self) -> MultipartRequest {
        match self {
            Self::Structured(request) => MultipartRequest::new(request),
            Self::Multipart(multipart) => multipart,
        }
    }
}

impl From<MessageCreateRequest> for MessagePayload {
    fn from(request: MessageCreateRequest) -> Self {
        Self::Structured(request)
    }
}

impl From<MultipartRequest> for MessagePayload {
    fn from(multipart: MultipartRequest) -> Self {
        Self::Multipart(multipart)
    }
}
