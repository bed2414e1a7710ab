//! # Facade: video streaming
//!
//! Uploading a video touches six subsystems in a fixed order. The
//! [`VideoStreamingService`] facade runs that sequence behind two calls.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

const STORAGE_BASE_URL: &str = "https://storage.example.com/videos";
const CDN_HOSTS: [&str; 2] = ["cdn-1.example.com", "cdn-2.example.com"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamingError {
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Unauthorized access to video {0}")]
    Unauthorized(String),

    #[error("unsupported video format for '{0}'")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    Mp4,
    Webm,
    Mov,
}

impl VideoFormat {
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "mp4" => Some(Self::Mp4),
            "webm" => Some(Self::Webm),
            "mov" => Some(Self::Mov),
            _ => None,
        }
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mp4 => "mp4",
            Self::Webm => "webm",
            Self::Mov => "mov",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoQuality {
    Low,
    Medium,
    High,
    Ultra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub format: VideoFormat,
    pub quality: VideoQuality,
    pub size_bytes: u64,
    pub duration_secs: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadResult {
    pub video_id: String,
    pub storage_url: String,
    pub cdn_urls: Vec<String>,
}

// =============================================================================
// Subsystems
// =============================================================================

#[derive(Debug, Default)]
pub struct VideoUploader;

impl VideoUploader {
    pub fn upload_video(&self, file_path: &str, title: &str) -> Result<Video, StreamingError> {
        let format = VideoFormat::from_path(file_path)
            .ok_or_else(|| StreamingError::UnsupportedFormat(file_path.to_string()))?;
        info!(title, file_path, "uploading video");
        Ok(Video {
            id: "video_123".to_string(),
            title: title.to_string(),
            format,
            quality: VideoQuality::High,
            size_bytes: 100 * 1024 * 1024,
            duration_secs: 300,
        })
    }
}

#[derive(Debug, Default)]
pub struct VideoEncoder;

impl VideoEncoder {
    pub fn encode_video(&self, video: &Video, target: VideoFormat) -> Video {
        info!(video_id = %video.id, from = %video.format, to = %target, "encoding video");
        Video {
            format: target,
            ..video.clone()
        }
    }
}

#[derive(Debug, Default)]
pub struct StorageService;

impl StorageService {
    pub fn store_video(&self, video: &Video) -> String {
        info!(video_id = %video.id, "storing video in cloud storage");
        self.video_url(&video.id)
    }

    pub fn video_url(&self, video_id: &str) -> String {
        format!("{STORAGE_BASE_URL}/{video_id}")
    }
}

#[derive(Debug, Default)]
pub struct CdnService;

impl CdnService {
    pub fn distribute_video(&self, video_url: &str) -> Vec<String> {
        info!(video_url, "distributing video through CDN");
        let file = video_url.rsplit('/').next().unwrap_or(video_url);
        CDN_HOSTS
            .iter()
            .map(|host| format!("https://{host}/videos/{file}"))
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct AuthenticationService {
    restricted: HashSet<String>,
}

impl AuthenticationService {
    pub fn authenticate_user(&self, username: &str, password: &str) -> Option<User> {
        debug!(username, "authenticating user");
        (username == "test_user" && password == "password").then(|| User {
            id: "user_123".to_string(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
        })
    }

    pub fn authorize_video_access(&self, user: &User, video_id: &str) -> bool {
        debug!(username = %user.username, video_id, "authorizing video access");
        !self.restricted.contains(video_id)
    }

    pub fn restrict(&mut self, video_id: impl Into<String>) {
        self.restricted.insert(video_id.into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Uploaded,
    Processing,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub kind: NotificationKind,
    pub recipient: String,
    pub video_id: String,
}

#[derive(Debug, Default)]
pub struct NotificationService {
    sent: RefCell<Vec<SentNotification>>,
}

impl NotificationService {
    pub fn notify(&self, kind: NotificationKind, user: &User, video: &Video) {
        info!(?kind, recipient = %user.email, video_id = %video.id, "sending notification");
        self.sent.borrow_mut().push(SentNotification {
            kind,
            recipient: user.email.clone(),
            video_id: video.id.clone(),
        });
    }

    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.borrow().clone()
    }
}

// =============================================================================
// Facade
// =============================================================================

#[derive(Debug, Default)]
pub struct VideoStreamingService {
    uploader: VideoUploader,
    encoder: VideoEncoder,
    storage: StorageService,
    cdn: CdnService,
    auth: AuthenticationService,
    notifier: NotificationService,
}

impl VideoStreamingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Denies streaming of `video_id` to every user.
    pub fn restrict_video(&mut self, video_id: impl Into<String>) {
        self.auth.restrict(video_id);
    }

    pub fn notifications(&self) -> Vec<SentNotification> {
        self.notifier.sent()
    }

    /// Authenticate, upload, encode to MP4, store, distribute, notifying the
    /// user after the upload, the encode and the distribution.
    pub fn upload_and_process_video(
        &self,
        username: &str,
        password: &str,
        file_path: &str,
        title: &str,
    ) -> Result<UploadResult, StreamingError> {
        let user = self.authenticate(username, password)?;

        let video = self.uploader.upload_video(file_path, title)?;
        self.notifier.notify(NotificationKind::Uploaded, &user, &video);

        let encoded = self.encoder.encode_video(&video, VideoFormat::Mp4);
        self.notifier.notify(NotificationKind::Processing, &user, &encoded);

        let storage_url = self.storage.store_video(&encoded);
        let cdn_urls = self.cdn.distribute_video(&storage_url);
        self.notifier.notify(NotificationKind::Ready, &user, &encoded);

        Ok(UploadResult {
            video_id: video.id,
            storage_url,
            cdn_urls,
        })
    }

    pub fn stream_video(&self, username: &str, password: &str, video_id: &str) -> Result<String, StreamingError> {
        let user = self.authenticate(username, password)?;
        if !self.auth.authorize_video_access(&user, video_id) {
            warn!(username, video_id, "video access denied");
            return Err(StreamingError::Unauthorized(video_id.to_string()));
        }
        Ok(self.storage.video_url(video_id))
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<User, StreamingError> {
        self.auth.authenticate_user(username, password).ok_or_else(|| {
            warn!(username, "authentication failed");
            StreamingError::AuthenticationFailed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_and_process_success() {
        let service = VideoStreamingService::new();
        let result = service
            .upload_and_process_video("test_user", "password", "/path/to/video.webm", "Test Video")
            .unwrap();

        assert_eq!(result.video_id, "video_123");
        assert_eq!(result.storage_url, "https://storage.example.com/videos/video_123");
        assert_eq!(
            result.cdn_urls,
            vec![
                "https://cdn-1.example.com/videos/video_123",
                "https://cdn-2.example.com/videos/video_123",
            ]
        );
    }

    #[test]
    fn test_upload_sends_notifications_in_order() {
        let service = VideoStreamingService::new();
        service
            .upload_and_process_video("test_user", "password", "clip.mov", "Clip")
            .unwrap();

        let kinds: Vec<NotificationKind> = service.notifications().iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NotificationKind::Uploaded,
                NotificationKind::Processing,
                NotificationKind::Ready
            ]
        );
        assert!(service
            .notifications()
            .iter()
            .all(|n| n.recipient == "test_user@example.com"));
    }

    #[test]
    fn test_upload_auth_failure_touches_nothing() {
        let service = VideoStreamingService::new();
        let err = service
            .upload_and_process_video("wrong_user", "wrong_password", "/path/to/video.webm", "T")
            .unwrap_err();
        assert_eq!(err, StreamingError::AuthenticationFailed);
        assert!(service.notifications().is_empty());
    }

    #[test]
    fn test_upload_rejects_unknown_format() {
        let service = VideoStreamingService::new();
        let err = service
            .upload_and_process_video("test_user", "password", "/path/to/video.avi", "T")
            .unwrap_err();
        assert!(matches!(err, StreamingError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_encoder_keeps_everything_but_format() {
        let video = VideoUploader.upload_video("a.webm", "A").unwrap();
        let encoded = VideoEncoder.encode_video(&video, VideoFormat::Mp4);
        assert_eq!(encoded.format, VideoFormat::Mp4);
        assert_eq!(encoded.size_bytes, video.size_bytes);
        assert_eq!(encoded.title, "A");
    }

    #[test]
    fn test_stream_video() {
        let mut service = VideoStreamingService::new();
        assert_eq!(
            service.stream_video("test_user", "password", "video_123"),
            Ok("https://storage.example.com/videos/video_123".to_string())
        );
        assert_eq!(
            service.stream_video("wrong_user", "wrong_password", "video_123"),
            Err(StreamingError::AuthenticationFailed)
        );

        service.restrict_video("video_123");
        assert_eq!(
            service.stream_video("test_user", "password", "video_123"),
            Err(StreamingError::Unauthorized("video_123".to_string()))
        );
    }
}
