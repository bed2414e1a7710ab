//! # Bridge: notification system
//!
//! Notification kinds (the abstraction) and delivery channels (the
//! implementation) vary independently. Any [`Notification`] can be paired
//! with any [`MessageSender`].

use std::rc::Rc;

use tracing::info;

#[cfg_attr(test, mockall::automock)]
pub trait MessageSender {
    /// Returns the rendered message as delivered.
    fn send_message(&self, subject: &str, body: &str) -> String;
}

// =============================================================================
// Implementations
// =============================================================================

#[derive(Debug, Default)]
pub struct EmailSender;

#[derive(Debug, Default)]
pub struct SmsSender;

#[derive(Debug, Default)]
pub struct PushNotificationSender;

impl MessageSender for EmailSender {
    fn send_message(&self, subject: &str, body: &str) -> String {
        info!(channel = "email", subject, "sending message");
        format!("Subject: {subject}\nBody: {body}")
    }
}

impl MessageSender for SmsSender {
    fn send_message(&self, subject: &str, body: &str) -> String {
        info!(channel = "sms", subject, "sending message");
        format!("{subject} - {body}")
    }
}

impl MessageSender for PushNotificationSender {
    fn send_message(&self, subject: &str, body: &str) -> String {
        info!(channel = "push", subject, "sending message");
        format!("Title: {subject}\nBody: {body}")
    }
}

// =============================================================================
// Abstractions
// =============================================================================

pub trait Notification {
    fn sender(&self) -> &dyn MessageSender;
    fn subject(&self) -> &'static str;
    fn body(&self, message: &str) -> String;

    fn send(&self, message: &str) -> String {
        let subject = self.subject();
        info!(subject, "preparing notification");
        self.sender().send_message(subject, &self.body(message))
    }
}

macro_rules! notification {
    ($name:ident, $subject:expr, $prefix:expr) => {
        pub struct $name {
            sender: Rc<dyn MessageSender>,
        }

        impl $name {
            pub fn new(sender: Rc<dyn MessageSender>) -> Self {
                Self { sender }
            }
        }

        impl Notification for $name {
            fn sender(&self) -> &dyn MessageSender {
                self.sender.as_ref()
            }

            fn subject(&self) -> &'static str {
                $subject
            }

            fn body(&self, message: &str) -> String {
                format!("{} {message}", $prefix)
            }
        }
    };
}

notification!(InfoNotification, "Info", "[INFO]");
notification!(WarningNotification, "Warning", "[WARNING]");
notification!(UrgentNotification, "** URGENT **", "[URGENT ACTION REQUIRED]");

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn mock_expecting(subject: &'static str, body: &'static str) -> Rc<dyn MessageSender> {
        let mut sender = MockMessageSender::new();
        sender
            .expect_send_message()
            .with(eq(subject), eq(body))
            .times(1)
            .returning(|s, b| format!("{s}|{b}"));
        Rc::new(sender)
    }

    #[test]
    fn test_info_notification() {
        let note = InfoNotification::new(mock_expecting("Info", "[INFO] Test info message."));
        assert_eq!(note.send("Test info message."), "Info|[INFO] Test info message.");
    }

    #[test]
    fn test_warning_notification() {
        let note = WarningNotification::new(mock_expecting("Warning", "[WARNING] disk"));
        note.send("disk");
    }

    #[test]
    fn test_urgent_notification() {
        let note = UrgentNotification::new(mock_expecting(
            "** URGENT **",
            "[URGENT ACTION REQUIRED] down",
        ));
        note.send("down");
    }

    #[test]
    fn test_notifications_share_one_sender() {
        let mut sender = MockMessageSender::new();
        sender
            .expect_send_message()
            .times(2)
            .returning(|s, b| format!("{s}|{b}"));
        let sender: Rc<dyn MessageSender> = Rc::new(sender);

        let info = InfoNotification::new(Rc::clone(&sender));
        let urgent = UrgentNotification::new(sender);
        assert_eq!(info.send("Info 1"), "Info|[INFO] Info 1");
        assert_eq!(
            urgent.send("Urgent 1"),
            "** URGENT **|[URGENT ACTION REQUIRED] Urgent 1"
        );
    }

    #[test]
    fn test_sender_formats() {
        assert_eq!(SmsSender.send_message("Info", "[INFO] hi"), "Info - [INFO] hi");
        assert_eq!(
            EmailSender.send_message("Warning", "body"),
            "Subject: Warning\nBody: body"
        );
        assert_eq!(
            PushNotificationSender.send_message("T", "B"),
            "Title: T\nBody: B"
        );
    }
}
