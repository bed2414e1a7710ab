use std::rc::Rc;

use colored::Colorize;
use design_patterns::logging;
use design_patterns::structural::bridge::{
    EmailSender, InfoNotification, MessageSender, Notification, PushNotificationSender, SmsSender,
    UrgentNotification, WarningNotification,
};

fn main() {
    logging::init();
    println!("{}", "=== Bridge: notification system ===".bold());

    let email: Rc<dyn MessageSender> = Rc::new(EmailSender);
    let sms: Rc<dyn MessageSender> = Rc::new(SmsSender);
    let push: Rc<dyn MessageSender> = Rc::new(PushNotificationSender);

    let sends: [(&str, Box<dyn Notification>, &str); 6] = [
        ("info / email", Box::new(InfoNotification::new(email.clone())), "System update scheduled for tonight."),
        ("info / sms", Box::new(InfoNotification::new(sms.clone())), "Maintenance window extended by 1 hour."),
        ("warning / push", Box::new(WarningNotification::new(push.clone())), "Disk space reaching 85% on SRV-01."),
        ("warning / email", Box::new(WarningNotification::new(email)), "API response times are slightly elevated."),
        ("urgent / sms", Box::new(UrgentNotification::new(sms)), "Critical service XYZ is down!"),
        ("urgent / push", Box::new(UrgentNotification::new(push)), "Security breach detected on account 'admin'!"),
    ];

    for (label, notification, message) in sends {
        println!("\n{}", label.cyan());
        println!("{}", notification.send(message));
    }
}
