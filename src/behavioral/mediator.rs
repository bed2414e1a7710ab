//! # Mediator: chat room
//!
//! Users never reference each other. They hold a weak handle to the room and
//! the room decides who receives what.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MediatorError {
    #[error("user '{0}' is no longer attached to a chat room")]
    RoomClosed(String),
}

pub trait ChatMediator {
    fn add_user(&mut self, user: Rc<ChatUser>) -> bool;
    fn remove_user(&mut self, name: &str) -> bool;
    fn send_message(&self, message: &str, sender: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedMessage {
    pub from: String,
    pub text: String,
}

// =============================================================================
// Concrete mediator
// =============================================================================

#[derive(Default)]
pub struct ChatRoom {
    users: Vec<Rc<ChatUser>>,
}

impl ChatRoom {
    pub fn new() -> Self {
        info!("chat room created");
        Self::default()
    }

    /// A room ready to be shared with its users.
    pub fn shared() -> Rc<RefCell<ChatRoom>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn user_names(&self) -> Vec<&str> {
        self.users.iter().map(|user| user.name()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.users.iter().any(|user| user.name() == name)
    }
}

impl ChatMediator for ChatRoom {
    fn add_user(&mut self, user: Rc<ChatUser>) -> bool {
        if self.contains(user.name()) {
            warn!(user = user.name(), "already in the chat room");
            return false;
        }
        info!(user = user.name(), "joined the chat room");
        self.users.push(user);
        true
    }

    fn remove_user(&mut self, name: &str) -> bool {
        let before = self.users.len();
        self.users.retain(|user| user.name() != name);
        let removed = self.users.len() != before;
        if removed {
            info!(user = name, "left the chat room");
        } else {
            warn!(user = name, "not in the chat room");
        }
        removed
    }

    fn send_message(&self, message: &str, sender: &str) {
        info!(sender, message, "broadcasting");
        for user in self.users.iter().filter(|user| user.name() != sender) {
            user.receive(message, sender);
        }
    }
}

// =============================================================================
// Colleague
// =============================================================================

pub struct ChatUser {
    name: String,
    mediator: Weak<RefCell<dyn ChatMediator>>,
    inbox: RefCell<Vec<ReceivedMessage>>,
}

impl ChatUser {
    pub fn new<M: ChatMediator + 'static>(name: impl Into<String>, mediator: &Rc<RefCell<M>>) -> Rc<Self> {
        let mediator: Rc<RefCell<dyn ChatMediator>> = mediator.clone();
        Rc::new(Self {
            name: name.into(),
            mediator: Rc::downgrade(&mediator),
            inbox: RefCell::new(Vec::new()),
        })
    }

    /// Creates the user and registers it with the room.
    pub fn join<M: ChatMediator + 'static>(name: impl Into<String>, mediator: &Rc<RefCell<M>>) -> Rc<Self> {
        let user = Self::new(name, mediator);
        mediator.borrow_mut().add_user(Rc::clone(&user));
        user
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn send(&self, message: &str) -> Result<(), MediatorError> {
        let mediator = self
            .mediator
            .upgrade()
            .ok_or_else(|| MediatorError::RoomClosed(self.name.clone()))?;
        debug!(user = %self.name, message, "sending through mediator");
        mediator.borrow().send_message(message, &self.name);
        Ok(())
    }

    pub fn receive(&self, message: &str, sender: &str) {
        debug!(user = %self.name, sender, message, "received");
        self.inbox.borrow_mut().push(ReceivedMessage {
            from: sender.to_string(),
            text: message.to_string(),
        });
    }

    pub fn inbox(&self) -> Vec<ReceivedMessage> {
        self.inbox.borrow().clone()
    }
}
