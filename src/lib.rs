//! # Design Patterns in Rust
//!
//! Each classic Gang-of-Four pattern lives in its own module with a small,
//! realistic scenario and its own tests. The modules never call each other.
//!
//! ## Behavioral
//! - Chain of Responsibility: HTTP request middleware
//! - Command: task scheduler
//! - Interpreter: record query language
//! - Iterator: chunked data stream
//! - Mediator: chat room
//! - Memento: document editor with undo/redo
//! - Observer: event monitoring
//! - State: order processing
//! - Strategy: payment processing
//! - Template Method: data export
//! - Visitor: code analyzer
//!
//! ## Creational
//! - Abstract Factory: LLM providers
//! - Builder: dynamic workflow
//! - Factory Method: document processor
//! - Prototype: molecular simulation
//! - Singleton: configuration manager
//!
//! ## Structural
//! - Adapter: logging adapter
//! - Bridge: notification system
//! - Composite: file system
//! - Decorator: request pipeline
//! - Facade: video streaming
//! - Flyweight: map rendering
//! - Proxy: lazy image loading
//!
//! Run an example with: `cargo run --bin <pattern>`

pub mod behavioral;
pub mod creational;
pub mod logging;
pub mod structural;
