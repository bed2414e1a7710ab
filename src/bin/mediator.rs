use anyhow::Result;
use colored::Colorize;
use design_patterns::behavioral::mediator::{ChatMediator, ChatRoom, ChatUser};
use design_patterns::logging;

fn main() -> Result<()> {
    logging::init();
    println!("{}", "=== Mediator: chat room ===".bold());

    let room = ChatRoom::shared();
    let alice = ChatUser::join("Alice", &room);
    let bob = ChatUser::join("Bob", &room);
    let charlie = ChatUser::join("Charlie", &room);

    alice.send("Hi everyone!")?;
    bob.send("Hello Alice!")?;

    room.borrow_mut().remove_user("Charlie");
    charlie.send("Is anyone still here?")?;

    for user in [&alice, &bob, &charlie] {
        println!("\n{} inbox:", user.name().cyan());
        for message in user.inbox() {
            println!("  {}: {}", message.from.yellow(), message.text);
        }
    }

    drop(room);
    if let Err(err) = alice.send("Hello?") {
        println!("\n{} {err}", "after closing the room:".red());
    }
    Ok(())
}
